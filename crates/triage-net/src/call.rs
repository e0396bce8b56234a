//! Client for the external voice-calling REST API.

use reqwest::Client;
use serde::Serialize;
use serde_json::{Map, Value};
use triage_core::TriageError;

const DEFAULT_API_BASE: &str = "https://api.bolna.dev";

/// Credentials and endpoint for the calling service.
#[derive(Debug, Clone)]
pub struct CallConfig {
    pub agent_id: String,
    pub api_token: String,
    pub api_base: Option<String>,
}

#[derive(Serialize)]
struct CallRequest<'a> {
    agent_id: &'a str,
    recipient_phone_number: &'a str,
    user_data: Map<String, Value>,
}

/// Dispatches outbound calls through the calling service.
///
/// Calls are fire-and-forget from this service's perspective: the upstream
/// response body is passed back to the caller verbatim and nothing is
/// recorded against a case.
pub struct CallClient {
    client: Client,
    agent_id: String,
    api_token: String,
    api_base: String,
}

impl CallClient {
    pub fn new(config: CallConfig) -> Self {
        Self {
            client: Client::new(),
            agent_id: config.agent_id,
            api_token: config.api_token,
            api_base: config
                .api_base
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        }
    }

    fn call_url(&self) -> String {
        format!("{}/call", self.api_base.trim_end_matches('/'))
    }

    /// Initiates a call to `phone_number`, forwarding `user_data` untouched.
    pub async fn initiate(
        &self,
        phone_number: &str,
        user_data: Map<String, Value>,
    ) -> Result<Value, TriageError> {
        let request = CallRequest {
            agent_id: &self.agent_id,
            recipient_phone_number: phone_number,
            user_data,
        };

        let response = self
            .client
            .post(self.call_url())
            .bearer_auth(&self.api_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| TriageError::ExternalApi(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TriageError::ExternalApi(format!(
                "calling API error {}: {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| TriageError::ExternalApi(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_url_joins_base() {
        let client = CallClient::new(CallConfig {
            agent_id: "agent".into(),
            api_token: "token".into(),
            api_base: Some("http://localhost:4000/".into()),
        });
        assert_eq!(client.call_url(), "http://localhost:4000/call");
    }

    #[test]
    fn call_request_serializes_recipient() {
        let mut user_data = Map::new();
        user_data.insert("reason".into(), Value::String("General inquiry".into()));
        let request = CallRequest {
            agent_id: "agent-1",
            recipient_phone_number: "+10123456789",
            user_data,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["agent_id"], "agent-1");
        assert_eq!(value["recipient_phone_number"], "+10123456789");
        assert_eq!(value["user_data"]["reason"], "General inquiry");
    }
}
