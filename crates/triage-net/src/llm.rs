//! OpenAI-compatible chat completion client for triage classification.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use triage_core::{TriageAnalysis, TriageError};

use crate::prompt::{build_user_message, TRIAGE_SYSTEM_PROMPT};

const DEFAULT_API_BASE: &str = "https://api.groq.com/openai/v1";
const TRIAGE_MODEL: &str = "llama-3.3-70b-versatile";
const TEMPERATURE: f32 = 0.5;
const MAX_COMPLETION_TOKENS: u32 = 1024;

/// Configuration for the LLM completion client.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    /// Override for self-hosted or mock endpoints. Defaults to the Groq API.
    pub api_base: Option<String>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: &'static str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_completion_tokens: u32,
    top_p: f32,
    stream: bool,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

/// Seam between the webhook intake pipeline and the external LLM.
///
/// The intake service takes a `dyn Classifier` so tests can substitute a
/// stub for the network client.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, extracted: &Map<String, Value>) -> Result<TriageAnalysis, TriageError>;
}

/// Client for the OpenAI-compatible completion API used for triage.
pub struct LlmClient {
    client: Client,
    api_key: String,
    api_base: String,
}

impl LlmClient {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key,
            api_base: config
                .api_base
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }
}

#[async_trait]
impl Classifier for LlmClient {
    async fn classify(&self, extracted: &Map<String, Value>) -> Result<TriageAnalysis, TriageError> {
        let content_str = serde_json::to_string(extracted)?;

        let request = ChatRequest {
            model: TRIAGE_MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: TRIAGE_SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: build_user_message(&content_str),
                },
            ],
            temperature: TEMPERATURE,
            max_completion_tokens: MAX_COMPLETION_TOKENS,
            top_p: 1.0,
            stream: false,
        };

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| TriageError::Llm(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TriageError::Llm(format!(
                "completion API error {}: {}",
                status, body
            )));
        }

        let resp: ChatResponse = response
            .json()
            .await
            .map_err(|e| TriageError::Llm(e.to_string()))?;

        let content = resp
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| TriageError::Llm("completion API returned no choices".into()))?;

        tracing::debug!(len = content.len(), "received classifier output");

        // The model is instructed to reply with bare JSON; anything else is
        // a parse failure surfaced to the webhook caller.
        serde_json::from_str(&content).map_err(|e| TriageError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completions_url_joins_base() {
        let client = LlmClient::new(LlmConfig {
            api_key: "k".into(),
            api_base: Some("http://localhost:9999/v1/".into()),
        });
        assert_eq!(client.completions_url(), "http://localhost:9999/v1/chat/completions");

        let default = LlmClient::new(LlmConfig { api_key: "k".into(), api_base: None });
        assert_eq!(
            default.completions_url(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
    }

    #[test]
    fn chat_request_serializes_expected_fields() {
        let request = ChatRequest {
            model: TRIAGE_MODEL,
            messages: vec![ChatMessage { role: "system", content: "s".into() }],
            temperature: TEMPERATURE,
            max_completion_tokens: MAX_COMPLETION_TOKENS,
            top_p: 1.0,
            stream: false,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "llama-3.3-70b-versatile");
        assert_eq!(value["max_completion_tokens"], 1024);
        assert_eq!(value["stream"], false);
    }

    #[test]
    fn choice_content_parses() {
        let raw = r#"{"choices":[{"message":{"content":"{\"ok\":true}"}}]}"#;
        let resp: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.choices[0].message.content, "{\"ok\":true}");
    }
}
