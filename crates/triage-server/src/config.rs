//! Environment-sourced configuration, read once at startup.

use std::env;

use triage_net::{CallConfig, LlmConfig};

const DEFAULT_DB_PATH: &str = "data/triage.db";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Startup configuration for the server binary.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    pub bind_addr: String,
    pub llm_api_key: String,
    pub llm_api_base: Option<String>,
    /// Calling-service credentials. Absent credentials are tolerated at
    /// startup and rejected at call time.
    pub call_agent_id: Option<String>,
    pub call_api_token: Option<String>,
    pub call_api_base: Option<String>,
}

impl Config {
    /// Reads configuration from the environment (after `dotenvy` has run).
    pub fn from_env() -> Self {
        Self {
            db_path: env::var("TRIAGE_DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.into()),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into()),
            llm_api_key: env::var("GROQ_API_KEY").unwrap_or_default(),
            llm_api_base: env::var("GROQ_API_BASE").ok(),
            call_agent_id: env::var("BOLNA_AGENT_ID").ok(),
            call_api_token: env::var("BOLNA_API_TOKEN").ok(),
            call_api_base: env::var("BOLNA_API_BASE").ok(),
        }
    }

    pub fn llm_config(&self) -> LlmConfig {
        LlmConfig {
            api_key: self.llm_api_key.clone(),
            api_base: self.llm_api_base.clone(),
        }
    }

    /// Builds the call-client config, or `None` when credentials are missing.
    pub fn call_config(&self) -> Option<CallConfig> {
        match (&self.call_agent_id, &self.call_api_token) {
            (Some(agent_id), Some(api_token)) => Some(CallConfig {
                agent_id: agent_id.clone(),
                api_token: api_token.clone(),
                api_base: self.call_api_base.clone(),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_config_requires_both_credentials() {
        let mut config = Config {
            db_path: "x".into(),
            bind_addr: "x".into(),
            llm_api_key: "k".into(),
            llm_api_base: None,
            call_agent_id: Some("agent".into()),
            call_api_token: None,
            call_api_base: None,
        };
        assert!(config.call_config().is_none());

        config.call_api_token = Some("token".into());
        let call = config.call_config().unwrap();
        assert_eq!(call.agent_id, "agent");
    }
}
