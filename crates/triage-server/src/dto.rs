//! HTTP request/response DTOs.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use triage_core::{CaseRecord, NotificationRecord};

// === Webhook ===

#[derive(Debug, Deserialize)]
pub struct WebhookRequest {
    /// Free-form extracted fields, e.g. name, location, phone, symptoms.
    #[serde(default)]
    pub extracted_data: Option<Map<String, Value>>,
}

#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    pub message: String,
}

impl WebhookResponse {
    /// Acknowledgment for an empty payload: nothing was stored.
    pub fn no_data() -> Self {
        Self {
            status: "success",
            case_id: None,
            severity: None,
            message: "No data to process".into(),
        }
    }

    pub fn processed(case_id: String, severity: String, is_emergency: bool) -> Self {
        let message = if is_emergency {
            "Emergency data processed (call via /call)"
        } else {
            "Non-emergency data processed"
        };
        Self {
            status: "success",
            case_id: Some(case_id),
            severity: Some(severity),
            message: message.into(),
        }
    }
}

// === Call ===

#[derive(Debug, Deserialize)]
pub struct CallRequest {
    pub phone_number: String,
    #[serde(default)]
    pub user_data: Option<Map<String, Value>>,
}

#[derive(Debug, Serialize)]
pub struct CallResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub phone_number: String,
    pub call_response: Value,
}

// === Dashboard ===

#[derive(Debug, Serialize)]
pub struct DashboardData {
    pub emergency_cases: Vec<CaseRecord>,
    pub non_emergency_cases: Vec<CaseRecord>,
    pub notifications: Vec<NotificationRecord>,
}

// === Auth ===

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub username: String,
}
