//! Core domain types and error definitions for the triage intake service.
//!
//! This crate provides the fundamental types shared across the workspace:
//!
//! - [`TriageError`] — Error type for classification and dispatch operations
//! - [`TriageAnalysis`] and [`Severity`] — Structured classifier output
//! - [`CaseRecord`], [`NotificationRecord`], [`UserRecord`] — Stored rows

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while classifying intake data or dispatching calls.
#[derive(Error, Debug)]
pub enum TriageError {
    /// LLM completion request failed.
    #[error("LLM request failed: {0}")]
    Llm(String),

    /// Failed to parse structured output from the LLM.
    #[error("Failed to parse classifier output: {0}")]
    Parse(String),

    /// External API call failed.
    #[error("External API error: {0}")]
    ExternalApi(String),

    /// Required credentials are not configured.
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),
}

impl From<serde_json::Error> for TriageError {
    fn from(err: serde_json::Error) -> Self {
        TriageError::Parse(err.to_string())
    }
}

/// Severity assigned by the triage classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured analysis returned by the triage classifier.
///
/// This is the exact JSON shape the system prompt asks the model for; any
/// deviation in the model's reply fails deserialization and surfaces as a
/// [`TriageError::Parse`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageAnalysis {
    pub is_emergency: bool,
    pub severity_level: Severity,
    pub reason: String,
    pub recommended_action: String,
    pub processed_data: serde_json::Value,
    pub required_specialists: Vec<String>,
}

/// A persisted medical case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseRecord {
    /// Sequential store identifier.
    pub id: i64,
    /// Display identifier, `CASE-<zero-padded id>`. Assigned post-insert.
    pub case_id: Option<String>,
    /// RFC 3339 timestamp of webhook receipt.
    pub timestamp: String,
    pub is_emergency: bool,
    pub analysis: serde_json::Value,
    pub original_data: serde_json::Value,
}

/// A persisted notification row.
///
/// Schema-only in this design: the dashboard reads notifications but no
/// endpoint writes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRecord {
    pub id: i64,
    pub case_id: i64,
    pub timestamp: String,
    pub status: String,
    pub patient_data: serde_json::Value,
}

/// A registered user.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    /// Salted PBKDF2 hash, never the plaintext password.
    pub password_hash: String,
}

/// Derives the display case id from the sequential store id.
pub fn display_case_id(id: i64) -> String {
    format!("CASE-{:04}", id)
}
