//! External HTTP collaborators for the triage service.
//!
//! Two clients live here: [`LlmClient`], which sends intake data to an
//! OpenAI-compatible chat completion endpoint and parses the model's reply
//! into a [`triage_core::TriageAnalysis`], and [`CallClient`], which forwards
//! call requests to the voice-calling REST API.

mod call;
mod llm;
mod prompt;

pub use call::{CallClient, CallConfig};
pub use llm::{Classifier, LlmClient, LlmConfig};
pub use prompt::TRIAGE_SYSTEM_PROMPT;
