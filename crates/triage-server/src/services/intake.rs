//! Webhook intake pipeline: classify, persist, assign display id.

use chrono::Utc;
use serde_json::{Map, Value};
use tracing::info;
use triage_core::display_case_id;
use triage_net::Classifier;
use triage_store::CaseStore;

use crate::dto::WebhookResponse;
use crate::error::AppError;

/// Runs the full intake pipeline for one webhook payload.
///
/// An empty or absent payload is acknowledged without touching the store.
/// Classifier and store failures both collapse into a client error carrying
/// the failure text; there is no retry and no partial-success state.
pub async fn process(
    classifier: &dyn Classifier,
    store: &CaseStore,
    extracted: Option<Map<String, Value>>,
) -> Result<WebhookResponse, AppError> {
    let Some(extracted) = extracted.filter(|m| !m.is_empty()) else {
        return Ok(WebhookResponse::no_data());
    };

    let timestamp = Utc::now().to_rfc3339();

    let analysis = classifier
        .classify(&extracted)
        .await
        .map_err(|e| AppError::BadRequest(format!("Webhook error: {}", e)))?;

    let is_emergency = analysis.is_emergency;
    let severity = analysis.severity_level;

    let analysis_json = serde_json::to_value(&analysis)
        .map_err(|e| AppError::BadRequest(format!("Webhook error: {}", e)))?;
    let original_json = Value::Object(extracted);

    let id = store
        .insert_case(&timestamp, is_emergency, &analysis_json, &original_json)
        .map_err(|e| AppError::BadRequest(format!("Webhook error: {}", e)))?;

    let case_id = display_case_id(id);
    store
        .assign_case_id(id, &case_id)
        .map_err(|e| AppError::BadRequest(format!("Webhook error: {}", e)))?;

    info!(%case_id, %severity, is_emergency, "processed intake case");

    Ok(WebhookResponse::processed(
        case_id,
        severity.to_string(),
        is_emergency,
    ))
}
