//! Webhook intake endpoint.

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::dto::{WebhookRequest, WebhookResponse};
use crate::error::AppError;
use crate::services::intake;
use crate::ServerState;

/// POST /webhook - Receives extracted medical data and runs the intake
/// pipeline.
pub async fn receive(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<WebhookRequest>,
) -> Result<Json<WebhookResponse>, AppError> {
    let response =
        intake::process(state.classifier.as_ref(), &state.store, req.extracted_data).await?;
    Ok(Json(response))
}
