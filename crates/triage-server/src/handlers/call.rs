//! Call-initiation endpoint.

use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::{error, info};

use crate::dto::{CallRequest, CallResponse};
use crate::error::AppError;
use crate::ServerState;

/// POST /call - Forwards a phone number to the external calling service.
///
/// The phone number is validated before any outbound request; upstream
/// failures come back as a 500 with the upstream message.
pub async fn initiate(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<CallRequest>,
) -> Result<Json<CallResponse>, AppError> {
    if req.phone_number.trim().is_empty() {
        return Err(AppError::BadRequest("Phone number is required".into()));
    }

    let Some(call_client) = state.call.as_ref() else {
        return Err(AppError::Internal("Missing calling API credentials".into()));
    };

    let user_data = req.user_data.unwrap_or_default();

    let call_response = call_client
        .initiate(&req.phone_number, user_data)
        .await
        .map_err(|e| {
            error!("call dispatch failed: {}", e);
            AppError::Internal(format!("Call invocation failed: {}", e))
        })?;

    info!(phone_number = %req.phone_number, "call initiated");

    Ok(Json(CallResponse {
        status: "success",
        message: "Call initiated successfully",
        phone_number: req.phone_number,
        call_response,
    }))
}
