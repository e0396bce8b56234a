//! HTTP route handlers for the triage server.

pub mod auth;
pub mod call;
pub mod display;
pub mod webhook;

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}
