mod config;
mod dto;
mod error;
mod handlers;
mod password;
mod render;
mod services;

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{Request, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use triage_net::{CallClient, Classifier, LlmClient};
use triage_store::CaseStore;

use crate::config::Config;

/// Shared server state: the store and the external collaborators, all
/// constructed once in `main` and passed in explicitly.
pub struct ServerState {
    pub store: CaseStore,
    pub classifier: Arc<dyn Classifier>,
    /// Absent when calling-service credentials are not configured; the call
    /// endpoint reports that as a server error.
    pub call: Option<CallClient>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".parse().unwrap()),
        )
        .compact()
        .init();

    let config = Config::from_env();
    let state = Arc::new(init_server_state(&config)?);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    let app = Router::new()
        .route("/webhook", post(handlers::webhook::receive))
        .route("/call", post(handlers::call::initiate))
        .route("/display", get(handlers::display::dashboard))
        .route("/display/data", get(handlers::display::data))
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/login", post(handlers::auth::login))
        .layer(trace_layer)
        .route("/health", get(handlers::health))
        .layer(cors)
        .with_state(state);

    info!("Starting server on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_server_state(config: &Config) -> Result<ServerState> {
    if let Some(parent) = Path::new(&config.db_path).parent() {
        fs::create_dir_all(parent).context("failed to create db directory")?;
    }
    let store = CaseStore::open(&config.db_path).context("failed to open case store")?;
    info!("Case store initialized at {}", config.db_path);

    if config.llm_api_key.is_empty() {
        warn!("GROQ_API_KEY not configured; classification requests will fail");
    }
    let classifier: Arc<dyn Classifier> = Arc::new(LlmClient::new(config.llm_config()));

    let call = match config.call_config() {
        Some(call_config) => Some(CallClient::new(call_config)),
        None => {
            warn!("Call dispatch disabled: BOLNA_AGENT_ID / BOLNA_API_TOKEN not configured");
            None
        }
    };

    Ok(ServerState {
        store,
        classifier,
        call,
    })
}
