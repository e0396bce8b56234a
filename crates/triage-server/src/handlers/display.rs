//! Dashboard endpoints: HTML page and JSON data.

use std::sync::Arc;

use axum::{extract::State, response::Html, Json};

use crate::dto::DashboardData;
use crate::error::AppError;
use crate::render;
use crate::ServerState;

fn query_dashboard(state: &ServerState) -> Result<DashboardData, AppError> {
    Ok(DashboardData {
        emergency_cases: state.store.list_cases(true)?,
        non_emergency_cases: state.store.list_cases(false)?,
        notifications: state.store.list_notifications()?,
    })
}

/// GET /display - HTML dashboard of all cases partitioned by emergency flag.
pub async fn dashboard(
    State(state): State<Arc<ServerState>>,
) -> Result<Html<String>, AppError> {
    let data = query_dashboard(&state)?;
    Ok(Html(render::dashboard_page(&data)))
}

/// GET /display/data - The same partitioned data as JSON.
pub async fn data(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<DashboardData>, AppError> {
    Ok(Json(query_dashboard(&state)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use triage_core::display_case_id;
    use triage_net::{LlmClient, LlmConfig};
    use triage_store::CaseStore;

    fn test_state() -> Arc<ServerState> {
        Arc::new(ServerState {
            store: CaseStore::in_memory().unwrap(),
            classifier: Arc::new(LlmClient::new(LlmConfig {
                api_key: String::new(),
                api_base: None,
            })),
            call: None,
        })
    }

    fn seed_case(state: &ServerState, emergency: bool) {
        let id = state
            .store
            .insert_case(
                "2026-01-01T00:00:00Z",
                emergency,
                &json!({"severity_level": "HIGH"}),
                &json!({}),
            )
            .unwrap();
        state.store.assign_case_id(id, &display_case_id(id)).unwrap();
    }

    #[tokio::test]
    async fn json_counts_match_store_partitions() {
        let state = test_state();
        seed_case(&state, true);
        seed_case(&state, true);
        seed_case(&state, false);

        let Json(body) = data(State(state)).await.unwrap();
        assert_eq!(body.emergency_cases.len(), 2);
        assert_eq!(body.non_emergency_cases.len(), 1);
        assert!(body.notifications.is_empty());
    }

    #[tokio::test]
    async fn html_dashboard_lists_seeded_cases() {
        let state = test_state();
        seed_case(&state, true);

        let Html(page) = dashboard(State(state)).await.unwrap();
        assert!(page.contains("CASE-0001"));
        assert!(page.contains("Emergency Cases"));
    }
}
