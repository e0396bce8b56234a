//! Signup and login endpoints.
//!
//! Passwords are stored as salted PBKDF2 hashes, never plaintext. Login
//! returns a status message only; no session or token is issued.

use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::info;

use crate::dto::{AuthResponse, LoginRequest, SignupRequest};
use crate::error::AppError;
use crate::password;
use crate::ServerState;

/// POST /auth/signup - Registers a new user. Duplicate usernames conflict.
pub async fn signup(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let hash = password::hash_password(&req.password);
    state.store.create_user(&req.username, &hash)?;

    info!(username = %req.username, "user created");

    Ok(Json(AuthResponse {
        status: "success",
        message: "User created successfully",
        username: req.username,
    }))
}

/// POST /auth/login - Verifies credentials against the stored hash.
pub async fn login(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let user = state.store.find_user(&req.username)?;

    let verified = user
        .map(|u| password::verify_password(&req.password, &u.password_hash))
        .unwrap_or(false);

    if !verified {
        return Err(AppError::Unauthorized("Invalid username or password".into()));
    }

    Ok(Json(AuthResponse {
        status: "success",
        message: "Login successful",
        username: req.username,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
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

    fn creds(username: &str, password: &str) -> SignupRequest {
        SignupRequest {
            username: username.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn signup_then_login_succeeds() {
        let state = test_state();
        signup(State(state.clone()), Json(creds("alice", "secret")))
            .await
            .unwrap();

        let Json(resp) = login(
            State(state),
            Json(LoginRequest {
                username: "alice".into(),
                password: "secret".into(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(resp.message, "Login successful");
    }

    #[tokio::test]
    async fn duplicate_signup_conflicts() {
        let state = test_state();
        signup(State(state.clone()), Json(creds("alice", "secret")))
            .await
            .unwrap();

        let err = signup(State(state), Json(creds("alice", "other")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let state = test_state();
        signup(State(state.clone()), Json(creds("alice", "secret")))
            .await
            .unwrap();

        let err = login(
            State(state),
            Json(LoginRequest {
                username: "alice".into(),
                password: "wrong".into(),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn unknown_user_is_unauthorized() {
        let state = test_state();
        let err = login(
            State(state),
            Json(LoginRequest {
                username: "ghost".into(),
                password: "pw".into(),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
