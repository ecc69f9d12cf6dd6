//! Login: credential check and token issuance.

use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};
use chrono::{Duration, Utc};

use cadastro_auth::{Credentials, Hs256Jwt};

use crate::app::{dto, errors};

/// Everything the login handler needs: the signer, the single configured
/// credential pair, and the token lifetime.
#[derive(Clone)]
pub struct LoginState {
    pub jwt: Arc<Hs256Jwt>,
    pub credentials: Credentials,
    pub token_ttl: Duration,
}

pub async fn login(
    Extension(state): Extension<LoginState>,
    Json(body): Json<dto::LoginRequest>,
) -> axum::response::Response {
    if !state.credentials.matches(&body.username, &body.password) {
        return errors::json_error(
            StatusCode::UNAUTHORIZED,
            "invalid_credentials",
            "invalid credentials",
        );
    }

    match state.jwt.issue(&body.username, state.token_ttl, Utc::now()) {
        Ok(token) => (
            StatusCode::OK,
            Json(serde_json::json!({ "access_token": token })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("token issuance failed: {e}");
            errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "token_error",
                "failed to issue token",
            )
        }
    }
}
