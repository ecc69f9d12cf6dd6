//! Bearer-token auth middleware.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use cadastro_auth::Hs256Jwt;

use crate::app::errors::json_error;
use crate::context::PrincipalContext;

#[derive(Clone)]
pub struct AuthState {
    pub jwt: Arc<Hs256Jwt>,
}

/// Verify the bearer token and attach the principal, or reject with a JSON
/// 401 before any handler (and therefore any storage access) runs.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let Some(token) = extract_bearer(req.headers()) else {
        return json_error(
            StatusCode::UNAUTHORIZED,
            "unauthenticated",
            "missing bearer token",
        );
    };

    match state.jwt.verify(token, Utc::now()) {
        Ok(claims) => {
            req.extensions_mut().insert(PrincipalContext::new(claims.sub));
            next.run(req).await
        }
        Err(e) => json_error(StatusCode::UNAUTHORIZED, "unauthenticated", e.to_string()),
    }
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let header = header.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        return None;
    }
    Some(token)
}
