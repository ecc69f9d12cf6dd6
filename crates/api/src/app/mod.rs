//! HTTP application wiring (axum router + service wiring).
//!
//! Layout:
//! - `routes/`: HTTP routes + handlers (login, companies, system)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent JSON error responses

use std::sync::Arc;

use axum::{
    Extension, Router,
    routing::{get, post},
};

use cadastro_auth::{Credentials, Hs256Jwt};
use cadastro_infra::CompanyStore;

use crate::config::Config;
use crate::context::AppContext;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub fn build_app(config: &Config, store: CompanyStore) -> Router {
    let jwt = Arc::new(Hs256Jwt::new(config.jwt_secret.as_bytes()));
    let auth_state = middleware::AuthState { jwt: jwt.clone() };

    let login_state = routes::auth::LoginState {
        jwt,
        credentials: Credentials::new(&config.api_username, &config.api_password),
        token_ttl: config.token_ttl,
    };

    let ctx = Arc::new(AppContext::new(store));

    // Protected routes: everything under /companies requires a valid token.
    let protected = Router::new()
        .nest("/companies", routes::companies::router())
        .layer(Extension(ctx))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/login", post(routes::auth::login))
        .layer(Extension(login_state))
        .merge(protected)
}
