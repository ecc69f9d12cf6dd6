//! Consistent JSON error responses.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use cadastro_core::DomainError;
use cadastro_infra::StoreError;

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::InvalidCnpj(_) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_cnpj", err.to_string())
        }
    }
}

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::Duplicate => json_error(
            StatusCode::CONFLICT,
            "duplicate_cnpj",
            "company already registered",
        ),
        StoreError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "company not found"),
        StoreError::Corrupted(e) => {
            tracing::error!("corrupted record surfaced on read: {e}");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "store_error",
                "stored record failed validation",
            )
        }
        StoreError::Db(e) => {
            tracing::error!("storage fault: {e}");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "store_error",
                "storage failure",
            )
        }
    }
}
