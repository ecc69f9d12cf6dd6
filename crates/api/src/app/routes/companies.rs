//! Company CRUD + listing.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use cadastro_core::{Cnae, Company, CompanyPatch, cnpj};
use cadastro_infra::{SortDir, SortField};

use crate::app::{dto, errors};
use crate::context::{AppContext, PrincipalContext};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_company).get(list_companies))
        .route(
            "/:cnpj",
            get(get_company).put(update_company).delete(delete_company),
        )
}

pub async fn create_company(
    Extension(ctx): Extension<Arc<AppContext>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<dto::CreateCompanyRequest>,
) -> axum::response::Response {
    let company = match Company::new(
        &body.cnpj,
        body.razao_social,
        body.nome_fantasia,
        &body.cnae,
    ) {
        Ok(c) => c,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match ctx.store().insert(&company).await {
        Ok(()) => {
            tracing::info!(
                user = principal.username(),
                cnpj = company.cnpj().as_str(),
                "company created"
            );
            (
                StatusCode::CREATED,
                Json(serde_json::json!({ "message": "Company created successfully" })),
            )
                .into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_company(
    Extension(ctx): Extension<Arc<AppContext>>,
    Path(key): Path<String>,
) -> axum::response::Response {
    // Lookups normalize but never checksum-validate: a malformed key simply
    // matches nothing and falls through to 404.
    let key = cnpj::normalize(&key);

    match ctx.store().find(&key).await {
        Ok(company) => (
            StatusCode::OK,
            Json(serde_json::json!({ "company": dto::company_to_json(&company) })),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update_company(
    Extension(ctx): Extension<Arc<AppContext>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(key): Path<String>,
    Json(body): Json<dto::UpdateCompanyRequest>,
) -> axum::response::Response {
    let key = cnpj::normalize(&key);
    let patch = CompanyPatch {
        trade_name: body.nome_fantasia,
        cnae: body.cnae.as_deref().map(Cnae::new),
    };

    match ctx.store().update(&key, &patch).await {
        Ok(()) => {
            tracing::info!(user = principal.username(), cnpj = %key, "company updated");
            (
                StatusCode::OK,
                Json(serde_json::json!({ "message": "Company updated successfully" })),
            )
                .into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_company(
    Extension(ctx): Extension<Arc<AppContext>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(key): Path<String>,
) -> axum::response::Response {
    let key = cnpj::normalize(&key);

    match ctx.store().delete(&key).await {
        Ok(()) => {
            tracing::info!(user = principal.username(), cnpj = %key, "company deleted");
            (
                StatusCode::OK,
                Json(serde_json::json!({ "message": "Company deleted successfully" })),
            )
                .into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn list_companies(
    Extension(ctx): Extension<Arc<AppContext>>,
    Query(query): Query<dto::ListQuery>,
) -> axum::response::Response {
    let Some(sort) = SortField::parse(query.sort.as_deref().unwrap_or("id")) else {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "invalid_sort_field",
            "sort must be one of: id, cnpj, razao_social, nome_fantasia, cnae",
        );
    };
    let Some(dir) = SortDir::parse(query.dir.as_deref().unwrap_or("asc")) else {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "invalid_sort_direction",
            "dir must be asc or desc",
        );
    };

    let page = query.start.unwrap_or(1);
    let per_page = query.limit.unwrap_or(10);

    match ctx.store().list(page, per_page, sort, dir).await {
        Ok(listing) => {
            let companies: Vec<serde_json::Value> =
                listing.items.iter().map(dto::company_to_json).collect();
            (
                StatusCode::OK,
                Json(serde_json::json!({
                    "companies": companies,
                    "total_pages": listing.total_pages,
                })),
            )
                .into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}
