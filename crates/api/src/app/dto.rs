//! Request/response DTOs and JSON mapping helpers.

use serde::Deserialize;

use cadastro_core::Company;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateCompanyRequest {
    pub cnpj: String,
    pub razao_social: String,
    pub nome_fantasia: String,
    pub cnae: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCompanyRequest {
    pub nome_fantasia: Option<String>,
    pub cnae: Option<String>,
}

/// Query parameters for the listing endpoint. `start` is the 1-indexed
/// page number.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub start: Option<u32>,
    pub limit: Option<u32>,
    pub sort: Option<String>,
    pub dir: Option<String>,
}

// -------------------------
// Response mapping
// -------------------------

/// Wire shape of a company: both codes in their punctuated display forms.
pub fn company_to_json(company: &Company) -> serde_json::Value {
    serde_json::json!({
        "cnpj": company.cnpj().formatted(),
        "razao_social": company.legal_name(),
        "nome_fantasia": company.trade_name(),
        "cnae": company.cnae().formatted(),
    })
}
