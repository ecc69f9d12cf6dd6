//! `cadastro-core` — domain foundation for the company registry.
//!
//! This crate contains **pure domain** types (no infrastructure concerns):
//! the CNPJ and CNAE codecs, the `Company` entity, and the domain error
//! model.

pub mod cnae;
pub mod cnpj;
pub mod company;
pub mod error;

pub use cnae::Cnae;
pub use cnpj::Cnpj;
pub use company::{Company, CompanyPatch};
pub use error::{DomainError, DomainResult};
