//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic validation failures. Infrastructure
/// concerns (storage faults, duplicate keys) belong to the persistence layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The supplied CNPJ failed length or check-digit validation.
    #[error("invalid cnpj: {0:?}")]
    InvalidCnpj(String),
}

impl DomainError {
    pub fn invalid_cnpj(raw: impl Into<String>) -> Self {
        Self::InvalidCnpj(raw.into())
    }
}
