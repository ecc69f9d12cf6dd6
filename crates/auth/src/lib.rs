//! `cadastro-auth` — authentication boundary for the company registry.
//!
//! This crate is intentionally decoupled from HTTP and storage: it models
//! token claims, issues/verifies HS256 bearer tokens, and checks the single
//! configured login credential pair.

pub mod claims;
pub mod credentials;
pub mod token;

pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use credentials::Credentials;
pub use token::{Hs256Jwt, TokenError};
