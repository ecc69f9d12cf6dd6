//! `cadastro-infra` — persistence for the company registry.
//!
//! One concern: durable keyed storage of `Company` records in a local
//! SQLite database file, with paginated/sorted listing.

pub mod company_store;

pub use company_store::{CompanyPage, CompanyStore, SortDir, SortField, StoreError};
