//! Request/application context passed to handlers.

use cadastro_infra::CompanyStore;

/// Application context: service handles initialized at startup and handed
/// to every handler through a request extension.
#[derive(Clone)]
pub struct AppContext {
    store: CompanyStore,
}

impl AppContext {
    pub fn new(store: CompanyStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &CompanyStore {
        &self.store
    }
}

/// Principal context for a request (the authenticated identity).
///
/// Inserted by the auth middleware; present for all company routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    username: String,
}

impl PrincipalContext {
    pub fn new(username: String) -> Self {
        Self { username }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}
