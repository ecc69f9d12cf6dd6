//! The single configured login credential pair.

/// Login credentials accepted by the service.
///
/// There is no user table: one username/password pair is supplied through
/// configuration and every successful login is bound to that username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Check a supplied pair against the configured one.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_only_the_exact_pair() {
        let creds = Credentials::new("admin", "s3cret");

        assert!(creds.matches("admin", "s3cret"));
        assert!(!creds.matches("admin", "wrong"));
        assert!(!creds.matches("other", "s3cret"));
        assert!(!creds.matches("", ""));
    }
}
