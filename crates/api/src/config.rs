//! Environment-driven configuration.

use chrono::Duration;

/// Runtime configuration, read once at startup and threaded through the
/// application explicitly (no globals).
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub database_url: String,
    pub jwt_secret: String,
    pub api_username: String,
    pub api_password: String,
    pub token_ttl: Duration,
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// Everything has a dev default so the service comes up locally with no
    /// setup; the secret-bearing variables warn loudly when defaulted.
    pub fn from_env() -> Self {
        Self {
            bind_addr: env_or("BIND_ADDR", "0.0.0.0:8080"),
            database_url: env_or("DATABASE_URL", "sqlite://companies.db?mode=rwc"),
            jwt_secret: env_or_insecure("JWT_SECRET", "dev-secret"),
            api_username: env_or_insecure("API_USERNAME", "admin"),
            api_password: env_or_insecure("API_PASSWORD", "admin"),
            token_ttl: token_ttl_from_env(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(v) if !v.is_empty() => v,
        _ => default.to_string(),
    }
}

fn env_or_insecure(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(v) if !v.is_empty() => v,
        _ => {
            tracing::warn!("{key} not set; using insecure dev default");
            default.to_string()
        }
    }
}

fn token_ttl_from_env() -> Duration {
    std::env::var("TOKEN_TTL_MINUTES")
        .ok()
        .and_then(|v| v.parse::<i64>().ok())
        .map(Duration::minutes)
        .unwrap_or_else(|| Duration::minutes(60))
}
