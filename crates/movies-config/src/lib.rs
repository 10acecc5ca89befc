// ============================================================================
// Movies Config - Centralized configuration management
// ============================================================================
//
// Loads every setting the service needs from environment variables (and an
// optional `.env` file) exactly once at process start.
//
// ============================================================================

mod auth;
mod constants;
mod env;
mod store;

pub use auth::AuthConfig;
pub use constants::{
    API_PREFIX, DEFAULT_AUTH_AUDIENCE, DEFAULT_KEY_PREFIX, DEFAULT_PORT, DEFAULT_REDIS_URL,
    DEFAULT_SHUTDOWN_GRACE_SECS,
};
pub use store::{StoreBackend, StoreConfig};

use anyhow::Result;
use constants::*;

/// Main configuration structure for the movies service
#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub bind_address: String,
    pub rust_log: String,
    /// How long in-flight requests may drain after a shutdown signal
    pub shutdown_grace_secs: u64,

    // Sub-configurations
    pub store: StoreConfig,
    pub auth: AuthConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(&|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self> {
        let port = env::parse_or(lookup, "PORT", DEFAULT_PORT)?;

        Ok(Self {
            port,
            bind_address: format!("[::]:{}", port),
            rust_log: env::string_or(lookup, "RUST_LOG", DEFAULT_RUST_LOG),
            shutdown_grace_secs: env::parse_or(
                lookup,
                "SHUTDOWN_GRACE_SECS",
                DEFAULT_SHUTDOWN_GRACE_SECS,
            )?,
            store: StoreConfig::from_lookup(lookup)?,
            auth: AuthConfig::from_lookup(lookup)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(&|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults_with_required_auth_settings() {
        let config = load(&[
            ("ISSUER", "https://issuer.example.com/oauth2/default/"),
            ("CLIENT_ID", "0oa-client"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.bind_address, "[::]:8080");
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.shutdown_grace_secs, 5);
        assert_eq!(config.store.backend, StoreBackend::Redis);
        assert_eq!(config.store.redis_url, "redis://127.0.0.1:6379");
        assert_eq!(config.store.key_prefix, "movies");
        assert_eq!(config.auth.issuer, "https://issuer.example.com/oauth2/default");
        assert_eq!(config.auth.client_id, "0oa-client");
        assert_eq!(config.auth.audience, "api://default");
        assert_eq!(config.auth.key_refresh_interval_secs, 30);
    }

    #[test]
    fn test_missing_issuer_is_rejected() {
        let err = load(&[("CLIENT_ID", "0oa-client")]).unwrap_err();
        assert!(err.to_string().contains("ISSUER"));
    }

    #[test]
    fn test_empty_client_id_counts_as_missing() {
        let err = load(&[("ISSUER", "https://issuer.example.com"), ("CLIENT_ID", "  ")])
            .unwrap_err();
        assert!(err.to_string().contains("CLIENT_ID"));
    }

    #[test]
    fn test_malformed_port_is_rejected() {
        let err = load(&[
            ("ISSUER", "https://issuer.example.com"),
            ("CLIENT_ID", "0oa-client"),
            ("PORT", "eighty"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("ISSUER", "https://issuer.example.com"),
            ("CLIENT_ID", "0oa-client"),
            ("PORT", "9000"),
            ("STORE_BACKEND", "Memory"),
            ("MOVIES_KEY_PREFIX", "films"),
            ("AUTH_AUDIENCE", "api://movies"),
            ("SHUTDOWN_GRACE_SECS", "30"),
            ("AUTH_KEY_REFRESH_INTERVAL_SECS", "0"),
        ])
        .unwrap();

        assert_eq!(config.bind_address, "[::]:9000");
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.store.key_prefix, "films");
        assert_eq!(config.auth.audience, "api://movies");
        assert_eq!(config.shutdown_grace_secs, 30);
        assert_eq!(config.auth.key_refresh_interval_secs, 0);
    }

    #[test]
    fn test_redis_url_password_is_masked() {
        let config = load(&[
            ("ISSUER", "https://issuer.example.com"),
            ("CLIENT_ID", "0oa-client"),
            ("REDIS_URL", "redis://:hunter2@cache.internal:6379"),
        ])
        .unwrap();

        assert_eq!(config.store.redis_url_safe(), "redis://***@cache.internal:6379");
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let err = load(&[
            ("ISSUER", "https://issuer.example.com"),
            ("CLIENT_ID", "0oa-client"),
            ("STORE_BACKEND", "dynamo"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("STORE_BACKEND"));
    }
}
