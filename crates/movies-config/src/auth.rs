// ============================================================================
// Authentication Configuration
// ============================================================================

use crate::constants::{
    DEFAULT_AUTH_AUDIENCE, DEFAULT_AUTH_HTTP_TIMEOUT_SECS, DEFAULT_AUTH_KEY_REFRESH_INTERVAL_SECS,
    DEFAULT_AUTH_LEEWAY_SECS,
};
use crate::env::{self, Lookup};
use anyhow::Result;

/// Settings for verifying bearer tokens against the external issuer
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// Issuer URL, e.g. `https://dev-123456.okta.com/oauth2/default`.
    /// Stored without a trailing slash.
    pub issuer: String,
    /// Expected `cid` claim
    pub client_id: String,
    /// Expected `aud` claim
    pub audience: String,
    /// Timeout for discovery and key-set requests to the issuer
    pub http_timeout_secs: u64,
    /// Allowed clock skew when checking `exp`/`nbf`
    pub leeway_secs: u64,
    /// Minimum time between two key-set fetches triggered by unknown `kid`s
    pub key_refresh_interval_secs: u64,
}

impl AuthConfig {
    pub(crate) fn from_lookup(lookup: Lookup<'_>) -> Result<Self> {
        let issuer = env::required(lookup, "ISSUER")?
            .trim()
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            issuer,
            client_id: env::required(lookup, "CLIENT_ID")?,
            audience: env::string_or(lookup, "AUTH_AUDIENCE", DEFAULT_AUTH_AUDIENCE),
            http_timeout_secs: env::parse_or(
                lookup,
                "AUTH_HTTP_TIMEOUT_SECS",
                DEFAULT_AUTH_HTTP_TIMEOUT_SECS,
            )?,
            leeway_secs: env::parse_or(lookup, "AUTH_LEEWAY_SECS", DEFAULT_AUTH_LEEWAY_SECS)?,
            key_refresh_interval_secs: env::parse_or(
                lookup,
                "AUTH_KEY_REFRESH_INTERVAL_SECS",
                DEFAULT_AUTH_KEY_REFRESH_INTERVAL_SECS,
            )?,
        })
    }
}
