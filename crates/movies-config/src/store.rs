// ============================================================================
// Store Configuration
// ============================================================================

use crate::constants::{DEFAULT_KEY_PREFIX, DEFAULT_REDIS_URL};
use crate::env::{self, Lookup};
use anyhow::Result;
use std::fmt;
use std::str::FromStr;

/// Which key-value backend holds the movie records
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Redis,
    /// Process-local map; records are lost on restart
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "redis" => Ok(StoreBackend::Redis),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown store backend '{}' (expected redis or memory)", other)),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Redis => f.write_str("redis"),
            StoreBackend::Memory => f.write_str("memory"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub redis_url: String,
    /// Namespace for record keys: `{key_prefix}:{movie_id}`
    pub key_prefix: String,
}

impl StoreConfig {
    pub(crate) fn from_lookup(lookup: Lookup<'_>) -> Result<Self> {
        Ok(Self {
            backend: env::parse_or(lookup, "STORE_BACKEND", StoreBackend::Redis)?,
            redis_url: env::string_or(lookup, "REDIS_URL", DEFAULT_REDIS_URL),
            key_prefix: env::string_or(lookup, "MOVIES_KEY_PREFIX", DEFAULT_KEY_PREFIX),
        })
    }

    /// Endpoint with any password masked, for logging
    pub fn redis_url_safe(&self) -> String {
        match self.redis_url.find('@') {
            Some(at_pos) => {
                let protocol_end = self.redis_url.find("://").map(|p| p + 3).unwrap_or(0);
                format!(
                    "{}***{}",
                    &self.redis_url[..protocol_end],
                    &self.redis_url[at_pos..]
                )
            }
            None => self.redis_url.clone(),
        }
    }
}
