use anyhow::{Context, Result};
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use movies_config::AuthConfig;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};

use super::TokenVerifier;

/// Claims checked beyond the registered ones (`exp`, `iss`, `aud`), which
/// `jsonwebtoken` validates itself.
#[derive(Debug, Deserialize)]
struct AccessClaims {
    /// Client the token was issued to
    cid: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenIdConfiguration {
    jwks_uri: String,
}

/// Key material held between requests
#[derive(Default)]
struct KeyCache {
    keys: Option<Arc<JwkSet>>,
    /// Key set location, resolved once through discovery
    jwks_uri: Option<String>,
    /// Start of the last fetch attempt, successful or not
    last_fetch: Option<Instant>,
}

/// Verifies RS256 access tokens against the issuer's published key set
///
/// The key set is fetched lazily and kept in memory. A token signed with a
/// `kid` that is not in the held set triggers a refetch, which picks up
/// rotated keys. Refetches are serialized and at most one is started per
/// `key_refresh_interval`; misses inside that window are rejected without
/// contacting the issuer.
pub struct JwksVerifier {
    http: reqwest::Client,
    issuer: String,
    audience: String,
    client_id: String,
    leeway_secs: u64,
    key_refresh_interval: Duration,
    cache: RwLock<KeyCache>,
    refresh: Mutex<()>,
}

impl JwksVerifier {
    pub fn new(config: &AuthConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .context("Failed to create HTTP client for token issuer")?;

        Ok(Self {
            http,
            issuer: config.issuer.trim_end_matches('/').to_string(),
            audience: config.audience.clone(),
            client_id: config.client_id.clone(),
            leeway_secs: config.leeway_secs,
            key_refresh_interval: Duration::from_secs(config.key_refresh_interval_secs),
            cache: RwLock::new(KeyCache::default()),
            refresh: Mutex::new(()),
        })
    }

    async fn cached_key(&self, kid: &str) -> Option<Result<DecodingKey>> {
        let cache = self.cache.read().await;
        let jwk = cache.keys.as_deref()?.find(kid)?;
        Some(DecodingKey::from_jwk(jwk).context("Unusable signing key in key set"))
    }

    async fn decoding_key(&self, kid: &str) -> Result<DecodingKey> {
        if let Some(key) = self.cached_key(kid).await {
            return key;
        }

        // One refresh at a time; waiters re-check the cache it filled
        let _refresh = self.refresh.lock().await;
        if let Some(key) = self.cached_key(kid).await {
            return key;
        }

        let last_fetch = self.cache.read().await.last_fetch;
        if let Some(at) = last_fetch {
            if at.elapsed() < self.key_refresh_interval {
                anyhow::bail!("No signing key with kid {} (key set refreshed recently)", kid);
            }
        }

        tracing::debug!(kid = %kid, "Signing key not held, refreshing key set");
        let keys = self.refresh_keys().await?;
        let jwk = keys
            .find(kid)
            .with_context(|| format!("No signing key with kid {}", kid))?;
        DecodingKey::from_jwk(jwk).context("Unusable signing key in key set")
    }

    /// Callers must hold the refresh lock
    async fn refresh_keys(&self) -> Result<Arc<JwkSet>> {
        let known_uri = {
            let mut cache = self.cache.write().await;
            cache.last_fetch = Some(Instant::now());
            cache.jwks_uri.clone()
        };
        let jwks_uri = match known_uri {
            Some(uri) => uri,
            None => match self.discover_jwks_uri().await {
                Some(uri) => {
                    self.cache.write().await.jwks_uri = Some(uri.clone());
                    uri
                }
                // Not cached, so discovery is retried on the next refresh
                None => format!("{}/v1/keys", self.issuer),
            },
        };

        let keys: JwkSet = self
            .fetch_json(&jwks_uri)
            .await
            .with_context(|| format!("Failed to fetch key set from {}", jwks_uri))?;

        tracing::info!(jwks_uri = %jwks_uri, keys = keys.keys.len(), "Loaded issuer key set");

        let keys = Arc::new(keys);
        self.cache.write().await.keys = Some(keys.clone());
        Ok(keys)
    }

    /// Key set location from OpenID discovery
    async fn discover_jwks_uri(&self) -> Option<String> {
        let discovery_url = format!("{}/.well-known/openid-configuration", self.issuer);
        match self.fetch_json::<OpenIdConfiguration>(&discovery_url).await {
            Ok(discovery) => Some(discovery.jwks_uri),
            Err(e) => {
                tracing::debug!(error = %e, "OpenID discovery failed, using default key set path");
                None
            }
        }
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.http.get(url).send().await?.error_for_status()?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait::async_trait]
impl TokenVerifier for JwksVerifier {
    async fn verify(&self, token: &str) -> Result<()> {
        let header = decode_header(token).context("Malformed token header")?;
        if header.alg != Algorithm::RS256 {
            anyhow::bail!("Unsupported JWT algorithm: {:?}", header.alg);
        }
        let kid = header.kid.context("Token header has no kid")?;

        let key = self.decoding_key(&kid).await?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_audience(&[self.audience.as_str()]);
        validation.leeway = self.leeway_secs;

        let data = decode::<AccessClaims>(token, &key, &validation)
            .context("Token verification failed")?;

        match data.claims.cid.as_deref() {
            Some(cid) if cid == self.client_id => Ok(()),
            Some(cid) => anyhow::bail!("Token issued to unexpected client {}", cid),
            None => anyhow::bail!("Token has no cid claim"),
        }
    }
}
