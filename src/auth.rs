// ============================================================================
// Token Verification
// ============================================================================
//
// The request gate (routes::middleware::require_bearer_auth) hands every
// bearer token to a TokenVerifier. Verification is binary: a token is either
// accepted or rejected, and no claims flow further into the service.
//
// ============================================================================

mod jwks;

pub use jwks::JwksVerifier;

/// Checks a bearer token against the external issuer
///
/// Errors carry the concrete rejection reason for logging; callers must not
/// pass it on to clients.
#[async_trait::async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> anyhow::Result<()>;
}
