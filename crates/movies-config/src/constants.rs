// ============================================================================
// Configuration Defaults
// ============================================================================

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_RUST_LOG: &str = "info";
pub const DEFAULT_SHUTDOWN_GRACE_SECS: u64 = 5;

pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";
pub const DEFAULT_KEY_PREFIX: &str = "movies";

/// Audience claim the issuer stamps on access tokens for the default
/// authorization server.
pub const DEFAULT_AUTH_AUDIENCE: &str = "api://default";
pub const DEFAULT_AUTH_HTTP_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_AUTH_LEEWAY_SECS: u64 = 60;
pub const DEFAULT_AUTH_KEY_REFRESH_INTERVAL_SECS: u64 = 30;

/// Version prefix shared by every HTTP route.
pub const API_PREFIX: &str = "/v1/api";
