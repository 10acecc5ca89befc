// ============================================================================
// Store Client
// ============================================================================
//
// Backend-neutral contract for the key-value store holding movie records.
// Every operation is a single round trip; conditional writes check and write
// atomically on the backend side.
//
// Implementations:
// - redis.rs: Redis hashes + Lua-scripted conditional writes (production)
// - memory.rs: process-local map (tests, local development)
//
// ============================================================================

mod memory;
mod redis;

pub use memory::InMemoryStore;
pub use redis::RedisStore;

use movies_error::AppResult;
use std::collections::BTreeMap;

/// Native store representation of a record: one attribute per field
pub type Item = BTreeMap<String, String>;

/// Result of a conditional write or delete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Applied,
    /// The existence precondition did not hold; nothing was changed
    ConditionFailed,
}

/// Storage interface for movie items
///
/// Transport failures are reported as `AppError::Store`; precondition
/// failures are not errors at this level and come back as
/// `WriteOutcome::ConditionFailed`.
#[async_trait::async_trait]
pub trait MovieStore: Send + Sync {
    /// Fetch the item stored under `key`
    async fn get(&self, key: &str) -> AppResult<Option<Item>>;

    /// Store `item` only if nothing is stored under `key` yet
    async fn put_if_absent(&self, key: &str, item: &Item) -> AppResult<WriteOutcome>;

    /// Replace the item under `key` only if one already exists
    async fn put_if_present(&self, key: &str, item: &Item) -> AppResult<WriteOutcome>;

    /// Remove the item under `key` only if one exists
    async fn delete_if_present(&self, key: &str) -> AppResult<WriteOutcome>;
}
