//! Redis client implementation with connection management

use crate::Result;
use redis::{aio::ConnectionManager, AsyncCommands, Script};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Replaces the hash at KEYS[1] with the field/value pairs in ARGV, but only
/// when ARGV[1] matches the key's existence: `"absent"` writes only if the key
/// does not exist, `"present"` only if it does. Returns 1 when written.
const CONDITIONAL_HSET: &str = r"
local exists = redis.call('EXISTS', KEYS[1])
if ARGV[1] == 'absent' and exists == 1 then
    return 0
end
if ARGV[1] == 'present' and exists == 0 then
    return 0
end
redis.call('DEL', KEYS[1])
redis.call('HSET', KEYS[1], unpack(ARGV, 2))
return 1
";

/// Precondition for a conditional hash write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteCondition {
    /// Write only if the key does not exist yet
    Absent,
    /// Write only if the key already exists
    Present,
}

impl WriteCondition {
    fn as_arg(self) -> &'static str {
        match self {
            WriteCondition::Absent => "absent",
            WriteCondition::Present => "present",
        }
    }
}

/// Redis client with automatic reconnection
///
/// Every clone shares the same multiplexed connection, so one client can
/// serve any number of concurrent requests.
#[derive(Clone)]
pub struct RedisClient {
    conn: ConnectionManager,
    /// Hashed once; sent as EVALSHA, falling back to EVAL on NOSCRIPT
    conditional_hset: Arc<Script>,
}

impl RedisClient {
    /// Connect to Redis server
    ///
    /// Supports both redis:// and rediss:// (TLS) URLs
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self {
            conn,
            conditional_hset: Arc::new(Script::new(CONDITIONAL_HSET)),
        })
    }

    // ============================================================================
    // Hash Operations
    // ============================================================================

    /// HGETALL - All fields of a hash; `None` if the key does not exist
    pub async fn get_hash(&self, key: &str) -> Result<Option<BTreeMap<String, String>>> {
        let mut conn = self.conn.clone();
        let fields: BTreeMap<String, String> = conn.hgetall(key).await?;
        if fields.is_empty() {
            Ok(None)
        } else {
            Ok(Some(fields))
        }
    }

    /// Atomically replace a hash if `condition` holds for its key.
    ///
    /// The existence check and the write run as one Lua script, so no other
    /// client can slip a write in between. Returns whether the write happened.
    pub async fn set_hash_if(
        &self,
        key: &str,
        fields: &BTreeMap<String, String>,
        condition: WriteCondition,
    ) -> Result<bool> {
        let mut invocation = self.conditional_hset.key(key);
        invocation.arg(condition.as_arg());
        for (field, value) in fields {
            invocation.arg(field).arg(value);
        }

        let mut conn = self.conn.clone();
        let written: i64 = invocation.invoke_async(&mut conn).await?;
        Ok(written == 1)
    }

    // ============================================================================
    // Key Operations
    // ============================================================================

    /// DEL - Delete a key; returns whether it existed
    pub async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.conn.clone();
        let removed: i64 = conn.del(key).await?;
        Ok(removed > 0)
    }
}
