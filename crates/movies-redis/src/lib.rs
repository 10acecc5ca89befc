//! # Movies Redis
//!
//! Low-level Redis client for the movies service.
//!
//! ## Design Principles
//!
//! - **No business logic** - knows hashes and keys, not movies
//! - **Atomic preconditions** - conditional writes are single Lua scripts
//!
//! ## Example
//!
//! ```rust,no_run
//! use movies_redis::{RedisClient, WriteCondition};
//! use std::collections::BTreeMap;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RedisClient::connect("redis://localhost:6379").await?;
//!
//!     let fields = BTreeMap::from([("title".to_string(), "Heat".to_string())]);
//!     let created = client
//!         .set_hash_if("movies:m1", &fields, WriteCondition::Absent)
//!         .await?;
//!     assert!(created);
//!
//!     Ok(())
//! }
//! ```

mod client;

pub use client::{RedisClient, WriteCondition};

// Re-export commonly used types
pub use redis::RedisError;

/// Result type for Redis operations
pub type Result<T> = std::result::Result<T, RedisError>;
