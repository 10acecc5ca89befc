use movies_error::{AppError, AppResult};
use movies_redis::{RedisClient, RedisError, WriteCondition};

use super::{Item, MovieStore, WriteOutcome};

/// Redis implementation of MovieStore
///
/// Each movie is a hash at `{key_prefix}:{movie_id}` with one field per
/// attribute.
#[derive(Clone)]
pub struct RedisStore {
    client: RedisClient,
    key_prefix: String,
}

impl RedisStore {
    pub fn new(client: RedisClient, key_prefix: impl Into<String>) -> Self {
        Self {
            client,
            key_prefix: key_prefix.into(),
        }
    }

    /// Connect once at startup; the connection lives for the whole process
    pub async fn connect(url: &str, key_prefix: impl Into<String>) -> AppResult<Self> {
        let client = RedisClient::connect(url).await.map_err(store_error)?;
        Ok(Self::new(client, key_prefix))
    }

    /// Build Redis key for a movie record
    fn redis_key(&self, key: &str) -> String {
        format!("{}:{}", self.key_prefix, key)
    }

    async fn put_if(&self, key: &str, item: &Item, condition: WriteCondition) -> AppResult<WriteOutcome> {
        let written = self
            .client
            .set_hash_if(&self.redis_key(key), item, condition)
            .await
            .map_err(store_error)?;

        Ok(if written {
            WriteOutcome::Applied
        } else {
            WriteOutcome::ConditionFailed
        })
    }
}

fn store_error(err: RedisError) -> AppError {
    AppError::store(err.to_string())
}

#[async_trait::async_trait]
impl MovieStore for RedisStore {
    async fn get(&self, key: &str) -> AppResult<Option<Item>> {
        self.client
            .get_hash(&self.redis_key(key))
            .await
            .map_err(store_error)
    }

    async fn put_if_absent(&self, key: &str, item: &Item) -> AppResult<WriteOutcome> {
        self.put_if(key, item, WriteCondition::Absent).await
    }

    async fn put_if_present(&self, key: &str, item: &Item) -> AppResult<WriteOutcome> {
        self.put_if(key, item, WriteCondition::Present).await
    }

    async fn delete_if_present(&self, key: &str) -> AppResult<WriteOutcome> {
        let existed = self
            .client
            .delete(&self.redis_key(key))
            .await
            .map_err(store_error)?;

        Ok(if existed {
            WriteOutcome::Applied
        } else {
            WriteOutcome::ConditionFailed
        })
    }
}
