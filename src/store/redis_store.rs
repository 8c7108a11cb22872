use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use super::backend::KeyValueStore;
use super::errors::StoreError;

// ============================================================================
// Redis Backend
// ============================================================================
//
// Records are plain string keys, the index is a Redis list.
// The multiplexed connection is cheap to clone; each call takes its own
// handle so concurrent requests pipeline over one socket.
//
// ============================================================================

#[derive(Clone)]
pub struct RedisStore {
    connection: MultiplexedConnection,
}

impl RedisStore {
    /// Open a multiplexed connection to `addr` (`host:port`).
    pub async fn connect(addr: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(format!("redis://{}", addr))?;
        let connection = client.get_multiplexed_async_connection().await?;

        tracing::debug!(redis_addr = %addr, "Opened Redis connection");

        Ok(Self { connection })
    }
}

impl From<redis::RedisError> for StoreError {
    fn from(e: redis::RedisError) -> Self {
        StoreError::Backend(e.to_string())
    }
}

// LRANGE takes signed indices; anything past isize::MAX is past the end anyway
fn list_index(position: u64) -> isize {
    isize::try_from(position).unwrap_or(isize::MAX)
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let mut conn = self.connection.clone();
        let value: Option<Vec<u8>> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let mut conn = self.connection.clone();
        let _: () = conn.set(key, value).await?;
        Ok(())
    }

    async fn set_existing(&self, key: &str, value: &[u8]) -> Result<bool, StoreError> {
        let mut conn = self.connection.clone();
        let reply: redis::Value = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("XX")
            .query_async(&mut conn)
            .await?;

        Ok(!matches!(reply, redis::Value::Nil))
    }

    async fn append(&self, list_key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.connection.clone();
        let _: () = conn.rpush(list_key, value).await?;
        Ok(())
    }

    async fn range(&self, list_key: &str, start: u64, stop: u64) -> Result<Vec<String>, StoreError> {
        if start > isize::MAX as u64 {
            return Ok(Vec::new());
        }

        let mut conn = self.connection.clone();
        let values: Vec<String> = conn
            .lrange(list_key, list_index(start), list_index(stop))
            .await?;
        Ok(values)
    }

    async fn length(&self, list_key: &str) -> Result<u64, StoreError> {
        let mut conn = self.connection.clone();
        let len: u64 = conn.llen(list_key).await?;
        Ok(len)
    }

    async fn set_and_append(
        &self,
        key: &str,
        value: &[u8],
        list_key: &str,
        list_value: &str,
    ) -> Result<(), StoreError> {
        let mut conn = self.connection.clone();

        // MULTI/EXEC: record and index entry commit together
        let _: () = redis::pipe()
            .atomic()
            .set(key, value)
            .ignore()
            .rpush(list_key, list_value)
            .ignore()
            .query_async(&mut conn)
            .await?;

        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.connection.clone();
        let _: () = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}
