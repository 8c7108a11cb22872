use async_trait::async_trait;

use super::errors::StoreError;

// ============================================================================
// Key-Value Backend - Transport Boundary
// ============================================================================
//
// The only surface the order repository uses to reach durable storage.
// Implementations: RedisStore (production), MemoryStore (tests, local dev).
//
// Single-key writes are expected to be atomic. Nothing here offers
// cross-key transactions except `set_and_append`, and only when the
// implementation overrides the default.
//
// ============================================================================

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Unconditionally write `value` under `key`.
    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Overwrite `key` only if it already exists.
    /// Returns `false` (and writes nothing) when the key is absent.
    async fn set_existing(&self, key: &str, value: &[u8]) -> Result<bool, StoreError>;

    /// Append `value` to the tail of the list at `list_key`.
    async fn append(&self, list_key: &str, value: &str) -> Result<(), StoreError>;

    /// Read list positions `start..=stop`. Positions past the end are
    /// ignored; a `start` past the end yields an empty vector.
    async fn range(&self, list_key: &str, start: u64, stop: u64) -> Result<Vec<String>, StoreError>;

    /// Number of entries in the list at `list_key` (0 if absent).
    async fn length(&self, list_key: &str) -> Result<u64, StoreError>;

    /// Write a record and append to a list as one logical unit.
    ///
    /// The default runs the two writes back to back: a failure between them
    /// leaves the record written but not listed. Backends with multi-key
    /// transactions override this to commit both or neither.
    async fn set_and_append(
        &self,
        key: &str,
        value: &[u8],
        list_key: &str,
        list_value: &str,
    ) -> Result<(), StoreError> {
        self.set(key, value).await?;
        self.append(list_key, list_value).await
    }

    /// Readiness probe
    async fn ping(&self) -> Result<(), StoreError>;
}
