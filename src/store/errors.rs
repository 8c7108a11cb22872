use std::time::Duration;

// ============================================================================
// Store Errors
// ============================================================================
//
// Everything except `NotFound` is a storage failure from the caller's
// point of view.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Not found")]
    NotFound,

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Index entry {0} has no order record")]
    DanglingIndexEntry(u64),

    #[error("Store call timed out after {0:?}")]
    Timeout(Duration),
}

impl StoreError {
    /// Short label used for metrics and log fields
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::NotFound => "not_found",
            StoreError::Backend(_) => "backend",
            StoreError::Serialization(_) => "serialization",
            StoreError::DanglingIndexEntry(_) => "dangling_index",
            StoreError::Timeout(_) => "timeout",
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}
