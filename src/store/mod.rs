// ============================================================================
// Order Store - Persistence Layer
// ============================================================================
//
// The only part of the service that talks to the key-value backend.
// Knows how orders are laid out and paginated; knows nothing about
// which status transitions are allowed.
//
// ============================================================================

mod backend;
mod errors;
mod memory;
mod redis_store;
mod order_repository;

pub use backend::KeyValueStore;
pub use errors::StoreError;
pub use memory::MemoryStore;
pub use redis_store::RedisStore;
pub use order_repository::{FindAllPage, FindResult, OrderRepository};

#[cfg(test)]
pub use order_repository::order_key;
