use futures_util::future::try_join_all;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::order::Order;
use super::backend::KeyValueStore;
use super::errors::StoreError;

// ============================================================================
// Order Repository - Persistence for Orders
// ============================================================================
//
// Layout in the key-value backend:
// - `order:{order_id}`  JSON-encoded order record
// - `orders`            list of order ids (decimal) in insertion order
//
// Responsibilities:
// 1. Serialize / deserialize orders
// 2. Keep the insertion-ordered index in step with inserts
// 3. Positional pagination over the index
// 4. Bound every backend call by a timeout
//
// Known gaps (accepted, not hidden):
// - Updates are last-writer-wins; there is no version token, so two
//   concurrent status changes on one order can overwrite each other.
// - Cursors are positions, so inserts between page fetches can shift
//   entries across page boundaries.
// - Insert relies on `set_and_append`; on a backend without multi-key
//   transactions a crash between the writes leaves an unlisted order.
// - Ids are never checked for collisions; a duplicate id overwrites the
//   earlier record and indexes it twice.
//
// ============================================================================

pub const ORDER_INDEX_KEY: &str = "orders";

pub fn order_key(order_id: u64) -> String {
    format!("order:{}", order_id)
}

/// Page request: `offset` is a position in the index, not an order id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FindAllPage {
    pub offset: u64,
    pub size: u64,
}

#[derive(Debug, Clone)]
pub struct FindResult {
    pub orders: Vec<Order>,
    /// Offset of the next page; `None` once the index is exhausted
    pub cursor: Option<u64>,
}

pub struct OrderRepository {
    backend: Arc<dyn KeyValueStore>,
    timeout: Duration,
}

impl OrderRepository {
    pub fn new(backend: Arc<dyn KeyValueStore>, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    async fn bounded<T, F>(&self, call: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout(self.timeout)),
        }
    }

    /// Persist a new order and append it to the index.
    pub async fn insert(&self, order: &Order) -> Result<(), StoreError> {
        let data = serde_json::to_vec(order)?;
        let key = order_key(order.order_id);

        self.bounded(self.backend.set_and_append(
            &key,
            &data,
            ORDER_INDEX_KEY,
            &order.order_id.to_string(),
        ))
        .await?;

        tracing::debug!(order_id = order.order_id, "Inserted order and index entry");

        Ok(())
    }

    pub async fn find_by_id(&self, order_id: u64) -> Result<Order, StoreError> {
        let key = order_key(order_id);

        let data = self
            .bounded(self.backend.get(&key))
            .await?
            .ok_or(StoreError::NotFound)?;

        Ok(serde_json::from_slice(&data)?)
    }

    /// Read one page of orders in insertion order.
    ///
    /// A page is all-or-nothing: if any listed order cannot be loaded the
    /// whole call fails rather than returning a partial page.
    pub async fn find_all(&self, page: FindAllPage) -> Result<FindResult, StoreError> {
        if page.size == 0 {
            return Ok(FindResult {
                orders: Vec::new(),
                cursor: None,
            });
        }

        let stop = page.offset.saturating_add(page.size - 1);
        let ids = self
            .bounded(self.backend.range(ORDER_INDEX_KEY, page.offset, stop))
            .await?;

        let orders = try_join_all(ids.iter().map(|raw| self.find_indexed(raw))).await?;

        let total = self.bounded(self.backend.length(ORDER_INDEX_KEY)).await?;
        let next = page.offset.saturating_add(orders.len() as u64);
        let cursor = if !orders.is_empty() && next < total {
            Some(next)
        } else {
            None
        };

        tracing::debug!(
            offset = page.offset,
            size = page.size,
            returned = orders.len(),
            next = ?cursor,
            "Loaded order page"
        );

        Ok(FindResult { orders, cursor })
    }

    async fn find_indexed(&self, raw_id: &str) -> Result<Order, StoreError> {
        let order_id: u64 = raw_id.parse().map_err(|_| {
            StoreError::Serialization(format!("invalid index entry {:?}", raw_id))
        })?;

        match self.find_by_id(order_id).await {
            Err(StoreError::NotFound) => Err(StoreError::DanglingIndexEntry(order_id)),
            other => other,
        }
    }

    /// Overwrite an existing order. The index is never touched.
    ///
    /// Fails with `NotFound`, writing nothing, when no record exists.
    pub async fn update_by_id(&self, order: &Order) -> Result<(), StoreError> {
        let data = serde_json::to_vec(order)?;
        let key = order_key(order.order_id);

        let existed = self.bounded(self.backend.set_existing(&key, &data)).await?;
        if !existed {
            return Err(StoreError::NotFound);
        }

        tracing::debug!(order_id = order.order_id, "Updated order record");

        Ok(())
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        self.bounded(self.backend.ping()).await
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::LineItem;
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use chrono::Utc;
    use uuid::Uuid;

    fn repository_with(store: MemoryStore) -> OrderRepository {
        OrderRepository::new(Arc::new(store), Duration::from_secs(1))
    }

    fn test_order(order_id: u64) -> Order {
        Order::new(
            order_id,
            Uuid::new_v4(),
            vec![LineItem {
                item_id: format!("sku-{}", order_id),
                quantity: 1,
                price: 100,
            }],
            Utc::now(),
        )
    }

    /// Backend whose every call fails
    struct FailingStore;

    #[async_trait]
    impl KeyValueStore for FailingStore {
        async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, StoreError> {
            Err(StoreError::Backend("connection reset".to_string()))
        }
        async fn set(&self, _key: &str, _value: &[u8]) -> Result<(), StoreError> {
            Err(StoreError::Backend("connection reset".to_string()))
        }
        async fn set_existing(&self, _key: &str, _value: &[u8]) -> Result<bool, StoreError> {
            Err(StoreError::Backend("connection reset".to_string()))
        }
        async fn append(&self, _list_key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Backend("connection reset".to_string()))
        }
        async fn range(&self, _list_key: &str, _start: u64, _stop: u64) -> Result<Vec<String>, StoreError> {
            Err(StoreError::Backend("connection reset".to_string()))
        }
        async fn length(&self, _list_key: &str) -> Result<u64, StoreError> {
            Err(StoreError::Backend("connection reset".to_string()))
        }
        async fn ping(&self) -> Result<(), StoreError> {
            Err(StoreError::Backend("connection reset".to_string()))
        }
    }

    /// Backend that never answers reads
    struct HangingStore;

    #[async_trait]
    impl KeyValueStore for HangingStore {
        async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, StoreError> {
            std::future::pending().await
        }
        async fn set(&self, _key: &str, _value: &[u8]) -> Result<(), StoreError> {
            Ok(())
        }
        async fn set_existing(&self, _key: &str, _value: &[u8]) -> Result<bool, StoreError> {
            Ok(true)
        }
        async fn append(&self, _list_key: &str, _value: &str) -> Result<(), StoreError> {
            Ok(())
        }
        async fn range(&self, _list_key: &str, _start: u64, _stop: u64) -> Result<Vec<String>, StoreError> {
            std::future::pending().await
        }
        async fn length(&self, _list_key: &str) -> Result<u64, StoreError> {
            Ok(0)
        }
        async fn ping(&self) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[test]
    fn test_order_key_layout() {
        assert_eq!(order_key(42), "order:42");
        assert_eq!(order_key(u64::MAX), "order:18446744073709551615");
    }

    #[tokio::test]
    async fn test_insert_then_find_round_trip() {
        let repository = repository_with(MemoryStore::new());
        let order = test_order(11);

        repository.insert(&order).await.unwrap();
        let found = repository.find_by_id(11).await.unwrap();

        assert_eq!(found, order);
    }

    #[tokio::test]
    async fn test_insert_writes_index_entry() {
        let store = MemoryStore::new();
        let repository = repository_with(store.clone());

        repository.insert(&test_order(5)).await.unwrap();
        repository.insert(&test_order(3)).await.unwrap();

        assert_eq!(
            store.range(ORDER_INDEX_KEY, 0, 10).await.unwrap(),
            vec!["5", "3"]
        );
    }

    #[tokio::test]
    async fn test_find_missing_order() {
        let repository = repository_with(MemoryStore::new());

        let result = repository.find_by_id(404).await;

        assert!(matches!(result, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn test_corrupt_record_is_storage_failure() {
        let store = MemoryStore::new();
        store.set(&order_key(9), b"not json").await.unwrap();
        let repository = repository_with(store);

        let result = repository.find_by_id(9).await;

        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_pagination_walk_is_complete_and_ordered() {
        let repository = repository_with(MemoryStore::new());
        let ids: Vec<u64> = (1..=7).map(|i| i * 1000 + 3).collect();
        for id in &ids {
            repository.insert(&test_order(*id)).await.unwrap();
        }

        let mut seen = Vec::new();
        let mut offset = 0;
        loop {
            let page = repository
                .find_all(FindAllPage { offset, size: 3 })
                .await
                .unwrap();
            assert!(page.orders.len() <= 3);
            seen.extend(page.orders.iter().map(|o| o.order_id));
            match page.cursor {
                Some(next) => offset = next,
                None => break,
            }
        }

        assert_eq!(seen, ids);
    }

    #[tokio::test]
    async fn test_exact_multiple_has_no_trailing_cursor() {
        let repository = repository_with(MemoryStore::new());
        for id in 1..=4 {
            repository.insert(&test_order(id)).await.unwrap();
        }

        let first = repository.find_all(FindAllPage { offset: 0, size: 2 }).await.unwrap();
        assert_eq!(first.cursor, Some(2));

        let second = repository.find_all(FindAllPage { offset: 2, size: 2 }).await.unwrap();
        assert_eq!(second.orders.len(), 2);
        assert_eq!(second.cursor, None);
    }

    #[tokio::test]
    async fn test_offset_at_or_past_end_is_empty() {
        let repository = repository_with(MemoryStore::new());
        for id in 1..=3 {
            repository.insert(&test_order(id)).await.unwrap();
        }

        for offset in [3, 4, u64::MAX] {
            let page = repository.find_all(FindAllPage { offset, size: 50 }).await.unwrap();
            assert!(page.orders.is_empty());
            assert_eq!(page.cursor, None);
        }
    }

    #[tokio::test]
    async fn test_zero_size_page() {
        let repository = OrderRepository::new(Arc::new(FailingStore), Duration::from_secs(1));

        // Never reaches the backend
        let page = repository.find_all(FindAllPage { offset: 0, size: 0 }).await.unwrap();

        assert!(page.orders.is_empty());
        assert_eq!(page.cursor, None);
    }

    #[tokio::test]
    async fn test_dangling_index_entry_fails_whole_page() {
        let store = MemoryStore::new();
        let repository = repository_with(store.clone());
        repository.insert(&test_order(1)).await.unwrap();
        store.append(ORDER_INDEX_KEY, "2").await.unwrap();
        repository.insert(&test_order(3)).await.unwrap();

        let result = repository.find_all(FindAllPage { offset: 0, size: 10 }).await;

        assert!(matches!(result, Err(StoreError::DanglingIndexEntry(2))));
    }

    #[tokio::test]
    async fn test_garbage_index_entry_fails_page() {
        let store = MemoryStore::new();
        store.append(ORDER_INDEX_KEY, "abc").await.unwrap();
        let repository = repository_with(store);

        let result = repository.find_all(FindAllPage { offset: 0, size: 10 }).await;

        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_update_overwrites_without_touching_index() {
        let store = MemoryStore::new();
        let repository = repository_with(store.clone());
        let mut order = test_order(8);
        repository.insert(&order).await.unwrap();

        order.shipped_at = Some(Utc::now());
        repository.update_by_id(&order).await.unwrap();

        assert_eq!(repository.find_by_id(8).await.unwrap(), order);
        assert_eq!(store.length(ORDER_INDEX_KEY).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_order_writes_nothing() {
        let store = MemoryStore::new();
        let repository = repository_with(store.clone());

        let result = repository.update_by_id(&test_order(77)).await;

        assert!(matches!(result, Err(StoreError::NotFound)));
        assert_eq!(store.get(&order_key(77)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_backend_failures_propagate() {
        let repository = OrderRepository::new(Arc::new(FailingStore), Duration::from_secs(1));

        assert!(matches!(repository.insert(&test_order(1)).await, Err(StoreError::Backend(_))));
        assert!(matches!(repository.find_by_id(1).await, Err(StoreError::Backend(_))));
        assert!(matches!(
            repository.find_all(FindAllPage { offset: 0, size: 5 }).await,
            Err(StoreError::Backend(_))
        ));
        assert!(matches!(repository.update_by_id(&test_order(1)).await, Err(StoreError::Backend(_))));
    }

    #[tokio::test]
    async fn test_slow_backend_times_out() {
        let repository = OrderRepository::new(Arc::new(HangingStore), Duration::from_millis(20));

        let lookup = repository.find_by_id(1).await;
        let page = repository.find_all(FindAllPage { offset: 0, size: 5 }).await;

        assert!(matches!(lookup, Err(StoreError::Timeout(_))));
        assert!(matches!(page, Err(StoreError::Timeout(_))));
    }
}
