use std::sync::Arc;
use chrono::Utc;
use rand::Rng;

use crate::store::{FindAllPage, FindResult, OrderRepository};

use super::commands::{CreateOrder, StatusTransition};
use super::errors::OrderServiceError;
use super::value_objects::Order;

// ============================================================================
// Order Command Handler
// ============================================================================
//
// Orchestrates: Request → Lifecycle rules → Order Repository
//
// Status changes are validated here before anything is written;
// a rejected transition never issues a write.
//
// ============================================================================

pub struct OrderCommandHandler {
    repository: Arc<OrderRepository>,
    page_size: u64,
}

/// Random non-zero 64-bit id. Collisions are possible and not checked.
pub fn generate_order_id() -> u64 {
    rand::thread_rng().gen_range(1..=u64::MAX)
}

impl OrderCommandHandler {
    pub fn new(repository: Arc<OrderRepository>, page_size: u64) -> Self {
        Self { repository, page_size }
    }

    pub async fn create(&self, command: CreateOrder) -> Result<Order, OrderServiceError> {
        let order = Order::new(
            generate_order_id(),
            command.customer_id,
            command.line_items,
            Utc::now(),
        );

        self.repository.insert(&order).await?;

        tracing::info!(
            order_id = order.order_id,
            customer_id = %order.customer_id,
            item_count = order.line_items.len(),
            "✅ Order created"
        );

        Ok(order)
    }

    pub async fn find_by_id(&self, order_id: u64) -> Result<Order, OrderServiceError> {
        Ok(self.repository.find_by_id(order_id).await?)
    }

    /// One page of orders starting at `cursor`, sized by configuration
    pub async fn list(&self, cursor: u64) -> Result<FindResult, OrderServiceError> {
        let page = FindAllPage {
            offset: cursor,
            size: self.page_size,
        };

        Ok(self.repository.find_all(page).await?)
    }

    /// Apply the status change named by `status` to an existing order.
    ///
    /// A missing order is reported before an unrecognized label. Concurrent
    /// updates of the same order are last-writer-wins.
    pub async fn update_status(
        &self,
        order_id: u64,
        status: &str,
    ) -> Result<Order, OrderServiceError> {
        let current = self.repository.find_by_id(order_id).await?;

        let transition: StatusTransition = status.parse()?;
        let now = Utc::now();

        let updated = match current.apply_transition(transition, now) {
            Ok(updated) => updated,
            Err(e) => {
                tracing::warn!(
                    order_id,
                    requested = transition.label(),
                    current = %current.status(),
                    error = %e,
                    "Rejected order status transition"
                );
                return Err(e.into());
            }
        };

        self.repository.update_by_id(&updated).await?;

        tracing::info!(
            order_id,
            status = %updated.status(),
            "✅ Order status updated"
        );

        Ok(updated)
    }

    pub async fn check_store(&self) -> Result<(), OrderServiceError> {
        Ok(self.repository.ping().await?)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
