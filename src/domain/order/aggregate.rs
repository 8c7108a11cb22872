use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::value_objects::{LineItem, Order, OrderStatus};
use super::commands::StatusTransition;
use super::errors::OrderError;

// ============================================================================
// Order Lifecycle Rules - Domain Logic
// ============================================================================
//
// created --MarkShipped--> shipped --MarkCompleted--> completed
//
// Every other (state, transition) pair is rejected and leaves the order
// untouched. Store code never consults these rules.
//
// ============================================================================

impl Order {
    pub fn new(
        order_id: u64,
        customer_id: Uuid,
        line_items: Vec<LineItem>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            order_id,
            customer_id,
            line_items,
            created_at,
            shipped_at: None,
            completed_at: None,
        }
    }

    pub fn status(&self) -> OrderStatus {
        match (self.shipped_at, self.completed_at) {
            (_, Some(_)) => OrderStatus::Completed,
            (Some(_), None) => OrderStatus::Shipped,
            (None, None) => OrderStatus::Created,
        }
    }

    /// Compute the order that results from `transition` at time `now`.
    ///
    /// Returns a new value; `self` is never modified, so a rejected
    /// transition cannot leak a half-applied change.
    pub fn apply_transition(
        &self,
        transition: StatusTransition,
        now: DateTime<Utc>,
    ) -> Result<Order, OrderError> {
        if self.completed_at.is_some() {
            return Err(OrderError::AlreadyCompleted);
        }

        let mut next = self.clone();

        match transition {
            StatusTransition::MarkShipped => {
                if self.shipped_at.is_some() {
                    return Err(OrderError::AlreadyShipped);
                }
                next.shipped_at = Some(now);
            }
            StatusTransition::MarkCompleted => {
                if self.shipped_at.is_none() {
                    return Err(OrderError::NotShipped);
                }
                next.completed_at = Some(now);
            }
        }

        Ok(next)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
