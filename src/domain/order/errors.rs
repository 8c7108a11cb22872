use crate::store::StoreError;
use super::value_objects::OrderStatus;

// ============================================================================
// Order Business Rule Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    #[error("Order is already shipped")]
    AlreadyShipped,

    #[error("Order must be shipped before completion")]
    NotShipped,

    #[error("Order is already completed")]
    AlreadyCompleted,

    #[error("Unknown order status: {0:?}")]
    UnknownStatus(String),
}

impl OrderError {
    /// Status the order was in when the transition was refused, if the
    /// error came from the state machine rather than from parsing.
    pub fn rejected_from(&self) -> Option<OrderStatus> {
        match self {
            OrderError::AlreadyShipped => Some(OrderStatus::Shipped),
            OrderError::NotShipped => Some(OrderStatus::Created),
            OrderError::AlreadyCompleted => Some(OrderStatus::Completed),
            OrderError::UnknownStatus(_) => None,
        }
    }
}

// ============================================================================
// Order Service Errors - what callers of the lifecycle see
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum OrderServiceError {
    #[error("Order not found")]
    NotFound,

    #[error("Invalid status transition: {0}")]
    InvalidTransition(#[source] OrderError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage failure: {0}")]
    Storage(#[source] StoreError),
}

impl OrderServiceError {
    /// Short label used for metrics and log fields
    pub fn kind(&self) -> &'static str {
        match self {
            OrderServiceError::NotFound => "not_found",
            OrderServiceError::InvalidTransition(_) => "invalid_transition",
            OrderServiceError::InvalidInput(_) => "invalid_input",
            OrderServiceError::Storage(_) => "storage",
        }
    }
}

impl From<StoreError> for OrderServiceError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => OrderServiceError::NotFound,
            other => OrderServiceError::Storage(other),
        }
    }
}

impl From<OrderError> for OrderServiceError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::UnknownStatus(_) => OrderServiceError::InvalidInput(e.to_string()),
            other => OrderServiceError::InvalidTransition(other),
        }
    }
}
