// ============================================================================
// Order Domain - Business Logic for Orders
// ============================================================================
//
// This module contains ALL Order-specific code:
// - Value objects (Order, LineItem, OrderStatus)
// - Commands (CreateOrder, StatusTransition)
// - Errors (OrderError, OrderServiceError)
// - Lifecycle rules (status derivation and transitions on Order)
// - Command Handler (OrderCommandHandler)
//
// Persistence lives in crate::store; nothing here touches the backend
// directly.
//
// ============================================================================

pub mod value_objects;
pub mod commands;
pub mod errors;
pub mod aggregate;
pub mod command_handler;

// Re-export for convenience
pub use value_objects::*;
pub use commands::*;
pub use errors::*;
pub use command_handler::*;
