use std::str::FromStr;
use uuid::Uuid;
use super::errors::OrderError;
use super::value_objects::LineItem;

// ============================================================================
// Order Commands - Represent user intent
// ============================================================================

#[derive(Debug, Clone)]
pub struct CreateOrder {
    pub customer_id: Uuid,
    pub line_items: Vec<LineItem>,
}

/// Status change requested by a caller, parsed from its wire label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTransition {
    MarkShipped,
    MarkCompleted,
}

impl StatusTransition {
    pub fn label(&self) -> &'static str {
        match self {
            StatusTransition::MarkShipped => "shipped",
            StatusTransition::MarkCompleted => "completed",
        }
    }
}

impl FromStr for StatusTransition {
    type Err = OrderError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        match label {
            "shipped" => Ok(StatusTransition::MarkShipped),
            "completed" => Ok(StatusTransition::MarkCompleted),
            other => Err(OrderError::UnknownStatus(other.to_string())),
        }
    }
}
