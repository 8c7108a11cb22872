use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};

// ============================================================================
// Order Value Objects
// ============================================================================

/// A single purchased item. Opaque to persistence: stored exactly as given.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct LineItem {
    pub item_id: String,
    pub quantity: u32,
    /// Price in minor currency units
    pub price: u64,
}

/// The persisted order record.
///
/// Status is never stored; it is derived from which lifecycle timestamps are set
/// (see [`Order::status`]).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Order {
    pub order_id: u64,
    pub customer_id: Uuid,
    pub line_items: Vec<LineItem>,
    pub created_at: DateTime<Utc>,
    pub shipped_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Derived from the timestamps; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum OrderStatus {
    Created,
    Shipped,
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Created => "created",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_serialization_field_names() {
        let order = Order {
            order_id: 42,
            customer_id: Uuid::new_v4(),
            line_items: vec![LineItem {
                item_id: "A".to_string(),
                quantity: 2,
                price: 10,
            }],
            created_at: Utc::now(),
            shipped_at: None,
            completed_at: None,
        };

        let json: serde_json::Value = serde_json::to_value(&order).unwrap();

        assert_eq!(json["order_id"], 42);
        assert_eq!(json["line_items"][0]["item_id"], "A");
        assert_eq!(json["line_items"][0]["quantity"], 2);
        assert_eq!(json["line_items"][0]["price"], 10);
        assert!(json["shipped_at"].is_null());
        assert!(json["completed_at"].is_null());
    }

    #[test]
    fn test_large_order_id_survives_json() {
        let order = Order {
            order_id: u64::MAX,
            customer_id: Uuid::new_v4(),
            line_items: vec![],
            created_at: Utc::now(),
            shipped_at: Some(Utc::now()),
            completed_at: None,
        };

        let bytes = serde_json::to_vec(&order).unwrap();
        let decoded: Order = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(decoded, order);
    }

    #[test]
    fn test_order_status_labels() {
        assert_eq!(OrderStatus::Created.to_string(), "created");
        assert_eq!(OrderStatus::Shipped.as_str(), "shipped");
        assert_eq!(OrderStatus::Completed.to_string(), "completed");
    }
}
