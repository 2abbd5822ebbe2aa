//! Order Model (订单)
//!
//! An order owns an ordered list of [`OrderLine`] snapshots taken when it was
//! placed. The kitchen, board and sales views are projections of that list.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order status
///
/// ```text
/// (none) --create--> pending_payment   [pix]
/// (none) --create--> preparing         [otherwise]
/// pending_payment --approve--> preparing
/// pending_payment --reject-->  rejected
/// preparing --ready--> ready
/// ready --call--> completed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(type_name = "TEXT", rename_all = "snake_case"))]
pub enum OrderStatus {
    PendingPayment,
    Preparing,
    Ready,
    Completed,
    Rejected,
}

impl OrderStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PendingPayment => "pending_payment",
            Self::Preparing => "preparing",
            Self::Ready => "ready",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
        }
    }

    /// `completed` and `rejected` accept no further transition
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Rejected)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Line item snapshot
///
/// `stock_id` is cleared when the referenced stock item is deleted; the name
/// and price stay as they were when the order was placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderLine {
    pub stock_id: Option<i64>,
    pub name: String,
    pub unit_price: f64,
    pub quantity: i64,
}

/// Order entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub customer_name: String,
    pub phone: Option<String>,
    /// Zero-padded display number ("001", "042", "1234")
    pub order_number: String,
    pub lines: Vec<OrderLine>,
    pub total: f64,
    pub payment_method: String,
    pub status: OrderStatus,
    /// Epoch millis (UTC)
    pub created_at: i64,
    /// Epoch millis (UTC), set when the manager calls the order
    pub called_at: Option<i64>,
}

impl Order {
    pub fn item_names(&self) -> Vec<String> {
        self.lines.iter().map(|l| l.name.clone()).collect()
    }

    pub fn quantities(&self) -> Vec<i64> {
        self.lines.iter().map(|l| l.quantity).collect()
    }

    /// Lines rendered as `"3x Pie"`
    pub fn display_items(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|l| format!("{}x {}", l.quantity, l.name))
            .collect()
    }
}

/// One requested item of a new order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemInput {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    pub quantity: i64,
}

/// Create order payload (`POST /api/orders`)
///
/// Top-level fields are optional on the wire so each missing one gets its own
/// validation message; malformed bodies are rejected by the JSON extractor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderCreate {
    pub customer_name: Option<String>,
    pub phone: Option<String>,
    pub items: Option<Vec<OrderItemInput>>,
    pub total: Option<f64>,
    pub payment_method: Option<String>,
}

/// Result of a successful placement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedOrder {
    pub order_id: i64,
    pub order_number: String,
    pub status: OrderStatus,
}

// =============================================================================
// Views
// =============================================================================

/// Kitchen screen entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitchenOrder {
    pub id: i64,
    pub order_number: String,
    pub customer_name: String,
    pub items: Vec<String>,
    pub quantities: Vec<i64>,
}

impl From<&Order> for KitchenOrder {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            order_number: order.order_number.clone(),
            customer_name: order.customer_name.clone(),
            items: order.item_names(),
            quantities: order.quantities(),
        }
    }
}

/// Status board entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardEntry {
    pub order_number: String,
    pub customer_name: String,
    pub items: Vec<String>,
    pub status: OrderStatus,
}

impl From<&Order> for BoardEntry {
    fn from(order: &Order) -> Self {
        Self {
            order_number: order.order_number.clone(),
            customer_name: order.customer_name.clone(),
            items: order.display_items(),
            status: order.status,
        }
    }
}

/// Customer-facing status board (`GET /api/orders/status`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderBoard {
    pub preparing: Vec<BoardEntry>,
    pub ready: Vec<BoardEntry>,
}

/// Active order on the hall monitor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorActive {
    pub order: String,
    pub name: String,
    pub status: OrderStatus,
}

/// Recently called order on the hall monitor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorCalled {
    pub order: String,
    pub name: String,
}

/// Hall monitor (`GET /api/monitor/orders`)
///
/// `preparing` holds every active order (preparing and ready);
/// `ready` holds the most recently called ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonitorBoard {
    pub preparing: Vec<MonitorActive>,
    pub ready: Vec<MonitorCalled>,
}

/// Order waiting for a pix payment confirmation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingPayment {
    pub id: i64,
    pub order_number: String,
    pub customer_name: String,
    pub total: f64,
    pub created_at: i64,
    pub created_at_local: String,
}

/// Order called by the manager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalledOrder {
    pub success: bool,
    pub customer_name: String,
    pub order_number: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> Order {
        Order {
            id: 1,
            customer_name: "Ana".into(),
            phone: None,
            order_number: "001".into(),
            lines: vec![
                OrderLine {
                    stock_id: Some(1),
                    name: "Pie".into(),
                    unit_price: 5.0,
                    quantity: 3,
                },
                OrderLine {
                    stock_id: None,
                    name: "Juice".into(),
                    unit_price: 4.0,
                    quantity: 1,
                },
            ],
            total: 19.0,
            payment_method: "cash".into(),
            status: OrderStatus::Preparing,
            created_at: 0,
            called_at: None,
        }
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&OrderStatus::PendingPayment).unwrap();
        assert_eq!(json, "\"pending_payment\"");
        let parsed: OrderStatus = serde_json::from_str("\"ready\"").unwrap();
        assert_eq!(parsed, OrderStatus::Ready);
        assert_eq!(OrderStatus::Completed.to_string(), "completed");
    }

    #[test]
    fn test_terminal_states() {
        assert!(OrderStatus::Completed.is_terminal());
        assert!(OrderStatus::Rejected.is_terminal());
        assert!(!OrderStatus::PendingPayment.is_terminal());
        assert!(!OrderStatus::Ready.is_terminal());
    }

    #[test]
    fn test_parallel_views_stay_aligned() {
        let o = order();
        assert_eq!(o.item_names(), vec!["Pie", "Juice"]);
        assert_eq!(o.quantities(), vec![3, 1]);
        assert_eq!(o.item_names().len(), o.quantities().len());
        assert_eq!(o.display_items(), vec!["3x Pie", "1x Juice"]);
    }

    #[test]
    fn test_kitchen_and_board_views() {
        let o = order();
        let kitchen = KitchenOrder::from(&o);
        assert_eq!(kitchen.items, vec!["Pie", "Juice"]);
        assert_eq!(kitchen.quantities, vec![3, 1]);

        let entry = BoardEntry::from(&o);
        assert_eq!(entry.order_number, "001");
        assert_eq!(entry.items, vec!["3x Pie", "1x Juice"]);
        assert_eq!(entry.status, OrderStatus::Preparing);
    }

    #[test]
    fn test_order_create_accepts_partial_payload() {
        let req: OrderCreate = serde_json::from_str(r#"{"customer_name":"Ana"}"#).unwrap();
        assert_eq!(req.customer_name.as_deref(), Some("Ana"));
        assert!(req.items.is_none());
        assert!(req.total.is_none());
    }
}
