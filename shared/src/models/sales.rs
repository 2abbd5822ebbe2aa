//! Sales reporting models

use serde::{Deserialize, Serialize};

use super::order::OrderStatus;

/// One row of the admin sales listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub id: i64,
    pub order_number: String,
    pub customer_name: String,
    pub items: Vec<String>,
    pub quantities: Vec<i64>,
    pub total: f64,
    pub payment_method: String,
    pub status: OrderStatus,
    pub created_at: i64,
    pub created_at_local: String,
}

/// Units sold of one item name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSales {
    pub name: String,
    pub quantity: i64,
}

/// Per-item totals with the best and worst seller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesAnalysis {
    pub most_sold: Option<ItemSales>,
    pub least_sold: Option<ItemSales>,
    pub sales_data: Vec<ItemSales>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_analysis_serializes_nulls() {
        let json = serde_json::to_value(SalesAnalysis::default()).unwrap();
        assert!(json["most_sold"].is_null());
        assert!(json["least_sold"].is_null());
        assert_eq!(json["sales_data"], serde_json::json!([]));
    }
}
