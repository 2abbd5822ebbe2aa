//! Stock Model (库存)

use serde::{Deserialize, Serialize};

/// Customer-facing name of a promotional item
pub const PROMO_DISPLAY_NAME: &str = "Promotional item";
/// Customer-facing description of a promotional item
pub const PROMO_DISPLAY_DESCRIPTION: &str = "A special gift from the house!";
/// Name reported for a cart line whose item no longer exists
pub const REMOVED_ITEM_NAME: &str = "Removed item";

/// Stock item entity
///
/// `quantity` never goes below zero: every decrement is a conditional update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct StockItem {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub detailed_description: Option<String>,
    pub price: f64,
    /// Public path of the item image (`/uploads/<file>`)
    pub image_ref: Option<String>,
    pub quantity: i64,
    pub is_available: bool,
    /// Promotional gift: shown masked to customers, priced at zero
    pub is_promo: bool,
}

/// Create stock item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StockItemCreate {
    pub name: String,
    pub description: Option<String>,
    pub detailed_description: Option<String>,
    /// Required unless `is_promo`; promo items are always stored at 0.0
    pub price: Option<f64>,
    pub image_ref: Option<String>,
    pub quantity: i64,
    #[serde(default)]
    pub is_promo: bool,
}

/// Stock item as shown on the customer kiosk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicStockItem {
    pub id: i64,
    pub name: String,
    pub quantity: i64,
    pub price: f64,
    pub image_ref: Option<String>,
    pub detailed_description: Option<String>,
}

impl From<&StockItem> for PublicStockItem {
    fn from(item: &StockItem) -> Self {
        if item.is_promo {
            Self {
                id: item.id,
                name: PROMO_DISPLAY_NAME.to_string(),
                quantity: item.quantity,
                price: 0.0,
                image_ref: item.image_ref.clone(),
                detailed_description: Some(PROMO_DISPLAY_DESCRIPTION.to_string()),
            }
        } else {
            Self {
                id: item.id,
                name: item.name.clone(),
                quantity: item.quantity,
                price: item.price,
                image_ref: item.image_ref.clone(),
                detailed_description: item.detailed_description.clone(),
            }
        }
    }
}

/// Replenish payload (`POST /api/admin/stock/replenish`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockReplenish {
    pub id: Option<i64>,
    pub quantity: Option<i64>,
}

/// Price/quantity edit payload (`POST /api/admin/stock/update`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockUpdate {
    pub id: Option<i64>,
    pub price: Option<f64>,
    pub quantity: Option<i64>,
}

/// One cart line of an availability check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockCheckLine {
    pub id: i64,
    pub quantity: i64,
    /// Display name the client knows the item by
    #[serde(default)]
    pub name: Option<String>,
}

/// Availability check payload (`POST /api/stock/check`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StockCheckRequest {
    #[serde(default)]
    pub items: Vec<StockCheckLine>,
}

/// A requested line the stock cannot cover
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockShortfall {
    pub id: i64,
    pub name: String,
    pub requested: i64,
    pub available: i64,
}

/// Result of an advisory availability check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAvailability {
    pub available: bool,
    pub shortfalls: Vec<StockShortfall>,
}
