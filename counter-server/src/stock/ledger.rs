//! StockLedger - 库存管理
//!
//! 数量只会通过两条路径变化：
//! - 下单时的条件扣减（`CounterStore::place_order`）
//! - 这里的补货 / 编辑，以及拒付时的回补（`CounterStore::reject_order`）

use std::sync::Arc;

use shared::models::{
    PublicStockItem, REMOVED_ITEM_NAME, StockAvailability, StockCheckLine, StockItem,
    StockItemCreate, StockReplenish, StockShortfall, StockUpdate,
};

use super::{StockError, StockResult};
use crate::store::{CounterStore, NewStockItem};

#[derive(Clone)]
pub struct StockLedger {
    store: Arc<dyn CounterStore>,
}

impl std::fmt::Debug for StockLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StockLedger").finish_non_exhaustive()
    }
}

impl StockLedger {
    pub fn new(store: Arc<dyn CounterStore>) -> Self {
        Self { store }
    }

    /// Customer listing: available items only, promos masked
    pub async fn list_public(&self) -> StockResult<Vec<PublicStockItem>> {
        let items = self.store.list_stock().await?;
        Ok(items
            .iter()
            .filter(|item| item.is_available)
            .map(PublicStockItem::from)
            .collect())
    }

    /// Admin listing: every item, real fields
    pub async fn list_admin(&self) -> StockResult<Vec<StockItem>> {
        Ok(self.store.list_stock().await?)
    }

    /// Advisory check of a cart against current stock
    ///
    /// Nothing is reserved; placement re-checks atomically.
    pub async fn check_availability(&self, lines: &[StockCheckLine]) -> StockResult<StockAvailability> {
        if lines.is_empty() {
            return Err(StockError::EmptyCheck);
        }

        let mut shortfalls = Vec::new();
        for line in lines {
            match self.store.find_stock(line.id).await? {
                None => shortfalls.push(StockShortfall {
                    id: line.id,
                    name: line
                        .name
                        .clone()
                        .unwrap_or_else(|| REMOVED_ITEM_NAME.to_string()),
                    requested: line.quantity,
                    available: 0,
                }),
                Some(item) if item.quantity < line.quantity => shortfalls.push(StockShortfall {
                    id: line.id,
                    name: item.name,
                    requested: line.quantity,
                    available: item.quantity,
                }),
                Some(_) => {}
            }
        }

        Ok(StockAvailability {
            available: shortfalls.is_empty(),
            shortfalls,
        })
    }

    /// Check a create payload without storing it
    pub fn validate(data: &StockItemCreate) -> StockResult<()> {
        validate_create(data.clone()).map(|_| ())
    }

    pub async fn add(&self, data: StockItemCreate) -> StockResult<StockItem> {
        let item = validate_create(data)?;
        let created = self.store.insert_stock(item).await?;
        tracing::info!(
            item_id = created.id,
            name = %created.name,
            quantity = created.quantity,
            is_promo = created.is_promo,
            "Stock item added"
        );
        Ok(created)
    }

    pub async fn replenish(&self, data: StockReplenish) -> StockResult<()> {
        let id = data.id.ok_or(StockError::RequiredField("id"))?;
        let quantity = data.quantity.ok_or(StockError::RequiredField("quantity"))?;
        if quantity <= 0 {
            return Err(StockError::InvalidQuantity(quantity));
        }
        self.store.replenish_stock(id, quantity).await?;
        tracing::info!(item_id = id, quantity, "Stock replenished");
        Ok(())
    }

    /// Overwrite price and quantity
    pub async fn edit(&self, data: StockUpdate) -> StockResult<()> {
        let id = data.id.ok_or(StockError::RequiredField("id"))?;
        let price = data.price.ok_or(StockError::RequiredField("price"))?;
        let quantity = data.quantity.ok_or(StockError::RequiredField("quantity"))?;
        check_price(price)?;
        if quantity < 0 {
            return Err(StockError::InvalidQuantity(quantity));
        }
        self.store.update_stock(id, price, quantity).await?;
        tracing::info!(item_id = id, price, quantity, "Stock item updated");
        Ok(())
    }

    /// Returns the new availability
    pub async fn toggle_availability(&self, id: i64) -> StockResult<bool> {
        let is_available = self.store.toggle_availability(id).await?;
        tracing::info!(item_id = id, is_available, "Stock availability toggled");
        Ok(is_available)
    }

    pub async fn delete(&self, id: i64) -> StockResult<()> {
        self.store.delete_stock(id).await?;
        tracing::info!(item_id = id, "Stock item deleted");
        Ok(())
    }
}

fn check_price(price: f64) -> StockResult<()> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        Err(StockError::InvalidPrice(price))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn validate_create(data: StockItemCreate) -> StockResult<NewStockItem> {
    let name = non_blank(Some(data.name)).ok_or(StockError::RequiredField("name"))?;
    let detailed_description = non_blank(data.detailed_description)
        .ok_or(StockError::RequiredField("detailed_description"))?;
    if data.quantity < 0 {
        return Err(StockError::InvalidQuantity(data.quantity));
    }

    // 促销品对顾客展示为赠品，价格固定为 0
    let price = if data.is_promo {
        0.0
    } else {
        let price = data.price.ok_or(StockError::RequiredField("price"))?;
        check_price(price)?;
        price
    };

    Ok(NewStockItem {
        name,
        description: non_blank(data.description),
        detailed_description: Some(detailed_description),
        price,
        image_ref: data.image_ref,
        quantity: data.quantity,
        is_promo: data.is_promo,
    })
}
