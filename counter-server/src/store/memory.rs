//! In-process store
//!
//! One mutex guards the whole state; every operation validates before it
//! mutates, so a failed call leaves nothing behind.

use async_trait::async_trait;
use parking_lot::Mutex;
use shared::models::{Order, OrderLine, OrderStatus, PlacedOrder, Score, StockItem, StockShortfall};

use super::{
    CounterStore, NewOrder, NewStockItem, OrderQuery, OrderSort, StoreError, StoreResult,
};
use crate::orders::numbering::format_order_number;

#[derive(Debug, Default)]
struct Inner {
    stock: Vec<StockItem>,
    orders: Vec<Order>,
    scores: Vec<Score>,
    next_stock_id: i64,
    next_order_id: i64,
    next_score_id: i64,
    last_order_number: i64,
}

impl Inner {
    fn stock_mut(&mut self, id: i64) -> StoreResult<&mut StockItem> {
        self.stock
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(StoreError::StockNotFound(id))
    }

    fn order_mut(&mut self, id: i64) -> StoreResult<&mut Order> {
        self.orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(StoreError::OrderNotFound(id))
    }

    fn compare_and_set(&mut self, id: i64, from: OrderStatus, to: OrderStatus) -> StoreResult<()> {
        let order = self.order_mut(id)?;
        if order.status != from {
            return Err(StoreError::StatusMismatch {
                id,
                expected: from,
                actual: order.status,
            });
        }
        order.status = to;
        Ok(())
    }

    /// Add units at `index`, false when the sum would overflow
    fn add_units(&mut self, index: usize, quantity: i64) -> bool {
        match self.stock[index].quantity.checked_add(quantity) {
            Some(total) => {
                self.stock[index].quantity = total;
                true
            }
            None => false,
        }
    }

    fn restock(&mut self, line: &OrderLine) -> bool {
        let by_id = line
            .stock_id
            .and_then(|id| self.stock.iter().position(|s| s.id == id));
        if by_id.is_some_and(|index| self.add_units(index, line.quantity)) {
            return true;
        }
        // Reference cleared by a delete: oldest item with the same name
        let by_name = self
            .stock
            .iter()
            .enumerate()
            .filter(|(_, s)| s.name == line.name)
            .min_by_key(|(_, s)| s.id)
            .map(|(index, _)| index);
        by_name.is_some_and(|index| self.add_units(index, line.quantity))
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl MemoryStore {
    /// Rename an item in place (the store API only edits price and quantity)
    pub(crate) fn rename_stock(&self, id: i64, name: &str) {
        let mut inner = self.inner.lock();
        if let Ok(item) = inner.stock_mut(id) {
            item.name = name.to_string();
        }
    }
}

#[async_trait]
impl CounterStore for MemoryStore {
    async fn list_stock(&self) -> StoreResult<Vec<StockItem>> {
        Ok(self.inner.lock().stock.clone())
    }

    async fn find_stock(&self, id: i64) -> StoreResult<Option<StockItem>> {
        Ok(self.inner.lock().stock.iter().find(|s| s.id == id).cloned())
    }

    async fn insert_stock(&self, item: NewStockItem) -> StoreResult<StockItem> {
        let mut inner = self.inner.lock();
        inner.next_stock_id += 1;
        let created = StockItem {
            id: inner.next_stock_id,
            name: item.name,
            description: item.description,
            detailed_description: item.detailed_description,
            price: item.price,
            image_ref: item.image_ref,
            quantity: item.quantity,
            is_available: true,
            is_promo: item.is_promo,
        };
        inner.stock.push(created.clone());
        Ok(created)
    }

    async fn update_stock(&self, id: i64, price: f64, quantity: i64) -> StoreResult<()> {
        let mut inner = self.inner.lock();
        let item = inner.stock_mut(id)?;
        item.price = price;
        item.quantity = quantity;
        Ok(())
    }

    async fn replenish_stock(&self, id: i64, quantity: i64) -> StoreResult<()> {
        let mut inner = self.inner.lock();
        let item = inner.stock_mut(id)?;
        item.quantity = item
            .quantity
            .checked_add(quantity)
            .ok_or_else(|| StoreError::quantity_overflow(id))?;
        Ok(())
    }

    async fn toggle_availability(&self, id: i64) -> StoreResult<bool> {
        let mut inner = self.inner.lock();
        let item = inner.stock_mut(id)?;
        item.is_available = !item.is_available;
        Ok(item.is_available)
    }

    async fn delete_stock(&self, id: i64) -> StoreResult<()> {
        let mut inner = self.inner.lock();
        let before = inner.stock.len();
        inner.stock.retain(|s| s.id != id);
        if inner.stock.len() == before {
            return Err(StoreError::StockNotFound(id));
        }
        for line in inner.orders.iter_mut().flat_map(|o| o.lines.iter_mut()) {
            if line.stock_id == Some(id) {
                line.stock_id = None;
            }
        }
        Ok(())
    }

    async fn place_order(&self, new_order: NewOrder) -> StoreResult<PlacedOrder> {
        let mut inner = self.inner.lock();

        // Validate every line against the running balance first
        let mut lines = Vec::with_capacity(new_order.lines.len());
        let mut taken: Vec<(i64, i64)> = Vec::new();
        for request in &new_order.lines {
            let item = inner
                .stock
                .iter()
                .find(|s| s.id == request.stock_id)
                .ok_or(StoreError::StockNotFound(request.stock_id))?;
            let already: i64 = taken
                .iter()
                .filter(|(id, _)| *id == item.id)
                .map(|(_, q)| q)
                .sum();
            let available = item.quantity - already;
            if available < request.quantity {
                return Err(StoreError::Insufficient(StockShortfall {
                    id: item.id,
                    name: item.name.clone(),
                    requested: request.quantity,
                    available,
                }));
            }
            taken.push((item.id, request.quantity));
            lines.push(OrderLine {
                stock_id: Some(item.id),
                name: item.name.clone(),
                unit_price: item.price,
                quantity: request.quantity,
            });
        }

        for (id, quantity) in taken {
            inner.stock_mut(id)?.quantity -= quantity;
        }
        inner.last_order_number += 1;
        inner.next_order_id += 1;
        let order_number = format_order_number(inner.last_order_number);
        let order_id = inner.next_order_id;
        inner.orders.push(Order {
            id: order_id,
            customer_name: new_order.customer_name,
            phone: new_order.phone,
            order_number: order_number.clone(),
            lines,
            total: new_order.total,
            payment_method: new_order.payment_method,
            status: new_order.status,
            created_at: new_order.created_at,
            called_at: None,
        });

        Ok(PlacedOrder {
            order_id,
            order_number,
            status: new_order.status,
        })
    }

    async fn find_order(&self, id: i64) -> StoreResult<Option<Order>> {
        Ok(self.inner.lock().orders.iter().find(|o| o.id == id).cloned())
    }

    async fn order_status(&self, id: i64) -> StoreResult<Option<OrderStatus>> {
        Ok(self
            .inner
            .lock()
            .orders
            .iter()
            .find(|o| o.id == id)
            .map(|o| o.status))
    }

    async fn list_orders(&self, query: OrderQuery) -> StoreResult<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .inner
            .lock()
            .orders
            .iter()
            .filter(|o| query.matches(o))
            .cloned()
            .collect();
        match query.sort {
            OrderSort::CreatedAsc => orders.sort_by_key(|o| (o.created_at, o.id)),
            OrderSort::CreatedDesc => {
                orders.sort_by_key(|o| std::cmp::Reverse((o.created_at, o.id)))
            }
            // SQLite sorts NULL lowest, so uncalled orders land last
            OrderSort::CalledDesc => orders.sort_by_key(|o| std::cmp::Reverse((o.called_at, o.id))),
        }
        if let Some(limit) = query.limit {
            orders.truncate(usize::try_from(limit).unwrap_or(0));
        }
        Ok(orders)
    }

    async fn transition(
        &self,
        id: i64,
        from: OrderStatus,
        to: OrderStatus,
    ) -> StoreResult<Order> {
        let mut inner = self.inner.lock();
        inner.compare_and_set(id, from, to)?;
        Ok(inner.order_mut(id)?.clone())
    }

    async fn reject_order(&self, id: i64) -> StoreResult<Order> {
        let mut inner = self.inner.lock();
        inner.compare_and_set(id, OrderStatus::PendingPayment, OrderStatus::Rejected)?;
        let rejected = inner.order_mut(id)?.clone();
        for line in &rejected.lines {
            if !inner.restock(line) {
                tracing::debug!(
                    order_id = id,
                    item = %line.name,
                    quantity = line.quantity,
                    "No stock item to restore, skipping"
                );
            }
        }
        Ok(rejected)
    }

    async fn call_next_ready(&self, called_at: i64) -> StoreResult<Option<Order>> {
        let mut inner = self.inner.lock();
        let next = inner
            .orders
            .iter_mut()
            .filter(|o| o.status == OrderStatus::Ready)
            .min_by_key(|o| (o.created_at, o.id));
        Ok(next.map(|order| {
            order.status = OrderStatus::Completed;
            order.called_at = Some(called_at);
            order.clone()
        }))
    }

    async fn count_by_status(&self, status: OrderStatus) -> StoreResult<i64> {
        let count = self
            .inner
            .lock()
            .orders
            .iter()
            .filter(|o| o.status == status)
            .count();
        Ok(count as i64)
    }

    async fn delete_order(&self, id: i64) -> StoreResult<()> {
        let mut inner = self.inner.lock();
        let before = inner.orders.len();
        inner.orders.retain(|o| o.id != id);
        if inner.orders.len() == before {
            return Err(StoreError::OrderNotFound(id));
        }
        Ok(())
    }

    async fn reset_orders(&self) -> StoreResult<u64> {
        let mut inner = self.inner.lock();
        let removed = inner.orders.len() as u64;
        inner.orders.clear();
        inner.last_order_number = 0;
        inner.next_order_id = 0;
        Ok(removed)
    }

    async fn insert_score(
        &self,
        customer_name: &str,
        score: &str,
        created_at: i64,
    ) -> StoreResult<Score> {
        let mut inner = self.inner.lock();
        inner.next_score_id += 1;
        let created = Score {
            id: inner.next_score_id,
            customer_name: customer_name.to_string(),
            score: score.to_string(),
            created_at,
        };
        inner.scores.push(created.clone());
        Ok(created)
    }

    async fn list_scores(&self) -> StoreResult<Vec<Score>> {
        let mut scores = self.inner.lock().scores.clone();
        scores.sort_by_key(|s| std::cmp::Reverse((s.created_at, s.id)));
        Ok(scores)
    }
}
