//! SQLite-backed store
//!
//! Multi-statement operations run in one `Transaction`; an early return drops
//! it uncommitted, which rolls everything back.

use async_trait::async_trait;
use shared::models::{Order, OrderLine, OrderStatus, PlacedOrder, Score, StockItem, StockShortfall};
use sqlx::SqlitePool;

use super::{CounterStore, NewOrder, NewStockItem, OrderQuery, StoreError, StoreResult};
use crate::db::DbService;
use crate::db::repository::{RepoError, order, score, sequence, stock};
use crate::db::repository::stock::Reservation;
use crate::orders::numbering::format_order_number;

#[derive(Clone, Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(db: DbService) -> Self {
        Self { pool: db.pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Resolve a failed compare-and-set into the right error
    async fn mismatch(&self, id: i64, expected: OrderStatus) -> StoreError {
        match order::find_status(&self.pool, id).await {
            Ok(Some(actual)) => StoreError::StatusMismatch {
                id,
                expected,
                actual,
            },
            Ok(None) => StoreError::OrderNotFound(id),
            Err(e) => e.into(),
        }
    }
}

fn stock_not_found(id: i64) -> impl FnOnce(RepoError) -> StoreError {
    move |err| match err {
        RepoError::NotFound(_) => StoreError::StockNotFound(id),
        other => other.into(),
    }
}

#[async_trait]
impl CounterStore for SqliteStore {
    async fn list_stock(&self) -> StoreResult<Vec<StockItem>> {
        Ok(stock::find_all(&self.pool).await?)
    }

    async fn find_stock(&self, id: i64) -> StoreResult<Option<StockItem>> {
        Ok(stock::find_by_id(&self.pool, id).await?)
    }

    async fn insert_stock(&self, item: NewStockItem) -> StoreResult<StockItem> {
        Ok(stock::create(&self.pool, &item).await?)
    }

    async fn update_stock(&self, id: i64, price: f64, quantity: i64) -> StoreResult<()> {
        stock::update_price_quantity(&self.pool, id, price, quantity)
            .await
            .map_err(stock_not_found(id))
    }

    async fn replenish_stock(&self, id: i64, quantity: i64) -> StoreResult<()> {
        if stock::add_quantity(&self.pool, id, quantity).await? {
            return Ok(());
        }
        match stock::find_by_id(&self.pool, id).await? {
            Some(_) => Err(StoreError::quantity_overflow(id)),
            None => Err(StoreError::StockNotFound(id)),
        }
    }

    async fn toggle_availability(&self, id: i64) -> StoreResult<bool> {
        stock::toggle_availability(&self.pool, id)
            .await?
            .ok_or(StoreError::StockNotFound(id))
    }

    async fn delete_stock(&self, id: i64) -> StoreResult<()> {
        stock::delete(&self.pool, id).await.map_err(stock_not_found(id))
    }

    async fn place_order(&self, new_order: NewOrder) -> StoreResult<PlacedOrder> {
        let mut tx = self.pool.begin().await?;

        // The sequence write comes first: it takes the write lock, so
        // concurrent placements are serialized from here on.
        let value = sequence::next_value(&mut tx).await?;
        let order_number = format_order_number(value);
        let order_id = order::insert(&mut tx, &new_order, &order_number).await?;

        for (line_no, request) in new_order.lines.iter().enumerate() {
            let line = match stock::reserve(&mut tx, request.stock_id, request.quantity).await? {
                Reservation::Reserved { name, unit_price } => OrderLine {
                    stock_id: Some(request.stock_id),
                    name,
                    unit_price,
                    quantity: request.quantity,
                },
                Reservation::Missing => return Err(StoreError::StockNotFound(request.stock_id)),
                Reservation::Short { name, available } => {
                    return Err(StoreError::Insufficient(StockShortfall {
                        id: request.stock_id,
                        name,
                        requested: request.quantity,
                        available,
                    }));
                }
            };
            order::insert_line(&mut tx, order_id, line_no as i64, &line).await?;
        }

        tx.commit().await?;
        Ok(PlacedOrder {
            order_id,
            order_number,
            status: new_order.status,
        })
    }

    async fn find_order(&self, id: i64) -> StoreResult<Option<Order>> {
        let mut conn = self.pool.acquire().await?;
        Ok(order::find_by_id(&mut conn, id).await?)
    }

    async fn order_status(&self, id: i64) -> StoreResult<Option<OrderStatus>> {
        Ok(order::find_status(&self.pool, id).await?)
    }

    async fn list_orders(&self, query: OrderQuery) -> StoreResult<Vec<Order>> {
        Ok(order::list(&self.pool, &query).await?)
    }

    async fn transition(
        &self,
        id: i64,
        from: OrderStatus,
        to: OrderStatus,
    ) -> StoreResult<Order> {
        let mut tx = self.pool.begin().await?;
        if !order::set_status_if(&mut *tx, id, from, to).await? {
            drop(tx);
            return Err(self.mismatch(id, from).await);
        }
        let updated = order::find_by_id(&mut tx, id)
            .await?
            .ok_or(StoreError::OrderNotFound(id))?;
        tx.commit().await?;
        Ok(updated)
    }

    async fn reject_order(&self, id: i64) -> StoreResult<Order> {
        let mut tx = self.pool.begin().await?;

        let rejected = order::set_status_if(
            &mut *tx,
            id,
            OrderStatus::PendingPayment,
            OrderStatus::Rejected,
        )
        .await?;
        if !rejected {
            drop(tx);
            return Err(self.mismatch(id, OrderStatus::PendingPayment).await);
        }

        let Some(rejected_order) = order::find_by_id(&mut tx, id).await? else {
            return Err(StoreError::OrderNotFound(id));
        };

        for line in &rejected_order.lines {
            let restored = match line.stock_id {
                Some(stock_id) => stock::add_quantity(&mut *tx, stock_id, line.quantity).await?,
                None => false,
            };
            // Reference cleared (or row gone): fall back to the item name
            let restored = restored
                || stock::add_quantity_by_name(&mut *tx, &line.name, line.quantity).await?;
            if !restored {
                tracing::debug!(
                    order_id = id,
                    item = %line.name,
                    quantity = line.quantity,
                    "No stock item to restore, skipping"
                );
            }
        }

        tx.commit().await?;
        Ok(rejected_order)
    }

    async fn call_next_ready(&self, called_at: i64) -> StoreResult<Option<Order>> {
        let mut tx = self.pool.begin().await?;
        let Some(id) = order::claim_next_ready(&mut tx, called_at).await? else {
            return Ok(None);
        };
        let called = order::find_by_id(&mut tx, id).await?;
        tx.commit().await?;
        Ok(called)
    }

    async fn count_by_status(&self, status: OrderStatus) -> StoreResult<i64> {
        Ok(order::count_by_status(&self.pool, status).await?)
    }

    async fn delete_order(&self, id: i64) -> StoreResult<()> {
        order::delete(&self.pool, id).await.map_err(|err| match err {
            RepoError::NotFound(_) => StoreError::OrderNotFound(id),
            other => other.into(),
        })
    }

    async fn reset_orders(&self) -> StoreResult<u64> {
        let mut tx = self.pool.begin().await?;
        let removed = order::delete_all(&mut tx).await?;
        sequence::reset(&mut tx).await?;
        tx.commit().await?;
        Ok(removed)
    }

    async fn insert_score(
        &self,
        customer_name: &str,
        score_text: &str,
        created_at: i64,
    ) -> StoreResult<Score> {
        Ok(score::create(&self.pool, customer_name, score_text, created_at).await?)
    }

    async fn list_scores(&self) -> StoreResult<Vec<Score>> {
        Ok(score::find_all(&self.pool).await?)
    }
}
