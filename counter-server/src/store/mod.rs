//! Storage seam
//!
//! Every read and write of stock, orders and scores goes through
//! [`CounterStore`]. Each method is one atomic unit: it either applies all of
//! its effects or none of them.
//!
//! - [`SqliteStore`]: production backend (sqlx, SQLite WAL)
//! - [`MemoryStore`]: in-process backend for tests

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;
use shared::models::{Order, OrderStatus, PlacedOrder, Score, StockItem, StockShortfall};
use thiserror::Error;

/// Storage error
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("Stock item {0} not found")]
    StockNotFound(i64),

    #[error("Insufficient stock for {}: requested {}, available {}", .0.name, .0.requested, .0.available)]
    Insufficient(StockShortfall),

    #[error("Order {0} not found")]
    OrderNotFound(i64),

    /// Compare-and-set lost: the order is not in the expected state
    #[error("Order {id} is {actual}, expected {expected}")]
    StatusMismatch {
        id: i64,
        expected: OrderStatus,
        actual: OrderStatus,
    },

    #[error("Database error: {0}")]
    Database(String),
}

impl From<crate::db::repository::RepoError> for StoreError {
    fn from(err: crate::db::repository::RepoError) -> Self {
        StoreError::Database(err.to_string())
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}

impl StoreError {
    /// Adding units would push the quantity past `i64::MAX`
    pub fn quantity_overflow(id: i64) -> Self {
        StoreError::Database(format!("Stock quantity overflow for item {id}"))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Validated stock item ready to insert
#[derive(Debug, Clone, PartialEq)]
pub struct NewStockItem {
    pub name: String,
    pub description: Option<String>,
    pub detailed_description: Option<String>,
    pub price: f64,
    pub image_ref: Option<String>,
    pub quantity: i64,
    pub is_promo: bool,
}

/// Requested line of a new order (`stock_id` x `quantity`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRequest {
    pub stock_id: i64,
    pub quantity: i64,
}

/// Validated order ready to place
///
/// Line names and prices are snapshotted from the stock rows during
/// placement, not taken from the request.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub customer_name: String,
    pub phone: Option<String>,
    pub lines: Vec<LineRequest>,
    pub total: f64,
    pub payment_method: String,
    pub status: OrderStatus,
    pub created_at: i64,
}

/// Listing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderSort {
    /// Oldest first (`created_at`, then `id`)
    #[default]
    CreatedAsc,
    CreatedDesc,
    /// Most recently called first
    CalledDesc,
}

impl OrderSort {
    pub(crate) const fn sql(&self) -> &'static str {
        match self {
            Self::CreatedAsc => "created_at ASC, id ASC",
            Self::CreatedDesc => "created_at DESC, id DESC",
            Self::CalledDesc => "called_at DESC, id DESC",
        }
    }
}

/// Order listing filter. An empty `statuses` matches every order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderQuery {
    pub statuses: Vec<OrderStatus>,
    pub sort: OrderSort,
    pub limit: Option<i64>,
}

impl OrderQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_status(statuses: &[OrderStatus]) -> Self {
        Self {
            statuses: statuses.to_vec(),
            ..Self::default()
        }
    }

    pub fn sorted(mut self, sort: OrderSort) -> Self {
        self.sort = sort;
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub(crate) fn matches(&self, order: &Order) -> bool {
        self.statuses.is_empty() || self.statuses.contains(&order.status)
    }
}

#[async_trait]
pub trait CounterStore: Send + Sync {
    // ── Stock ──────────────────────────────────────────────────────────

    async fn list_stock(&self) -> StoreResult<Vec<StockItem>>;

    async fn find_stock(&self, id: i64) -> StoreResult<Option<StockItem>>;

    async fn insert_stock(&self, item: NewStockItem) -> StoreResult<StockItem>;

    /// Overwrite price and quantity
    async fn update_stock(&self, id: i64, price: f64, quantity: i64) -> StoreResult<()>;

    /// Add units to an existing item
    async fn replenish_stock(&self, id: i64, quantity: i64) -> StoreResult<()>;

    /// Flip `is_available`, returns the new value
    async fn toggle_availability(&self, id: i64) -> StoreResult<bool>;

    /// Hard delete; order lines keep their snapshot with `stock_id` cleared
    async fn delete_stock(&self, id: i64) -> StoreResult<()>;

    // ── Orders ─────────────────────────────────────────────────────────

    /// Allocate the next number, insert the order and reserve every line.
    ///
    /// Fails with `StockNotFound` or `Insufficient` on the first bad line and
    /// leaves no trace: no number consumed, no order row, no decrement.
    async fn place_order(&self, order: NewOrder) -> StoreResult<PlacedOrder>;

    async fn find_order(&self, id: i64) -> StoreResult<Option<Order>>;

    async fn order_status(&self, id: i64) -> StoreResult<Option<OrderStatus>>;

    async fn list_orders(&self, query: OrderQuery) -> StoreResult<Vec<Order>>;

    /// Compare-and-set `from -> to`, returns the updated order
    async fn transition(&self, id: i64, from: OrderStatus, to: OrderStatus)
    -> StoreResult<Order>;

    /// `pending_payment -> rejected` and restock every line, atomically.
    /// Returns the rejected order.
    async fn reject_order(&self, id: i64) -> StoreResult<Order>;

    /// Complete the oldest `ready` order and stamp `called_at`
    async fn call_next_ready(&self, called_at: i64) -> StoreResult<Option<Order>>;

    async fn count_by_status(&self, status: OrderStatus) -> StoreResult<i64>;

    /// Hard delete one order and its lines (no stock effect)
    async fn delete_order(&self, id: i64) -> StoreResult<()>;

    /// Drop every order and line and restart numbering. Returns how many
    /// orders were removed.
    async fn reset_orders(&self) -> StoreResult<u64>;

    // ── Scores ─────────────────────────────────────────────────────────

    async fn insert_score(&self, customer_name: &str, score: &str, created_at: i64)
    -> StoreResult<Score>;

    async fn list_scores(&self) -> StoreResult<Vec<Score>>;
}
