//! Sales reporting
//!
//! Read-only views over stored orders: the sales listing, per-item analysis
//! and the CSV export. `delete_sale` is the one write, and it never touches
//! stock.

pub mod analysis;
pub mod export;

use chrono::FixedOffset;
use shared::error::{AppError, ErrorCode};
use shared::models::{Order, SaleRecord, SalesAnalysis};
use std::sync::Arc;
use thiserror::Error;

use crate::store::{CounterStore, OrderQuery, OrderSort, StoreError};
use crate::utils::time::format_local;
pub use export::SalesExport;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SalesError {
    #[error("Order not found: {0}")]
    NotFound(i64),

    #[error("Failed to render report: {0}")]
    Export(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<StoreError> for SalesError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::OrderNotFound(id) => SalesError::NotFound(id),
            other => SalesError::Storage(other.to_string()),
        }
    }
}

impl From<SalesError> for AppError {
    fn from(err: SalesError) -> Self {
        let message = err.to_string();
        match err {
            SalesError::NotFound(id) => {
                AppError::with_message(ErrorCode::OrderNotFound, message).with_detail("order_id", id)
            }
            SalesError::Export(msg) => AppError::internal(msg),
            SalesError::Storage(msg) => AppError::database(msg),
        }
    }
}

pub type SalesResult<T> = Result<T, SalesError>;

#[derive(Clone)]
pub struct SalesReporter {
    store: Arc<dyn CounterStore>,
    offset: FixedOffset,
}

impl std::fmt::Debug for SalesReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SalesReporter")
            .field("offset", &self.offset)
            .finish_non_exhaustive()
    }
}

impl SalesReporter {
    pub fn new(store: Arc<dyn CounterStore>, offset: FixedOffset) -> Self {
        Self { store, offset }
    }

    /// Every order, newest first
    pub async fn sales(&self) -> SalesResult<Vec<SaleRecord>> {
        let orders = self
            .store
            .list_orders(OrderQuery::all().sorted(OrderSort::CreatedDesc))
            .await?;
        Ok(orders.iter().map(|o| self.record(o)).collect())
    }

    /// Per-item totals over every stored order, in id order
    pub async fn analysis(&self) -> SalesResult<SalesAnalysis> {
        let mut orders = self.store.list_orders(OrderQuery::all()).await?;
        orders.sort_by_key(|o| o.id);
        Ok(analysis::analyze(&orders))
    }

    pub async fn delete_sale(&self, id: i64) -> SalesResult<()> {
        self.store.delete_order(id).await?;
        tracing::info!(order_id = id, "Sale deleted");
        Ok(())
    }

    /// CSV report of every order, newest first
    pub async fn export(&self) -> SalesResult<SalesExport> {
        let records = self.sales().await?;
        let content =
            export::write_csv(&records).map_err(|e| SalesError::Export(e.to_string()))?;
        let filename = export::export_filename(shared::util::now_millis(), self.offset);
        tracing::info!(rows = records.len(), %filename, "Sales report exported");
        Ok(SalesExport { filename, content })
    }

    fn record(&self, order: &Order) -> SaleRecord {
        SaleRecord {
            id: order.id,
            order_number: order.order_number.clone(),
            customer_name: order.customer_name.clone(),
            items: order.item_names(),
            quantities: order.quantities(),
            total: order.total,
            payment_method: order.payment_method.clone(),
            status: order.status,
            created_at: order.created_at,
            created_at_local: format_local(order.created_at, self.offset),
        }
    }
}
