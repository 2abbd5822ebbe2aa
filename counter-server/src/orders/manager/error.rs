use crate::orders::status::OrderAction;
use crate::store::StoreError;
use shared::error::{AppError, ErrorCode};
use shared::models::{OrderStatus, StockShortfall};
use thiserror::Error;

/// Order lifecycle errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrderError {
    #[error("{0}")]
    Validation(String),

    #[error("Order not found: {0}")]
    OrderNotFound(i64),

    #[error("Stock item not found: {0}")]
    StockItemNotFound(i64),

    #[error("Insufficient stock")]
    InsufficientStock(Vec<StockShortfall>),

    #[error("Cannot {action} an order that is {from}")]
    InvalidTransition {
        from: OrderStatus,
        action: OrderAction,
    },

    #[error("No order is ready to be called")]
    NoneReady,

    #[error("Storage error: {0}")]
    Storage(String),
}

impl OrderError {
    /// Map a storage failure of `action`; a lost compare-and-set becomes an
    /// invalid transition from the status actually found
    pub(crate) fn from_store(err: StoreError, action: OrderAction) -> Self {
        match err {
            StoreError::StatusMismatch { actual, .. } => OrderError::InvalidTransition {
                from: actual,
                action,
            },
            other => other.into(),
        }
    }
}

impl From<StoreError> for OrderError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::StockNotFound(id) => OrderError::StockItemNotFound(id),
            StoreError::Insufficient(shortfall) => OrderError::InsufficientStock(vec![shortfall]),
            StoreError::OrderNotFound(id) => OrderError::OrderNotFound(id),
            StoreError::StatusMismatch { id, actual, .. } => OrderError::Storage(format!(
                "Order {id} changed concurrently (now {actual})"
            )),
            StoreError::Database(msg) => OrderError::Storage(msg),
        }
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        let message = err.to_string();
        match err {
            OrderError::Validation(msg) => AppError::validation(msg),
            OrderError::OrderNotFound(id) => {
                AppError::with_message(ErrorCode::OrderNotFound, message).with_detail("order_id", id)
            }
            OrderError::StockItemNotFound(id) => {
                AppError::with_message(ErrorCode::StockItemNotFound, message)
                    .with_detail("item_id", id)
            }
            OrderError::InsufficientStock(shortfalls) => {
                let items = serde_json::to_value(&shortfalls).unwrap_or_default();
                AppError::with_message(ErrorCode::InsufficientStock, message)
                    .with_detail("unavailable_items", items)
            }
            OrderError::InvalidTransition { from, action } => {
                AppError::with_message(ErrorCode::InvalidOrderTransition, message)
                    .with_detail("from", from.as_str())
                    .with_detail("action", action.as_str())
            }
            OrderError::NoneReady => AppError::with_message(ErrorCode::NoOrderReady, message),
            OrderError::Storage(msg) => AppError::database(msg),
        }
    }
}

pub type OrderResult<T> = Result<T, OrderError>;
