use crate::store::StoreError;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Stock ledger errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StockError {
    #[error("{0} is required")]
    RequiredField(&'static str),

    #[error("Invalid price: {0}")]
    InvalidPrice(f64),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    #[error("Cart is empty")]
    EmptyCheck,

    #[error("Stock item not found: {0}")]
    NotFound(i64),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<StoreError> for StockError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::StockNotFound(id) => StockError::NotFound(id),
            other => StockError::Storage(other.to_string()),
        }
    }
}

impl From<StockError> for AppError {
    fn from(err: StockError) -> Self {
        let message = err.to_string();
        match err {
            StockError::RequiredField(field) => {
                AppError::with_message(ErrorCode::RequiredField, message).with_detail("field", field)
            }
            StockError::InvalidPrice(_) => AppError::with_message(ErrorCode::StockInvalidPrice, message),
            StockError::InvalidQuantity(_) => {
                AppError::with_message(ErrorCode::StockInvalidQuantity, message)
            }
            StockError::EmptyCheck => AppError::validation(message),
            StockError::NotFound(id) => {
                AppError::with_message(ErrorCode::StockItemNotFound, message).with_detail("item_id", id)
            }
            StockError::Storage(msg) => AppError::database(msg),
        }
    }
}

pub type StockResult<T> = Result<T, StockError>;
