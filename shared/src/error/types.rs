//! Error types and API response structures

use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// The primary error type that crosses the HTTP boundary:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details (offending item id, stock shortfalls, ...)
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }
}

/// Error response envelope
///
/// - `code`: Error code ([`ErrorCode`] as u16)
/// - `message`: Human-readable message
/// - `details`: Additional error details (offending item id, shortfalls, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    /// Error code
    pub code: u16,
    /// Human-readable message
    pub message: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl ApiResponse {
    /// Create an error response from an AppError
    pub fn error(err: &AppError) -> Self {
        Self {
            code: err.code.code(),
            message: err.message.clone(),
            details: err.details.clone(),
        }
    }
}

impl From<AppError> for ApiResponse {
    fn from(err: AppError) -> Self {
        Self {
            code: err.code.code(),
            message: err.message,
            details: err.details,
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();
        let body = ApiResponse::error(&self);

        // Log system errors
        if matches!(self.code.category(), super::category::ErrorCategory::System) {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::OrderNotFound);
        assert_eq!(err.code, ErrorCode::OrderNotFound);
        assert_eq!(err.message, "Order not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::new(ErrorCode::StockItemNotFound).with_detail("item_id", 42);

        let details = err.details.unwrap();
        assert_eq!(details.get("item_id").unwrap(), 42);
    }

    #[test]
    fn test_app_error_http_status() {
        assert_eq!(
            AppError::new(ErrorCode::InsufficientStock).http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::new(ErrorCode::DatabaseError).http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::validation("bad").http_status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_app_error_convenience_constructors() {
        assert_eq!(AppError::validation("x").code, ErrorCode::ValidationFailed);
        assert_eq!(AppError::internal("x").code, ErrorCode::InternalError);
        assert_eq!(AppError::database("x").code, ErrorCode::DatabaseError);
    }

    #[test]
    fn test_api_response_error_carries_details() {
        let err = AppError::new(ErrorCode::InsufficientStock)
            .with_detail("unavailable_items", serde_json::json!([{"id": 1}]));
        let response = ApiResponse::error(&err);

        assert_eq!(response.code, 6002);
        assert_eq!(response.message, "Insufficient stock");
        assert!(response.details.unwrap().contains_key("unavailable_items"));
    }

    #[test]
    fn test_api_response_serialize() {
        let json = serde_json::to_string(&ApiResponse::error(&AppError::validation("bad"))).unwrap();
        assert_eq!(json, r#"{"code":2,"message":"bad"}"#);
    }

    #[test]
    fn test_api_response_from_error() {
        let response: ApiResponse = AppError::new(ErrorCode::DatabaseError).into();
        assert_eq!(response.code, 9002);
        assert_eq!(response.message, "Database error");
    }
}
