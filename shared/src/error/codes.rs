//! Unified error codes for the counter backend
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Order errors
//! - 6xxx: Stock errors
//! - 7xxx: Media (upload) errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so that every frontend
/// (customer kiosk, kitchen screen, admin panel) can switch on the same number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed (also malformed request bodies)
    ValidationFailed = 2,
    /// Required field missing
    RequiredField = 7,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order is not in a state that allows the requested action
    InvalidOrderTransition = 4002,
    /// No order is waiting to be called
    NoOrderReady = 4004,

    // ==================== 6xxx: Stock ====================
    /// Stock item not found
    StockItemNotFound = 6001,
    /// Not enough units in stock
    InsufficientStock = 6002,
    /// Stock item price is invalid
    StockInvalidPrice = 6003,
    /// Stock quantity is invalid
    StockInvalidQuantity = 6004,

    // ==================== 7xxx: Media ====================
    /// Uploaded file is too large
    FileTooLarge = 7001,
    /// Unsupported file format
    UnsupportedFileFormat = 7002,
    /// Uploaded file is not a valid image
    InvalidImage = 7003,
    /// Empty file provided
    EmptyFile = 7004,
    /// No filename provided
    NoFilename = 7005,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// File storage failed
    FileStorageFailed = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::RequiredField => "Required field is missing",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::InvalidOrderTransition => "Order status does not allow this action",
            ErrorCode::NoOrderReady => "No order ready to be called",

            // Stock
            ErrorCode::StockItemNotFound => "Stock item not found",
            ErrorCode::InsufficientStock => "Insufficient stock",
            ErrorCode::StockInvalidPrice => "Invalid stock price",
            ErrorCode::StockInvalidQuantity => "Invalid stock quantity",

            // Media
            ErrorCode::FileTooLarge => "File is too large",
            ErrorCode::UnsupportedFileFormat => "Unsupported file format",
            ErrorCode::InvalidImage => "Invalid image file",
            ErrorCode::EmptyFile => "Empty file provided",
            ErrorCode::NoFilename => "No filename provided",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::FileStorageFailed => "File storage failed",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            7 => Ok(ErrorCode::RequiredField),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::InvalidOrderTransition),
            4004 => Ok(ErrorCode::NoOrderReady),

            // Stock
            6001 => Ok(ErrorCode::StockItemNotFound),
            6002 => Ok(ErrorCode::InsufficientStock),
            6003 => Ok(ErrorCode::StockInvalidPrice),
            6004 => Ok(ErrorCode::StockInvalidQuantity),

            // Media
            7001 => Ok(ErrorCode::FileTooLarge),
            7002 => Ok(ErrorCode::UnsupportedFileFormat),
            7003 => Ok(ErrorCode::InvalidImage),
            7004 => Ok(ErrorCode::EmptyFile),
            7005 => Ok(ErrorCode::NoFilename),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::FileStorageFailed),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::RequiredField.code(), 7);

        assert_eq!(ErrorCode::OrderNotFound.code(), 4001);
        assert_eq!(ErrorCode::InvalidOrderTransition.code(), 4002);
        assert_eq!(ErrorCode::NoOrderReady.code(), 4004);

        assert_eq!(ErrorCode::StockItemNotFound.code(), 6001);
        assert_eq!(ErrorCode::InsufficientStock.code(), 6002);

        assert_eq!(ErrorCode::FileTooLarge.code(), 7001);

        assert_eq!(ErrorCode::InternalError.code(), 9001);
        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
    }

    #[test]
    fn test_try_from_covers_every_variant() {
        let all = [
            ErrorCode::ValidationFailed,
            ErrorCode::RequiredField,
            ErrorCode::OrderNotFound,
            ErrorCode::InvalidOrderTransition,
            ErrorCode::NoOrderReady,
            ErrorCode::StockItemNotFound,
            ErrorCode::InsufficientStock,
            ErrorCode::StockInvalidPrice,
            ErrorCode::StockInvalidQuantity,
            ErrorCode::FileTooLarge,
            ErrorCode::UnsupportedFileFormat,
            ErrorCode::InvalidImage,
            ErrorCode::EmptyFile,
            ErrorCode::NoFilename,
            ErrorCode::InternalError,
            ErrorCode::DatabaseError,
            ErrorCode::FileStorageFailed,
        ];
        for code in all {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(0), Err(InvalidErrorCode(0)));
        assert_eq!(ErrorCode::try_from(4003), Err(InvalidErrorCode(4003)));
        assert_eq!(ErrorCode::try_from(10000), Err(InvalidErrorCode(10000)));
    }

    #[test]
    fn test_serialize_as_number() {
        assert_eq!(serde_json::to_string(&ErrorCode::ValidationFailed).unwrap(), "2");
        assert_eq!(
            serde_json::to_string(&ErrorCode::InsufficientStock).unwrap(),
            "6002"
        );
    }

    #[test]
    fn test_deserialize() {
        let code: ErrorCode = serde_json::from_str("4004").unwrap();
        assert_eq!(code, ErrorCode::NoOrderReady);

        let result: Result<ErrorCode, _> = serde_json::from_str("999");
        assert!(result.is_err());
    }

    #[test]
    fn test_display_and_message() {
        assert_eq!(format!("{}", ErrorCode::OrderNotFound), "4001");
        assert_eq!(ErrorCode::OrderNotFound.message(), "Order not found");
        assert_eq!(
            ErrorCode::NoOrderReady.message(),
            "No order ready to be called"
        );
    }

    #[test]
    fn test_invalid_error_code_display() {
        let err = InvalidErrorCode(999);
        assert_eq!(format!("{}", err), "invalid error code: 999");
    }
}
