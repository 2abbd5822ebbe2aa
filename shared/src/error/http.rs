//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 404 Not Found
            Self::OrderNotFound
            | Self::StockItemNotFound
            | Self::NoOrderReady => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::InvalidOrderTransition | Self::InsufficientStock => StatusCode::CONFLICT,

            // 413 Payload Too Large
            Self::FileTooLarge => StatusCode::PAYLOAD_TOO_LARGE,

            // 500 Internal Server Error
            Self::InternalError | Self::DatabaseError | Self::FileStorageFailed => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // 400 Bad Request
            Self::ValidationFailed
            | Self::RequiredField
            | Self::StockInvalidPrice
            | Self::StockInvalidQuantity
            | Self::UnsupportedFileFormat
            | Self::InvalidImage
            | Self::EmptyFile
            | Self::NoFilename => StatusCode::BAD_REQUEST,
        }
    }
}
