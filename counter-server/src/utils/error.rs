//! 统一错误处理
//!
//! 错误类型来自 `shared::error`，这里补充 handler 常用的响应辅助：
//! - [`MessageResponse`] - `{ "message": "..." }` 形式的成功响应
//!
//! # 使用示例
//!
//! ```ignore
//! // 返回错误
//! Err(AppError::validation("Missing customer name"))
//!
//! // 返回成功消息
//! Ok(message("Stock updated"))
//! ```

use axum::Json;
use serde::{Deserialize, Serialize};

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

/// 简单消息响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// 构造 `{ "message": ... }` JSON 响应
pub fn message(msg: impl Into<String>) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: msg.into(),
    })
}
