//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] - 应用错误类型 (from shared::error)
//! - [`ApiResponse`] - API 响应结构 (from shared::error)
//! - [`ValidJson`] - JSON 请求体提取器 (rejection -> 400)
//! - 日志、业务时区格式化

pub mod error;
pub mod json;
pub mod logger;
pub mod time;

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use error::{MessageResponse, message};
pub use json::ValidJson;
