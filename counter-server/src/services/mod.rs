//! 服务模块
//!
//! - [`HttpService`] - axum 路由构建、进程内 oneshot 调用、HTTP 监听
//! - [`upload`] - 商品图片的校验、压缩与落盘

pub mod http_service;
pub mod upload;

pub use http_service::{HttpService, build_app, build_router};
