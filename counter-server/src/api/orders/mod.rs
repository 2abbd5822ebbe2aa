//! Order API Module (顾客端)
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/orders | POST | 下单 |
//! | /api/orders/status | GET | 制作中 / 待取餐看板 |
//! | /api/orders/check_status/{id} | GET | 单个订单状态 |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/orders", post(handler::create))
        .route("/api/orders/status", get(handler::board))
        .route("/api/orders/check_status/{id}", get(handler::check_status))
}
