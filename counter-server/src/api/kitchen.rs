//! 厨房屏幕接口
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/kitchen/orders | GET | 制作中的订单，最早的在前 |
//! | /api/kitchen/order/ready/{id} | POST | 出餐 (preparing → ready) |

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use shared::models::KitchenOrder;

use crate::core::ServerState;
use crate::utils::{AppResult, MessageResponse, message};

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/kitchen/orders", get(list))
        .route("/api/kitchen/order/ready/{id}", post(mark_ready))
}

pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<KitchenOrder>>> {
    Ok(Json(state.orders.kitchen_orders().await?))
}

pub async fn mark_ready(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    state.orders.mark_ready(id).await?;
    Ok(message("Order marked as ready"))
}
