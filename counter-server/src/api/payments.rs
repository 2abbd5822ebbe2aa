//! pix 付款确认与订单重置 (管理端)
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/admin/pending_payments | GET | 待确认付款，最新的在前 |
//! | /api/admin/approve_payment/{id} | POST | 确认付款 → 进入厨房 |
//! | /api/admin/reject_payment/{id} | POST | 拒付 → 回补库存 |
//! | /api/admin/orders/reset | POST | 删除全部订单并从 "001" 重新编号 |

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use shared::models::PendingPayment;

use crate::core::ServerState;
use crate::utils::{AppResult, MessageResponse, message};

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/admin/pending_payments", get(pending))
        .route("/api/admin/approve_payment/{id}", post(approve))
        .route("/api/admin/reject_payment/{id}", post(reject))
        .route("/api/admin/orders/reset", post(reset))
}

pub async fn pending(State(state): State<ServerState>) -> AppResult<Json<Vec<PendingPayment>>> {
    Ok(Json(state.orders.pending_payments().await?))
}

pub async fn approve(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    state.orders.approve_payment(id).await?;
    Ok(message("Payment approved, order sent to the kitchen"))
}

pub async fn reject(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    state.orders.reject_payment(id).await?;
    Ok(message("Payment rejected, items returned to stock"))
}

pub async fn reset(State(state): State<ServerState>) -> AppResult<Json<MessageResponse>> {
    let removed = state.orders.reset_all().await?;
    Ok(message(format!(
        "Orders reset: {} removed, numbering restarts at 001",
        removed
    )))
}
