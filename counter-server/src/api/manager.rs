//! 叫号接口
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/manager/next_order | POST | 叫最早的待取餐订单 (ready → completed) |
//! | /api/manager/ready-orders-count | GET | 待取餐数量 |

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;

use crate::core::ServerState;
use crate::orders::OrderError;
use crate::utils::AppResult;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/manager/next_order", post(next_order))
        .route("/api/manager/ready-orders-count", get(ready_count))
}

#[derive(Debug, Serialize)]
struct NothingReady {
    success: bool,
    message: String,
}

/// 没有待取餐订单时返回 404 `{success: false, message}`
pub async fn next_order(State(state): State<ServerState>) -> AppResult<Response> {
    match state.orders.call_next().await {
        Ok(called) => Ok(Json(called).into_response()),
        Err(err @ OrderError::NoneReady) => Ok((
            StatusCode::NOT_FOUND,
            Json(NothingReady {
                success: false,
                message: err.to_string(),
            }),
        )
            .into_response()),
        Err(e) => Err(e.into()),
    }
}

#[derive(Debug, Serialize)]
pub struct ReadyCount {
    pub ready_count: i64,
}

pub async fn ready_count(State(state): State<ServerState>) -> AppResult<Json<ReadyCount>> {
    Ok(Json(ReadyCount {
        ready_count: state.orders.ready_count().await?,
    }))
}
