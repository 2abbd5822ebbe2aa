//! 大厅叫号屏 - `GET /api/monitor/orders`

use axum::{Json, Router, extract::State, routing::get};
use shared::models::MonitorBoard;

use crate::core::ServerState;
use crate::utils::AppResult;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/monitor/orders", get(board))
}

pub async fn board(State(state): State<ServerState>) -> AppResult<Json<MonitorBoard>> {
    Ok(Json(state.orders.monitor().await?))
}
