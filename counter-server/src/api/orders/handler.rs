//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use shared::models::{OrderBoard, OrderCreate};

use crate::core::ServerState;
use crate::orders::OrderError;
use crate::utils::{AppResult, ValidJson};

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub message: &'static str,
    pub order_number: String,
    pub order_id: i64,
}

/// Place a new order
pub async fn create(
    State(state): State<ServerState>,
    ValidJson(payload): ValidJson<OrderCreate>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    let placed = state.orders.create_order(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Order placed",
            order_number: placed.order_number,
            order_id: placed.order_id,
        }),
    ))
}

/// Preparing / ready board
pub async fn board(State(state): State<ServerState>) -> AppResult<Json<OrderBoard>> {
    Ok(Json(state.orders.board().await?))
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Order status, or "unknown"
    pub status: String,
}

/// Status of one order; unknown ids answer 404 `{status: "unknown"}`
pub async fn check_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    match state.orders.order_status(id).await {
        Ok(status) => Ok(Json(StatusResponse {
            status: status.to_string(),
        })
        .into_response()),
        Err(OrderError::OrderNotFound(_)) => Ok((
            StatusCode::NOT_FOUND,
            Json(StatusResponse {
                status: "unknown".to_string(),
            }),
        )
            .into_response()),
        Err(e) => Err(e.into()),
    }
}
