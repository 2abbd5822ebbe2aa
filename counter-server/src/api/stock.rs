//! 顾客端库存接口
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/stock | GET | 可售商品 (促销品匿名展示) |
//! | /api/stock/check | POST | 购物车库存预检 (不预留) |

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::Serialize;
use shared::models::{PublicStockItem, StockCheckRequest, StockShortfall};

use crate::core::ServerState;
use crate::utils::{AppResult, ValidJson};

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/stock", get(list))
        .route("/api/stock/check", post(check))
}

pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<PublicStockItem>>> {
    Ok(Json(state.stock.list_public().await?))
}

#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unavailable_items: Vec<StockShortfall>,
}

/// 200 when every line is covered, 409 with the shortfalls otherwise
pub async fn check(
    State(state): State<ServerState>,
    ValidJson(payload): ValidJson<StockCheckRequest>,
) -> AppResult<(StatusCode, Json<CheckResponse>)> {
    let availability = state.stock.check_availability(&payload.items).await?;
    if availability.available {
        return Ok((
            StatusCode::OK,
            Json(CheckResponse {
                success: true,
                message: None,
                unavailable_items: Vec::new(),
            }),
        ));
    }

    Ok((
        StatusCode::CONFLICT,
        Json(CheckResponse {
            success: false,
            message: Some("Insufficient stock"),
            unavailable_items: availability.shortfalls,
        }),
    ))
}
