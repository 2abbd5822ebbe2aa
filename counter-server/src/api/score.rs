//! 满意度评分接口
//!
//! `POST /api/score` - `{customer_name?, score}`，缺省顾客名记为匿名

use axum::{Json, Router, extract::State, routing::post};
use shared::models::ScoreCreate;

use crate::core::ServerState;
use crate::utils::{AppError, AppResult, MessageResponse, ValidJson, message};

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/score", post(create))
}

pub async fn create(
    State(state): State<ServerState>,
    ValidJson(payload): ValidJson<ScoreCreate>,
) -> AppResult<Json<MessageResponse>> {
    let score = payload
        .score_text()
        .ok_or_else(|| AppError::validation("score is required"))?;
    let customer_name = payload.customer_name_or_default();

    let saved = state
        .store
        .insert_score(&customer_name, &score, shared::util::now_millis())
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    tracing::info!(score_id = saved.id, customer = %saved.customer_name, "Score saved");

    Ok(message("Score saved"))
}
