//! Sales report handlers

use axum::{
    Json,
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use shared::models::{SaleRecord, SalesAnalysis};

use crate::core::ServerState;
use crate::sales::export::CSV_CONTENT_TYPE;
use crate::utils::{AppResult, MessageResponse, message};

pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<SaleRecord>>> {
    Ok(Json(state.sales.sales().await?))
}

pub async fn analysis(State(state): State<ServerState>) -> AppResult<Json<SalesAnalysis>> {
    Ok(Json(state.sales.analysis().await?))
}

/// CSV attachment named after the business-local export time
pub async fn export(State(state): State<ServerState>) -> AppResult<impl IntoResponse> {
    let report = state.sales.export().await?;
    let disposition = format!("attachment; filename=\"{}\"", report.filename);
    Ok((
        [
            (header::CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        report.content,
    ))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    state.sales.delete_sale(id).await?;
    Ok(message("Sale deleted"))
}
