//! Stock admin handlers

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use serde::Serialize;
use shared::models::{StockItem, StockItemCreate, StockReplenish, StockUpdate};

use crate::core::ServerState;
use crate::services::upload;
use crate::stock::StockLedger;
use crate::utils::{AppError, AppResult, ErrorCode, MessageResponse, ValidJson, message};

pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<StockItem>>> {
    Ok(Json(state.stock.list_admin().await?))
}

/// Text fields and the image of an add-item form
#[derive(Debug, Default)]
struct AddForm {
    name: Option<String>,
    quantity: Option<String>,
    price: Option<String>,
    description: Option<String>,
    detailed_description: Option<String>,
    is_promo: bool,
    image: Option<(Option<String>, Vec<u8>)>,
}

impl AddForm {
    async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::validation(format!("Invalid multipart request: {}", e)))?
        {
            let name = field.name().unwrap_or_default().to_string();
            if name == "image" {
                let filename = field.file_name().map(|s| s.to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Multipart error: {}", e)))?;
                form.image = Some((filename, data.to_vec()));
                continue;
            }

            let value = field
                .text()
                .await
                .map_err(|e| AppError::validation(format!("Multipart error: {}", e)))?;
            let value = Some(value.trim().to_string()).filter(|v| !v.is_empty());
            match name.as_str() {
                "name" => form.name = value,
                "quantity" => form.quantity = value,
                "price" => form.price = value,
                "description" => form.description = value,
                "detailed_description" => form.detailed_description = value,
                "is_promo" => form.is_promo = value.as_deref() == Some("true"),
                other => tracing::debug!(field = %other, "Ignoring unknown form field"),
            }
        }
        Ok(form)
    }

    fn to_create(&self) -> AppResult<StockItemCreate> {
        let quantity = self
            .quantity
            .as_deref()
            .ok_or_else(|| AppError::with_message(ErrorCode::RequiredField, "quantity is required"))?
            .parse::<i64>()
            .map_err(|_| AppError::validation("quantity must be an integer"))?;
        let price = self
            .price
            .as_deref()
            .map(str::parse::<f64>)
            .transpose()
            .map_err(|_| AppError::validation("price must be a number"))?;

        Ok(StockItemCreate {
            name: self.name.clone().unwrap_or_default(),
            description: self.description.clone(),
            detailed_description: self.detailed_description.clone(),
            price,
            image_ref: None,
            quantity,
            is_promo: self.is_promo,
        })
    }
}

/// Create a stock item from a multipart form; the image is required
pub async fn add(
    State(state): State<ServerState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<StockItem>)> {
    let mut form = AddForm::read(multipart).await?;
    let (filename, data) = form
        .image
        .take()
        .ok_or_else(|| AppError::with_message(ErrorCode::RequiredField, "image is required"))?;
    let filename = filename
        .filter(|f| !f.is_empty())
        .ok_or_else(|| AppError::new(ErrorCode::NoFilename))?;

    // Reject the form before anything lands on disk
    let mut create = form.to_create()?;
    StockLedger::validate(&create)?;

    let uploads_dir = state.config.uploads_dir();
    let stored = tokio::task::spawn_blocking(move || {
        upload::store_image(&uploads_dir, &filename, &data)
    })
    .await
    .map_err(|e| AppError::internal(format!("Image task failed: {}", e)))??;

    create.image_ref = Some(stored.image_ref);
    let item = state.stock.add(create).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn replenish(
    State(state): State<ServerState>,
    ValidJson(payload): ValidJson<StockReplenish>,
) -> AppResult<Json<MessageResponse>> {
    state.stock.replenish(payload).await?;
    Ok(message("Stock replenished"))
}

pub async fn update(
    State(state): State<ServerState>,
    ValidJson(payload): ValidJson<StockUpdate>,
) -> AppResult<Json<MessageResponse>> {
    state.stock.edit(payload).await?;
    Ok(message("Stock item updated"))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    state.stock.delete(id).await?;
    Ok(message("Stock item deleted"))
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub message: &'static str,
    pub is_available: bool,
}

pub async fn toggle_availability(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ToggleResponse>> {
    let is_available = state.stock.toggle_availability(id).await?;
    Ok(Json(ToggleResponse {
        message: "Availability changed",
        is_available,
    }))
}
