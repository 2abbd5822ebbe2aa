//! JSON 请求体提取器
//!
//! `axum::Json` 在请求体不合法时返回纯文本 4xx；[`ValidJson`] 把这些
//! rejection 统一转换成 400 `ValidationFailed`，响应体走 `ApiResponse`。

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};

use super::AppError;

/// `Json<T>` with the rejection reported as a validation error
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_error)?;
        Ok(Self(value))
    }
}

fn rejection_error(rejection: JsonRejection) -> AppError {
    tracing::debug!(status = %rejection.status(), "Rejected JSON body");
    AppError::validation(rejection.body_text())
}
