//! Authentication Routes
//!
//! `POST /api/admin/login` - 管理员凭据校验，凭据来自配置 (ADMIN_ID / ADMIN_PASSWORD)

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/admin/login", post(handler::login))
}
