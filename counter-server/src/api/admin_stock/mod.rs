//! 库存管理接口 (管理端)
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/admin/stock | GET | 全部商品 (真实字段) |
//! | /api/admin/stock/add | POST | 新增商品 (multipart，含图片) |
//! | /api/admin/stock/replenish | POST | 补货 |
//! | /api/admin/stock/update | POST | 修改价格和数量 |
//! | /api/admin/stock/{id} | DELETE | 删除商品 |
//! | /api/admin/stock/toggle_availability/{id} | POST | 上架 / 下架 |

mod handler;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/admin/stock", get(handler::list))
        .route("/api/admin/stock/add", post(handler::add))
        .route("/api/admin/stock/replenish", post(handler::replenish))
        .route("/api/admin/stock/update", post(handler::update))
        .route("/api/admin/stock/{id}", delete(handler::delete))
        .route(
            "/api/admin/stock/toggle_availability/{id}",
            post(handler::toggle_availability),
        )
}
