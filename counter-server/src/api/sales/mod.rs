//! 销售报表接口 (管理端)
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/admin/sales | GET | 全部订单，最新的在前 |
//! | /api/admin/sales/analysis | GET | 按商品名汇总，最畅销 / 最滞销 |
//! | /api/admin/sales/export | GET | CSV 下载 |
//! | /api/admin/sales/{id} | DELETE | 删除一条销售记录 (不回补库存) |

mod handler;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/admin/sales", get(handler::list))
        .route("/api/admin/sales/analysis", get(handler::analysis))
        .route("/api/admin/sales/export", get(handler::export))
        .route("/api/admin/sales/{id}", delete(handler::delete))
}
