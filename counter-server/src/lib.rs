//! Counter Server - 快餐柜台订单后端
//!
//! # 架构概述
//!
//! - **订单** (`orders`): 下单、付款确认、出餐、叫号的状态机
//! - **库存** (`stock`): 库存台账，下单时原子扣减，拒付时回补
//! - **销售** (`sales`): 销售列表、按商品汇总、CSV 导出
//! - **存储** (`store`): `CounterStore` 接口，SQLite 与内存两种实现
//! - **HTTP API** (`api`): axum 路由和处理器
//!
//! # 模块结构
//!
//! ```text
//! counter-server/src/
//! ├── core/          # 配置、状态、错误、启动
//! ├── store/         # 存储接口 (SQLite / 内存)
//! ├── db/            # SQLite 连接池、迁移、仓储函数
//! ├── orders/        # 订单生命周期、编号
//! ├── stock/         # 库存台账
//! ├── sales/         # 销售报表
//! ├── services/      # HTTP 服务、图片上传
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 错误、日志、时区格式化
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod orders;
pub mod sales;
pub mod services;
pub mod stock;
pub mod store;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerError, ServerState};
pub use orders::{OrderError, OrdersManager};
pub use sales::SalesReporter;
pub use stock::StockLedger;
pub use store::{CounterStore, MemoryStore, SqliteStore};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 加载 `.env` 并初始化日志
///
/// 返回的配置已校验；日志初始化之前的错误直接返回给调用方。
pub fn setup_environment() -> core::Result<Config> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
   ______                  __
  / ____/___  __  ______  / /____  _____
 / /   / __ \/ / / / __ \/ __/ _ \/ ___/
/ /___/ /_/ / /_/ / / / / /_/  __/ /
\____/\____/\__,_/_/ /_/\__/\___/_/
    "#
    );
}
