use std::sync::Arc;

use super::{Config, Result};
use crate::db::DbService;
use crate::orders::OrdersManager;
use crate::sales::SalesReporter;
use crate::stock::StockLedger;
use crate::store::{CounterStore, SqliteStore};

/// 服务器状态 - 持有所有服务的共享引用
///
/// 所有字段都是 Arc 或可廉价 Clone 的句柄，axum 每个请求 clone 一次。
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | store | 存储接口 (SQLite / 内存) |
/// | orders | 订单生命周期 |
/// | stock | 库存管理 |
/// | sales | 销售报表 |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub store: Arc<dyn CounterStore>,
    pub orders: OrdersManager,
    pub stock: StockLedger,
    pub sales: SalesReporter,
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("config", &self.config)
            .field("orders", &self.orders)
            .finish_non_exhaustive()
    }
}

impl ServerState {
    /// 用给定的存储构造状态 (测试使用 `MemoryStore`)
    pub fn with_store(config: Config, store: Arc<dyn CounterStore>) -> Result<Self> {
        let offset = config.business_offset()?;
        let orders = OrdersManager::new(store.clone(), offset)
            .with_recently_called_limit(config.recently_called_limit);
        let stock = StockLedger::new(store.clone());
        let sales = SalesReporter::new(store.clone(), offset);
        Ok(Self {
            config,
            store,
            orders,
            stock,
            sales,
        })
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (数据库目录、上传目录)
    /// 2. 数据库 (WAL + 迁移)
    /// 3. 各服务
    pub async fn initialize(config: &Config) -> Result<Self> {
        config.ensure_work_dir_structure()?;

        let db_path = config.database_path();
        let db = DbService::new(&db_path.to_string_lossy()).await?;
        tracing::info!(path = %db_path.display(), "Database ready");

        Self::with_store(config.clone(), Arc::new(SqliteStore::new(db)))
    }

    /// 打印启动横幅 (日志)
    pub fn print_banner(&self) {
        tracing::info!("╔══════════════════════════════════════════════════════════════╗");
        tracing::info!("║                      COUNTER SERVER                          ║");
        tracing::info!("╚══════════════════════════════════════════════════════════════╝");
        tracing::info!("  Environment  : {}", self.config.environment);
        tracing::info!("  Work dir     : {}", self.config.work_dir);
        tracing::info!("  Database     : {}", self.config.database_path().display());
        tracing::info!("  UTC offset   : {}h", self.config.business_utc_offset_hours);
        tracing::info!("  HTTP Server  : http://localhost:{}", self.config.http_port);
        tracing::info!("════════════════════════════════════════════════════════════════");
    }
}
