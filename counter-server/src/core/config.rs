use std::path::PathBuf;

use chrono::FixedOffset;

use super::{Result, ServerError};
use crate::orders::manager::DEFAULT_RECENTLY_CALLED_LIMIT;
use crate::utils::time::offset_from_hours;

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖（启动时会先加载 `.env`）：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (数据库、上传图片、日志) |
/// | HTTP_PORT | 5000 | HTTP 服务端口 |
/// | DATABASE_FILE | {WORK_DIR}/database/counter.db | SQLite 文件 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | - | 日志文件目录 (不设置则只输出到终端) |
/// | BUSINESS_UTC_OFFSET_HOURS | -3 | 业务时区 (固定偏移，不含夏令时) |
/// | RECENTLY_CALLED_LIMIT | 6 | 叫号屏显示的最近已叫号数量 |
/// | ADMIN_ID / ADMIN_PASSWORD | - | 管理员凭据 (非 development 环境必填) |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/srv/counter HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 显式指定的数据库文件
    pub database_file: Option<String>,
    /// 运行环境: development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    /// 业务时区偏移 (小时)
    pub business_utc_offset_hours: i32,
    pub recently_called_limit: i64,
    pub admin_id: String,
    pub admin_password: String,
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Secret that must be set outside development
fn require_secret(name: &str, environment: &str) -> Result<String> {
    let value = match std::env::var(name) {
        Ok(v) => v,
        Err(_) => {
            if environment != "development" {
                return Err(ServerError::Config(format!(
                    "{name} must be set in {environment} environment"
                )));
            }
            format!("dev-{name}-not-for-production")
        }
    };
    if value.is_empty() && environment != "development" {
        return Err(ServerError::Config(format!(
            "{name} must not be empty in {environment} environment"
        )));
    }
    Ok(value)
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 未设置的项使用默认值；非 development 环境缺少管理员凭据时报错
    pub fn from_env() -> Result<Self> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: env_or("HTTP_PORT", 5000),
            database_file: std::env::var("DATABASE_FILE").ok().filter(|v| !v.is_empty()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|v| !v.is_empty()),
            business_utc_offset_hours: env_or("BUSINESS_UTC_OFFSET_HOURS", -3),
            recently_called_limit: env_or("RECENTLY_CALLED_LIMIT", DEFAULT_RECENTLY_CALLED_LIMIT),
            admin_id: require_secret("ADMIN_ID", &environment)?,
            admin_password: require_secret("ADMIN_PASSWORD", &environment)?,
            environment,
        };
        config.validate()?;
        Ok(config)
    }

    /// 使用自定义值覆盖部分配置，不读取环境变量
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        Self {
            work_dir: work_dir.into(),
            http_port,
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<()> {
        self.business_offset()?;
        if self.recently_called_limit < 0 {
            return Err(ServerError::Config(format!(
                "RECENTLY_CALLED_LIMIT must not be negative, got {}",
                self.recently_called_limit
            )));
        }
        Ok(())
    }

    pub fn business_offset(&self) -> Result<FixedOffset> {
        offset_from_hours(self.business_utc_offset_hours)
            .map_err(|e| ServerError::Config(e.message))
    }

    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir)
    }

    /// 数据库文件路径
    pub fn database_path(&self) -> PathBuf {
        match &self.database_file {
            Some(file) => PathBuf::from(file),
            None => self.work_dir().join("database").join("counter.db"),
        }
    }

    /// 上传图片目录 (对外路径 `/uploads/<file>`)
    pub fn uploads_dir(&self) -> PathBuf {
        self.work_dir().join("uploads")
    }

    /// 创建工作目录结构
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.uploads_dir())?;
        if let Some(parent) = self.database_path().parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    /// development 默认值
    fn default() -> Self {
        Self {
            work_dir: "./data".into(),
            http_port: 5000,
            database_file: None,
            environment: "development".into(),
            log_level: "info".into(),
            log_dir: None,
            business_utc_offset_hours: -3,
            recently_called_limit: DEFAULT_RECENTLY_CALLED_LIMIT,
            admin_id: "dev-ADMIN_ID-not-for-production".into(),
            admin_password: "dev-ADMIN_PASSWORD-not-for-production".into(),
        }
    }
}
