//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`orders`] - 顾客下单、状态看板、单个订单状态
//! - [`stock`] - 顾客菜单与购物车库存预检
//! - [`score`] - 满意度评分
//! - [`auth`] - 管理员登录
//! - [`admin_stock`] - 库存管理 (含图片上传)
//! - [`payments`] - pix 付款确认、订单重置
//! - [`sales`] - 销售列表、分析与 CSV 导出
//! - [`kitchen`] - 厨房屏幕
//! - [`monitor`] - 大厅叫号屏
//! - [`manager`] - 叫号

pub mod admin_stock;
pub mod auth;
pub mod health;
pub mod kitchen;
pub mod manager;
pub mod monitor;
pub mod orders;
pub mod payments;
pub mod sales;
pub mod score;
pub mod stock;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult, MessageResponse, message};
