//! Data models
//!
//! Shared between counter-server and the kiosk/kitchen/admin frontends (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod order;
pub mod sales;
pub mod score;
pub mod stock;

// Re-exports
pub use order::*;
pub use sales::*;
pub use score::*;
pub use stock::*;
