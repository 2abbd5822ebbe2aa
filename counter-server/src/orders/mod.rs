//! Order lifecycle
//!
//! - **status**: state machine rules (which action is allowed from which status)
//! - **numbering**: display format of the sequence-backed order numbers
//! - **manager**: [`OrdersManager`], validation + transitions + read views
//!
//! ```text
//! (none) ──create──▶ pending_payment ──approve──▶ preparing ──ready──▶ ready ──call──▶ completed
//!                         │
//!                         └──reject──▶ rejected (stock restored)
//! ```

pub mod manager;
pub mod numbering;
pub mod status;

pub use manager::{OrderError, OrderResult, OrdersManager};
pub use numbering::{format_order_number, parse_order_number};
pub use status::{OrderAction, initial_status};
