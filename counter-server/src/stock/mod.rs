//! Stock ledger
//!
//! Admin CRUD, the masked public listing and the advisory availability check.
//! Reservation itself happens inside order placement (see `store`).

mod error;
pub mod ledger;

pub use error::{StockError, StockResult};
pub use ledger::StockLedger;
