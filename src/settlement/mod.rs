//! Settling an event: who owes whom and how much.

mod domain;
mod endpoint;
mod engine;
mod snapshot;

pub use domain::{ExpenseRecord, MAX_AMOUNT, Settlement, Transfer};
pub use endpoint::get_settlement_endpoint;
pub use engine::compute_settlement;
pub use snapshot::get_event_snapshot;
