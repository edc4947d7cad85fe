mod errors;
pub mod ledger;
pub mod models;
pub mod reset_task;

pub use errors::LedgerError;
pub use ledger::StatsLedger;
pub use models::*;
pub use reset_task::start_reset_task;
