// Library crate for the LoLdle stats bot
// This file exposes the public API for integration tests

pub mod app;
pub mod config;
pub mod loldle;
pub mod messages;
pub mod shared;
pub mod stats;
pub mod store;

// Re-export commonly used types for easier access in tests
pub use app::router;
pub use config::Config;
pub use loldle::{LoldleResult, ParseError};
pub use shared::{AppError, AppState};
pub use stats::{LedgerError, StatsLedger};
pub use store::{Database, StoreError};
