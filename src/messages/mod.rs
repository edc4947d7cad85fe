// Public API - what other modules can use
pub use handlers::{daily_stats, leaderboard, receive_message, total_stats};
pub use service::MessageService;
pub use types::{DailyStatsResponse, MessageAck, MessageEvent, Outcome};

// Internal modules
mod handlers;
mod service;
mod types;
