pub mod messages;
pub mod setup;

// Re-export main utilities for use by test files
pub use messages::ResultMessageBuilder;
pub use setup::TestSetup;
