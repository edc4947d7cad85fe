mod errors;
pub mod models;
pub mod parser;
pub mod scoring;

pub use errors::ParseError;
pub use models::{Category, LoldleResult, CHECKMARK, LOLDLE_HEADER};
pub use parser::{can_parse, parse};
pub use scoring::elo_change;
