mod database;
mod errors;
pub mod table;

pub use database::Database;
pub use errors::StoreError;
pub use table::{Record, SqliteQuery, Table, TxTable};
