use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("user {0} already submitted stats today")]
    DuplicateSubmission(String),

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}
