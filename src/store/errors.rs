use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no entry {id} in {table}")]
    NotFound { table: &'static str, id: String },

    /// The primary key is already taken.
    #[error("entry {id} already exists in {table}")]
    Conflict { table: &'static str, id: String },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Maps a failed insert, separating primary key conflicts from other database errors.
    pub(crate) fn from_insert(error: sqlx::Error, table: &'static str, id: &str) -> Self {
        let conflict = match &error {
            sqlx::Error::Database(db_error) => {
                db_error.is_unique_violation()
                    // SQLITE_CONSTRAINT_PRIMARYKEY, SQLITE_CONSTRAINT_UNIQUE
                    || matches!(db_error.code().as_deref(), Some("1555") | Some("2067"))
            }
            _ => false,
        };

        if conflict {
            StoreError::Conflict {
                table,
                id: id.to_string(),
            }
        } else {
            StoreError::Database(error)
        }
    }
}
