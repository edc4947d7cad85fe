use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, Transaction};
use tracing::{debug, error, info, instrument};

use super::errors::StoreError;

const CREATE_DAILY: &str = "
    CREATE TABLE IF NOT EXISTS daily (
        user_id       TEXT    NOT NULL PRIMARY KEY,
        classic       INTEGER NOT NULL,
        quote         INTEGER NOT NULL,
        ability       INTEGER NOT NULL,
        ability_check BOOLEAN NOT NULL,
        emoji         INTEGER NOT NULL,
        splash        INTEGER NOT NULL,
        splash_check  BOOLEAN NOT NULL,
        elo_change    INTEGER NOT NULL
    )";

const CREATE_TOTAL: &str = "
    CREATE TABLE IF NOT EXISTS total (
        user_id       TEXT    NOT NULL PRIMARY KEY,
        classic       INTEGER NOT NULL,
        quote         INTEGER NOT NULL,
        ability       INTEGER NOT NULL,
        ability_check INTEGER NOT NULL,
        emoji         INTEGER NOT NULL,
        splash        INTEGER NOT NULL,
        splash_check  INTEGER NOT NULL,
        days_played   INTEGER NOT NULL,
        elo           INTEGER NOT NULL
    )";

/// Handle to the SQLite database holding the stats tables.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    #[instrument]
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        info!("Connecting to database");

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;

        Ok(Self::new(pool))
    }

    /// Private in-memory database. Limited to a single connection that is never recycled, as
    /// every SQLite connection to `:memory:` opens a fresh database.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the stats tables if they do not exist yet.
    #[instrument(skip(self))]
    pub async fn bootstrap(&self) -> Result<(), StoreError> {
        info!("Configuring database");

        for stmt in [CREATE_DAILY, CREATE_TOTAL] {
            if let Err(e) = sqlx::query(stmt).execute(&self.pool).await {
                error!(stmt = %stmt.trim(), error = %e, "Failed to execute statement");
                return Err(e.into());
            }
        }

        debug!("Database tables ready");
        Ok(())
    }

    /// Starts a transaction. Dropping it without committing rolls back.
    pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>, StoreError> {
        self.pool.begin().await.map_err(|e| {
            error!(error = %e, "Transaction start failure");
            StoreError::Database(e)
        })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
