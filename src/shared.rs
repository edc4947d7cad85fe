use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::config::Config;
use crate::stats::{LedgerError, StatsLedger};

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<StatsLedger>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(ledger: Arc<StatsLedger>, config: Arc<Config>) -> Self {
        Self { ledger, config }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

impl From<LedgerError> for AppError {
    fn from(error: LedgerError) -> Self {
        match error {
            LedgerError::Storage(e) => AppError::DatabaseError(e.to_string()),
            LedgerError::DuplicateSubmission(user_id) => {
                AppError::Conflict(format!("Stats for {user_id} already recorded today."))
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::DatabaseError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", msg),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
pub mod test_utils {
    use super::*;
    use crate::store::Database;

    /// Builder for creating AppState backed by a fresh in-memory database
    pub struct AppStateBuilder {
        config: Config,
    }

    impl AppStateBuilder {
        pub fn new() -> Self {
            Self {
                config: Config::default(),
            }
        }

        pub fn with_results_channel(mut self, channel: &str) -> Self {
            self.config.results_channel = Some(channel.to_string());
            self
        }

        pub async fn build(self) -> AppState {
            let db = Database::in_memory()
                .await
                .expect("in-memory database should open");
            db.bootstrap().await.expect("tables should be created");

            AppState::new(Arc::new(StatsLedger::new(db)), Arc::new(self.config))
        }
    }

    impl Default for AppStateBuilder {
        fn default() -> Self {
            Self::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;

    async fn error_body(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_duplicate_submission_is_conflict() {
        let error = AppError::from(LedgerError::DuplicateSubmission("alice".to_string()));

        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = error_body(response).await;
        assert_eq!(body["error"], "Stats for alice already recorded today.");
    }

    #[tokio::test]
    async fn test_storage_failure_is_server_error() {
        let error = AppError::from(LedgerError::Storage(StoreError::Database(
            sqlx::Error::PoolTimedOut,
        )));

        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
