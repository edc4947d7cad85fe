use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use tempfile::TempDir;
use tower::ServiceExt;

use tons_of_stats::{
    messages::{MessageAck, MessageEvent},
    router, AppState, Config, Database, StatsLedger,
};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub ledger: Arc<StatsLedger>,
    pub app: Router,
    // Keeps the database file alive for file-backed setups
    _dir: Option<TempDir>,
}

impl TestSetup {
    /// Setup backed by a single-connection in-memory database.
    pub async fn new() -> Self {
        let db = Database::in_memory()
            .await
            .expect("in-memory database should open");

        Self::with_database(db, None).await
    }

    /// Setup backed by a database file in a temporary directory, with a pool of
    /// `connections` so that transactions really run side by side.
    pub async fn with_file_database(connections: u32) -> Self {
        let dir = TempDir::new().expect("temporary directory should be created");
        let url = format!(
            "sqlite://{}?mode=rwc",
            dir.path().join("stats.sqlite").display()
        );

        let db = Database::connect(&url, connections)
            .await
            .expect("database file should open");

        Self::with_database(db, Some(dir)).await
    }

    async fn with_database(db: Database, dir: Option<TempDir>) -> Self {
        db.bootstrap().await.expect("tables should be created");

        let ledger = Arc::new(StatsLedger::new(db));
        let app = router(AppState::new(
            Arc::clone(&ledger),
            Arc::new(Config::default()),
        ));

        Self {
            ledger,
            app,
            _dir: dir,
        }
    }

    /// Posts a chat message through the HTTP ingress and returns the ack.
    pub async fn post_message(&self, author_id: &str, content: &str) -> MessageAck {
        let event = MessageEvent {
            author_id: author_id.to_string(),
            channel_id: "result-spam".to_string(),
            content: content.to_string(),
        };

        let request = Request::builder()
            .method("POST")
            .uri("/messages")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&event).unwrap()))
            .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }
}
