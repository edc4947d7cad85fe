use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::messages;
use crate::shared::AppState;

/// Builds the HTTP router with all routes and the request trace layer.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/messages", post(messages::receive_message))
        .route("/stats/:user_id", get(messages::daily_stats))
        .route("/stats/:user_id/total", get(messages::total_stats))
        .route("/leaderboard", get(messages::leaderboard))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
