use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Local;
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    service::MessageService,
    types::{DailyStatsResponse, MessageAck, MessageEvent},
};
use crate::shared::{AppError, AppState};
use crate::stats::{LeaderboardEntry, TotalStats};

/// HTTP handler for incoming chat messages
///
/// POST /messages
/// Returns the outcome and the reaction to add to the message
#[instrument(name = "receive_message", skip(state, event))]
pub async fn receive_message(
    State(state): State<AppState>,
    Json(event): Json<MessageEvent>,
) -> Json<MessageAck> {
    let service = MessageService::new(
        Arc::clone(&state.ledger),
        state.config.results_channel.clone(),
    );

    Json(service.handle(&event).await)
}

/// HTTP handler for a user's stats of the current day
///
/// GET /stats/:user_id
#[instrument(name = "daily_stats", skip(state))]
pub async fn daily_stats(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<DailyStatsResponse>, AppError> {
    info!(user_id = %user_id, "Fetching daily stats");

    let stats = state
        .ledger
        .daily_stats(&user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No stats recorded.".to_string()))?;

    Ok(Json(DailyStatsResponse {
        date: Local::now().date_naive(),
        stats,
    }))
}

/// HTTP handler for a user's cumulative stats
///
/// GET /stats/:user_id/total
#[instrument(name = "total_stats", skip(state))]
pub async fn total_stats(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<TotalStats>, AppError> {
    info!(user_id = %user_id, "Fetching total stats");

    let stats = state
        .ledger
        .total_stats(&user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No stats recorded.".to_string()))?;

    Ok(Json(stats))
}

/// HTTP handler for the Elo ranking of all players
///
/// GET /leaderboard
#[instrument(name = "leaderboard", skip(state))]
pub async fn leaderboard(
    State(state): State<AppState>,
) -> Result<Json<Vec<LeaderboardEntry>>, AppError> {
    let entries = state.ledger.leaderboard().await?;

    info!(entries = entries.len(), "Leaderboard listed");
    Ok(Json(entries))
}
