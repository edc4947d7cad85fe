use std::collections::HashMap;

use tracing::{debug, info, instrument, warn};

use super::errors::LedgerError;
use super::models::{DailyStats, LeaderboardEntry, Submission, TotalStats};
use crate::loldle::LoldleResult;
use crate::store::{Database, StoreError, Table};

pub const DAILY_TABLE: &str = "daily";
pub const TOTAL_TABLE: &str = "total";

/// Owns the write path to the daily and total stats tables.
#[derive(Debug, Clone)]
pub struct StatsLedger {
    db: Database,
    daily: Table<DailyStats>,
    total: Table<TotalStats>,
}

impl StatsLedger {
    pub fn new(db: Database) -> Self {
        let daily = Table::new(db.pool().clone(), DAILY_TABLE);
        let total = Table::new(db.pool().clone(), TOTAL_TABLE);

        Self { db, daily, total }
    }

    /// Records `result` as today's submission for `user_id` and folds it into their totals.
    ///
    /// Both tables are written in a single transaction. A second submission on the same day
    /// fails with [`LedgerError::DuplicateSubmission`] and leaves both tables untouched.
    #[instrument(skip(self, result))]
    pub async fn apply(
        &self,
        user_id: &str,
        result: &LoldleResult,
    ) -> Result<Submission, LedgerError> {
        let daily = DailyStats::new(user_id, result);
        info!(elo_change = daily.elo_change, "Updating daily stats");

        let mut tx = self.db.begin().await?;

        // Primary key conflicts on the daily table are the only duplicate check. Concurrent
        // submissions from the same user race on this insert and exactly one wins.
        match self.daily.with_tx(&mut tx).create(user_id, &daily).await {
            Ok(()) => {}
            Err(StoreError::Conflict { .. }) => {
                warn!("Stats already recorded today");
                return Err(LedgerError::DuplicateSubmission(user_id.to_string()));
            }
            Err(e) => return Err(e.into()),
        }

        let mut totals = self.total.with_tx(&mut tx);
        let mut total = match totals.get(user_id).await {
            Ok(total) => total,
            Err(StoreError::NotFound { .. }) => {
                info!("No stats found, creating total stats");
                let total = TotalStats::new(user_id);
                totals.create(user_id, &total).await?;
                total
            }
            Err(e) => return Err(e.into()),
        };

        total.record(&daily);
        debug!(?total, "Updating total stats");
        totals.update(user_id, &total).await?;

        tx.commit().await.map_err(|e| {
            warn!(error = %e, "Transaction commit failure");
            StoreError::Database(e)
        })?;

        info!(elo = total.elo, days_played = total.days_played, "Stats recorded");
        Ok(Submission { daily, total })
    }

    /// Clears today's stats and returns the number of removed entries.
    ///
    /// Runs in its own transaction so it never interleaves with a submission.
    #[instrument(skip(self))]
    pub async fn reset_daily(&self) -> Result<u64, LedgerError> {
        info!("Performing daily reset");

        let mut tx = self.db.begin().await?;
        let deleted = self.daily.with_tx(&mut tx).delete_all().await?;
        tx.commit().await.map_err(StoreError::Database)?;

        info!(deleted, "Daily stats cleared");
        Ok(deleted)
    }

    /// Today's stats for `user_id`, if they submitted any.
    pub async fn daily_stats(&self, user_id: &str) -> Result<Option<DailyStats>, LedgerError> {
        match self.daily.get(user_id).await {
            Ok(daily) => Ok(Some(daily)),
            Err(StoreError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Every submission recorded today, in storage order.
    pub async fn todays_stats(&self) -> Result<Vec<DailyStats>, LedgerError> {
        Ok(self.daily.get_all().await?)
    }

    /// Cumulative stats for `user_id`, if they ever played.
    pub async fn total_stats(&self, user_id: &str) -> Result<Option<TotalStats>, LedgerError> {
        match self.total.get(user_id).await {
            Ok(total) => Ok(Some(total)),
            Err(StoreError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// All players ranked by Elo, highest first. Ties are ordered by user ID.
    #[instrument(skip(self))]
    pub async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, LedgerError> {
        let mut totals = self.total.get_all().await?;
        let changes: HashMap<String, i64> = self
            .daily
            .get_all()
            .await?
            .into_iter()
            .map(|daily| (daily.user_id, daily.elo_change))
            .collect();

        totals.sort_by(|a, b| b.elo.cmp(&a.elo).then_with(|| a.user_id.cmp(&b.user_id)));

        let entries: Vec<LeaderboardEntry> = totals
            .into_iter()
            .enumerate()
            .map(|(i, total)| LeaderboardEntry {
                rank: i + 1,
                elo_change: changes.get(&total.user_id).copied(),
                user_id: total.user_id,
                elo: total.elo,
                days_played: total.days_played,
            })
            .collect();

        debug!(entries = entries.len(), "Leaderboard built");
        Ok(entries)
    }
}
