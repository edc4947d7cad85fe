use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::loldle::{elo_change, LoldleResult};
use crate::store::{Record, SqliteQuery};

/// Elo rating every player starts with.
pub const BASELINE_ELO: i64 = 1000;

/// A user's LoLdle result for the current day, together with the Elo change it caused.
///
/// Stored in the `daily` table, which is emptied every night.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct DailyStats {
    pub user_id: String,
    pub classic: i64,
    pub quote: i64,
    pub ability: i64,
    pub ability_check: bool,
    pub emoji: i64,
    pub splash: i64,
    pub splash_check: bool,
    pub elo_change: i64,
}

impl DailyStats {
    /// Creates the daily record for `user_id`, computing the Elo change from `result`.
    pub fn new(user_id: &str, result: &LoldleResult) -> Self {
        Self {
            user_id: user_id.to_string(),
            classic: result.classic,
            quote: result.quote,
            ability: result.ability,
            ability_check: result.ability_check,
            emoji: result.emoji,
            splash: result.splash,
            splash_check: result.splash_check,
            elo_change: elo_change(result),
        }
    }
}

impl Record for DailyStats {
    const KEY: &'static str = "user_id";
    const COLUMNS: &'static [&'static str] = &[
        "classic",
        "quote",
        "ability",
        "ability_check",
        "emoji",
        "splash",
        "splash_check",
        "elo_change",
    ];

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.classic)
            .bind(self.quote)
            .bind(self.ability)
            .bind(self.ability_check)
            .bind(self.emoji)
            .bind(self.splash)
            .bind(self.splash_check)
            .bind(self.elo_change)
    }
}

/// Cumulative stats of a user over every game played, plus their current Elo.
///
/// Stored in the `total` table and never reset.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct TotalStats {
    pub user_id: String,
    pub classic: i64,
    pub quote: i64,
    pub ability: i64,
    pub ability_check: i64,
    pub emoji: i64,
    pub splash: i64,
    pub splash_check: i64,
    pub days_played: i64,
    pub elo: i64,
}

impl TotalStats {
    /// Fresh stats for a user's first game.
    pub fn new(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            classic: 0,
            quote: 0,
            ability: 0,
            ability_check: 0,
            emoji: 0,
            splash: 0,
            splash_check: 0,
            days_played: 0,
            elo: BASELINE_ELO,
        }
    }

    /// Adds a day's result. Elo never drops below zero.
    pub fn record(&mut self, daily: &DailyStats) {
        self.days_played += 1;
        self.elo = (self.elo + daily.elo_change).max(0);

        self.classic = self.classic.saturating_add(daily.classic);
        self.quote = self.quote.saturating_add(daily.quote);
        self.ability = self.ability.saturating_add(daily.ability);
        self.emoji = self.emoji.saturating_add(daily.emoji);
        self.splash = self.splash.saturating_add(daily.splash);

        self.ability_check += i64::from(daily.ability_check);
        self.splash_check += i64::from(daily.splash_check);
    }
}

impl Record for TotalStats {
    const KEY: &'static str = "user_id";
    const COLUMNS: &'static [&'static str] = &[
        "classic",
        "quote",
        "ability",
        "ability_check",
        "emoji",
        "splash",
        "splash_check",
        "days_played",
        "elo",
    ];

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.classic)
            .bind(self.quote)
            .bind(self.ability)
            .bind(self.ability_check)
            .bind(self.emoji)
            .bind(self.splash)
            .bind(self.splash_check)
            .bind(self.days_played)
            .bind(self.elo)
    }
}

/// Result of a successful submission: the new daily record and the updated totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub daily: DailyStats,
    pub total: TotalStats,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub user_id: String,
    pub elo: i64,
    pub days_played: i64,
    /// Elo change from today's submission, if the user played today.
    pub elo_change: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result() -> LoldleResult {
        LoldleResult {
            classic: 3,
            quote: 2,
            ability: 1,
            ability_check: true,
            emoji: 4,
            splash: 5,
            splash_check: false,
        }
    }

    #[test]
    fn daily_stats_stamp_elo_change() {
        let daily = DailyStats::new("user", &result());

        assert_eq!(daily.user_id, "user");
        assert_eq!(daily.classic, 3);
        assert_eq!(daily.splash, 5);
        assert!(daily.ability_check);
        assert_eq!(daily.elo_change, elo_change(&result()));
    }

    #[test]
    fn new_total_starts_at_baseline() {
        let total = TotalStats::new("user");

        assert_eq!(total.elo, BASELINE_ELO);
        assert_eq!(total.days_played, 0);
        assert_eq!(total.classic, 0);
    }

    #[test]
    fn record_sums_daily_results() {
        let daily = DailyStats::new("user", &result());
        let mut total = TotalStats::new("user");

        total.record(&daily);
        total.record(&daily);

        assert_eq!(total.days_played, 2);
        assert_eq!(total.classic, 6);
        assert_eq!(total.quote, 4);
        assert_eq!(total.ability, 2);
        assert_eq!(total.emoji, 8);
        assert_eq!(total.splash, 10);
        assert_eq!(total.ability_check, 2);
        assert_eq!(total.splash_check, 0);
        assert_eq!(total.elo, BASELINE_ELO + 2 * daily.elo_change);
    }

    #[test]
    fn record_clamps_elo_at_zero() {
        let mut daily = DailyStats::new("user", &result());
        daily.elo_change = -20;
        let mut total = TotalStats::new("user");
        total.elo = 5;

        total.record(&daily);

        assert_eq!(total.elo, 0);
        assert_eq!(total.days_played, 1);
    }

    #[test]
    fn record_saturates_huge_guess_counts() {
        let mut huge = result();
        huge.classic = i64::MAX;
        let daily = DailyStats::new("user", &huge);
        let mut total = TotalStats::new("user");

        total.record(&daily);
        total.record(&daily);

        assert_eq!(total.classic, i64::MAX);
        assert_eq!(total.days_played, 2);
    }
}
