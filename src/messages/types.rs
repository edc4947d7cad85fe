use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::stats::DailyStats;

/// A chat message as delivered by the platform gateway.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MessageEvent {
    pub author_id: String,
    pub channel_id: String,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Not a result message, or posted outside the results channel.
    Ignored,
    Recorded,
    /// Looked like a result message but could not be parsed.
    NotUnderstood,
    /// Duplicate submission or storage failure.
    Failed,
}

impl Outcome {
    /// Reaction the bot adds to the message.
    pub fn reaction(self) -> Option<&'static str> {
        match self {
            Outcome::Ignored => None,
            Outcome::Recorded => Some("✅"),
            Outcome::NotUnderstood => Some("❓"),
            Outcome::Failed => Some("❌"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MessageAck {
    pub outcome: Outcome,
    pub reaction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elo_change: Option<i64>,
}

impl MessageAck {
    pub fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            reaction: outcome.reaction().map(str::to_string),
            elo_change: None,
        }
    }

    pub fn recorded(elo_change: i64) -> Self {
        Self {
            elo_change: Some(elo_change),
            ..Self::new(Outcome::Recorded)
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DailyStatsResponse {
    pub date: NaiveDate,
    pub stats: DailyStats,
}
