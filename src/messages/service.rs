use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use super::types::{MessageAck, MessageEvent, Outcome};
use crate::loldle::{can_parse, parse};
use crate::stats::{LedgerError, StatsLedger};

/// Turns incoming chat messages into stats submissions.
pub struct MessageService {
    ledger: Arc<StatsLedger>,
    results_channel: Option<String>,
}

impl MessageService {
    pub fn new(ledger: Arc<StatsLedger>, results_channel: Option<String>) -> Self {
        Self {
            ledger,
            results_channel,
        }
    }

    /// Handles a single message. Never fails: every problem is reported through the ack.
    #[instrument(skip(self, event), fields(author_id = %event.author_id, channel_id = %event.channel_id))]
    pub async fn handle(&self, event: &MessageEvent) -> MessageAck {
        if let Some(channel) = &self.results_channel {
            if &event.channel_id != channel {
                debug!("Message outside of results channel");
                return MessageAck::new(Outcome::Ignored);
            }
        }

        if !can_parse(&event.content) {
            debug!("Not a LoLdle result message");
            return MessageAck::new(Outcome::Ignored);
        }

        let result = match parse(&event.content) {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "Message parsing failed");
                return MessageAck::new(Outcome::NotUnderstood);
            }
        };

        match self.ledger.apply(&event.author_id, &result).await {
            Ok(submission) => {
                info!(elo_change = submission.daily.elo_change, "Daily stats recorded");
                MessageAck::recorded(submission.daily.elo_change)
            }
            Err(LedgerError::DuplicateSubmission(_)) => {
                warn!("Duplicate daily submission");
                MessageAck::new(Outcome::Failed)
            }
            Err(e) => {
                error!(error = %e, "Failed to record daily stats");
                MessageAck::new(Outcome::Failed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loldle::LOLDLE_HEADER;
    use crate::store::Database;

    fn event(author_id: &str, channel_id: &str, content: &str) -> MessageEvent {
        MessageEvent {
            author_id: author_id.to_string(),
            channel_id: channel_id.to_string(),
            content: content.to_string(),
        }
    }

    fn share_message(classic: &str) -> String {
        format!(
            "{LOLDLE_HEADER}\n❓ Classic: {classic}\n💬 Quote: 1\n🔥 Ability: 1 ✓\n😃 Emoji: 1\n🎨 Splash: 1 ✓"
        )
    }

    async fn service(results_channel: Option<&str>) -> MessageService {
        let db = Database::in_memory().await.unwrap();
        db.bootstrap().await.unwrap();
        MessageService::new(
            Arc::new(StatsLedger::new(db)),
            results_channel.map(str::to_string),
        )
    }

    #[tokio::test]
    async fn records_valid_result() {
        let service = service(None).await;

        let ack = service.handle(&event("alice", "c", &share_message("1"))).await;

        assert_eq!(ack.outcome, Outcome::Recorded);
        assert_eq!(ack.reaction.as_deref(), Some("✅"));
        assert_eq!(ack.elo_change, Some(24));
    }

    #[tokio::test]
    async fn ignores_chatter() {
        let service = service(None).await;

        let ack = service.handle(&event("alice", "c", "gg everyone")).await;

        assert_eq!(ack, MessageAck::new(Outcome::Ignored));
        assert!(ack.reaction.is_none());
    }

    #[tokio::test]
    async fn ignores_other_channels() {
        let service = service(Some("results")).await;

        let ack = service
            .handle(&event("alice", "general", &share_message("1")))
            .await;
        assert_eq!(ack.outcome, Outcome::Ignored);

        let ack = service
            .handle(&event("alice", "results", &share_message("1")))
            .await;
        assert_eq!(ack.outcome, Outcome::Recorded);
    }

    #[tokio::test]
    async fn malformed_result_is_not_understood() {
        let service = service(None).await;

        let ack = service
            .handle(&event("alice", "c", &share_message("abc")))
            .await;

        assert_eq!(ack.outcome, Outcome::NotUnderstood);
        assert_eq!(ack.reaction.as_deref(), Some("❓"));
    }

    #[tokio::test]
    async fn second_submission_fails() {
        let service = service(None).await;
        service
            .handle(&event("alice", "c", &share_message("1")))
            .await;

        let ack = service
            .handle(&event("alice", "c", &share_message("2")))
            .await;

        assert_eq!(ack.outcome, Outcome::Failed);
        assert_eq!(ack.reaction.as_deref(), Some("❌"));
    }
}
