use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local, TimeZone};
use tokio::time::sleep;
use tracing::{error, info, instrument};

use super::ledger::StatsLedger;

/// Nominal time between two daily resets.
pub const RESET_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Window after a reset during which the same midnight is never scheduled again.
const RESET_SLACK_SECS: i64 = 60;

/// Time left from `now` until the next midnight in the same timezone.
pub fn until_next_midnight<Tz: TimeZone>(now: &DateTime<Tz>) -> Duration {
    let next = now
        .date_naive()
        .succ_opt()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .and_then(|midnight| now.timezone().from_local_datetime(&midnight).earliest());

    match next {
        Some(next) => (next - now.clone()).to_std().unwrap_or(Duration::ZERO),
        None => RESET_INTERVAL,
    }
}

/// Delay before the next reset, measured right after one ran at `now`.
///
/// A reset that fired a little early still skips to the following midnight.
pub fn next_reset_delay<Tz: TimeZone>(now: &DateTime<Tz>) -> Duration {
    let slack = chrono::Duration::seconds(RESET_SLACK_SECS);
    let later = now.clone() + slack;

    until_next_midnight(&later) + Duration::from_secs(RESET_SLACK_SECS.unsigned_abs())
}

/// Starts the background task that clears the daily stats every night at local midnight.
///
/// Clearing the table is what allows users to submit again, since repeat submissions are
/// detected through primary key conflicts on it. The delay is recomputed from the wall clock
/// after every reset, so days with a DST change still reset at midnight.
#[instrument(skip(ledger))]
pub async fn start_reset_task(ledger: Arc<StatsLedger>) {
    let mut delay = until_next_midnight(&Local::now());

    loop {
        info!(delay_secs = delay.as_secs(), "Scheduling daily reset");
        sleep(delay).await;

        run_daily_reset(&ledger).await;
        delay = next_reset_delay(&Local::now());
    }
}

/// Runs a single reset. Failures are logged and retried at the next midnight only.
pub async fn run_daily_reset(ledger: &StatsLedger) {
    info!("Running daily reset");

    match ledger.reset_daily().await {
        Ok(deleted) => info!(deleted, "Daily reset completed"),
        Err(e) => error!(error = %e, "Failed to clear daily stats"),
    }
}
