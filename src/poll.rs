//! The poll loop: fetch, validate, track, notify, sleep.
//!
//! Every failure mode is recoverable here. A fetch or validation error skips
//! the rest of the cycle and leaves the cursor where it was, so the next
//! cycle retries the same window. Per-record conditions (unknown status,
//! failed send) never stop the remaining records of the cycle.

use serde_json::Value;
use tokio::time::{interval, Duration};
use tracing::{error, info, warn};

use crate::client::{FetchError, ReviewClient};
use crate::notify::Notify;
use crate::tracker::StatusTracker;
use crate::validate::{validate, ReviewBatch};

pub struct PollState {
    pub cursor: i64,
    pub tracker: StatusTracker,
}

impl PollState {
    pub fn new(cursor: i64) -> Self {
        Self {
            cursor,
            tracker: StatusTracker::new(),
        }
    }
}

/// Run the poll cycle forever. Only process termination exits this loop.
pub async fn poll_loop(
    mut state: PollState,
    client: &ReviewClient,
    notifier: &impl Notify,
    interval_secs: u64,
) {
    let mut ticker = interval(Duration::from_secs(interval_secs));

    loop {
        ticker.tick().await;
        run_cycle(&mut state, client, notifier).await;
    }
}

async fn run_cycle(state: &mut PollState, client: &ReviewClient, notifier: &impl Notify) {
    let outcome = client.fetch(state.cursor).await;
    apply_fetch_outcome(state, outcome, notifier).await;
}

/// Handle one cycle's fetch outcome. Split from [`run_cycle`] so tests can
/// drive the cycle without a live API.
pub async fn apply_fetch_outcome(
    state: &mut PollState,
    outcome: Result<Value, FetchError>,
    notifier: &impl Notify,
) {
    let raw = match outcome {
        Ok(raw) => raw,
        Err(e) => {
            error!("Fetch failed, will retry from cursor {}: {}", state.cursor, e);
            return;
        }
    };

    let batch = match validate(&raw) {
        Ok(batch) => batch,
        Err(e) => {
            error!(
                "Response validation failed, will retry from cursor {}: {}",
                state.cursor, e
            );
            return;
        }
    };

    process_batch(state, &batch, notifier).await;

    // The fetch+validate stage succeeded, so the window is consumed even if
    // some notifications were not delivered. Re-fetching the same window
    // until Telegram recovers would mask newer changes.
    let next = batch.as_of.unwrap_or(state.cursor);
    if next != state.cursor {
        info!("Cursor advanced from {} to {}", state.cursor, next);
        state.cursor = next;
    }
}

async fn process_batch(state: &mut PollState, batch: &ReviewBatch, notifier: &impl Notify) {
    for record in &batch.homeworks {
        match state.tracker.update(record) {
            Ok(Some(message)) => {
                if !notifier.send(&message).await {
                    warn!("Notification for \"{}\" was not delivered", record.name);
                }
            }
            Ok(None) => {}
            Err(e) => warn!("Skipping homework \"{}\": {}", record.name, e),
        }
    }
}
