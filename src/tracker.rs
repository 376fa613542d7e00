//! Tracks the last known review status per homework and decides what to
//! notify about.

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use crate::validate::HomeworkRecord;

/// A status outside the known verdict set. Non-fatal: the caller logs it and
/// moves on to the next record.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown homework status \"{status}\"")]
pub struct UnknownStatus {
    pub status: String,
}

/// Human-readable verdict for each known review status. Closed set: anything
/// else is an [`UnknownStatus`] and is never notified.
fn verdict(status: &str) -> Option<&'static str> {
    match status {
        "approved" => Some("The work has been reviewed: the reviewer liked everything. Hooray!"),
        "reviewing" => Some("The work has been taken up for review."),
        "rejected" => Some("The work has been reviewed: the reviewer has remarks."),
        _ => None,
    }
}

/// Last seen status per homework name. Held in memory only; a restart loses
/// the history and the next cycle re-notifies current statuses.
#[derive(Debug, Default)]
pub struct StatusTracker {
    last_seen: HashMap<String, String>,
}

impl StatusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one observation and return the notification text when the
    /// status changed.
    ///
    /// The first observation of a homework counts as a change from an
    /// implicit empty state and notifies. The map is only written on a
    /// confirmed change of a known status.
    pub fn update(&mut self, record: &HomeworkRecord) -> Result<Option<String>, UnknownStatus> {
        let verdict = verdict(&record.status).ok_or_else(|| UnknownStatus {
            status: record.status.clone(),
        })?;

        if self.last_seen.get(&record.name).map(String::as_str) == Some(record.status.as_str()) {
            debug!("Status of \"{}\" has not changed", record.name);
            return Ok(None);
        }

        self.last_seen
            .insert(record.name.clone(), record.status.clone());
        Ok(Some(format!(
            "Status of review \"{}\" changed. {}",
            record.name, verdict
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, status: &str) -> HomeworkRecord {
        HomeworkRecord {
            name: name.to_string(),
            status: status.to_string(),
        }
    }

    #[test]
    fn test_first_observation_notifies() {
        let mut tracker = StatusTracker::new();

        let message = tracker.update(&record("hw1", "reviewing")).unwrap();

        let message = message.expect("first observation should notify");
        assert!(message.contains("hw1"));
        assert!(message.contains("taken up for review"));
    }

    #[test]
    fn test_repeated_status_is_silent() {
        let mut tracker = StatusTracker::new();

        assert!(tracker.update(&record("hw1", "reviewing")).unwrap().is_some());
        assert!(tracker.update(&record("hw1", "reviewing")).unwrap().is_none());
    }

    #[test]
    fn test_status_change_notifies_with_new_verdict() {
        let mut tracker = StatusTracker::new();

        tracker.update(&record("hw1", "reviewing")).unwrap();
        tracker.update(&record("hw1", "reviewing")).unwrap();
        let message = tracker.update(&record("hw1", "approved")).unwrap();

        let message = message.expect("status change should notify");
        assert!(message.contains("hw1"));
        assert!(message.contains("Hooray!"));
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let mut tracker = StatusTracker::new();

        let err = tracker.update(&record("hw1", "lost")).unwrap_err();

        assert_eq!(err.status, "lost");
    }

    #[test]
    fn test_unknown_status_does_not_mutate_state() {
        let mut tracker = StatusTracker::new();
        tracker.update(&record("hw1", "reviewing")).unwrap();

        tracker.update(&record("hw1", "vanished")).unwrap_err();

        // The stored status is still "reviewing", so repeating it stays silent.
        assert!(tracker.update(&record("hw1", "reviewing")).unwrap().is_none());
    }

    #[test]
    fn test_homeworks_are_tracked_independently() {
        let mut tracker = StatusTracker::new();

        assert!(tracker.update(&record("hw1", "reviewing")).unwrap().is_some());
        assert!(tracker.update(&record("hw2", "reviewing")).unwrap().is_some());
        assert!(tracker.update(&record("hw1", "reviewing")).unwrap().is_none());
    }
}
