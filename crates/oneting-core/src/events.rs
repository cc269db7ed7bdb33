use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Every session transition produces an Event.
/// The CLI prints them; the app context reacts to completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    SessionStarted {
        task: String,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    SessionCompleted {
        task: String,
        minutes: u32,
        at: DateTime<Utc>,
    },
    /// Cancelled after the commitment gate opened. Not recorded in history.
    SessionStopped {
        task: String,
        elapsed_secs: u32,
        at: DateTime<Utc>,
    },
    SessionReset {
        duration_secs: u32,
        at: DateTime<Utc>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn events_are_tagged_by_type() {
        let event = Event::SessionReset {
            duration_secs: 1500,
            at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "session_reset");
        assert_eq!(json["duration_secs"], 1500);
    }
}
