//! Persisted log of completed focus sessions.
//!
//! The log is a JSON array stored under a single key ([`HISTORY_KEY`]),
//! newest entry first and capped at [`HISTORY_CAP`]. Entries are only ever
//! prepended by a completed session and only ever removed all at once by
//! [`HistoryStore::clear`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::storage::KvStore;

/// Storage key of the history log.
pub const HISTORY_KEY: &str = "focus_history_v1";

/// Maximum number of entries kept.
pub const HISTORY_CAP: usize = 200;

/// One completed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub task: String,
    /// Whole minutes of the committed duration.
    pub minutes: u32,
    pub finished_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(task: impl Into<String>, minutes: u32, finished_at: DateTime<Utc>) -> Self {
        Self {
            task: task.into(),
            minutes,
            finished_at,
        }
    }

    /// UTC calendar date the session finished on.
    pub fn date(&self) -> NaiveDate {
        self.finished_at.date_naive()
    }

    /// Task label for display.
    pub fn display_task(&self) -> &str {
        if self.task.trim().is_empty() {
            "Untitled task"
        } else {
            &self.task
        }
    }
}

/// History entries that finished on the same UTC date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayGroup {
    pub date: NaiveDate,
    pub entries: Vec<HistoryEntry>,
}

/// Group entries by finish date, newest date first.
///
/// Entries keep their relative order inside a group.
pub fn group_by_day(entries: &[HistoryEntry]) -> Vec<DayGroup> {
    let mut groups: Vec<DayGroup> = Vec::new();
    for entry in entries {
        let date = entry.date();
        match groups.iter_mut().find(|g| g.date == date) {
            Some(group) => group.entries.push(entry.clone()),
            None => groups.push(DayGroup {
                date,
                entries: vec![entry.clone()],
            }),
        }
    }
    groups.sort_by(|a, b| b.date.cmp(&a.date));
    groups
}

/// Persistence-backed history log.
///
/// Single writer: the session completion path and the explicit clear.
pub struct HistoryStore<S> {
    store: S,
    entries: Vec<HistoryEntry>,
}

impl<S: KvStore> HistoryStore<S> {
    /// Open the store and read the persisted log.
    pub fn open(store: S) -> Self {
        let mut history = Self {
            store,
            entries: Vec::new(),
        };
        history.load();
        history
    }

    /// Re-read the persisted log.
    ///
    /// Absent, unreadable or malformed data yields an empty log.
    pub fn load(&mut self) -> &[HistoryEntry] {
        self.entries = match self.store.read(HISTORY_KEY) {
            Ok(Some(raw)) => parse_entries(&raw),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "failed to read history, treating as empty");
                Vec::new()
            }
        };
        &self.entries
    }

    /// Current log, newest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Prepend an entry, truncate to [`HISTORY_CAP`] and persist.
    ///
    /// The in-memory log only changes once the write succeeded.
    ///
    /// # Errors
    /// Returns an error if the log cannot be encoded or written.
    pub fn append(&mut self, entry: HistoryEntry) -> Result<&[HistoryEntry]> {
        let mut next = Vec::with_capacity((self.entries.len() + 1).min(HISTORY_CAP));
        next.push(entry);
        next.extend(self.entries.iter().cloned());
        next.truncate(HISTORY_CAP);

        let raw = serde_json::to_string(&next)?;
        self.store.write(HISTORY_KEY, &raw)?;
        debug!(len = next.len(), "history appended");

        self.entries = next;
        Ok(&self.entries)
    }

    /// Remove the whole log.
    ///
    /// # Errors
    /// Returns an error if the key cannot be deleted.
    pub fn clear(&mut self) -> Result<&[HistoryEntry]> {
        self.store.delete(HISTORY_KEY)?;
        debug!("history cleared");
        self.entries.clear();
        Ok(&self.entries)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

fn parse_entries(raw: &str) -> Vec<HistoryEntry> {
    match serde_json::from_str::<Vec<HistoryEntry>>(raw) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(error = %e, "malformed history, treating as empty");
            Vec::new()
        }
    }
}
