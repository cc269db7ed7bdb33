//! Rolling seven-day totals.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::history::HistoryEntry;

/// Days in the window, today included.
pub const WINDOW_DAYS: u64 = 7;

/// Minutes and session count for one calendar day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DayBucket {
    pub minutes: u32,
    pub count: u32,
}

/// Aggregate over the whole window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyTotals {
    pub total_minutes: u32,
    pub total_sessions: u32,
}

/// Per-day buckets for today and the six days before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyStats {
    buckets: BTreeMap<NaiveDate, DayBucket>,
}

impl WeeklyStats {
    /// Fold `entries` into the window ending at `today`.
    ///
    /// Entries outside the window are ignored.
    pub fn compute(entries: &[HistoryEntry], today: NaiveDate) -> Self {
        let mut buckets = BTreeMap::new();
        for offset in 0..WINDOW_DAYS {
            if let Some(day) = today.checked_sub_days(Days::new(offset)) {
                buckets.insert(day, DayBucket::default());
            }
        }

        for entry in entries {
            if let Some(bucket) = buckets.get_mut(&entry.date()) {
                bucket.minutes = bucket.minutes.saturating_add(entry.minutes);
                bucket.count = bucket.count.saturating_add(1);
            }
        }

        Self { buckets }
    }

    /// Buckets in chronological order, oldest first.
    pub fn days(&self) -> impl Iterator<Item = (NaiveDate, DayBucket)> + '_ {
        self.buckets.iter().map(|(d, b)| (*d, *b))
    }

    pub fn totals(&self) -> WeeklyTotals {
        self.buckets
            .values()
            .fold(WeeklyTotals::default(), |acc, b| WeeklyTotals {
                total_minutes: acc.total_minutes.saturating_add(b.minutes),
                total_sessions: acc.total_sessions.saturating_add(b.count),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 20).unwrap()
    }

    fn entry(days_ago: u64, minutes: u32) -> HistoryEntry {
        let date = today() - Days::new(days_ago);
        let finished = Utc.from_utc_datetime(&date.and_hms_opt(8, 30, 0).unwrap());
        HistoryEntry::new("t", minutes, finished)
    }

    #[test]
    fn window_excludes_old_entries() {
        let entries = vec![entry(0, 10), entry(3, 20), entry(10, 5)];
        let totals = WeeklyStats::compute(&entries, today()).totals();
        assert_eq!(
            totals,
            WeeklyTotals {
                total_minutes: 30,
                total_sessions: 2
            }
        );
    }

    #[test]
    fn window_has_seven_days_oldest_first() {
        let stats = WeeklyStats::compute(&[], today());
        let days: Vec<_> = stats.days().map(|(d, _)| d).collect();
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], today() - Days::new(6));
        assert_eq!(days[6], today());
    }

    #[test]
    fn boundary_days() {
        let entries = vec![entry(6, 15), entry(7, 40)];
        let totals = WeeklyStats::compute(&entries, today()).totals();
        assert_eq!(totals.total_minutes, 15);
        assert_eq!(totals.total_sessions, 1);
    }

    #[test]
    fn buckets_accumulate_per_day() {
        let entries = vec![entry(1, 25), entry(1, 50), entry(0, 5)];
        let stats = WeeklyStats::compute(&entries, today());
        let yesterday = stats
            .days()
            .find(|(d, _)| *d == today() - Days::new(1))
            .map(|(_, b)| b)
            .unwrap();
        assert_eq!(yesterday, DayBucket { minutes: 75, count: 2 });
    }

    #[test]
    fn huge_minutes_saturate() {
        let entries = vec![entry(0, u32::MAX), entry(0, 1), entry(2, u32::MAX)];
        let stats = WeeklyStats::compute(&entries, today());
        let today_bucket = stats.days().last().map(|(_, b)| b).unwrap();
        assert_eq!(today_bucket.minutes, u32::MAX);
        assert_eq!(today_bucket.count, 2);
        assert_eq!(
            stats.totals(),
            WeeklyTotals {
                total_minutes: u32::MAX,
                total_sessions: 3
            }
        );
    }

    #[test]
    fn future_entries_are_ignored() {
        let tomorrow = Utc.from_utc_datetime(
            &(today() + Days::new(1)).and_hms_opt(9, 0, 0).unwrap(),
        );
        let entries = vec![HistoryEntry::new("t", 30, tomorrow)];
        assert_eq!(
            WeeklyStats::compute(&entries, today()).totals(),
            WeeklyTotals::default()
        );
    }
}
