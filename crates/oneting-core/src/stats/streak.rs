//! Consecutive-day completion streak.

use std::collections::HashSet;

use chrono::{Days, NaiveDate};

use crate::history::HistoryEntry;

/// Upper bound on how far back the walk goes.
pub const STREAK_WALK_LIMIT: u32 = 3650;

/// Count consecutive days with at least one completed session, walking back
/// from `today`.
///
/// A day without a session ends the streak, so a history with nothing today
/// has a streak of 0 even if yesterday was busy.
pub fn calc_streak(entries: &[HistoryEntry], today: NaiveDate) -> u32 {
    let days: HashSet<NaiveDate> = entries.iter().map(HistoryEntry::date).collect();

    let mut streak = 0;
    for offset in 0..STREAK_WALK_LIMIT {
        let Some(day) = today.checked_sub_days(Days::new(u64::from(offset))) else {
            break;
        };
        if days.contains(&day) {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}

/// `"1 day"`, `"3 days"`.
pub fn streak_label(streak: u32) -> String {
    if streak == 1 {
        "1 day".to_string()
    } else {
        format!("{streak} days")
    }
}
