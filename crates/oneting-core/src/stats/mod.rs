//! Statistics derived from the history log.
//!
//! Both views are pure functions of the log and the current date. They are
//! recomputed on every read and never stored.

mod streak;
mod weekly;

pub use streak::{calc_streak, streak_label, STREAK_WALK_LIMIT};
pub use weekly::{DayBucket, WeeklyStats, WeeklyTotals, WINDOW_DAYS};
