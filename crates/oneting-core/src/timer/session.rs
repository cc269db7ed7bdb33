//! Focus session state machine.
//!
//! A session runs one task for a committed duration. Remaining time is
//! always recomputed from the wall-clock start instant rather than
//! decremented per tick, so late, coalesced or missed ticks only delay the
//! display and never skew the countdown.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> (Completed | Stopped) -> Idle
//! ```
//!
//! The machine has no thread of its own; the caller invokes `tick()`
//! periodically while it is running.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::gate;
use crate::events::Event;
use crate::time::format_time;

/// Shortest allowed session, in minutes.
pub const MIN_MINUTES: u32 = 1;
/// Longest allowed session, in minutes.
pub const MAX_MINUTES: u32 = 180;

/// Clamp user-entered minutes into `[MIN_MINUTES, MAX_MINUTES]`.
pub fn clamp_minutes(minutes: i64) -> u32 {
    minutes.clamp(i64::from(MIN_MINUTES), i64::from(MAX_MINUTES)) as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Idle,
    Running,
    Completed,
    Stopped,
}

/// The single live session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    task: String,
    /// Minutes requested by the duration input, clamped.
    minutes_input: u32,
    duration_secs: u32,
    status: SessionStatus,
    started_at: Option<DateTime<Utc>>,
    remaining_secs: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(25)
    }
}

impl Session {
    /// Idle session whose duration input is `minutes` (clamped).
    pub fn new(minutes: i64) -> Self {
        let minutes_input = clamp_minutes(minutes);
        Self {
            task: String::new(),
            minutes_input,
            duration_secs: minutes_input * 60,
            status: SessionStatus::Idle,
            started_at: None,
            remaining_secs: minutes_input * 60,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Trimmed task of the current (or last) session.
    pub fn task(&self) -> &str {
        &self.task
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    /// Whole minutes of the committed duration.
    pub fn minutes(&self) -> u32 {
        self.duration_secs / 60
    }

    pub fn minutes_input(&self) -> u32 {
        self.minutes_input
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.duration_secs - self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.status == SessionStatus::Running
    }

    /// Seconds that must elapse before stopping is allowed.
    pub fn stop_threshold(&self) -> u32 {
        gate::stop_threshold(self.duration_secs)
    }

    /// True while running with the commitment gate open.
    pub fn can_stop(&self) -> bool {
        self.is_running() && gate::is_open(self.duration_secs, self.elapsed_secs())
    }

    /// Seconds until the gate opens, while running with it still closed.
    pub fn stop_available_in(&self) -> Option<u32> {
        if self.is_running() && !self.can_stop() {
            Some(self.stop_threshold() - self.elapsed_secs())
        } else {
            None
        }
    }

    /// 0.0 .. 1.0 progress through the session.
    pub fn progress(&self) -> f64 {
        if self.duration_secs == 0 {
            return 0.0;
        }
        f64::from(self.elapsed_secs()) / f64::from(self.duration_secs)
    }

    pub fn remaining_formatted(&self) -> String {
        format_time(i64::from(self.remaining_secs))
    }

    /// Window title: the countdown while running, otherwise the app name.
    pub fn title(&self, app_name: &str) -> String {
        if self.is_running() {
            let label = if self.task.is_empty() {
                app_name
            } else {
                self.task.as_str()
            };
            format!("{} • {}", self.remaining_formatted(), label)
        } else {
            app_name.to_string()
        }
    }

    /// One-line summary of a completed session for sharing.
    pub fn share_summary(&self, app_name: &str) -> Option<String> {
        if self.status != SessionStatus::Completed {
            return None;
        }
        let task = if self.task.is_empty() {
            "Task"
        } else {
            self.task.as_str()
        };
        Some(format!(
            "I focused {} min on \u{201c}{}\u{201d} \u{2014} finished with {}.",
            self.minutes(),
            task,
            app_name
        ))
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Change the duration input.
    ///
    /// While idle the countdown follows the input immediately; otherwise the
    /// new value is picked up by the next reset.
    pub fn set_minutes(&mut self, minutes: i64) {
        self.minutes_input = clamp_minutes(minutes);
        if self.status == SessionStatus::Idle {
            self.duration_secs = self.minutes_input * 60;
            self.remaining_secs = self.duration_secs;
        }
    }

    /// Start a session. A blank task is ignored.
    ///
    /// Starting while already running replaces the running session.
    /// Finished sessions must be reset first.
    pub fn start(&mut self, task: &str, minutes: i64, now: DateTime<Utc>) -> Option<Event> {
        let task = task.trim();
        if task.is_empty() {
            return None;
        }
        match self.status {
            SessionStatus::Idle | SessionStatus::Running => {
                self.minutes_input = clamp_minutes(minutes);
                self.duration_secs = self.minutes_input * 60;
                self.task = task.to_string();
                self.status = SessionStatus::Running;
                self.remaining_secs = self.duration_secs;
                self.started_at = Some(now);
                Some(Event::SessionStarted {
                    task: self.task.clone(),
                    duration_secs: self.duration_secs,
                    at: now,
                })
            }
            SessionStatus::Completed | SessionStatus::Stopped => None,
        }
    }

    /// Recompute remaining time from the start instant.
    ///
    /// Returns `Some(Event::SessionCompleted)` on the tick that reaches zero.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<Event> {
        if self.status != SessionStatus::Running {
            return None;
        }
        let started_at = self.started_at?;
        let elapsed_ms = (now - started_at).num_milliseconds().max(0);
        let elapsed_secs = (elapsed_ms / 1000).min(i64::from(self.duration_secs)) as u32;
        self.remaining_secs = self.duration_secs - elapsed_secs;

        if self.remaining_secs == 0 {
            self.status = SessionStatus::Completed;
            return Some(Event::SessionCompleted {
                task: self.task.clone(),
                minutes: self.minutes(),
                at: now,
            });
        }
        None
    }

    /// Cancel a running session whose commitment gate is open.
    pub fn stop(&mut self, now: DateTime<Utc>) -> Option<Event> {
        if !self.can_stop() {
            return None;
        }
        self.status = SessionStatus::Stopped;
        Some(Event::SessionStopped {
            task: self.task.clone(),
            elapsed_secs: self.elapsed_secs(),
            at: now,
        })
    }

    /// Return a finished session to idle.
    ///
    /// The duration is re-derived from the current input. Resetting an idle
    /// or running session does nothing.
    pub fn reset(&mut self, now: DateTime<Utc>) -> Option<Event> {
        match self.status {
            SessionStatus::Completed | SessionStatus::Stopped => {
                self.status = SessionStatus::Idle;
                self.started_at = None;
                self.duration_secs = self.minutes_input * 60;
                self.remaining_secs = self.duration_secs;
                Some(Event::SessionReset {
                    duration_secs: self.duration_secs,
                    at: now,
                })
            }
            SessionStatus::Idle | SessionStatus::Running => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 1, 9, 0, 0).unwrap()
    }

    fn running(minutes: i64) -> Session {
        let mut session = Session::default();
        session.start("Write", minutes, t0()).unwrap();
        session
    }

    #[test]
    fn start_sets_running_state() {
        let mut session = Session::default();
        let event = session.start("  Read chapter 3 ", 30, t0());
        assert!(matches!(event, Some(Event::SessionStarted { duration_secs: 1800, .. })));
        assert_eq!(session.status(), SessionStatus::Running);
        assert_eq!(session.task(), "Read chapter 3");
        assert_eq!(session.remaining_secs(), 1800);
        assert_eq!(session.started_at(), Some(t0()));
    }

    #[test]
    fn blank_task_is_ignored() {
        let mut session = Session::default();
        assert!(session.start("   \t", 25, t0()).is_none());
        assert_eq!(session.status(), SessionStatus::Idle);
        assert!(session.started_at().is_none());
    }

    #[test]
    fn minutes_are_clamped() {
        assert_eq!(running(0).duration_secs(), 60);
        assert_eq!(running(-5).duration_secs(), 60);
        assert_eq!(running(181).duration_secs(), 180 * 60);
        assert_eq!(running(i64::MAX).duration_secs(), 180 * 60);
    }

    #[test]
    fn tick_uses_wall_clock_elapsed() {
        let mut session = running(25);
        assert!(session.tick(t0() + Duration::milliseconds(999)).is_none());
        assert_eq!(session.remaining_secs(), 1500);
        // A single late tick catches up fully.
        assert!(session.tick(t0() + Duration::seconds(600) + Duration::milliseconds(400)).is_none());
        assert_eq!(session.remaining_secs(), 900);
    }

    #[test]
    fn tick_is_idempotent_for_same_instant() {
        let mut session = running(25);
        let now = t0() + Duration::seconds(61);
        session.tick(now);
        let first = session.remaining_secs();
        session.tick(now);
        assert_eq!(session.remaining_secs(), first);
    }

    #[test]
    fn tick_before_start_instant_keeps_full_duration() {
        let mut session = running(25);
        session.tick(t0() - Duration::seconds(30));
        assert_eq!(session.remaining_secs(), 1500);
    }

    #[test]
    fn reaching_zero_completes_once() {
        let mut session = running(1);
        let event = session.tick(t0() + Duration::seconds(75));
        assert!(matches!(event, Some(Event::SessionCompleted { minutes: 1, .. })));
        assert_eq!(session.status(), SessionStatus::Completed);
        assert_eq!(session.remaining_secs(), 0);
        assert!(session.tick(t0() + Duration::seconds(80)).is_none());
    }

    #[test]
    fn stop_respects_commitment_gate() {
        let mut session = running(25);
        session.tick(t0() + Duration::seconds(374));
        assert!(!session.can_stop());
        assert_eq!(session.stop_available_in(), Some(1));
        assert!(session.stop(t0() + Duration::seconds(374)).is_none());

        session.tick(t0() + Duration::seconds(375));
        assert!(session.can_stop());
        assert_eq!(session.stop_available_in(), None);
        assert!(session.stop(t0() + Duration::seconds(375)).is_some());
        assert_eq!(session.status(), SessionStatus::Stopped);
    }

    #[test]
    fn one_minute_session_can_never_stop() {
        let mut session = running(1);
        session.tick(t0() + Duration::seconds(59));
        assert_eq!(session.stop_threshold(), 300);
        assert!(!session.can_stop());
    }

    #[test]
    fn reset_only_from_finished_states() {
        let mut session = running(25);
        assert!(session.reset(t0()).is_none());
        assert_eq!(session.status(), SessionStatus::Running);

        session.tick(t0() + Duration::seconds(1500));
        session.set_minutes(40);
        assert_eq!(session.duration_secs(), 1500);
        assert!(session.reset(t0()).is_some());
        assert_eq!(session.status(), SessionStatus::Idle);
        assert_eq!(session.duration_secs(), 2400);
        assert_eq!(session.remaining_secs(), 2400);
        assert!(session.started_at().is_none());
    }

    #[test]
    fn reset_from_stopped() {
        let mut session = running(25);
        session.tick(t0() + Duration::seconds(400));
        session.stop(t0() + Duration::seconds(400)).unwrap();
        session.reset(t0()).unwrap();
        assert_eq!(session.status(), SessionStatus::Idle);
        assert_eq!(session.remaining_secs(), 1500);
    }

    #[test]
    fn finished_session_cannot_restart_without_reset() {
        let mut session = running(1);
        session.tick(t0() + Duration::seconds(60));
        assert!(session.start("Again", 5, t0()).is_none());
        assert_eq!(session.status(), SessionStatus::Completed);
    }

    #[test]
    fn restart_while_running_replaces_session() {
        let mut session = running(25);
        session.tick(t0() + Duration::seconds(100));
        let later = t0() + Duration::seconds(120);
        session.start("Other", 10, later).unwrap();
        assert_eq!(session.task(), "Other");
        assert_eq!(session.remaining_secs(), 600);
        assert_eq!(session.started_at(), Some(later));
    }

    #[test]
    fn idle_display_follows_duration_input() {
        let mut session = Session::default();
        session.set_minutes(50);
        assert_eq!(session.remaining_secs(), 3000);
        session.set_minutes(999);
        assert_eq!(session.remaining_secs(), 180 * 60);
    }

    #[test]
    fn title_and_summary() {
        let mut session = running(1);
        session.tick(t0() + Duration::seconds(5));
        assert_eq!(session.title("One Ting"), "00:55 • Write");
        assert!(session.share_summary("One Ting").is_none());

        session.tick(t0() + Duration::seconds(60));
        assert_eq!(session.title("One Ting"), "One Ting");
        assert_eq!(
            session.share_summary("One Ting").unwrap(),
            "I focused 1 min on \u{201c}Write\u{201d} \u{2014} finished with One Ting."
        );
    }

    #[test]
    fn progress_tracks_elapsed() {
        let mut session = running(10);
        session.tick(t0() + Duration::seconds(150));
        assert!((session.progress() - 0.25).abs() < f64::EPSILON);
    }

    proptest! {
        #[test]
        fn clamp_always_in_range(minutes in any::<i64>()) {
            let clamped = clamp_minutes(minutes);
            prop_assert!((MIN_MINUTES..=MAX_MINUTES).contains(&clamped));
            if (1..=180).contains(&minutes) {
                prop_assert_eq!(i64::from(clamped), minutes);
            }
        }

        #[test]
        fn remaining_never_exceeds_duration(minutes in 1i64..=180, offset_ms in -10_000i64..20_000_000) {
            let mut session = running(minutes);
            session.tick(t0() + Duration::milliseconds(offset_ms));
            prop_assert!(session.remaining_secs() <= session.duration_secs());
            let expected = (session.duration_secs() as i64 - offset_ms.max(0) / 1000).max(0);
            prop_assert_eq!(i64::from(session.remaining_secs()), expected);
        }
    }
}
