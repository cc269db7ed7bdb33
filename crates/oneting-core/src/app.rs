//! Application context.
//!
//! [`FocusApp`] owns everything a running One Ting instance needs: the
//! session, the history log, the mini timer channel, feedback cues, the
//! clock and the tick schedule. Transitions go through it so that the side
//! effects of completing or stopping a session happen in one place:
//!
//! - completion appends to history, plays the completion cue, celebrates
//!   and tells the mini timer the session is done
//! - a confirmed stop plays the stop cue and tells the mini timer, but
//!   records nothing
//!
//! Streak and weekly totals are computed from the log on every call.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::display::{DisplayLauncher, DisplayState, SecondaryDisplay};
use crate::error::{DisplayError, Result};
use crate::events::Event;
use crate::feedback::{Cue, Feedback, NullFeedback};
use crate::history::{HistoryEntry, HistoryStore};
use crate::stats::{calc_streak, WeeklyStats};
use crate::storage::{Config, KvStore};
use crate::timer::{Clock, Session, SystemClock, TickSchedule};

/// Flags taken from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    pub app_name: String,
    pub dark_mode: bool,
    pub sound: bool,
    pub celebrate: bool,
    pub default_minutes: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for AppSettings {
    fn from(config: &Config) -> Self {
        Self {
            app_name: config.ui.app_name.clone(),
            dark_mode: config.ui.dark_mode,
            sound: config.feedback.sound,
            celebrate: config.feedback.celebrate,
            default_minutes: config.default_minutes(),
        }
    }
}

/// Outcome of asking to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopRequest {
    /// Not running, or the commitment gate is still closed.
    Rejected,
    /// Gate open. Waiting for [`FocusApp::confirm_stop`].
    Pending,
}

pub struct FocusApp<S> {
    settings: AppSettings,
    session: Session,
    history: HistoryStore<S>,
    display: SecondaryDisplay,
    feedback: Box<dyn Feedback>,
    clock: Box<dyn Clock>,
    schedule: TickSchedule,
    stop_pending: bool,
}

impl<S: KvStore> FocusApp<S> {
    /// Build the context and load persisted history.
    pub fn new(store: S, settings: AppSettings) -> Self {
        let session = Session::new(i64::from(settings.default_minutes));
        Self {
            settings,
            session,
            history: HistoryStore::open(store),
            display: SecondaryDisplay::new(),
            feedback: Box::new(NullFeedback),
            clock: Box::new(SystemClock),
            schedule: TickSchedule::new(),
            stop_pending: false,
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_feedback(mut self, feedback: impl Feedback + 'static) -> Self {
        self.feedback = Box::new(feedback);
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn history(&self) -> &[HistoryEntry] {
        self.history.entries()
    }

    pub fn schedule(&self) -> &TickSchedule {
        &self.schedule
    }

    pub fn is_stop_pending(&self) -> bool {
        self.stop_pending
    }

    pub fn is_display_open(&self) -> bool {
        self.display.is_open()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.now().date_naive()
    }

    pub fn streak(&self) -> u32 {
        calc_streak(self.history.entries(), self.today())
    }

    pub fn weekly(&self) -> WeeklyStats {
        WeeklyStats::compute(self.history.entries(), self.today())
    }

    pub fn share_summary(&self) -> Option<String> {
        self.session.share_summary(&self.settings.app_name)
    }

    pub fn display_state(&self) -> DisplayState {
        DisplayState {
            remaining_formatted: self.session.remaining_formatted(),
            task: self.session.task().to_string(),
            dark_mode: self.settings.dark_mode,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn set_minutes(&mut self, minutes: i64) {
        self.session.set_minutes(minutes);
    }

    /// Start a session and arm a fresh tick schedule.
    pub fn start(&mut self, task: &str, minutes: i64) -> Option<Event> {
        let event = self.session.start(task, minutes, self.clock.now())?;
        let generation = self.schedule.rearm();
        self.stop_pending = false;
        info!(
            task = self.session.task(),
            duration_secs = self.session.duration_secs(),
            generation,
            "session started"
        );
        self.play(Cue::Started);
        self.sync_display();
        Some(event)
    }

    /// Recompute the countdown. Completes the session when it reaches zero.
    pub fn tick(&mut self) -> Option<Event> {
        let event = self.session.tick(self.clock.now());
        if let Some(Event::SessionCompleted { task, minutes, at }) = &event {
            self.schedule.cancel();
            self.stop_pending = false;
            self.sync_display();
            self.record(HistoryEntry::new(task.clone(), *minutes, *at));
            info!(task = %task, minutes, "session completed");
            self.play(Cue::Completed);
            if self.settings.celebrate {
                if let Err(e) = self.feedback.celebrate() {
                    warn!(error = %e, "celebration failed");
                }
            }
            self.display.push_done();
        } else if self.session.is_running() {
            self.sync_display();
        }
        event
    }

    /// First half of stopping: checks the commitment gate.
    pub fn request_stop(&mut self) -> StopRequest {
        if self.session.can_stop() {
            self.stop_pending = true;
            StopRequest::Pending
        } else {
            debug!(
                stop_available_in = ?self.session.stop_available_in(),
                "stop rejected"
            );
            StopRequest::Rejected
        }
    }

    /// Second half of stopping. Only an explicit `true` stops the session.
    pub fn confirm_stop(&mut self, confirmed: bool) -> Option<Event> {
        if !std::mem::take(&mut self.stop_pending) || !confirmed {
            return None;
        }
        let event = self.session.stop(self.clock.now())?;
        self.schedule.cancel();
        info!(
            task = self.session.task(),
            elapsed_secs = self.session.elapsed_secs(),
            "session stopped"
        );
        self.play(Cue::Stopped);
        self.display.push_done();
        Some(event)
    }

    /// Return a completed or stopped session to idle.
    pub fn reset(&mut self) -> Option<Event> {
        let event = self.session.reset(self.clock.now())?;
        self.schedule.cancel();
        self.stop_pending = false;
        debug!("session reset");
        Some(event)
    }

    /// Leave a running session without recording it.
    ///
    /// The mini timer is told the session is over and the session goes back
    /// to idle with the same duration input. Returns false when nothing was
    /// running.
    pub fn abandon(&mut self) -> bool {
        if !self.session.is_running() {
            return false;
        }
        self.schedule.cancel();
        self.stop_pending = false;
        info!(
            task = self.session.task(),
            elapsed_secs = self.session.elapsed_secs(),
            "session abandoned"
        );
        self.display.push_done();
        self.session = Session::new(i64::from(self.session.minutes_input()));
        true
    }

    /// Open the mini timer and push the current state to it.
    pub fn open_display(&mut self, launcher: &mut dyn DisplayLauncher) -> Result<(), DisplayError> {
        let state = self.display_state();
        self.display.open(launcher, &state).inspect_err(|e| {
            warn!(error = %e, "mini timer unavailable");
        })
    }

    /// Delete every history entry.
    ///
    /// # Errors
    /// Returns an error if the persisted log cannot be removed.
    pub fn clear_history(&mut self) -> Result<()> {
        self.history.clear()?;
        info!("history cleared");
        Ok(())
    }

    /// Re-read history from storage.
    pub fn reload_history(&mut self) -> &[HistoryEntry] {
        self.history.load()
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn record(&mut self, entry: HistoryEntry) {
        if let Err(e) = self.history.append(entry) {
            warn!(error = %e, "failed to record completed session");
        }
    }

    fn play(&mut self, cue: Cue) {
        if !self.settings.sound {
            return;
        }
        if let Err(e) = self.feedback.cue(cue) {
            warn!(error = %e, ?cue, "feedback cue failed");
        }
    }

    fn sync_display(&mut self) {
        let state = self.display_state();
        self.display.push(&state);
    }
}
