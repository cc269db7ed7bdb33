//! # One Ting Core Library
//!
//! Core logic for One Ting, a single-task focus timer: name one task, commit
//! to a duration, and the timer refuses to be cancelled until a minimum
//! commitment has passed. Completed sessions are logged and feed a daily
//! streak and rolling weekly totals.
//!
//! ## Architecture
//!
//! - **Session**: A wall-clock-anchored state machine; the caller invokes
//!   `tick()` periodically and remaining time is recomputed from the start
//!   instant each time
//! - **History**: A capped, newest-first log kept as JSON under a single key
//!   of a [`KvStore`] (SQLite on disk)
//! - **Stats**: Streak and weekly totals derived from the log on demand
//! - **Display**: One-way push channel to an optional mini timer
//! - **App**: [`FocusApp`] ties the pieces together and owns the side
//!   effects of each transition
//!
//! ## Key Components
//!
//! - [`Session`]: Core timer state machine
//! - [`HistoryStore`]: Session log persistence
//! - [`SecondaryDisplay`]: Mini timer sync
//! - [`Config`]: Application configuration management

pub mod app;
pub mod display;
pub mod error;
pub mod events;
pub mod feedback;
pub mod history;
pub mod stats;
pub mod storage;
pub mod time;
pub mod timer;

pub use app::{AppSettings, FocusApp, StopRequest};
pub use display::{DisplayMessage, DisplayState, SecondaryDisplay};
pub use error::{ConfigError, CoreError, DatabaseError, DisplayError};
pub use events::Event;
pub use feedback::{Cue, Feedback, NullFeedback};
pub use history::{HistoryEntry, HistoryStore};
pub use stats::{WeeklyStats, WeeklyTotals};
pub use storage::{Config, Database, KvStore, MemoryStore};
pub use time::format_time;
pub use timer::{Session, SessionStatus};
