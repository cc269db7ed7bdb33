//! Secondary display sync.
//!
//! A one-way, best-effort push channel from the session to an optional
//! mini timer. The primary side sends [`DisplayMessage`]s through a
//! [`SecondaryDisplay`]; the mini timer pattern-matches them in a
//! [`MiniTimerView`]. Nothing flows back.
//!
//! Sends are never queued or retried. Each tick pushes a fresh update, so a
//! lost message is superseded by the next one. A closed or never-opened
//! surface is not an error for the session.

mod channel;
mod mirror;
mod view;

pub use channel::{ChannelLauncher, ChannelSurface};
pub use mirror::{MirrorLauncher, MirrorReader, MirrorSurface, MIRROR_FILE};
pub use view::{MiniTimerView, ViewAction, CLOSE_DELAY};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::DisplayError;

/// Messages understood by the mini timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum DisplayMessage {
    TimerUpdate {
        /// `MM:SS`
        remaining: String,
        task: String,
        dark: bool,
    },
    /// The session ended; the surface closes itself shortly after.
    Done,
}

/// State mirrored on every push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayState {
    pub remaining_formatted: String,
    pub task: String,
    pub dark_mode: bool,
}

impl From<&DisplayState> for DisplayMessage {
    fn from(state: &DisplayState) -> Self {
        DisplayMessage::TimerUpdate {
            remaining: state.remaining_formatted.clone(),
            task: state.task.clone(),
            dark: state.dark_mode,
        }
    }
}

/// Receiving end as seen from the session.
pub trait DisplaySurface: Send {
    fn is_open(&self) -> bool;

    fn post(&mut self, message: &DisplayMessage) -> Result<(), DisplayError>;
}

/// Creates surfaces on request. The host may refuse.
pub trait DisplayLauncher {
    fn launch(&mut self) -> Result<Box<dyn DisplaySurface>, DisplayError>;
}

/// Sender half held by the application context.
#[derive(Default)]
pub struct SecondaryDisplay {
    surface: Option<Box<dyn DisplaySurface>>,
}

impl SecondaryDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask `launcher` for a surface and push `state` to it straight away.
    ///
    /// An already open surface is reused. A refusal is returned so the
    /// caller can show an advisory; the previous surface, if any, is kept.
    pub fn open(
        &mut self,
        launcher: &mut dyn DisplayLauncher,
        state: &DisplayState,
    ) -> Result<(), DisplayError> {
        if !self.is_open() {
            let surface = launcher.launch()?;
            debug!("mini timer opened");
            self.surface = Some(surface);
        }
        self.push(state);
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.surface.as_ref().is_some_and(|s| s.is_open())
    }

    /// Fire-and-forget state update.
    pub fn push(&mut self, state: &DisplayState) {
        self.send(&DisplayMessage::from(state));
    }

    /// Tell the surface the session ended.
    pub fn push_done(&mut self) {
        self.send(&DisplayMessage::Done);
    }

    fn send(&mut self, message: &DisplayMessage) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        if !surface.is_open() {
            return;
        }
        if let Err(e) = surface.post(message) {
            warn!(error = %e, "mini timer push dropped");
        }
    }
}
