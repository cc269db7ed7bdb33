//! Audio/visual feedback seam.
//!
//! Cues are fire-and-forget: the app context logs and drops any error a
//! [`Feedback`] implementation returns, so feedback can never interrupt a
//! session.

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cue {
    Started,
    Completed,
    Stopped,
}

pub trait Feedback: Send {
    /// Play the acknowledgment for a transition.
    fn cue(&mut self, cue: Cue) -> Result<()>;

    /// Trigger the completion celebration.
    fn celebrate(&mut self) -> Result<()>;
}

/// Feedback that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullFeedback;

impl Feedback for NullFeedback {
    fn cue(&mut self, _cue: Cue) -> Result<()> {
        Ok(())
    }

    fn celebrate(&mut self) -> Result<()> {
        Ok(())
    }
}
