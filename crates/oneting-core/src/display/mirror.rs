//! File-backed surface for a mini timer running in another process.
//!
//! The primary side replaces `<data_dir>/mini.json` with the latest message
//! on every push (write to a temp file, then rename, so readers never see a
//! torn write). The `oneting mini` viewer polls the file through a
//! [`MirrorReader`].

use std::path::PathBuf;

use tracing::debug;

use super::{DisplayLauncher, DisplayMessage, DisplaySurface};
use crate::error::DisplayError;

/// File name of the mirror inside the data directory.
pub const MIRROR_FILE: &str = "mini.json";

/// Writes each message over the mirror file.
///
/// Closes itself after forwarding `done`.
#[derive(Debug)]
pub struct MirrorSurface {
    path: PathBuf,
    closed: bool,
}

impl DisplaySurface for MirrorSurface {
    fn is_open(&self) -> bool {
        !self.closed
    }

    fn post(&mut self, message: &DisplayMessage) -> Result<(), DisplayError> {
        if self.closed {
            return Err(DisplayError::Closed);
        }
        let raw = serde_json::to_string(message)
            .map_err(|e| DisplayError::Io(std::io::Error::other(e)))?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, raw)?;
        std::fs::rename(&tmp, &self.path)?;
        if *message == DisplayMessage::Done {
            self.closed = true;
        }
        Ok(())
    }
}

/// Creates [`MirrorSurface`]s at a fixed path.
#[derive(Debug, Clone)]
pub struct MirrorLauncher {
    path: PathBuf,
    enabled: bool,
}

impl MirrorLauncher {
    pub fn new(path: impl Into<PathBuf>, enabled: bool) -> Self {
        Self {
            path: path.into(),
            enabled,
        }
    }
}

impl DisplayLauncher for MirrorLauncher {
    fn launch(&mut self) -> Result<Box<dyn DisplaySurface>, DisplayError> {
        if !self.enabled {
            return Err(DisplayError::Refused {
                reason: "pop-out is disabled (popout.enabled = false)".into(),
            });
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| DisplayError::Refused {
                reason: e.to_string(),
            })?;
        }
        std::fs::write(&self.path, b"").map_err(|e| DisplayError::Refused {
            reason: e.to_string(),
        })?;
        debug!(path = %self.path.display(), "mirror surface created");
        Ok(Box::new(MirrorSurface {
            path: self.path.clone(),
            closed: false,
        }))
    }
}

/// Polls the mirror file for new messages.
#[derive(Debug)]
pub struct MirrorReader {
    path: PathBuf,
    last: Option<String>,
}

impl MirrorReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last: None,
        }
    }

    /// The message in the file if it changed since the last poll.
    ///
    /// Missing, empty and unparsable contents yield `None`.
    pub fn poll(&mut self) -> Option<DisplayMessage> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        if raw.is_empty() || self.last.as_deref() == Some(raw.as_str()) {
            return None;
        }
        let message = serde_json::from_str(&raw).ok();
        self.last = Some(raw);
        message
    }
}
