use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::{DisplayLauncher, DisplayMessage, DisplaySurface};
use crate::error::DisplayError;

/// In-process surface backed by an unbounded tokio channel.
///
/// The surface is closed once the receiver is dropped.
#[derive(Debug, Clone)]
pub struct ChannelSurface {
    sender: UnboundedSender<DisplayMessage>,
}

impl DisplaySurface for ChannelSurface {
    fn is_open(&self) -> bool {
        !self.sender.is_closed()
    }

    fn post(&mut self, message: &DisplayMessage) -> Result<(), DisplayError> {
        self.sender
            .send(message.clone())
            .map_err(|_| DisplayError::Closed)
    }
}

/// Hands out [`ChannelSurface`]s feeding one receiver.
///
/// Launching is refused once the receiver is gone.
#[derive(Debug)]
pub struct ChannelLauncher {
    sender: UnboundedSender<DisplayMessage>,
}

impl ChannelLauncher {
    pub fn new() -> (Self, UnboundedReceiver<DisplayMessage>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl DisplayLauncher for ChannelLauncher {
    fn launch(&mut self) -> Result<Box<dyn DisplaySurface>, DisplayError> {
        if self.sender.is_closed() {
            return Err(DisplayError::Refused {
                reason: "mini timer receiver is gone".into(),
            });
        }
        Ok(Box::new(ChannelSurface {
            sender: self.sender.clone(),
        }))
    }
}
