//! Bookkeeping for the periodic tick source.
//!
//! The schedule itself is driven by the host (a tokio interval in the
//! CLI). This type only records whether ticking is armed and which
//! generation is current, so a host can tell that a restart replaced its
//! interval and must not keep two alive.

/// At most one armed tick schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickSchedule {
    generation: u64,
    armed: bool,
}

impl TickSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel any armed schedule and arm a new one.
    pub fn rearm(&mut self) -> u64 {
        self.cancel();
        self.generation += 1;
        self.armed = true;
        self.generation
    }

    pub fn cancel(&mut self) {
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Generation of the armed schedule, if any.
    pub fn active(&self) -> Option<u64> {
        self.armed.then_some(self.generation)
    }
}
