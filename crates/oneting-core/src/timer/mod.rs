mod clock;
mod gate;
mod session;
mod ticker;

pub use clock::{Clock, ManualClock, SystemClock};
pub use gate::{stop_threshold, MIN_COMMITMENT_SECS};
pub use session::{clamp_minutes, Session, SessionStatus, MAX_MINUTES, MIN_MINUTES};
pub use ticker::TickSchedule;
