//! Commitment gate.
//!
//! A running session cannot be stopped until it has run for at least
//! five minutes or a quarter of its length, whichever is longer. Sessions
//! of five minutes or less therefore cannot be stopped at all.

/// Floor of the stop threshold, in seconds.
pub const MIN_COMMITMENT_SECS: u32 = 5 * 60;

/// Seconds that must elapse before a session of `duration_secs` may stop.
pub fn stop_threshold(duration_secs: u32) -> u32 {
    MIN_COMMITMENT_SECS.max(duration_secs / 4)
}

/// Whether `elapsed_secs` has reached the threshold.
pub(crate) fn is_open(duration_secs: u32, elapsed_secs: u32) -> bool {
    elapsed_secs >= stop_threshold(duration_secs)
}
