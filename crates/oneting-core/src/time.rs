//! Countdown formatting.

/// Format a second count as `MM:SS`.
///
/// Minutes are not wrapped into hours, so a 180 minute session reads
/// `180:00`. Negative input is treated as zero.
pub fn format_time(secs: i64) -> String {
    let s = secs.max(0);
    format!("{:02}:{:02}", s / 60, s % 60)
}
