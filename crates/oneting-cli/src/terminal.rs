//! Terminal rendering and feedback.

use std::io::Write;

use oneting_core::error::Result;
use oneting_core::feedback::{Cue, Feedback};
use oneting_core::format_time;
use oneting_core::Session;

const BAR_WIDTH: usize = 24;

/// Rings the terminal bell for cues and prints a banner on completion.
#[derive(Debug, Default)]
pub struct TerminalFeedback;

impl Feedback for TerminalFeedback {
    fn cue(&mut self, cue: Cue) -> Result<()> {
        let bells = match cue {
            Cue::Started | Cue::Completed => "\x07\x07",
            Cue::Stopped => "\x07",
        };
        let mut err = std::io::stderr();
        err.write_all(bells.as_bytes())?;
        err.flush()?;
        Ok(())
    }

    fn celebrate(&mut self) -> Result<()> {
        let mut out = std::io::stdout();
        writeln!(out, "\r\x1b[2K\u{1f389} \u{2728} \u{1f389} \u{2728} \u{1f389}")?;
        out.flush()?;
        Ok(())
    }
}

pub fn progress_bar(progress: f64) -> String {
    let filled = ((progress.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

/// Status line shown while a session runs.
pub fn status_line(session: &Session, app_name: &str) -> String {
    let hint = match session.stop_available_in() {
        Some(secs) => format!("Stop available in {}", format_time(i64::from(secs))),
        None => "[s] stop".to_string(),
    };
    format!(
        "{}  {}  {}  [p] mini timer",
        session.title(app_name),
        progress_bar(session.progress()),
        hint
    )
}

/// Redraw the current line in place.
pub fn redraw(line: &str) {
    let mut out = std::io::stdout();
    let _ = write!(out, "\r\x1b[2K{line}");
    let _ = out.flush();
}

/// Whether a confirmation answer means yes.
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn progress_bar_bounds() {
        assert_eq!(progress_bar(0.0), format!("[{}]", "-".repeat(BAR_WIDTH)));
        assert_eq!(progress_bar(1.0), format!("[{}]", "#".repeat(BAR_WIDTH)));
        assert_eq!(progress_bar(2.0), progress_bar(1.0));
        assert_eq!(progress_bar(0.5).matches('#').count(), BAR_WIDTH / 2);
    }

    #[test]
    fn status_line_shows_gate_countdown() {
        let t0 = Utc.with_ymd_and_hms(2026, 2, 1, 8, 0, 0).unwrap();
        let mut session = Session::default();
        session.start("Read", 25, t0);
        session.tick(t0 + Duration::seconds(75));
        let line = status_line(&session, "One Ting");
        assert!(line.starts_with("23:45 • Read"));
        assert!(line.contains("Stop available in 05:00"));

        session.tick(t0 + Duration::seconds(400));
        assert!(status_line(&session, "One Ting").contains("[s] stop"));
    }

    #[test]
    fn yes_answers() {
        assert!(is_yes("y"));
        assert!(is_yes(" YES \n"));
        assert!(!is_yes(""));
        assert!(!is_yes("no"));
    }
}
