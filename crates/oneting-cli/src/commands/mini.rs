//! Mini timer viewer.
//!
//! Polls the mirror file written by a running `oneting start` and renders
//! the latest countdown on one line.

use std::time::Duration;

use clap::Args;
use oneting_core::display::{DisplayMessage, MiniTimerView, MirrorReader, ViewAction, MIRROR_FILE};
use oneting_core::storage::data_dir;
use oneting_core::Config;

use crate::terminal::redraw;

#[derive(Args)]
pub struct MiniArgs {
    /// Poll period in milliseconds
    #[arg(long, default_value_t = 100)]
    poll_ms: u64,
}

fn render(view: &MiniTimerView) -> String {
    let (on, off) = if view.dark {
        ("\x1b[97;40m", "\x1b[0m")
    } else {
        ("", "")
    };
    format!("{on} {}  {} {off}", view.time, view.task)
}

pub fn run(args: MiniArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let mut reader = MirrorReader::new(data_dir()?.join(MIRROR_FILE));
    let mut view = MiniTimerView::new(config.ui.app_name.clone());
    let period = Duration::from_millis(args.poll_ms.max(10));

    let rt = super::runtime()?;
    rt.block_on(async move {
        let mut interval = tokio::time::interval(period);
        let mut seen_update = false;
        redraw("waiting for a session\u{2026}");
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let Some(message) = reader.poll() else {
                        continue;
                    };
                    // A leftover `done` from an earlier session.
                    if message == DisplayMessage::Done && !seen_update {
                        continue;
                    }
                    seen_update = true;
                    match view.apply(&message) {
                        ViewAction::Render => redraw(&render(&view)),
                        ViewAction::CloseAfter(delay) => {
                            redraw(&render(&view));
                            tokio::time::sleep(delay).await;
                            println!();
                            return Ok(());
                        }
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    println!();
                    return Ok(());
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_plain_and_dark() {
        let mut view = MiniTimerView::new("One Ting");
        view.apply(&DisplayMessage::TimerUpdate {
            remaining: "04:20".into(),
            task: "Read".into(),
            dark: false,
        });
        assert_eq!(render(&view), " 04:20  Read ");

        view.apply(&DisplayMessage::TimerUpdate {
            remaining: "04:19".into(),
            task: "Read".into(),
            dark: true,
        });
        assert!(render(&view).starts_with("\x1b[97;40m"));
    }
}
