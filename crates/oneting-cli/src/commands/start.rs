//! Foreground focus session.
//!
//! Ticks the session on a fixed interval, reads single-letter commands from
//! stdin and mirrors the countdown to the mini timer when one is open.

use std::time::Duration;

use clap::Args;
use oneting_core::display::{DisplayLauncher, MirrorLauncher, MIRROR_FILE};
use oneting_core::stats::streak_label;
use oneting_core::storage::data_dir;
use oneting_core::{
    AppSettings, Config, Database, Event, FocusApp, KvStore, MemoryStore, SessionStatus,
    StopRequest,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::debug;

use crate::terminal::{is_yes, redraw, status_line, TerminalFeedback};

/// Window in which a second Ctrl-C abandons a running session.
const LEAVE_WINDOW: Duration = Duration::from_secs(3);

#[derive(Args)]
pub struct StartArgs {
    /// The one thing you will focus on
    task: String,
    /// Session length in minutes (1-180)
    #[arg(short, long, allow_negative_numbers = true)]
    minutes: Option<i64>,
    /// Open the mini timer right away
    #[arg(long)]
    popout: bool,
    /// Keep history in memory only
    #[arg(long)]
    ephemeral: bool,
}

enum Outcome {
    Completed,
    Stopped,
    Abandoned,
}

pub fn run(args: StartArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.task.trim().is_empty() {
        return Err("task must not be blank".into());
    }
    let config = Config::load()?;
    let settings = AppSettings::from(&config);
    let minutes = args.minutes.unwrap_or(i64::from(settings.default_minutes));
    let tick = Duration::from_millis(config.session.tick_interval_ms.max(1));
    let mut launcher = MirrorLauncher::new(data_dir()?.join(MIRROR_FILE), config.popout.enabled);

    let rt = super::runtime()?;
    if args.ephemeral {
        let app = FocusApp::new(MemoryStore::new(), settings).with_feedback(TerminalFeedback);
        rt.block_on(focus(app, &args, minutes, tick, &mut launcher))
    } else {
        let app = FocusApp::new(Database::open()?, settings).with_feedback(TerminalFeedback);
        rt.block_on(focus(app, &args, minutes, tick, &mut launcher))
    }
}

fn new_interval(period: Duration) -> tokio::time::Interval {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

/// Forward every Ctrl-C into one channel for the whole session.
fn interrupts() -> UnboundedReceiver<()> {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            if tx.send(()).is_err() {
                break;
            }
        }
    });
    rx
}

fn open_popout<S: KvStore>(app: &mut FocusApp<S>, launcher: &mut dyn DisplayLauncher) {
    match app.open_display(launcher) {
        Ok(()) => println!("\r\x1b[2KMini timer ready: run `oneting mini` in another terminal."),
        Err(e) => println!("\r\x1b[2KPop-out blocked: {e}"),
    }
}

async fn focus<S: KvStore>(
    mut app: FocusApp<S>,
    args: &StartArgs,
    minutes: i64,
    tick: Duration,
    launcher: &mut dyn DisplayLauncher,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(event) = app.start(&args.task, minutes) else {
        return Err("task must not be blank".into());
    };
    debug!(?event, "started");
    if args.popout {
        open_popout(&mut app, launcher);
    }

    let app_name = app.settings().app_name.clone();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut interval = new_interval(tick);
    let mut generation = app.schedule().active();
    let mut interrupts = interrupts();
    let mut last_interrupt: Option<Instant> = None;

    let outcome = loop {
        tokio::select! {
            _ = interval.tick() => {
                if let Some(Event::SessionCompleted { .. }) = app.tick() {
                    break Outcome::Completed;
                }
                redraw(&status_line(app.session(), &app_name));
            }
            line = lines.next_line(), if stdin_open => {
                match line {
                    Ok(Some(line)) if app.is_stop_pending() => {
                        if app.confirm_stop(is_yes(&line)).is_some() {
                            break Outcome::Stopped;
                        }
                        println!("\r\x1b[2KKeep going.");
                    }
                    Ok(Some(line)) => match line.trim() {
                        "s" | "stop" => match app.request_stop() {
                            StopRequest::Pending => {
                                println!("\r\x1b[2KStop now? This will cancel your session. [y/N]");
                            }
                            StopRequest::Rejected => {
                                println!("\r\x1b[2K{}", status_line(app.session(), &app_name));
                            }
                        },
                        "p" | "popout" => open_popout(&mut app, launcher),
                        _ => {}
                    },
                    Ok(None) | Err(_) => stdin_open = false,
                }
            }
            Some(()) = interrupts.recv() => {
                let now = Instant::now();
                if last_interrupt.is_some_and(|at| now.duration_since(at) <= LEAVE_WINDOW) {
                    app.abandon();
                    break Outcome::Abandoned;
                }
                last_interrupt = Some(now);
                println!(
                    "\r\x1b[2KSession still running. Press Ctrl-C again within {}s to leave; nothing will be recorded.",
                    LEAVE_WINDOW.as_secs()
                );
            }
        }

        if app.schedule().active() != generation {
            generation = app.schedule().active();
            interval = new_interval(tick);
        }
        if app.session().status() != SessionStatus::Running {
            break match app.session().status() {
                SessionStatus::Stopped => Outcome::Stopped,
                _ => Outcome::Completed,
            };
        }
    };

    println!();
    match outcome {
        Outcome::Completed => {
            let session = app.session();
            println!("Nice work \u{1f389}");
            println!(
                "You focused for {} minutes on \u{201c}{}\u{201d}.",
                session.minutes(),
                session.task()
            );
            if let Some(summary) = app.share_summary() {
                println!("{summary}");
            }
        }
        Outcome::Stopped => {
            println!("Session canceled");
            println!("Come back ready \u{2014} you got this.");
        }
        Outcome::Abandoned => {
            println!("Session abandoned.");
            return Ok(());
        }
    }

    let totals = app.weekly().totals();
    println!(
        "Streak: {} \u{b7} Last 7 days: {} min, {} sessions",
        streak_label(app.streak()),
        totals.total_minutes,
        totals.total_sessions
    );
    app.reset();
    Ok(())
}
