use clap::Subcommand;
use oneting_core::history::{group_by_day, HistoryStore};
use oneting_core::Database;

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List completed sessions, newest first
    List {
        /// Group sessions under a header per day
        #[arg(long)]
        grouped: bool,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete all history
    Clear,
}

pub fn run(action: HistoryAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut history = HistoryStore::open(Database::open()?);

    match action {
        HistoryAction::List { grouped, json } => {
            let entries = history.entries();
            if json {
                let out = if grouped {
                    serde_json::to_string_pretty(&group_by_day(entries))?
                } else {
                    serde_json::to_string_pretty(entries)?
                };
                println!("{out}");
            } else if entries.is_empty() {
                println!("No sessions yet \u{2014} your log will appear here.");
            } else if grouped {
                for group in group_by_day(entries) {
                    println!("{}", group.date.format("%Y-%m-%d"));
                    for entry in &group.entries {
                        println!(
                            "  {}  {:>4}m  {}",
                            entry.finished_at.format("%H:%M"),
                            entry.minutes,
                            entry.display_task()
                        );
                    }
                }
            } else {
                for entry in entries {
                    println!(
                        "{}  {:>4}m  {}",
                        entry.finished_at.format("%Y-%m-%d %H:%M"),
                        entry.minutes,
                        entry.display_task()
                    );
                }
            }
        }
        HistoryAction::Clear => {
            history.clear()?;
            println!("history cleared");
        }
    }
    Ok(())
}
