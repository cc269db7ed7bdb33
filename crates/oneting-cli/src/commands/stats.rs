use chrono::{NaiveDate, Utc};
use clap::Args;
use oneting_core::history::HistoryStore;
use oneting_core::stats::{calc_streak, streak_label, DayBucket};
use oneting_core::{Database, WeeklyStats, WeeklyTotals};
use serde::Serialize;

#[derive(Args)]
pub struct StatsArgs {
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct DayRow {
    date: NaiveDate,
    #[serde(flatten)]
    bucket: DayBucket,
}

#[derive(Serialize)]
struct StatsReport {
    streak: u32,
    weekly: WeeklyTotals,
    days: Vec<DayRow>,
}

pub fn run(args: StatsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let history = HistoryStore::open(Database::open()?);
    let today = Utc::now().date_naive();
    let weekly = WeeklyStats::compute(history.entries(), today);
    let report = StatsReport {
        streak: calc_streak(history.entries(), today),
        weekly: weekly.totals(),
        days: weekly
            .days()
            .map(|(date, bucket)| DayRow { date, bucket })
            .collect(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Streak: {}", streak_label(report.streak));
        println!(
            "Last 7 days: {} min, {} sessions",
            report.weekly.total_minutes, report.weekly.total_sessions
        );
    }
    Ok(())
}
