use chrono::Utc;
use clap::{Subcommand, ValueEnum};
use trainlog_core::stats;
use trainlog_core::{HistoryWindow, Tracker};

#[derive(Clone, Copy, ValueEnum)]
pub enum WindowArg {
    Week,
    Month,
}

impl From<WindowArg> for HistoryWindow {
    fn from(arg: WindowArg) -> Self {
        match arg {
            WindowArg::Week => HistoryWindow::Week,
            WindowArg::Month => HistoryWindow::Month,
        }
    }
}

#[derive(Subcommand)]
pub enum StatsAction {
    /// List archived sessions in a window
    History {
        #[arg(long, value_enum, default_value = "week")]
        window: WindowArg,
    },
    /// Aggregate totals for a window
    Summary {
        #[arg(long, value_enum, default_value = "week")]
        window: WindowArg,
    },
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let tracker = Tracker::open()?;
    let now = Utc::now();

    match action {
        StatsAction::History { window } => {
            let sessions = stats::filter_by_window(tracker.archive(), window.into(), now);
            for session in sessions {
                let day_title = tracker
                    .catalog()
                    .day(session.day_index)
                    .map(|d| d.title.as_str())
                    .unwrap_or("?");
                println!(
                    "{}  day {} ({})  {} exercises, {}/{} done, {}",
                    session.started_at.format("%Y-%m-%d %H:%M"),
                    session.day_index,
                    day_title,
                    stats::exercise_count(session),
                    stats::completed_category_count(session),
                    session.categories.len(),
                    stats::duration_label(session),
                );
            }
        }
        StatsAction::Summary { window } => {
            let summary = stats::summarize(tracker.archive(), window.into(), now);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    Ok(())
}
