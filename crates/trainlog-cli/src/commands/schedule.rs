use clap::Subcommand;
use trainlog_core::Tracker;

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// List all days of the weekly plan
    List,
    /// Show one day as JSON
    Show { day: usize },
}

pub fn run(action: ScheduleAction) -> Result<(), Box<dyn std::error::Error>> {
    let tracker = Tracker::open()?;

    match action {
        ScheduleAction::List => {
            for day in tracker.catalog().days() {
                let progress = tracker.day_progress(day.index).unwrap_or_default();
                println!(
                    "[{}] {} ({}) {} - {}% ({}/{})",
                    day.index,
                    day.title,
                    day.tags.join(", "),
                    day.duration_hint,
                    progress.percent,
                    progress.completed,
                    progress.total,
                );
            }
        }
        ScheduleAction::Show { day } => {
            let day = tracker
                .catalog()
                .day(day)
                .ok_or_else(|| format!("no day at index {day}"))?;
            println!("{}", serde_json::to_string_pretty(day)?);
        }
    }
    Ok(())
}
