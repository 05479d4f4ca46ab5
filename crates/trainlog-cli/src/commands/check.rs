use chrono::Utc;
use clap::Subcommand;
use trainlog_core::Tracker;

#[derive(Subcommand)]
pub enum CheckAction {
    /// Toggle one task on a schedule day
    Toggle { day: usize, task: usize },
    /// Show a day's tasks and their check state
    Show { day: usize },
}

pub fn run(action: CheckAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut tracker = Tracker::open()?;

    match action {
        CheckAction::Toggle { day, task } => {
            let event = tracker.toggle_task(day, task, Utc::now())?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        CheckAction::Show { day } => {
            let schedule_day = tracker
                .catalog()
                .day(day)
                .ok_or_else(|| format!("no day at index {day}"))?;
            for (index, label) in schedule_day.tasks.iter().enumerate() {
                let mark = if tracker.checklist().is_done(day, index) {
                    "x"
                } else {
                    " "
                };
                println!("[{mark}] {index}: {label}");
            }
            let progress = tracker.checklist().progress(schedule_day);
            println!("{}% ({}/{})", progress.percent, progress.completed, progress.total);
        }
    }
    Ok(())
}
