use chrono::Utc;
use clap::Subcommand;
use trainlog_core::{Entry, Tracker};

use super::parse_category;

#[derive(Subcommand)]
pub enum SessionAction {
    /// Start a session for a schedule day (0-based index)
    Start {
        /// Day index into the weekly schedule
        day: usize,
    },
    /// Finish the active session and archive it
    Finish,
    /// Log an exercise entry into a category
    Log {
        /// Category: skill, strength, volume or cardio
        category: String,
        /// Exercise name
        exercise: String,
        #[arg(long, default_value = "")]
        sets: String,
        #[arg(long, default_value = "")]
        reps: String,
        #[arg(long)]
        weight: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Remove an entry by index within its category
    Remove {
        category: String,
        index: usize,
    },
    /// Toggle a category's completed flag
    Done {
        category: String,
    },
    /// Update the cardio fields
    Cardio {
        /// Minutes (invalid or empty input counts as 0)
        #[arg(long, default_value = "")]
        minutes: String,
        /// Average pulse, free-form
        #[arg(long, default_value = "")]
        pulse: String,
        /// run, bike, row, jump-rope or swim
        #[arg(long)]
        kind: Option<String>,
    },
    /// Print the active session as JSON
    Status,
}

pub fn run(action: SessionAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut tracker = Tracker::open()?;
    let now = Utc::now();

    match action {
        SessionAction::Start { day } => {
            let event = tracker.start_session(day, now)?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        SessionAction::Finish => {
            let event = tracker.finish_session(now)?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        SessionAction::Log {
            category,
            exercise,
            sets,
            reps,
            weight,
            notes,
        } => {
            let category = parse_category(&category)?;
            let event = tracker.add_entry(
                category,
                Entry {
                    exercise,
                    sets,
                    reps,
                    weight,
                    notes,
                },
            )?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        SessionAction::Remove { category, index } => {
            let event = tracker.remove_entry(parse_category(&category)?, index)?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        SessionAction::Done { category } => {
            let event = tracker.toggle_category_completed(parse_category(&category)?)?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        SessionAction::Cardio {
            minutes,
            pulse,
            kind,
        } => {
            let kind = match kind {
                Some(name) => Some(
                    trainlog_core::CardioKind::parse(&name)
                        .ok_or_else(|| format!("unknown cardio kind '{name}'"))?,
                ),
                None => None,
            };
            let event = tracker.set_cardio_fields(&minutes, &pulse, kind)?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        SessionAction::Status => match tracker.active() {
            Some(session) => println!("{}", serde_json::to_string_pretty(session)?),
            None => println!("null"),
        },
    }
    Ok(())
}
