use chrono::{Local, NaiveDate};
use clap::Subcommand;
use trainlog_core::{PersonalRecord, SkillNote, Tracker};

#[derive(Subcommand)]
pub enum RecordsAction {
    /// Add a personal record
    Pr {
        exercise: String,
        /// The achieved value, free-form (e.g. "+40 kg x 1")
        value: String,
        /// Date (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List personal records
    Prs,
    /// Add a skill practice note
    Skill {
        name: String,
        #[arg(long, default_value = "")]
        notes: String,
        /// Date (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List skill notes
    Skills,
}

pub fn run(action: RecordsAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut tracker = Tracker::open()?;
    let today = Local::now().date_naive();

    match action {
        RecordsAction::Pr {
            exercise,
            value,
            date,
        } => {
            tracker.add_pr(PersonalRecord {
                exercise,
                value,
                date: date.unwrap_or(today),
            });
            println!("ok");
        }
        RecordsAction::Prs => {
            for pr in tracker.prs() {
                println!("{}  {}: {}", pr.date, pr.exercise, pr.value);
            }
        }
        RecordsAction::Skill { name, notes, date } => {
            tracker.add_skill(SkillNote {
                name,
                notes,
                date: date.unwrap_or(today),
            });
            println!("ok");
        }
        RecordsAction::Skills => {
            for note in tracker.skills() {
                println!("{}  {}: {}", note.date, note.name, note.notes);
            }
        }
    }
    Ok(())
}
