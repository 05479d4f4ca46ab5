use std::io::Write;

use chrono::Utc;
use clap::Subcommand;
use trainlog_core::{Event, Tracker};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start (or resume) the rest countdown
    Start,
    /// Pause the countdown
    Pause,
    /// Set duration and remaining to a preset number of seconds
    Preset { secs: u32 },
    /// Add seconds to the countdown (default: the configured step)
    Extend { secs: Option<u32> },
    /// Rewind to the full duration
    Reset,
    /// Print current timer state as JSON
    Status,
    /// Drive the countdown at a 1-second cadence until it finishes
    Watch,
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut tracker = Tracker::open()?;
    let now = Utc::now();

    match action {
        TimerAction::Start => {
            match tracker.timer_start(now)? {
                Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
                None => println!("{{\"type\": \"noop\"}}"),
            }
        }
        TimerAction::Pause => {
            match tracker.timer_pause(now)? {
                Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
                None => println!("{{\"type\": \"noop\"}}"),
            }
        }
        TimerAction::Preset { secs } => {
            let event = tracker.timer_set_preset(secs, now)?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        TimerAction::Extend { secs } => {
            let step = secs.unwrap_or(tracker.config().timer.extend_secs);
            let event = tracker.timer_extend(step, now)?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        TimerAction::Reset => {
            let event = tracker.timer_reset(now)?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        TimerAction::Status => match tracker.active() {
            Some(session) => println!("{}", serde_json::to_string_pretty(&session.timer)?),
            None => println!("null"),
        },
        TimerAction::Watch => watch(&mut tracker)?,
    }
    Ok(())
}

/// The host-loop side of the timer engine: tick roughly once a second,
/// render the countdown, ring the terminal bell on the finish signal.
fn watch(tracker: &mut Tracker<trainlog_core::JsonStore>) -> Result<(), Box<dyn std::error::Error>> {
    let alarm_enabled = tracker.config().notifications.enabled;
    loop {
        let Some(session) = tracker.active() else {
            println!("no active session");
            return Ok(());
        };
        if !session.timer.is_running() {
            println!("timer is not running ({}s remaining)", session.timer.remaining_secs());
            return Ok(());
        }

        std::thread::sleep(std::time::Duration::from_secs(1));
        match tracker.tick(Utc::now()) {
            Some(Event::TimerFinished { .. }) => {
                if alarm_enabled {
                    print!("\x07");
                }
                println!("\rrest over        ");
                return Ok(());
            }
            Some(Event::TimerTicked { remaining_secs, .. }) => {
                print!("\r{:>4}s remaining", remaining_secs);
                std::io::stdout().flush()?;
            }
            _ => {}
        }
    }
}
