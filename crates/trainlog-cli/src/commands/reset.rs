use chrono::Utc;
use trainlog_core::Tracker;

pub fn run(yes: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !yes {
        return Err("this clears all sessions, history, PRs and skills; pass --yes to confirm".into());
    }
    let mut tracker = Tracker::open()?;
    let event = tracker.reset_all(Utc::now());
    println!("{}", serde_json::to_string_pretty(&event)?);
    Ok(())
}
