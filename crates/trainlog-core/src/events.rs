use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::schedule::CategoryKey;

/// Every state change in the system produces an Event.
///
/// The presentation layer renders them; `TimerFinished` is the alarm
/// signal -- whoever drives the tick loop is responsible for playing the
/// tone exactly once when it sees this variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        session_id: String,
        day_index: usize,
        day_title: String,
        at: DateTime<Utc>,
    },
    SessionFinished {
        session_id: String,
        day_index: usize,
        duration_min: i64,
        at: DateTime<Utc>,
    },
    EntryAdded {
        category: CategoryKey,
        exercise: String,
        entry_count: usize,
        at: DateTime<Utc>,
    },
    EntryRemoved {
        category: CategoryKey,
        index: usize,
        entry_count: usize,
        at: DateTime<Utc>,
    },
    CategoryToggled {
        category: CategoryKey,
        completed: bool,
        at: DateTime<Utc>,
    },
    CardioUpdated {
        minutes: u32,
        at: DateTime<Utc>,
    },
    TimerStarted {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// A state-changing tick (remaining seconds moved).
    TimerTicked {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// The countdown crossed zero on this tick. Fires once per crossing.
    TimerFinished {
        at: DateTime<Utc>,
    },
    TimerPreset {
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    TimerExtended {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TaskToggled {
        day_index: usize,
        task_index: usize,
        done: bool,
        at: DateTime<Utc>,
    },
    /// All persisted records were cleared.
    DataReset {
        at: DateTime<Utc>,
    },
}
