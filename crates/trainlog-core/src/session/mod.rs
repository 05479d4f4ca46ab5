//! Session data model.
//!
//! A [`Session`] is one tracked workout occurrence: per-category entry
//! lists, completion flags, cardio fields and the embedded rest timer.
//! Transitions live on [`crate::Tracker`]; this module is the data plus
//! the seeding logic that turns a schedule day into a fresh session.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schedule::{CategoryKey, ScheduleDay};
use crate::timer::RestTimer;

/// Cardio machine/activity presets. The first preset is the default for
/// a freshly started session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardioKind {
    Run,
    Bike,
    Row,
    JumpRope,
    Swim,
}

impl CardioKind {
    pub const PRESETS: [CardioKind; 5] = [
        CardioKind::Run,
        CardioKind::Bike,
        CardioKind::Row,
        CardioKind::JumpRope,
        CardioKind::Swim,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CardioKind::Run => "run",
            CardioKind::Bike => "bike",
            CardioKind::Row => "row",
            CardioKind::JumpRope => "jump-rope",
            CardioKind::Swim => "swim",
        }
    }

    pub fn parse(s: &str) -> Option<CardioKind> {
        match s.trim().to_ascii_lowercase().as_str() {
            "run" => Some(CardioKind::Run),
            "bike" => Some(CardioKind::Bike),
            "row" => Some(CardioKind::Row),
            "jump-rope" | "jumprope" | "rope" => Some(CardioKind::JumpRope),
            "swim" => Some(CardioKind::Swim),
            _ => None,
        }
    }
}

impl Default for CardioKind {
    fn default() -> Self {
        CardioKind::PRESETS[0]
    }
}

/// One logged exercise instance. Immutable once created; removable by
/// index within its category (duplicates allowed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub exercise: String,
    pub sets: String,
    pub reps: String,
    #[serde(default)]
    pub weight: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Cardio-only fields on the cardio category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardioState {
    pub kind: CardioKind,
    pub minutes: u32,
    #[serde(default)]
    pub pulse: String,
}

/// Per-category sub-state of a session, created fresh from the day's
/// template when the session starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryState {
    pub label: String,
    #[serde(default)]
    pub entries: Vec<Entry>,
    #[serde(default)]
    pub completed: bool,
    /// Present only on the cardio category.
    #[serde(default)]
    pub cardio: Option<CardioState>,
}

/// One tracked workout occurrence, active or archived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub day_index: usize,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub ended_at: Option<DateTime<Utc>>,
    /// Empty on recovery days.
    #[serde(default)]
    pub categories: BTreeMap<CategoryKey, CategoryState>,
    pub timer: RestTimer,
}

impl Session {
    /// Seed a fresh session from a schedule day.
    ///
    /// Recovery days yield an empty category map. Otherwise every key in
    /// the day's template gets a clean state: no entries, not completed,
    /// cardio minutes from the template (30 when absent) and the first
    /// cardio preset.
    pub fn start(day: &ScheduleDay, now: DateTime<Utc>, rest_secs: u32) -> Self {
        let categories = day
            .categories
            .iter()
            .map(|(key, template)| {
                let cardio = (*key == CategoryKey::Cardio).then(|| CardioState {
                    kind: CardioKind::default(),
                    minutes: template.cardio_minutes.unwrap_or(30),
                    pulse: String::new(),
                });
                (
                    *key,
                    CategoryState {
                        label: template.label.clone(),
                        entries: Vec::new(),
                        completed: false,
                        cardio,
                    },
                )
            })
            .collect();

        Self {
            id: Uuid::new_v4().to_string(),
            day_index: day.index,
            started_at: now,
            ended_at: None,
            categories,
            timer: RestTimer::new(rest_secs),
        }
    }

    pub fn category(&self, key: CategoryKey) -> Option<&CategoryState> {
        self.categories.get(&key)
    }

    pub fn category_mut(&mut self, key: CategoryKey) -> Option<&mut CategoryState> {
        self.categories.get_mut(&key)
    }
}

/// Coerce free-form minutes input to a non-negative integer.
/// Invalid or empty input is treated as zero.
pub fn coerce_minutes(input: &str) -> u32 {
    input.trim().parse::<u32>().unwrap_or(0)
}
