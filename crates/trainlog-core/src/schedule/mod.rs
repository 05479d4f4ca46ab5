//! The static weekly schedule catalog.
//!
//! The catalog is read-only input to the session state machine: an ordered
//! list of day definitions with title, tags, task labels and per-category
//! templates. Day 5 is a recovery day and carries no trainable categories.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The four training dimensions tracked independently within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKey {
    Skill,
    Strength,
    Volume,
    Cardio,
}

impl CategoryKey {
    /// All keys, in display order.
    pub const ALL: [CategoryKey; 4] = [
        CategoryKey::Skill,
        CategoryKey::Strength,
        CategoryKey::Volume,
        CategoryKey::Cardio,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKey::Skill => "skill",
            CategoryKey::Strength => "strength",
            CategoryKey::Volume => "volume",
            CategoryKey::Cardio => "cardio",
        }
    }

    /// Parse a key from its lowercase name.
    pub fn parse(s: &str) -> Option<CategoryKey> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skill" => Some(CategoryKey::Skill),
            "strength" => Some(CategoryKey::Strength),
            "volume" => Some(CategoryKey::Volume),
            "cardio" => Some(CategoryKey::Cardio),
            _ => None,
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-category defaults a session is seeded from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTemplate {
    /// Display label, e.g. "Heavy Push (Dips/Bench)".
    pub label: String,
    /// Default cardio minutes; only meaningful on the cardio category.
    #[serde(default)]
    pub cardio_minutes: Option<u32>,
}

/// One day of the weekly plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleDay {
    pub index: usize,
    pub title: String,
    pub tags: Vec<String>,
    /// Rough expected duration, e.g. "70-110 min".
    pub duration_hint: String,
    /// Task labels for the check-off list, in display order.
    pub tasks: Vec<String>,
    pub is_recovery: bool,
    /// Empty when `is_recovery` is true.
    #[serde(default)]
    pub categories: BTreeMap<CategoryKey, CategoryTemplate>,
}

/// The ordered weekly plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleCatalog {
    days: Vec<ScheduleDay>,
}

impl ScheduleCatalog {
    pub fn new(days: Vec<ScheduleDay>) -> Self {
        Self { days }
    }

    pub fn day(&self, index: usize) -> Option<&ScheduleDay> {
        self.days.get(index)
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    pub fn days(&self) -> &[ScheduleDay] {
        &self.days
    }

    /// The default five-day calisthenics/fitness week.
    pub fn default_week() -> Self {
        fn day(
            index: usize,
            title: &str,
            tags: &[&str],
            duration_hint: &str,
            labels: [&str; 4],
            cardio_minutes: Option<u32>,
        ) -> ScheduleDay {
            let categories = CategoryKey::ALL
                .iter()
                .zip(labels.iter())
                .map(|(key, label)| {
                    (
                        *key,
                        CategoryTemplate {
                            label: (*label).to_string(),
                            cardio_minutes: if *key == CategoryKey::Cardio {
                                cardio_minutes
                            } else {
                                None
                            },
                        },
                    )
                })
                .collect();
            ScheduleDay {
                index,
                title: title.into(),
                tags: tags.iter().map(|t| (*t).to_string()).collect(),
                duration_hint: duration_hint.into(),
                tasks: labels.iter().map(|l| (*l).to_string()).collect(),
                is_recovery: false,
                categories,
            }
        }

        Self {
            days: vec![
                day(
                    0,
                    "Chest/Shoulder",
                    &["CAL", "FIT"],
                    "70-110 min",
                    [
                        "Skill (Handstand/Balance)",
                        "Heavy Push (Dips/Bench)",
                        "Volume Chest/Shoulder",
                        "Cardio",
                    ],
                    Some(30),
                ),
                day(
                    1,
                    "Back",
                    &["CAL", "FIT"],
                    "70-110 min",
                    [
                        "Skill (Scapula/One arm tech)",
                        "Heavy Pull (Weighted pullups)",
                        "Volume Back + Rear Delt",
                        "Cardio",
                    ],
                    Some(30),
                ),
                day(
                    2,
                    "Legs + Light Skill",
                    &["FIT"],
                    "70-110 min",
                    [
                        "Mobility/Light Skill",
                        "Heavy Legs",
                        "Volume Legs + Core",
                        "Light Cardio",
                    ],
                    Some(20),
                ),
                day(
                    3,
                    "Arms + Maint. CAL",
                    &["FIT"],
                    "60-100 min",
                    [
                        "Skill (Handstand 5-10m)",
                        "Maint. Push/Pull (No failure)",
                        "Arms Volume",
                        "Cardio",
                    ],
                    Some(30),
                ),
                ScheduleDay {
                    index: 4,
                    title: "Rest/Recovery".into(),
                    tags: vec!["Recovery".into()],
                    duration_hint: "20-60 min".into(),
                    tasks: vec![
                        "Walk + Stretching".into(),
                        "Optional 5-10m handstand".into(),
                    ],
                    is_recovery: true,
                    categories: BTreeMap::new(),
                },
            ],
        }
    }
}

impl Default for ScheduleCatalog {
    fn default() -> Self {
        Self::default_week()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_week_has_5_days() {
        let catalog = ScheduleCatalog::default_week();
        assert_eq!(catalog.day_count(), 5);
    }

    #[test]
    fn recovery_day_has_no_categories() {
        let catalog = ScheduleCatalog::default_week();
        let day = catalog.day(4).unwrap();
        assert!(day.is_recovery);
        assert!(day.categories.is_empty());
        assert_eq!(day.tasks.len(), 2);
    }

    #[test]
    fn training_days_carry_all_four_categories() {
        let catalog = ScheduleCatalog::default_week();
        for index in 0..4 {
            let day = catalog.day(index).unwrap();
            assert!(!day.is_recovery);
            for key in CategoryKey::ALL {
                assert!(day.categories.contains_key(&key), "day {index} missing {key}");
            }
        }
    }

    #[test]
    fn category_key_parse_roundtrip() {
        for key in CategoryKey::ALL {
            assert_eq!(CategoryKey::parse(key.as_str()), Some(key));
        }
        assert_eq!(CategoryKey::parse("  Strength "), Some(CategoryKey::Strength));
        assert_eq!(CategoryKey::parse("mobility"), None);
    }

    #[test]
    fn out_of_range_day_is_none() {
        let catalog = ScheduleCatalog::default_week();
        assert!(catalog.day(5).is_none());
    }
}
