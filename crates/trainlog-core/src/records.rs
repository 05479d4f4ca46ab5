//! Personal records and skill notes.
//!
//! Thin append-and-list collections persisted as whole records. The
//! session state machine does not touch them except to clear both on a
//! full data reset.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One personal record, e.g. "Weighted Pullup" / "+40 kg x 1".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalRecord {
    pub exercise: String,
    pub value: String,
    pub date: NaiveDate,
}

/// One skill practice note, e.g. "Handstand" / "20s freestanding hold".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillNote {
    pub name: String,
    pub notes: String,
    pub date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_roundtrips_through_json() {
        let pr = PersonalRecord {
            exercise: "Weighted Dip".into(),
            value: "+50 kg x 1".into(),
            date: NaiveDate::from_ymd_opt(2026, 8, 30).unwrap(),
        };
        let json = serde_json::to_value(&pr).unwrap();
        assert_eq!(serde_json::from_value::<PersonalRecord>(json).unwrap(), pr);
    }
}
