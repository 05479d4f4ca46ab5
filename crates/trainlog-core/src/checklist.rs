//! Per-day task check-off list.
//!
//! The lightweight companion to full session logging: each schedule day's
//! task labels can be ticked off individually, with a completion
//! percentage per day. Persisted as one record keyed by
//! `day-<d>-task-<t>` ids.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::schedule::ScheduleDay;

/// Completion snapshot for one day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayProgress {
    pub completed: usize,
    pub total: usize,
    /// Rounded 0-100; 0 for a day with no tasks.
    pub percent: u32,
}

/// Check-off state across all days.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Checklist {
    #[serde(default)]
    done: BTreeMap<String, bool>,
}

fn task_id(day_index: usize, task_index: usize) -> String {
    format!("day-{day_index}-task-{task_index}")
}

impl Checklist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_done(&self, day_index: usize, task_index: usize) -> bool {
        self.done
            .get(&task_id(day_index, task_index))
            .copied()
            .unwrap_or(false)
    }

    /// Flip one task; returns the new state.
    pub fn toggle(&mut self, day_index: usize, task_index: usize) -> bool {
        let id = task_id(day_index, task_index);
        let state = !self.done.get(&id).copied().unwrap_or(false);
        self.done.insert(id, state);
        state
    }

    pub fn clear(&mut self) {
        self.done.clear();
    }

    pub fn progress(&self, day: &ScheduleDay) -> DayProgress {
        let total = day.tasks.len();
        let completed = (0..total)
            .filter(|&t| self.is_done(day.index, t))
            .count();
        let percent = if total == 0 {
            0
        } else {
            ((completed as f64 / total as f64) * 100.0).round() as u32
        };
        DayProgress {
            completed,
            total,
            percent,
        }
    }
}
