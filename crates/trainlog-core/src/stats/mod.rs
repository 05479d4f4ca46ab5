//! Read-side query helpers over archived sessions.
//!
//! Pure functions, no mutation. The two history windows are deliberately
//! asymmetric: "week" is a rolling trailing 7x24h window while "month"
//! is the current local calendar month, matching the original widget.

use chrono::{DateTime, Datelike, Duration, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::session::Session;

/// History window selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryWindow {
    /// Trailing 7x24h, inclusive lower bound (`ended_at >= now - 7d`).
    Week,
    /// Same local calendar month and year as `now` (not rolling 30 days).
    Month,
}

/// Sessions whose `ended_at` falls inside the window. Sessions without
/// an end timestamp never match.
pub fn filter_by_window(
    sessions: &[Session],
    window: HistoryWindow,
    now: DateTime<Utc>,
) -> Vec<&Session> {
    sessions
        .iter()
        .filter(|s| match (window, s.ended_at) {
            (_, None) => false,
            (HistoryWindow::Week, Some(ended)) => ended >= now - Duration::days(7),
            (HistoryWindow::Month, Some(ended)) => {
                let ended = ended.with_timezone(&Local);
                let now = now.with_timezone(&Local);
                ended.year() == now.year() && ended.month() == now.month()
            }
        })
        .collect()
}

/// Sum of entry counts across all categories.
pub fn exercise_count(session: &Session) -> usize {
    session.categories.values().map(|c| c.entries.len()).sum()
}

/// Number of categories marked complete.
pub fn completed_category_count(session: &Session) -> usize {
    session.categories.values().filter(|c| c.completed).count()
}

/// Session length in whole minutes; `None` when either timestamp is
/// absent.
pub fn duration_min(session: &Session) -> Option<i64> {
    session
        .ended_at
        .map(|ended| (ended - session.started_at).num_minutes())
}

/// Human label for the session length, "unknown" when unfinished.
pub fn duration_label(session: &Session) -> String {
    match duration_min(session) {
        Some(min) => format!("{min} min"),
        None => "unknown".to_string(),
    }
}

/// Aggregate report over one history window.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WindowSummary {
    pub sessions: usize,
    pub exercises: usize,
    pub completed_categories: usize,
    pub total_min: i64,
}

pub fn summarize(sessions: &[Session], window: HistoryWindow, now: DateTime<Utc>) -> WindowSummary {
    let selected = filter_by_window(sessions, window, now);
    WindowSummary {
        sessions: selected.len(),
        exercises: selected.iter().map(|s| exercise_count(s)).sum(),
        completed_categories: selected.iter().map(|s| completed_category_count(s)).sum(),
        total_min: selected.iter().filter_map(|s| duration_min(s)).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ScheduleCatalog;

    fn finished_session(ended: DateTime<Utc>, len_min: i64) -> Session {
        let catalog = ScheduleCatalog::default_week();
        let mut session = Session::start(
            catalog.day(0).unwrap(),
            ended - Duration::minutes(len_min),
            60,
        );
        session.ended_at = Some(ended);
        session
    }

    #[test]
    fn week_window_is_inclusive_trailing_7d() {
        let now = Utc::now();
        let sessions = vec![
            finished_session(now - Duration::days(8), 60),
            finished_session(now - Duration::days(6), 60),
            finished_session(now - Duration::days(7), 60),
        ];
        let hits = filter_by_window(&sessions, HistoryWindow::Week, now);
        assert_eq!(hits.len(), 2);
        assert!(hits
            .iter()
            .all(|s| s.ended_at.unwrap() >= now - Duration::days(7)));
    }

    #[test]
    fn month_window_is_calendar_not_rolling() {
        let now = Utc::now();
        let sessions = vec![
            finished_session(now, 45),
            finished_session(now - Duration::days(400), 45),
        ];
        let hits = filter_by_window(&sessions, HistoryWindow::Month, now);
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn unfinished_sessions_never_match() {
        let now = Utc::now();
        let catalog = ScheduleCatalog::default_week();
        let sessions = vec![Session::start(catalog.day(0).unwrap(), now, 60)];
        assert!(filter_by_window(&sessions, HistoryWindow::Week, now).is_empty());
        assert!(filter_by_window(&sessions, HistoryWindow::Month, now).is_empty());
    }

    #[test]
    fn duration_label_uses_whole_minutes() {
        let now = Utc::now();
        let session = finished_session(now, 42);
        assert_eq!(duration_min(&session), Some(42));
        assert_eq!(duration_label(&session), "42 min");

        let catalog = ScheduleCatalog::default_week();
        let unfinished = Session::start(catalog.day(0).unwrap(), now, 60);
        assert_eq!(duration_min(&unfinished), None);
        assert_eq!(duration_label(&unfinished), "unknown");
    }

    #[test]
    fn summarize_totals_the_window() {
        let now = Utc::now();
        let mut a = finished_session(now - Duration::days(1), 60);
        a.categories
            .values_mut()
            .next()
            .unwrap()
            .entries
            .push(crate::session::Entry {
                exercise: "Dips".into(),
                sets: "3".into(),
                reps: "10".into(),
                weight: None,
                notes: None,
            });
        let b = finished_session(now - Duration::days(30), 45);
        let summary = summarize(&[a, b], HistoryWindow::Week, now);
        assert_eq!(summary.sessions, 1);
        assert_eq!(summary.exercises, 1);
        assert_eq!(summary.total_min, 60);
    }
}
