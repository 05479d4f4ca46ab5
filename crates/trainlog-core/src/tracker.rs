//! The session state machine.
//!
//! [`Tracker`] is the explicitly owned state container: it loads every
//! persisted record on construction (decode-or-default), mutates state
//! through the operations below, and persists the affected record before
//! each operation returns. At most one session is active at any time --
//! the central invariant; starting while one is active is rejected
//! rather than silently overwriting.
//!
//! Persistence failures do not fail operations: state stays correct in
//! memory, a warning is logged, and durability catches up on the next
//! successful write.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::checklist::{Checklist, DayProgress};
use crate::error::{CoreError, SessionError};
use crate::events::Event;
use crate::records::{PersonalRecord, SkillNote};
use crate::schedule::{CategoryKey, ScheduleCatalog};
use crate::session::{coerce_minutes, CardioKind, Entry, Session};
use crate::storage::{keys, Config, JsonStore, StateStore};
use crate::timer::TickOutcome;

/// Owns the active-session slot, the archive and the collaborator
/// records for the lifetime of the process.
pub struct Tracker<S: StateStore> {
    catalog: ScheduleCatalog,
    config: Config,
    store: S,
    active: Option<Session>,
    archive: Vec<Session>,
    checklist: Checklist,
    prs: Vec<PersonalRecord>,
    skills: Vec<SkillNote>,
}

impl Tracker<JsonStore> {
    /// Open the tracker over the default on-disk store, default weekly
    /// catalog and the TOML config.
    pub fn open() -> Result<Self, CoreError> {
        let store = JsonStore::open()?;
        Ok(Self::new(
            ScheduleCatalog::default_week(),
            Config::load_or_default(),
            store,
        ))
    }
}

impl<S: StateStore> Tracker<S> {
    /// Load-or-default every record from the store. A missing or
    /// undecodable record falls back to empty state.
    pub fn new(catalog: ScheduleCatalog, config: Config, store: S) -> Self {
        fn decode<T: serde::de::DeserializeOwned + Default>(
            store: &impl StateStore,
            key: &str,
        ) -> T {
            store
                .load(key)
                .and_then(|v| serde_json::from_value(v).ok())
                .unwrap_or_default()
        }

        let active: Option<Session> = decode(&store, keys::ACTIVE_SESSION);
        let archive: Vec<Session> = decode(&store, keys::SESSIONS);
        let checklist: Checklist = decode(&store, keys::CHECKLIST);
        let prs: Vec<PersonalRecord> = decode(&store, keys::PRS);
        let skills: Vec<SkillNote> = decode(&store, keys::SKILLS);

        Self {
            catalog,
            config,
            store,
            active,
            archive,
            checklist,
            prs,
            skills,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn catalog(&self) -> &ScheduleCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn active(&self) -> Option<&Session> {
        self.active.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Finished sessions, most recent first.
    pub fn archive(&self) -> &[Session] {
        &self.archive
    }

    pub fn checklist(&self) -> &Checklist {
        &self.checklist
    }

    pub fn prs(&self) -> &[PersonalRecord] {
        &self.prs
    }

    pub fn skills(&self) -> &[SkillNote] {
        &self.skills
    }

    pub fn day_progress(&self, day_index: usize) -> Option<DayProgress> {
        self.catalog
            .day(day_index)
            .map(|day| self.checklist.progress(day))
    }

    // ── Session lifecycle ────────────────────────────────────────────

    /// Start a session for the given schedule day.
    pub fn start_session(
        &mut self,
        day_index: usize,
        now: DateTime<Utc>,
    ) -> Result<Event, SessionError> {
        if let Some(active) = &self.active {
            return Err(SessionError::SessionAlreadyActive {
                day_index: active.day_index,
            });
        }
        let day = self
            .catalog
            .day(day_index)
            .ok_or(SessionError::InvalidDayIndex {
                index: day_index,
                len: self.catalog.day_count(),
            })?;

        let session = Session::start(day, now, self.config.timer.rest_secs);
        debug!(day_index, session_id = %session.id, "session started");
        let event = Event::SessionStarted {
            session_id: session.id.clone(),
            day_index,
            day_title: day.title.clone(),
            at: now,
        };
        self.active = Some(session);
        self.persist_active();
        Ok(event)
    }

    /// Finish the active session and move it into the archive.
    ///
    /// The archive write happens BEFORE the active slot is cleared: a
    /// crash in between leaves both records present, which favors
    /// keeping the session over losing it.
    pub fn finish_session(&mut self, now: DateTime<Utc>) -> Result<Event, SessionError> {
        let mut session = self.active.take().ok_or(SessionError::NoActiveSession)?;
        session.ended_at = Some(now);
        let event = Event::SessionFinished {
            session_id: session.id.clone(),
            day_index: session.day_index,
            duration_min: (now - session.started_at).num_minutes(),
            at: now,
        };
        debug!(session_id = %session.id, "session finished");
        self.archive.insert(0, session);
        self.persist_record(keys::SESSIONS, &self.archive.clone());
        self.persist_active();
        Ok(event)
    }

    /// Clear every persisted record: active session, archive, check-off
    /// state, PRs and skill notes. Irreversible; always succeeds.
    pub fn reset_all(&mut self, now: DateTime<Utc>) -> Event {
        self.active = None;
        self.archive.clear();
        self.checklist.clear();
        self.prs.clear();
        self.skills.clear();
        self.persist_active();
        self.persist_record(keys::SESSIONS, &Vec::<Session>::new());
        self.persist_record(keys::CHECKLIST, &Checklist::new());
        self.persist_record(keys::PRS, &Vec::<PersonalRecord>::new());
        self.persist_record(keys::SKILLS, &Vec::<SkillNote>::new());
        debug!("all records cleared");
        Event::DataReset { at: now }
    }

    // ── Category operations ──────────────────────────────────────────

    /// Append an entry to a category of the active session.
    pub fn add_entry(
        &mut self,
        category: CategoryKey,
        entry: Entry,
    ) -> Result<Event, SessionError> {
        let exercise = entry.exercise.trim().to_string();
        if exercise.is_empty() {
            return Err(SessionError::Validation("exercise name is empty".into()));
        }
        let session = self.active.as_mut().ok_or(SessionError::NoActiveSession)?;
        let state = session.category_mut(category).ok_or_else(|| {
            SessionError::Validation(format!("no {category} category on this day"))
        })?;
        state.entries.push(Entry { exercise: exercise.clone(), ..entry });
        let event = Event::EntryAdded {
            category,
            exercise,
            entry_count: state.entries.len(),
            at: Utc::now(),
        };
        self.persist_active();
        Ok(event)
    }

    /// Remove the entry at `index`, preserving the order of the rest.
    pub fn remove_entry(
        &mut self,
        category: CategoryKey,
        index: usize,
    ) -> Result<Event, SessionError> {
        let session = self.active.as_mut().ok_or(SessionError::NoActiveSession)?;
        let state = session.category_mut(category).ok_or_else(|| {
            SessionError::Validation(format!("no {category} category on this day"))
        })?;
        if index >= state.entries.len() {
            return Err(SessionError::IndexOutOfRange {
                category,
                index,
                len: state.entries.len(),
            });
        }
        state.entries.remove(index);
        let event = Event::EntryRemoved {
            category,
            index,
            entry_count: state.entries.len(),
            at: Utc::now(),
        };
        self.persist_active();
        Ok(event)
    }

    /// Flip a category's completed flag. Zero entries is fine ("nothing
    /// to log today" is an intentional allowance).
    pub fn toggle_category_completed(
        &mut self,
        category: CategoryKey,
    ) -> Result<Event, SessionError> {
        let session = self.active.as_mut().ok_or(SessionError::NoActiveSession)?;
        let state = session.category_mut(category).ok_or_else(|| {
            SessionError::Validation(format!("no {category} category on this day"))
        })?;
        state.completed = !state.completed;
        let event = Event::CategoryToggled {
            category,
            completed: state.completed,
            at: Utc::now(),
        };
        self.persist_active();
        Ok(event)
    }

    /// Update the cardio fields. `minutes_input` is coerced to a
    /// non-negative integer; invalid or empty input means zero.
    pub fn set_cardio_fields(
        &mut self,
        minutes_input: &str,
        pulse: &str,
        kind: Option<CardioKind>,
    ) -> Result<Event, SessionError> {
        let session = self.active.as_mut().ok_or(SessionError::NoActiveSession)?;
        let cardio = session
            .category_mut(CategoryKey::Cardio)
            .and_then(|c| c.cardio.as_mut())
            .ok_or_else(|| SessionError::Validation("no cardio category on this day".into()))?;
        cardio.minutes = coerce_minutes(minutes_input);
        cardio.pulse = pulse.to_string();
        if let Some(kind) = kind {
            cardio.kind = kind;
        }
        let event = Event::CardioUpdated {
            minutes: cardio.minutes,
            at: Utc::now(),
        };
        self.persist_active();
        Ok(event)
    }

    // ── Rest timer ───────────────────────────────────────────────────

    /// Start (or resume) the rest timer. `Ok(None)` when nothing changed.
    pub fn timer_start(&mut self, now: DateTime<Utc>) -> Result<Option<Event>, SessionError> {
        let session = self.active.as_mut().ok_or(SessionError::NoActiveSession)?;
        if !session.timer.start(now) {
            return Ok(None);
        }
        let remaining_secs = session.timer.remaining_secs();
        self.persist_active();
        Ok(Some(Event::TimerStarted { remaining_secs, at: now }))
    }

    /// Pause the rest timer. `Ok(None)` when it was not running.
    pub fn timer_pause(&mut self, now: DateTime<Utc>) -> Result<Option<Event>, SessionError> {
        let session = self.active.as_mut().ok_or(SessionError::NoActiveSession)?;
        if !session.timer.pause() {
            return Ok(None);
        }
        let remaining_secs = session.timer.remaining_secs();
        self.persist_active();
        Ok(Some(Event::TimerPaused { remaining_secs, at: now }))
    }

    /// Set duration and remaining to a preset, stopped.
    pub fn timer_set_preset(
        &mut self,
        secs: u32,
        now: DateTime<Utc>,
    ) -> Result<Event, SessionError> {
        let session = self.active.as_mut().ok_or(SessionError::NoActiveSession)?;
        session.timer.set_preset(secs);
        self.persist_active();
        Ok(Event::TimerPreset { duration_secs: secs, at: now })
    }

    /// Rewind remaining to the nominal duration, stopped.
    pub fn timer_reset(&mut self, now: DateTime<Utc>) -> Result<Event, SessionError> {
        let session = self.active.as_mut().ok_or(SessionError::NoActiveSession)?;
        session.timer.reset_to_duration();
        let duration_secs = session.timer.duration_secs();
        self.persist_active();
        Ok(Event::TimerReset { duration_secs, at: now })
    }

    /// Extend remaining (and the nominal duration with it).
    pub fn timer_extend(
        &mut self,
        delta_secs: u32,
        now: DateTime<Utc>,
    ) -> Result<Event, SessionError> {
        let session = self.active.as_mut().ok_or(SessionError::NoActiveSession)?;
        session.timer.extend(delta_secs);
        let remaining_secs = session.timer.remaining_secs();
        self.persist_active();
        Ok(Event::TimerExtended { remaining_secs, at: now })
    }

    /// Advance the rest timer to `now`. No-op (returns `None`, persists
    /// nothing) without an active session or a running timer.
    /// `Event::TimerFinished` is the alarm signal and fires exactly once
    /// per crossing to zero.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<Event> {
        let session = self.active.as_mut()?;
        match session.timer.tick(now) {
            TickOutcome::Idle => None,
            TickOutcome::Ticked => {
                let remaining_secs = session.timer.remaining_secs();
                self.persist_active();
                Some(Event::TimerTicked { remaining_secs, at: now })
            }
            TickOutcome::Finished => {
                debug!("rest timer finished");
                self.persist_active();
                Some(Event::TimerFinished { at: now })
            }
        }
    }

    // ── Checklist ────────────────────────────────────────────────────

    /// Flip one check-off task for a schedule day.
    pub fn toggle_task(
        &mut self,
        day_index: usize,
        task_index: usize,
        now: DateTime<Utc>,
    ) -> Result<Event, SessionError> {
        let day = self
            .catalog
            .day(day_index)
            .ok_or(SessionError::InvalidDayIndex {
                index: day_index,
                len: self.catalog.day_count(),
            })?;
        if task_index >= day.tasks.len() {
            return Err(SessionError::Validation(format!(
                "no task {task_index} on day {day_index} ({} tasks)",
                day.tasks.len()
            )));
        }
        let done = self.checklist.toggle(day_index, task_index);
        self.persist_record(keys::CHECKLIST, &self.checklist.clone());
        Ok(Event::TaskToggled {
            day_index,
            task_index,
            done,
            at: now,
        })
    }

    // ── Collaborator records ─────────────────────────────────────────

    pub fn add_pr(&mut self, pr: PersonalRecord) {
        self.prs.push(pr);
        self.persist_record(keys::PRS, &self.prs.clone());
    }

    pub fn add_skill(&mut self, note: SkillNote) {
        self.skills.push(note);
        self.persist_record(keys::SKILLS, &self.skills.clone());
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn persist_active(&mut self) {
        let active = self.active.clone();
        self.persist_record(keys::ACTIVE_SESSION, &active);
    }

    fn persist_record<T: Serialize>(&mut self, key: &str, value: &T) {
        match serde_json::to_value(value) {
            Ok(json) => {
                if let Err(e) = self.store.save(key, &json) {
                    warn!(key, error = %e, "persist failed; state kept in memory");
                }
            }
            Err(e) => warn!(key, error = %e, "record encode failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn tracker() -> Tracker<MemoryStore> {
        Tracker::new(
            ScheduleCatalog::default_week(),
            Config::default(),
            MemoryStore::new(),
        )
    }

    fn entry(exercise: &str) -> Entry {
        Entry {
            exercise: exercise.into(),
            sets: "3".into(),
            reps: "8".into(),
            weight: None,
            notes: None,
        }
    }

    #[test]
    fn start_rejects_second_session() {
        let mut t = tracker();
        t.start_session(0, Utc::now()).unwrap();
        let err = t.start_session(1, Utc::now()).unwrap_err();
        assert!(matches!(err, SessionError::SessionAlreadyActive { day_index: 0 }));
        assert_eq!(t.active().unwrap().day_index, 0);
    }

    #[test]
    fn start_rejects_bad_day_index() {
        let mut t = tracker();
        let err = t.start_session(99, Utc::now()).unwrap_err();
        assert!(matches!(
            err,
            SessionError::InvalidDayIndex { index: 99, len: 5 }
        ));
        assert!(t.active().is_none());
    }

    #[test]
    fn add_entry_trims_and_validates_exercise() {
        let mut t = tracker();
        t.start_session(0, Utc::now()).unwrap();
        let err = t.add_entry(CategoryKey::Strength, entry("   ")).unwrap_err();
        assert!(matches!(err, SessionError::Validation(_)));

        t.add_entry(CategoryKey::Strength, entry("  Pullups ")).unwrap();
        let entries = &t.active().unwrap().category(CategoryKey::Strength).unwrap().entries;
        assert_eq!(entries[0].exercise, "Pullups");
    }

    #[test]
    fn remove_entry_checks_bounds_and_preserves_order() {
        let mut t = tracker();
        t.start_session(0, Utc::now()).unwrap();
        t.add_entry(CategoryKey::Volume, entry("A")).unwrap();
        t.add_entry(CategoryKey::Volume, entry("B")).unwrap();
        t.add_entry(CategoryKey::Volume, entry("C")).unwrap();

        let err = t.remove_entry(CategoryKey::Volume, 3).unwrap_err();
        assert!(matches!(err, SessionError::IndexOutOfRange { index: 3, len: 3, .. }));

        t.remove_entry(CategoryKey::Volume, 1).unwrap();
        let names: Vec<_> = t
            .active()
            .unwrap()
            .category(CategoryKey::Volume)
            .unwrap()
            .entries
            .iter()
            .map(|e| e.exercise.clone())
            .collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn toggle_allows_empty_category() {
        let mut t = tracker();
        t.start_session(0, Utc::now()).unwrap();
        t.toggle_category_completed(CategoryKey::Skill).unwrap();
        assert!(t.active().unwrap().category(CategoryKey::Skill).unwrap().completed);
        t.toggle_category_completed(CategoryKey::Skill).unwrap();
        assert!(!t.active().unwrap().category(CategoryKey::Skill).unwrap().completed);
    }

    #[test]
    fn cardio_fields_are_coerced() {
        let mut t = tracker();
        t.start_session(0, Utc::now()).unwrap();
        t.set_cardio_fields("garbage", "145", Some(CardioKind::Row)).unwrap();
        let cardio = t
            .active()
            .unwrap()
            .category(CategoryKey::Cardio)
            .unwrap()
            .cardio
            .clone()
            .unwrap();
        assert_eq!(cardio.minutes, 0);
        assert_eq!(cardio.pulse, "145");
        assert_eq!(cardio.kind, CardioKind::Row);
    }

    #[test]
    fn recovery_day_rejects_entries_and_cardio() {
        let mut t = tracker();
        t.start_session(4, Utc::now()).unwrap();
        assert!(t.active().unwrap().categories.is_empty());
        for key in CategoryKey::ALL {
            assert!(matches!(
                t.add_entry(key, entry("Walk")).unwrap_err(),
                SessionError::Validation(_)
            ));
        }
        assert!(t.set_cardio_fields("30", "", None).is_err());
    }

    #[test]
    fn finish_archives_most_recent_first() {
        let mut t = tracker();
        let now = Utc::now();
        t.start_session(0, now).unwrap();
        t.finish_session(now).unwrap();
        t.start_session(1, now).unwrap();
        t.finish_session(now).unwrap();
        assert!(t.active().is_none());
        assert_eq!(t.archive()[0].day_index, 1);
        assert_eq!(t.archive()[1].day_index, 0);
        assert!(t.archive()[0].ended_at.unwrap() >= t.archive()[0].started_at);
    }

    #[test]
    fn finish_without_session_fails() {
        let mut t = tracker();
        assert!(matches!(
            t.finish_session(Utc::now()).unwrap_err(),
            SessionError::NoActiveSession
        ));
    }

    #[test]
    fn state_survives_a_reload() {
        let now = Utc::now();
        let mut t = tracker();
        t.start_session(0, now).unwrap();
        t.add_entry(CategoryKey::Strength, entry("Dips")).unwrap();
        t.toggle_task(0, 2, now).unwrap();
        t.add_pr(PersonalRecord {
            exercise: "Dips".into(),
            value: "+40kg".into(),
            date: now.date_naive(),
        });

        let store = t.store.clone();
        let reloaded = Tracker::new(ScheduleCatalog::default_week(), Config::default(), store);
        assert_eq!(reloaded.active().unwrap().day_index, 0);
        assert_eq!(
            reloaded
                .active()
                .unwrap()
                .category(CategoryKey::Strength)
                .unwrap()
                .entries
                .len(),
            1
        );
        assert!(reloaded.checklist().is_done(0, 2));
        assert_eq!(reloaded.prs().len(), 1);
    }

    #[test]
    fn reset_all_clears_every_record() {
        let now = Utc::now();
        let mut t = tracker();
        t.start_session(0, now).unwrap();
        t.finish_session(now).unwrap();
        t.toggle_task(0, 0, now).unwrap();
        t.add_skill(SkillNote {
            name: "Handstand".into(),
            notes: "20s hold".into(),
            date: now.date_naive(),
        });

        t.reset_all(now);
        assert!(t.active().is_none());
        assert!(t.archive().is_empty());
        assert!(t.skills().is_empty());
        assert_eq!(t.day_progress(0).unwrap().completed, 0);

        let reloaded = Tracker::new(
            ScheduleCatalog::default_week(),
            Config::default(),
            t.store.clone(),
        );
        assert!(reloaded.active().is_none());
        assert!(reloaded.archive().is_empty());
    }

    #[test]
    fn corrupted_active_record_falls_back_to_empty() {
        let mut store = MemoryStore::new();
        store
            .save(keys::ACTIVE_SESSION, &serde_json::json!({"bogus": true}))
            .unwrap();
        let t = Tracker::new(ScheduleCatalog::default_week(), Config::default(), store);
        assert!(t.active().is_none());
    }

    #[test]
    fn toggle_task_validates_indices() {
        let mut t = tracker();
        assert!(t.toggle_task(9, 0, Utc::now()).is_err());
        assert!(t.toggle_task(0, 9, Utc::now()).is_err());
        t.toggle_task(4, 1, Utc::now()).unwrap();
        assert_eq!(t.day_progress(4).unwrap().completed, 1);
    }
}
