//! # Trainlog Core Library
//!
//! Core business logic for the Trainlog workout tracker. It implements a
//! CLI-first philosophy where all operations are available via a
//! standalone CLI binary, with any GUI shell being a thin layer over the
//! same core library.
//!
//! ## Architecture
//!
//! - **Session state machine**: at most one active workout session at a
//!   time; per-category entries, completion flags and cardio fields; the
//!   finished session is archived most-recent-first
//! - **Rest timer**: a wall-clock-based countdown that requires the
//!   caller to periodically invoke `tick(now)` - no internal scheduling
//! - **Storage**: JSON key-value records on disk and TOML configuration
//! - **Stats**: pure query helpers over the archive (week/month windows)
//!
//! ## Key Components
//!
//! - [`Tracker`]: the owned state container exposing every operation
//! - [`RestTimer`]: countdown state machine
//! - [`ScheduleCatalog`]: the static weekly plan
//! - [`Config`]: application configuration management

pub mod checklist;
pub mod error;
pub mod events;
pub mod records;
pub mod schedule;
pub mod session;
pub mod stats;
pub mod storage;
pub mod timer;
pub mod tracker;

pub use checklist::{Checklist, DayProgress};
pub use error::{ConfigError, CoreError, SessionError, StorageError};
pub use events::Event;
pub use records::{PersonalRecord, SkillNote};
pub use schedule::{CategoryKey, CategoryTemplate, ScheduleCatalog, ScheduleDay};
pub use session::{CardioKind, CardioState, CategoryState, Entry, Session};
pub use stats::{HistoryWindow, WindowSummary};
pub use storage::{Config, JsonStore, MemoryStore, StateStore};
pub use timer::{RestTimer, TickOutcome};
pub use tracker::Tracker;
