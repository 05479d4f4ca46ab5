//! Rest timer implementation.
//!
//! The rest timer is a wall-clock-based countdown. It does not use
//! internal threads or scheduling - the host loop calls `tick(now)` on a
//! roughly one second cadence and passes the current timestamp in, so
//! elapsed time is computed from deltas and drift stays within a second.
//!
//! ## Usage
//!
//! ```ignore
//! let mut timer = RestTimer::new(60);
//! timer.start(Utc::now());
//! // In a loop:
//! match timer.tick(Utc::now()) {
//!     TickOutcome::Finished => { /* play the alarm */ }
//!     _ => {}
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of a single `tick` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing changed; the caller must not persist.
    Idle,
    /// The countdown moved (or armed); state should be persisted.
    Ticked,
    /// The countdown crossed zero on this call. Fires once per crossing;
    /// subsequent ticks are `Idle` because the timer stops itself.
    Finished,
}

/// Countdown timer embedded in the active session.
///
/// `remaining <= duration` is deliberately NOT an invariant (`extend`
/// moves both), but `remaining >= 0` always holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestTimer {
    duration_secs: u32,
    remaining_secs: u32,
    running: bool,
    /// Timestamp of the last state-changing tick (or of `start`).
    /// Absent while stopped; an absent value with `running == true` arms
    /// on the next tick with zero elapsed.
    #[serde(default)]
    last_tick: Option<DateTime<Utc>>,
}

impl RestTimer {
    pub fn new(duration_secs: u32) -> Self {
        Self {
            duration_secs,
            remaining_secs: duration_secs,
            running: false,
            last_tick: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start (or resume) the countdown. Stamps `last_tick = now` so the
    /// next tick measures from the moment of resumption rather than a
    /// stale prior timestamp. Returns false when nothing changed
    /// (already running, or nothing left to count down).
    pub fn start(&mut self, now: DateTime<Utc>) -> bool {
        if self.running || self.remaining_secs == 0 {
            return false;
        }
        self.running = true;
        self.last_tick = Some(now);
        true
    }

    /// Pause the countdown. Returns false when already paused.
    pub fn pause(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        self.last_tick = None;
        true
    }

    /// Set `duration = remaining = secs`, stopped.
    pub fn set_preset(&mut self, secs: u32) {
        self.duration_secs = secs;
        self.remaining_secs = secs;
        self.running = false;
        self.last_tick = None;
    }

    /// Rewind to the full duration, stopped.
    pub fn reset_to_duration(&mut self) {
        self.remaining_secs = self.duration_secs;
        self.running = false;
        self.last_tick = None;
    }

    /// Extend the countdown. The nominal duration moves with it, so a
    /// later reset returns to the extended length ("+30s" affordance).
    pub fn extend(&mut self, delta_secs: u32) {
        self.remaining_secs = self.remaining_secs.saturating_add(delta_secs);
        self.duration_secs = self.remaining_secs;
    }

    /// Advance the countdown to `now`.
    ///
    /// Elapsed whole seconds since `last_tick` are subtracted, floored at
    /// zero. A call that elapses less than one whole second is a full
    /// no-op: `last_tick` is left untouched so fractional seconds
    /// accumulate instead of being dropped each tick.
    pub fn tick(&mut self, now: DateTime<Utc>) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }
        let Some(last) = self.last_tick else {
            // Arm: zero elapsed, measure from here on.
            self.last_tick = Some(now);
            return TickOutcome::Ticked;
        };
        let elapsed = (now - last).num_seconds();
        if elapsed <= 0 {
            return TickOutcome::Idle;
        }
        let before = self.remaining_secs;
        self.remaining_secs = self
            .remaining_secs
            .saturating_sub(elapsed.min(u32::MAX as i64) as u32);
        self.last_tick = Some(now);
        if self.remaining_secs == 0 && before > 0 {
            self.running = false;
            self.last_tick = None;
            return TickOutcome::Finished;
        }
        TickOutcome::Ticked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at(base: DateTime<Utc>, secs: i64) -> DateTime<Utc> {
        base + Duration::seconds(secs)
    }

    #[test]
    fn counts_down_by_wall_clock_delta() {
        let base = Utc::now();
        let mut timer = RestTimer::new(90);
        assert!(timer.start(base));
        assert_eq!(timer.tick(at(base, 1)), TickOutcome::Ticked);
        assert_eq!(timer.tick(at(base, 2)), TickOutcome::Ticked);
        assert_eq!(timer.tick(at(base, 3)), TickOutcome::Ticked);
        assert_eq!(timer.remaining_secs(), 87);
        assert!(timer.is_running());
    }

    #[test]
    fn tick_while_stopped_is_idle() {
        let base = Utc::now();
        let mut timer = RestTimer::new(60);
        assert_eq!(timer.tick(at(base, 10)), TickOutcome::Idle);
        assert_eq!(timer.remaining_secs(), 60);
    }

    #[test]
    fn sub_second_tick_is_a_full_noop() {
        let base = Utc::now();
        let mut timer = RestTimer::new(60);
        timer.start(base);
        assert_eq!(timer.tick(base + Duration::milliseconds(400)), TickOutcome::Idle);
        // The fractional time is not dropped: 0.4s + 0.8s crosses a
        // whole second relative to the original stamp.
        assert_eq!(timer.tick(base + Duration::milliseconds(1200)), TickOutcome::Ticked);
        assert_eq!(timer.remaining_secs(), 59);
    }

    #[test]
    fn finishes_exactly_once() {
        let base = Utc::now();
        let mut timer = RestTimer::new(5);
        timer.start(base);
        let mut finishes = 0;
        for i in 1..=8 {
            if timer.tick(at(base, i)) == TickOutcome::Finished {
                finishes += 1;
            }
        }
        assert_eq!(finishes, 1);
        assert_eq!(timer.remaining_secs(), 0);
        assert!(!timer.is_running());
    }

    #[test]
    fn large_gap_floors_at_zero() {
        let base = Utc::now();
        let mut timer = RestTimer::new(30);
        timer.start(base);
        assert_eq!(timer.tick(at(base, 3600)), TickOutcome::Finished);
        assert_eq!(timer.remaining_secs(), 0);
    }

    #[test]
    fn start_after_pause_does_not_jump() {
        let base = Utc::now();
        let mut timer = RestTimer::new(60);
        timer.start(base);
        timer.tick(at(base, 10));
        assert!(timer.pause());
        // A long paused stretch must not count.
        assert!(timer.start(at(base, 500)));
        assert_eq!(timer.tick(at(base, 501)), TickOutcome::Ticked);
        assert_eq!(timer.remaining_secs(), 49);
    }

    #[test]
    fn extend_moves_duration_with_remaining() {
        let mut timer = RestTimer::new(60);
        timer.extend(30);
        assert_eq!(timer.remaining_secs(), 90);
        assert_eq!(timer.duration_secs(), 90);
        timer.set_preset(120);
        assert_eq!(timer.remaining_secs(), 120);
        assert!(!timer.is_running());
    }

    #[test]
    fn reset_rewinds_to_duration() {
        let base = Utc::now();
        let mut timer = RestTimer::new(60);
        timer.start(base);
        timer.tick(at(base, 15));
        timer.reset_to_duration();
        assert_eq!(timer.remaining_secs(), 60);
        assert!(!timer.is_running());
    }

    #[test]
    fn armed_timer_measures_from_first_tick() {
        let base = Utc::now();
        // Simulate a deserialized timer that is running but has no stamp.
        let mut timer = RestTimer::new(60);
        timer.start(base);
        timer.last_tick = None;
        assert_eq!(timer.tick(at(base, 100)), TickOutcome::Ticked);
        assert_eq!(timer.remaining_secs(), 60);
        assert_eq!(timer.tick(at(base, 101)), TickOutcome::Ticked);
        assert_eq!(timer.remaining_secs(), 59);
    }
}
