// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cancellable scheduled transitions driven by caller-supplied time.
//!
//! A [`Timer`] never reads a clock. The owner schedules it with the current
//! timestamp and a delay, and later asks whether it has come due by passing a
//! newer timestamp. Hosts use [`Timer::deadline`] to decide when to wake the
//! state machine next.
//!
//! ```
//! use understory_event_state::timer::{Timer, TimerState};
//!
//! let mut t = Timer::new();
//! t.schedule(1000, 250);
//! assert!(!t.fire(1100));
//! assert!(t.fire(1250));
//! assert_eq!(t.state(), TimerState::Committed);
//! ```

/// Timestamp in milliseconds from an arbitrary, monotonic origin.
pub type Millis = u64;

/// Lifecycle of a scheduled transition.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TimerState {
    /// Nothing scheduled.
    #[default]
    Idle,
    /// Waiting for `deadline`.
    Scheduled {
        /// When the transition becomes due.
        deadline: Millis,
    },
    /// The transition fired and has not been rescheduled since.
    Committed,
}

/// A single cancellable scheduled transition.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Timer {
    state: TimerState,
}

impl Timer {
    /// Create an idle timer.
    pub const fn new() -> Self {
        Self {
            state: TimerState::Idle,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Schedule (or reschedule) to come due `delay` milliseconds after `now`.
    pub fn schedule(&mut self, now: Millis, delay: Millis) {
        self.state = TimerState::Scheduled {
            deadline: now.saturating_add(delay),
        };
    }

    /// Cancel a pending transition. Returns `true` if one was pending.
    pub fn cancel(&mut self) -> bool {
        let was_scheduled = self.is_scheduled();
        self.state = TimerState::Idle;
        was_scheduled
    }

    /// Whether a transition is pending.
    pub fn is_scheduled(&self) -> bool {
        matches!(self.state, TimerState::Scheduled { .. })
    }

    /// The pending deadline, if any.
    pub fn deadline(&self) -> Option<Millis> {
        match self.state {
            TimerState::Scheduled { deadline } => Some(deadline),
            _ => None,
        }
    }

    /// Whether a pending transition is due at `now`.
    pub fn is_due(&self, now: Millis) -> bool {
        self.deadline().is_some_and(|deadline| now >= deadline)
    }

    /// Commit the transition if it is due at `now`.
    ///
    /// Returns `true` exactly once per scheduling.
    pub fn fire(&mut self, now: Millis) -> bool {
        if self.is_due(now) {
            self.state = TimerState::Committed;
            true
        } else {
            false
        }
    }
}

/// The earliest of two optional deadlines.
pub(crate) fn earliest(a: Option<Millis>, b: Option<Millis>) -> Option<Millis> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}
