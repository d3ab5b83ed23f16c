// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover intent: delayed open and close of a floating element driven by pointer hover.
//!
//! [`HoverIntent`] decides when a hover-triggered overlay (tooltip, hover card,
//! submenu) should open or close. The host forwards pointer enter/move/leave
//! events for the anchor and the floating element and calls
//! [`HoverIntent::poll`] when [`HoverIntent::next_deadline`] comes due.
//!
//! ## Rules
//!
//! 1. **Open**: entering the anchor schedules an open after `open_delay`. When
//!    it comes due the pointer must have rested for `rest_ms`; if it moved more
//!    recently the open is rescheduled for the remainder of the rest interval.
//! 2. **Touch**: touch pointers open immediately.
//! 3. **Close**: leaving both regions schedules a close after `close_delay`.
//!    With `enable_safe_polygon`, an exit point inside the rectangle spanning
//!    anchor and floating element starts a monitor instead; the close is only
//!    scheduled once the pointer leaves that rectangle.
//! 4. **Re-entry**: entering either region cancels a pending close.
//! 5. **Manual**: [`HoverIntent::open`] and [`HoverIntent::close`] cancel all
//!    pending work and set the state directly.
//!
//! A zero delay commits inside the handler that scheduled it.
//!
//! ```
//! use kurbo::Point;
//! use understory_event_state::hover_intent::{
//!     HoverIntent, HoverIntentConfig, HoverIntentEvent, PointerType, Region,
//! };
//!
//! let mut hover = HoverIntent::new(HoverIntentConfig {
//!     open_delay: 300,
//!     close_delay: 100,
//!     ..HoverIntentConfig::default()
//! });
//!
//! let p = Point::new(5.0, 5.0);
//! assert_eq!(hover.on_pointer_enter(Region::Anchor, PointerType::Mouse, p, 0), None);
//! assert_eq!(hover.next_deadline(), Some(300));
//! assert_eq!(hover.poll(300), Some(HoverIntentEvent::Open));
//!
//! assert_eq!(hover.on_pointer_leave(Region::Anchor, Point::new(-5.0, 5.0), 400), None);
//! assert_eq!(hover.poll(500), Some(HoverIntentEvent::Close));
//! ```

use kurbo::{Point, Rect};

use crate::timer::{Millis, Timer, earliest};

/// Configuration for [`HoverIntent`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HoverIntentConfig {
    /// Delay between entering the anchor and opening.
    pub open_delay: Millis,
    /// Delay between leaving both regions and closing.
    pub close_delay: Millis,
    /// How long the pointer must be stationary before opening.
    pub rest_ms: Millis,
    /// Tolerate travel between anchor and floating element.
    pub enable_safe_polygon: bool,
}

/// Kind of pointer device.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerType {
    /// Mouse.
    Mouse,
    /// Pen or stylus.
    Pen,
    /// Touch.
    Touch,
}

/// Which hover region an event concerns.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    /// The anchor (trigger) element.
    Anchor,
    /// The floating element.
    Floating,
}

/// A committed state change.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HoverIntentEvent {
    /// The floating element should open.
    Open,
    /// The floating element should close.
    Close,
}

/// Hover-intent state machine.
#[derive(Clone, Debug, Default)]
pub struct HoverIntent {
    config: HoverIntentConfig,
    open: bool,
    open_timer: Timer,
    close_timer: Timer,
    /// Active safe-region monitor.
    safe_region: Option<Rect>,
    in_anchor: bool,
    in_floating: bool,
    last_move_at: Millis,
    anchor: Option<Rect>,
    floating: Option<Rect>,
}

impl HoverIntent {
    /// Create a closed hover-intent state machine.
    pub fn new(config: HoverIntentConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &HoverIntentConfig {
        &self.config
    }

    /// Replace the configuration. Pending timers keep their deadlines.
    pub fn set_config(&mut self, config: HoverIntentConfig) {
        self.config = config;
    }

    /// Supply the current bounds of the anchor and floating element.
    ///
    /// Only used for the safe-region test; pass `None` for an element that is
    /// not mounted.
    pub fn set_rects(&mut self, anchor: Option<Rect>, floating: Option<Rect>) {
        self.anchor = anchor;
        self.floating = floating;
    }

    /// Whether the floating element is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The safe region currently being monitored, if any.
    pub fn safe_region(&self) -> Option<Rect> {
        self.safe_region
    }

    /// The next time [`HoverIntent::poll`] has work to do.
    pub fn next_deadline(&self) -> Option<Millis> {
        earliest(self.open_timer.deadline(), self.close_timer.deadline())
    }

    /// Pointer entered the anchor or floating element.
    pub fn on_pointer_enter(
        &mut self,
        region: Region,
        pointer: PointerType,
        _position: Point,
        now: Millis,
    ) -> Option<HoverIntentEvent> {
        match region {
            Region::Anchor => self.in_anchor = true,
            Region::Floating => self.in_floating = true,
        }
        self.close_timer.cancel();
        self.safe_region = None;
        self.last_move_at = now;

        if region != Region::Anchor || self.open {
            return None;
        }
        if pointer == PointerType::Touch {
            self.open_timer.cancel();
            return self.commit(true);
        }
        self.open_timer.schedule(now, self.config.open_delay);
        self.try_open(now)
    }

    /// Pointer moved anywhere.
    pub fn on_pointer_move(&mut self, position: Point, now: Millis) -> Option<HoverIntentEvent> {
        self.last_move_at = now;
        let region = self.safe_region?;
        if region.contains(position) {
            return None;
        }
        tracing::trace!(?position, "pointer left safe region");
        self.safe_region = None;
        self.schedule_close(now)
    }

    /// Pointer left the anchor or floating element.
    pub fn on_pointer_leave(
        &mut self,
        region: Region,
        position: Point,
        now: Millis,
    ) -> Option<HoverIntentEvent> {
        match region {
            Region::Anchor => self.in_anchor = false,
            Region::Floating => self.in_floating = false,
        }
        if self.in_anchor || self.in_floating {
            return None;
        }
        self.open_timer.cancel();
        if !self.open {
            return None;
        }
        if self.config.enable_safe_polygon
            && let (Some(anchor), Some(floating)) = (self.anchor, self.floating)
        {
            let bounds = anchor.union(floating);
            if bounds.contains(position) {
                self.safe_region = Some(bounds);
                return None;
            }
        }
        self.schedule_close(now)
    }

    /// Commit any transition that has come due.
    pub fn poll(&mut self, now: Millis) -> Option<HoverIntentEvent> {
        self.try_open(now).or_else(|| self.try_close(now))
    }

    /// Open now, cancelling pending work. Returns `true` if the state changed.
    pub fn open(&mut self) -> bool {
        self.cancel_pending();
        self.commit(true).is_some()
    }

    /// Close now, cancelling pending work. Returns `true` if the state changed.
    pub fn close(&mut self) -> bool {
        self.cancel_pending();
        self.commit(false).is_some()
    }

    /// Cancel everything and return to the closed state (for unmount).
    pub fn reset(&mut self) {
        self.cancel_pending();
        self.open = false;
        self.in_anchor = false;
        self.in_floating = false;
    }

    fn cancel_pending(&mut self) {
        self.open_timer.cancel();
        self.close_timer.cancel();
        self.safe_region = None;
    }

    fn try_open(&mut self, now: Millis) -> Option<HoverIntentEvent> {
        if !self.open_timer.fire(now) {
            return None;
        }
        let rested = now.saturating_sub(self.last_move_at);
        if rested >= self.config.rest_ms {
            return self.commit(true);
        }
        // Not rested yet: try again once the remaining rest interval passes.
        self.open_timer.schedule(self.last_move_at, self.config.rest_ms);
        None
    }

    fn schedule_close(&mut self, now: Millis) -> Option<HoverIntentEvent> {
        self.close_timer.schedule(now, self.config.close_delay);
        self.try_close(now)
    }

    fn try_close(&mut self, now: Millis) -> Option<HoverIntentEvent> {
        if self.close_timer.fire(now) {
            self.commit(false)
        } else {
            None
        }
    }

    fn commit(&mut self, open: bool) -> Option<HoverIntentEvent> {
        if self.open == open {
            return None;
        }
        self.open = open;
        tracing::debug!(open, "hover intent committed");
        Some(if open {
            HoverIntentEvent::Open
        } else {
            HoverIntentEvent::Close
        })
    }
}
