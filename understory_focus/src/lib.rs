// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_focus --heading-base-level=0

//! Understory Focus: keyboard focus primitives for composite widgets.
//!
//! This crate models keyboard focus inside composite widgets (menus, toolbars,
//! radio groups, tab lists) as a combination of:
//! - **Navigation intents** ([`Navigation`]) derived from keys, gated by the
//!   widget's [`Orientation`] and reading [`Direction`].
//! - A **roving tabindex controller** ([`RovingFocus`]) that keeps exactly one
//!   enabled item tabbable and moves focus between registered items.
//! - A **focusability predicate** ([`focusable::is_focusable`]) describing which
//!   elements take part in Tab navigation; focus traps use it to find the
//!   first and last focusable descendants of a container.
//!
//! ## Minimal example
//!
//! Turning keys into navigation intents for a vertical menu:
//!
//! ```rust
//! use understory_event_state::keys::Key;
//! use understory_focus::{Direction, Navigation, Orientation};
//!
//! let nav = |key| Navigation::from_key(&key, Orientation::Vertical, Direction::Ltr);
//!
//! assert_eq!(nav(Key::ArrowDown), Some(Navigation::Next));
//! assert_eq!(nav(Key::Home), Some(Navigation::First));
//! // Horizontal arrows do nothing in a vertical menu.
//! assert_eq!(nav(Key::ArrowRight), None);
//! ```
//!
//! Item identifiers are generic, so callers can use any small, copyable
//! handle (an element id, a slot index, or an application-specific key).
//!
//! ## Features
//!
//! - `std` (default): enables `std` support in dependencies.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point math.
//! - `serde`: derives `Serialize`/`Deserialize` on [`RovingConfig`] and its parts.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use understory_event_state::keys::Key;

pub mod focusable;
pub mod roving;

pub use roving::{RovingConfig, RovingFocus, RovingItem};

/// Which arrow keys a composite widget responds to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Orientation {
    /// Up and Down only.
    Vertical,
    /// Left and Right only.
    Horizontal,
    /// All four arrows.
    #[default]
    Both,
}

impl Orientation {
    const fn allows_vertical(self) -> bool {
        matches!(self, Self::Vertical | Self::Both)
    }

    const fn allows_horizontal(self) -> bool {
        matches!(self, Self::Horizontal | Self::Both)
    }
}

/// Reading direction of the surrounding content.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    /// Left to right: ArrowRight moves forward.
    #[default]
    Ltr,
    /// Right to left: ArrowLeft moves forward.
    Rtl,
}

/// Focus navigation intent within a composite widget.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Navigation {
    /// Jump to the first enabled item (Home).
    First,
    /// Jump to the last enabled item (End).
    Last,
    /// Move forward in item order.
    Next,
    /// Move backward in item order.
    Prev,
}

impl Navigation {
    /// Interpret a key for a widget with the given orientation and direction.
    ///
    /// Home and End are honored in every orientation; arrows only on the
    /// axes the orientation allows.
    pub fn from_key(key: &Key, orientation: Orientation, direction: Direction) -> Option<Self> {
        match key {
            Key::Home => Some(Self::First),
            Key::End => Some(Self::Last),
            Key::ArrowUp if orientation.allows_vertical() => Some(Self::Prev),
            Key::ArrowDown if orientation.allows_vertical() => Some(Self::Next),
            Key::ArrowLeft if orientation.allows_horizontal() => Some(match direction {
                Direction::Ltr => Self::Prev,
                Direction::Rtl => Self::Next,
            }),
            Key::ArrowRight if orientation.allows_horizontal() => Some(match direction {
                Direction::Ltr => Self::Next,
                Direction::Rtl => Self::Prev,
            }),
            _ => None,
        }
    }
}
