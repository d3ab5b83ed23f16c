// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_event_state --heading-base-level=0

//! Understory Event State: timed state machines for UI interactions.
//!
//! This crate provides small, focused state machines for interactions whose
//! outcome depends on *when* events arrive, not just which events arrive:
//!
//! - [`typeahead`]: Build a search string from quick successive key presses and
//!   match it against item labels
//! - [`hover_intent`]: Decide when a hover-triggered overlay opens and closes,
//!   with open/close delays, a rest requirement, and a safe region between the
//!   anchor and the floating element
//! - [`timer`]: The cancellable scheduled transition both of them are built on
//! - [`keys`]: The small keyboard vocabulary shared with keyboard-driven crates
//!
//! ## Time
//!
//! Nothing here reads a clock. Every method that depends on time takes a
//! `now` timestamp in milliseconds from a monotonic origin of the caller's
//! choosing, and each state machine exposes a `next_deadline` so the host knows
//! when to call `poll` again. Tests drive time by passing numbers.
//!
//! ## Usage Patterns
//!
//! ### Typeahead
//!
//! ```rust
//! use understory_event_state::keys::{Key, Modifiers};
//! use understory_event_state::typeahead::{Typeahead, TypeaheadCandidate};
//!
//! let items = [
//!     TypeaheadCandidate::new("apple", "Apple"),
//!     TypeaheadCandidate::new("cherry", "Cherry"),
//!     TypeaheadCandidate::new("chive", "Chive"),
//! ];
//! let mut typeahead = Typeahead::default();
//!
//! let m = typeahead.handle_key(&Key::char('c'), Modifiers::empty(), 0, &items, None);
//! assert_eq!(m, Some("cherry"));
//! let m = typeahead.handle_key(&Key::char('h'), Modifiers::empty(), 50, &items, m.as_ref());
//! let m = typeahead.handle_key(&Key::char('i'), Modifiers::empty(), 90, &items, m.as_ref());
//! assert_eq!(m, Some("chive"));
//! ```
//!
//! ### Hover intent
//!
//! ```rust
//! use kurbo::Point;
//! use understory_event_state::hover_intent::{
//!     HoverIntent, HoverIntentConfig, HoverIntentEvent, PointerType, Region,
//! };
//!
//! let mut hover = HoverIntent::new(HoverIntentConfig {
//!     open_delay: 200,
//!     ..HoverIntentConfig::default()
//! });
//! hover.on_pointer_enter(Region::Anchor, PointerType::Mouse, Point::ZERO, 0);
//! assert_eq!(hover.poll(hover.next_deadline().unwrap()), Some(HoverIntentEvent::Open));
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point math.
//! - `serde`: derives `Serialize`/`Deserialize` on the configuration records.
//!
//! This crate is `no_std` compatible (with `alloc`) for all modules.

#![no_std]

extern crate alloc;

pub mod hover_intent;
pub mod keys;
pub mod timer;
pub mod typeahead;
