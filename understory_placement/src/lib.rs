// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_placement --heading-base-level=0

//! Understory Placement: anchor-relative positioning for floating UI elements.
//!
//! Menus, popovers, and tooltips all need the same geometry: put a floating
//! rectangle next to an anchor rectangle, keep it on screen, and point an
//! optional arrow back at the anchor. This crate provides that as:
//!
//! - [`Placement`]: one of twelve side/alignment combinations, written as a
//!   compound token such as `bottom-start`.
//! - [`compute_position`]: a pure function of anchor rect, floating size,
//!   [`Viewport`], and [`PositionOptions`] that applies flip and shift.
//! - [`Positioner`]: a small stateful wrapper the host feeds with element
//!   registrations, resizes, scrolls, and option changes. It only reports a
//!   new [`Position`] when the result actually changes.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use understory_placement::{Placement, PositionOptions, Viewport, compute_position};
//!
//! let anchor = Rect::new(100.0, 760.0, 150.0, 790.0);
//! let viewport = Viewport::new(Size::new(1024.0, 800.0));
//! let options = PositionOptions {
//!     placement: Placement::BOTTOM_START,
//!     ..PositionOptions::default()
//! };
//!
//! // Not enough room below the anchor, so the element flips above it.
//! let pos = compute_position(anchor, Size::new(80.0, 30.0), &viewport, &options);
//! assert_eq!(pos.placement, Placement::TOP_START);
//! assert_eq!((pos.x, pos.y), (100.0, 730.0));
//! ```
//!
//! The crate does not render or animate. Hosts apply `x`, `y`, and
//! [`Strategy::as_css`] to whatever styling system they use.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point math.
//! - `serde`: derives `Serialize`/`Deserialize` for placement tokens and options.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod compute;
mod placement;
mod positioner;

pub use compute::{ArrowOffset, Position, PositionOptions, Strategy, Viewport, compute_position};
pub use placement::{Align, ParsePlacementError, Placement, Side};
pub use positioner::Positioner;
