// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_overlay --heading-base-level=0

//! Understory Overlay: stacking coordination for menus, popovers, and dialogs.
//!
//! ## Overview
//!
//! Overlays nest. A menu opens a submenu; a dialog opens a confirmation. Two
//! global questions must then be answered consistently: which overlay closes
//! when the user presses Escape or clicks away, and which container keeps Tab
//! focus. This crate answers both with explicit, per-root stacks instead of
//! process-wide state:
//!
//! - [`DismissableLayers`](dismiss::DismissableLayers): only the top layer
//!   reacts to Escape, outside presses, and outside focus. Interceptors can
//!   veto a dismissal; a layer is dismissed at most once per frame.
//! - [`FocusTraps`](trap::FocusTraps): only the top trap contains focus.
//!   Deactivating it restores focus to the element focused before it.
//! - [`OverlayRoot`]: both stacks for one window or document.
//!
//! Entries may be deactivated in any order. Activation returns a must-use
//! handle that deactivation consumes.
//!
//! ## Host integration
//!
//! Nodes are identified by a caller-chosen copyable key `K`. The host answers
//! tree queries through [`ParentLookup`](tree::ParentLookup) and, for traps,
//! [`FocusHost`](trap::FocusHost). It forwards capture-phase key, pointer,
//! and focus events, and calls [`OverlayRoot::tick`] once per frame.
//!
//! ## Example
//!
//! A dialog with a confirmation on top of it:
//!
//! ```rust
//! use understory_event_state::keys::Key;
//! use understory_overlay::OverlayRoot;
//! use understory_overlay::dismiss::DismissReason;
//!
//! // 1 is the root; 10 is the dialog; 20 is the confirmation.
//! let parent = |n: &u32| (*n != 1).then_some(1);
//!
//! let mut root = OverlayRoot::new();
//! let dialog = root.layers.activate(10_u32, |_: DismissReason| {});
//! let confirm = root.layers.activate(20, |_: DismissReason| {});
//!
//! // A press inside the confirmation dismisses nothing.
//! assert!(root.layers.on_pointer_down(Some(20), &parent).is_none());
//!
//! // Escape closes the confirmation first.
//! let first = root.layers.on_key_down(&Key::Escape).unwrap();
//! assert_eq!(first.layer, confirm.id());
//! root.layers.deactivate(confirm);
//! root.tick();
//!
//! // Then the dialog.
//! let second = root.layers.on_key_down(&Key::Escape).unwrap();
//! assert_eq!(second.layer, dialog.id());
//! root.layers.deactivate(dialog);
//! assert!(root.is_at_rest());
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support in dependencies.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point math.
//! - `serde`: derives `Serialize`/`Deserialize` on reasons, edges, and trap options.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod dismiss;
mod root;
mod stack;
pub mod trap;
pub mod tree;

pub use root::OverlayRoot;
pub use stack::Stack;
