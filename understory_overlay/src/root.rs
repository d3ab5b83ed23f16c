// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-root bundle of the overlay stacks.

use core::fmt;

use crate::dismiss::DismissableLayers;
use crate::trap::FocusTraps;

/// The overlay stacks of one application root (a window or document).
///
/// Layer and trap stacks are independent: a popover is usually a layer
/// without a trap, and a modal dialog is both.
#[derive(Debug)]
pub struct OverlayRoot<K> {
    /// Dismissable layers.
    pub layers: DismissableLayers<K>,
    /// Focus traps.
    pub traps: FocusTraps<K>,
}

impl<K> Default for OverlayRoot<K> {
    fn default() -> Self {
        Self {
            layers: DismissableLayers::default(),
            traps: FocusTraps::default(),
        }
    }
}

impl<K: Copy + Eq + fmt::Debug> OverlayRoot<K> {
    /// Create a root with empty stacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to the next frame; call once per host frame.
    pub fn tick(&mut self) {
        self.layers.tick();
    }

    /// Whether no overlay is active in either stack.
    pub fn is_at_rest(&self) -> bool {
        self.layers.is_empty() && self.traps.is_empty()
    }
}
