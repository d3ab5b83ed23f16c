// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dismissable layers: which active overlay closes on Escape or outside interaction.
//!
//! The host forwards capture-phase events to [`DismissableLayers`]. Only the
//! top layer of the stack reacts; lower layers stay inert until every layer
//! above them has been deactivated.
//!
//! ## Triggers
//!
//! - [`on_key_down`](DismissableLayers::on_key_down): Escape dismisses the top layer.
//! - [`on_pointer_down`](DismissableLayers::on_pointer_down): a press outside
//!   the top layer's container and branches dismisses it. The same gesture
//!   usually moves focus too, so a successful outside press suppresses
//!   focus-outside dismissal until the next [`tick`](DismissableLayers::tick).
//! - [`on_focus_in`](DismissableLayers::on_focus_in): focus landing outside
//!   the top layer dismisses it, unless suppressed.
//!
//! Each trigger first runs the matching interceptor on the layer's
//! [`DismissHandler`]; calling [`DismissEvent::prevent_default`] there vetoes
//! the dismissal. A layer is dismissed at most once per tick.
//!
//! ## Example
//!
//! ```rust
//! use understory_event_state::keys::Key;
//! use understory_overlay::dismiss::{DismissReason, DismissableLayers};
//!
//! // Element tree: 1 is the root; 2 (a menu) and 3 (a page button) are children.
//! let parent = |n: &u32| (*n != 1).then_some(1);
//!
//! let mut layers = DismissableLayers::new();
//! let menu = layers.activate(2_u32, |reason: DismissReason| {
//!     assert_eq!(reason, DismissReason::PointerDownOutside);
//! });
//!
//! // Pressing inside the menu does nothing.
//! assert!(layers.on_pointer_down(Some(2), &parent).is_none());
//! // Pressing the page button dismisses it.
//! let dismissal = layers.on_pointer_down(Some(3), &parent).unwrap();
//! assert_eq!(dismissal.layer, menu.id());
//!
//! // The host reacts by closing the menu.
//! layers.deactivate(menu);
//! assert!(layers.is_empty());
//! assert!(layers.on_key_down(&Key::Escape).is_none());
//! ```

use alloc::boxed::Box;
use core::fmt;

use hashbrown::HashMap;
use smallvec::SmallVec;
use understory_event_state::keys::Key;

use crate::Stack;
use crate::tree::{ParentLookup, contains};

/// Identifier of an active layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(u64);

/// Token for an active layer; pass it to [`DismissableLayers::deactivate`].
#[must_use = "a layer stays active until its handle is deactivated"]
#[derive(Debug, PartialEq, Eq)]
pub struct LayerHandle {
    id: LayerId,
}

impl LayerHandle {
    /// The identifier of the layer this handle controls.
    pub fn id(&self) -> LayerId {
        self.id
    }
}

/// Why a layer was dismissed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum DismissReason {
    /// Escape was pressed.
    EscapeKey,
    /// A pointer was pressed outside the layer.
    PointerDownOutside,
    /// Focus moved outside the layer.
    FocusOutside,
}

impl DismissReason {
    /// The kebab-case name of the reason.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EscapeKey => "escape-key",
            Self::PointerDownOutside => "pointer-down-outside",
            Self::FocusOutside => "focus-outside",
        }
    }
}

impl fmt::Display for DismissReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pending dismissal, shown to interceptors before it takes effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DismissEvent<K> {
    /// Why the layer is about to be dismissed.
    pub reason: DismissReason,
    /// The event target; `None` for Escape and for presses without a target.
    pub target: Option<K>,
    default_prevented: bool,
}

impl<K> DismissEvent<K> {
    fn new(reason: DismissReason, target: Option<K>) -> Self {
        Self {
            reason,
            target,
            default_prevented: false,
        }
    }

    /// Veto the dismissal.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether an interceptor vetoed the dismissal.
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Callbacks of a dismissable layer.
///
/// The interceptors run before a dismissal and may veto it; they do nothing
/// by default. Any `FnMut(DismissReason)` closure is a handler without
/// interceptors.
pub trait DismissHandler<K> {
    /// Escape was pressed while the layer is top.
    fn on_escape_key_down(&mut self, event: &mut DismissEvent<K>) {
        let _ = event;
    }

    /// A pointer was pressed outside the layer while it is top.
    fn on_pointer_down_outside(&mut self, event: &mut DismissEvent<K>) {
        let _ = event;
    }

    /// Focus moved outside the layer while it is top.
    fn on_focus_outside(&mut self, event: &mut DismissEvent<K>) {
        let _ = event;
    }

    /// The layer was dismissed. The host usually responds by deactivating it.
    fn on_dismiss(&mut self, event: &DismissEvent<K>);
}

impl<K, F> DismissHandler<K> for F
where
    F: FnMut(DismissReason),
{
    fn on_dismiss(&mut self, event: &DismissEvent<K>) {
        self(event.reason);
    }
}

/// Outcome of a trigger that dismissed a layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Dismissal {
    /// The dismissed layer.
    pub layer: LayerId,
    /// Why it was dismissed.
    pub reason: DismissReason,
}

struct Layer<K> {
    container: K,
    branches: SmallVec<[K; 2]>,
    handler: Box<dyn DismissHandler<K>>,
    dismissed_at: Option<u64>,
}

impl<K: Copy + Eq> Layer<K> {
    fn is_inside(&self, target: &K, lookup: &impl ParentLookup<K>) -> bool {
        contains(lookup, &self.container, target)
            || self.branches.iter().any(|b| contains(lookup, b, target))
    }
}

/// Stack of active dismissable layers for one application root.
pub struct DismissableLayers<K> {
    stack: Stack<LayerId>,
    layers: HashMap<LayerId, Layer<K>>,
    next_id: u64,
    frame: u64,
    suppress_focus_outside: bool,
}

impl<K> fmt::Debug for DismissableLayers<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DismissableLayers")
            .field("stack", &self.stack)
            .field("frame", &self.frame)
            .field("suppress_focus_outside", &self.suppress_focus_outside)
            .finish_non_exhaustive()
    }
}

impl<K> Default for DismissableLayers<K> {
    fn default() -> Self {
        Self {
            stack: Stack::new(),
            layers: HashMap::new(),
            next_id: 0,
            frame: 0,
            suppress_focus_outside: false,
        }
    }
}

impl<K: Copy + Eq + fmt::Debug> DismissableLayers<K> {
    /// Create an empty layer stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate a layer rooted at `container`; it becomes the top layer.
    pub fn activate(
        &mut self,
        container: K,
        handler: impl DismissHandler<K> + 'static,
    ) -> LayerHandle {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        self.layers.insert(
            id,
            Layer {
                container,
                branches: SmallVec::new(),
                handler: Box::new(handler),
                dismissed_at: None,
            },
        );
        self.stack.push(id);
        tracing::debug!(?id, ?container, depth = self.stack.len(), "layer activated");
        LayerHandle { id }
    }

    /// Deactivate a layer, wherever it sits in the stack.
    pub fn deactivate(&mut self, handle: LayerHandle) {
        self.deactivate_id(handle.id);
    }

    /// Deactivate a layer by id, for owners that no longer hold its handle.
    ///
    /// Returns `false` if the layer was not active.
    pub fn deactivate_id(&mut self, id: LayerId) -> bool {
        self.stack.remove(id);
        if self.layers.remove(&id).is_none() {
            return false;
        }
        tracing::debug!(?id, depth = self.stack.len(), "layer deactivated");
        true
    }

    /// Treat `node` and its descendants as inside the layer.
    ///
    /// Typical branches are the trigger button and portaled sub-content.
    pub fn add_branch(&mut self, handle: &LayerHandle, node: K) {
        if let Some(layer) = self.layers.get_mut(&handle.id)
            && !layer.branches.contains(&node)
        {
            layer.branches.push(node);
        }
    }

    /// Whether `handle`'s layer is the top layer.
    pub fn is_top(&self, handle: &LayerHandle) -> bool {
        self.stack.is_top(handle.id)
    }

    /// The top layer.
    pub fn top(&self) -> Option<LayerId> {
        self.stack.top()
    }

    /// Number of active layers.
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Whether no layer is active.
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Advance to the next frame.
    ///
    /// Clears the focus-outside suppression and opens a new dismissal window
    /// for every layer.
    pub fn tick(&mut self) {
        self.frame += 1;
        self.suppress_focus_outside = false;
    }

    /// Forward a capture-phase key down.
    pub fn on_key_down(&mut self, key: &Key) -> Option<Dismissal> {
        if *key != Key::Escape {
            return None;
        }
        let top = self.stack.top()?;
        self.dismiss(top, DismissEvent::new(DismissReason::EscapeKey, None))
    }

    /// Forward a capture-phase pointer down; `None` targets count as outside.
    pub fn on_pointer_down(
        &mut self,
        target: Option<K>,
        lookup: &impl ParentLookup<K>,
    ) -> Option<Dismissal> {
        let top = self.stack.top()?;
        let layer = self.layers.get(&top)?;
        if target.is_some_and(|t| layer.is_inside(&t, lookup)) {
            return None;
        }
        let mut event = DismissEvent::new(DismissReason::PointerDownOutside, target);
        if intercept(top, self.layers.get_mut(&top)?, &mut event) {
            return None;
        }
        self.suppress_focus_outside = true;
        self.commit(top, &event)
    }

    /// Forward a capture-phase focus change to `target`.
    pub fn on_focus_in(&mut self, target: K, lookup: &impl ParentLookup<K>) -> Option<Dismissal> {
        if self.suppress_focus_outside {
            tracing::trace!(?target, "focus-outside suppressed");
            return None;
        }
        let top = self.stack.top()?;
        if self.layers.get(&top)?.is_inside(&target, lookup) {
            return None;
        }
        self.dismiss(top, DismissEvent::new(DismissReason::FocusOutside, Some(target)))
    }

    fn dismiss(&mut self, id: LayerId, mut event: DismissEvent<K>) -> Option<Dismissal> {
        if intercept(id, self.layers.get_mut(&id)?, &mut event) {
            return None;
        }
        self.commit(id, &event)
    }

    fn commit(&mut self, id: LayerId, event: &DismissEvent<K>) -> Option<Dismissal> {
        let frame = self.frame;
        let layer = self.layers.get_mut(&id)?;
        if layer.dismissed_at == Some(frame) {
            tracing::trace!(layer = ?id, reason = %event.reason, "already dismissed this frame");
            return None;
        }
        layer.dismissed_at = Some(frame);
        tracing::debug!(layer = ?id, reason = %event.reason, "layer dismissed");
        layer.handler.on_dismiss(event);
        Some(Dismissal {
            layer: id,
            reason: event.reason,
        })
    }
}

/// Run the interceptor matching `event.reason`; `true` if it vetoed.
fn intercept<K>(id: LayerId, layer: &mut Layer<K>, event: &mut DismissEvent<K>) -> bool {
    match event.reason {
        DismissReason::EscapeKey => layer.handler.on_escape_key_down(event),
        DismissReason::PointerDownOutside => layer.handler.on_pointer_down_outside(event),
        DismissReason::FocusOutside => layer.handler.on_focus_outside(event),
    }
    if event.is_default_prevented() {
        tracing::debug!(layer = ?id, reason = %event.reason, "dismissal vetoed");
        return true;
    }
    false
}
