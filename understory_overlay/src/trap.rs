// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus traps: keep Tab navigation inside the top modal container.
//!
//! A trap records the element focused before it activated, moves focus into
//! its container, and keeps it there while it is the top trap. Deactivating
//! the top trap restores focus to the recorded element.
//!
//! The host brackets each container with two always-tabbable sentinel nodes
//! and reports focus on them via [`FocusTraps::on_sentinel_focus`]. Hosts
//! that can intercept Tab directly may use [`FocusTraps::on_tab_key`]
//! instead. Focus landing elsewhere goes to [`FocusTraps::on_focus_in`];
//! sentinel focus must not be reported there.

use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use understory_focus::focusable::{FocusableProps, is_focusable};

use crate::Stack;
use crate::tree::{ParentLookup, contains};

/// Failure of a platform call made on behalf of the engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// The element is no longer in the document.
    #[error("element is detached from the document")]
    Detached,
    /// The element cannot take focus.
    #[error("element refused focus")]
    Refused,
    /// Any other platform failure.
    #[error("platform call failed: {0}")]
    Platform(&'static str),
}

/// Element queries and focus control supplied by the host.
pub trait FocusHost<K>: ParentLookup<K> {
    /// The currently focused element.
    fn active_element(&self) -> Option<K>;

    /// Whether `node` is still attached to the document.
    fn is_attached(&self, node: &K) -> bool;

    /// Descendants of `container` in document order, excluding `container`.
    fn descendants(&self, container: &K) -> Vec<K>;

    /// Focusability-relevant properties of `node`.
    fn focusable_props(&self, node: &K) -> FocusableProps;

    /// Move focus to `node`.
    fn focus(&mut self, node: &K) -> Result<(), HostError>;
}

/// Options for [`FocusTraps::activate`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrapOptions<K> {
    /// Element to focus first; ignored unless inside the container.
    pub initial_focus: Option<K>,
    /// Refocus the previously focused element on deactivation.
    pub restore_focus: bool,
}

impl<K> Default for TrapOptions<K> {
    fn default() -> Self {
        Self {
            initial_focus: None,
            restore_focus: true,
        }
    }
}

/// Which sentinel received focus.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Edge {
    /// The sentinel before the container; reached with Shift+Tab.
    Start,
    /// The sentinel after the container; reached with Tab.
    End,
}

/// Identifier of an active trap.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrapId(u64);

/// Token for an active trap; pass it to [`FocusTraps::deactivate`].
#[must_use = "a trap stays active until its handle is deactivated"]
#[derive(Debug, PartialEq, Eq)]
pub struct TrapHandle {
    id: TrapId,
}

impl TrapHandle {
    /// The identifier of the trap this handle controls.
    pub fn id(&self) -> TrapId {
        self.id
    }
}

#[derive(Debug)]
struct Trap<K> {
    container: K,
    previous: Option<K>,
    restore_focus: bool,
    last_focused: Option<K>,
}

/// Stack of active focus traps for one application root.
#[derive(Debug)]
pub struct FocusTraps<K> {
    stack: Stack<TrapId>,
    traps: HashMap<TrapId, Trap<K>>,
    next_id: u64,
}

impl<K> Default for FocusTraps<K> {
    fn default() -> Self {
        Self {
            stack: Stack::new(),
            traps: HashMap::new(),
            next_id: 0,
        }
    }
}

impl<K: Copy + Eq + fmt::Debug> FocusTraps<K> {
    /// Create an empty trap stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate a trap on `container` and move focus into it.
    ///
    /// Focus goes to `options.initial_focus` when it is an attached element
    /// inside the container, else to the first focusable descendant, else to
    /// the container itself.
    pub fn activate(
        &mut self,
        container: K,
        options: TrapOptions<K>,
        host: &mut impl FocusHost<K>,
    ) -> TrapHandle {
        let previous = host.active_element();
        let id = TrapId(self.next_id);
        self.next_id += 1;
        self.stack.push(id);

        let target = options
            .initial_focus
            .filter(|node| host.is_attached(node) && contains(&*host, &container, node))
            .or_else(|| focusables(&*host, &container).first().copied())
            .unwrap_or(container);
        tracing::debug!(?id, ?container, ?previous, ?target, "trap activated");
        focus(host, target);

        self.traps.insert(
            id,
            Trap {
                container,
                previous,
                restore_focus: options.restore_focus,
                last_focused: Some(target),
            },
        );
        TrapHandle { id }
    }

    /// Deactivate a trap, wherever it sits in the stack.
    ///
    /// Focus is restored only when the trap was on top, restoration is
    /// enabled, and the recorded element is still attached.
    pub fn deactivate(&mut self, handle: TrapHandle, host: &mut impl FocusHost<K>) {
        self.deactivate_id(handle.id, host);
    }

    /// Deactivate a trap by id, for owners that no longer hold its handle.
    ///
    /// Restores focus like [`deactivate`](Self::deactivate). Returns `false`
    /// if the trap was not active.
    pub fn deactivate_id(&mut self, id: TrapId, host: &mut impl FocusHost<K>) -> bool {
        let was_top = self.stack.is_top(id);
        self.stack.remove(id);
        let Some(trap) = self.traps.remove(&id) else {
            return false;
        };
        tracing::debug!(?id, was_top, depth = self.stack.len(), "trap deactivated");
        if !(was_top && trap.restore_focus) {
            return true;
        }
        match trap.previous {
            Some(previous) if host.is_attached(&previous) => {
                tracing::debug!(?id, ?previous, "restoring focus");
                focus(host, previous);
            }
            Some(previous) => tracing::trace!(?id, ?previous, "previous element detached"),
            None => {}
        }
        true
    }

    /// Whether `handle`'s trap is the top trap.
    pub fn is_top(&self, handle: &TrapHandle) -> bool {
        self.stack.is_top(handle.id)
    }

    /// The top trap.
    pub fn top(&self) -> Option<TrapId> {
        self.stack.top()
    }

    /// Number of active traps.
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Whether no trap is active.
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// A sentinel of `handle`'s trap received focus.
    ///
    /// If the trap is on top, focus wraps to the opposite end of its
    /// focusable set and this returns `true`. Other traps ignore sentinels.
    pub fn on_sentinel_focus(
        &mut self,
        handle: &TrapHandle,
        edge: Edge,
        host: &mut impl FocusHost<K>,
    ) -> bool {
        if !self.stack.is_top(handle.id) {
            return false;
        }
        let Some(trap) = self.traps.get_mut(&handle.id) else {
            return false;
        };
        let list = focusables(&*host, &trap.container);
        let target = match edge {
            Edge::Start => list.last(),
            Edge::End => list.first(),
        }
        .copied()
        .unwrap_or(trap.container);
        tracing::trace!(id = ?handle.id, ?edge, ?target, "sentinel redirect");
        trap.last_focused = Some(target);
        focus(host, target);
        true
    }

    /// Tab was pressed; `shift` for Shift+Tab.
    ///
    /// Wraps from the last focusable to the first (or the reverse) in the
    /// top trap. Returns `true` when the host must prevent the default
    /// action.
    pub fn on_tab_key(&mut self, shift: bool, host: &mut impl FocusHost<K>) -> bool {
        let Some(trap) = self.stack.top().and_then(|id| self.traps.get_mut(&id)) else {
            return false;
        };
        let list = focusables(&*host, &trap.container);
        let (Some(&first), Some(&last)) = (list.first(), list.last()) else {
            // Nothing to tab to; keep focus on the container.
            focus(host, trap.container);
            return true;
        };
        let active = host.active_element();
        let target = match active {
            Some(a) if !contains(&*host, &trap.container, &a) => {
                if shift {
                    last
                } else {
                    first
                }
            }
            Some(a) if shift && (a == first || a == trap.container) => last,
            Some(a) if !shift && a == last => first,
            None => {
                if shift {
                    last
                } else {
                    first
                }
            }
            _ => return false,
        };
        trap.last_focused = Some(target);
        focus(host, target);
        true
    }

    /// Focus moved to `target`.
    ///
    /// Inside the top trap's container this records `target` and returns
    /// `false`. Outside it, focus is sent back to the last element focused
    /// inside the trap (or its first focusable, or the container) and this
    /// returns `true`.
    pub fn on_focus_in(&mut self, target: K, host: &mut impl FocusHost<K>) -> bool {
        let Some(trap) = self.stack.top().and_then(|id| self.traps.get_mut(&id)) else {
            return false;
        };
        if contains(&*host, &trap.container, &target) {
            trap.last_focused = Some(target);
            return false;
        }
        let back = trap
            .last_focused
            .filter(|node| host.is_attached(node) && contains(&*host, &trap.container, node))
            .or_else(|| focusables(&*host, &trap.container).first().copied())
            .unwrap_or(trap.container);
        tracing::trace!(?target, ?back, "focus escaped trap");
        trap.last_focused = Some(back);
        focus(host, back);
        true
    }
}

/// Focusable descendants of `container` in document order.
fn focusables<K>(host: &impl FocusHost<K>, container: &K) -> Vec<K> {
    host.descendants(container)
        .into_iter()
        .filter(|node| is_focusable(&host.focusable_props(node)))
        .collect()
}

fn focus<K: fmt::Debug>(host: &mut impl FocusHost<K>, node: K) {
    if let Err(err) = host.focus(&node) {
        tracing::warn!(?node, %err, "focus failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use hashbrown::HashSet;
    use understory_focus::focusable::ElementKind;

    /// A small document:
    ///
    /// ```text
    /// 1 body
    /// ├── 2 opener button
    /// ├── 10 dialog
    /// │   ├── 11 button
    /// │   ├── 12 disabled button
    /// │   ├── 13 input
    /// │   └── 14 link without href
    /// ├── 20 nested dialog
    /// │   ├── 21 button
    /// │   └── 22 button
    /// └── 30 empty panel
    ///     └── 31 plain text
    /// ```
    struct Doc {
        nodes: Vec<(u32, Option<u32>, FocusableProps)>,
        detached: HashSet<u32>,
        refuse: HashSet<u32>,
        active: Option<u32>,
        focused: Vec<u32>,
    }

    impl Doc {
        fn new() -> Self {
            let button = FocusableProps::new(ElementKind::Button);
            let plain = FocusableProps::default();
            let nodes = vec![
                (1, None, plain),
                (2, Some(1), button),
                (10, Some(1), plain),
                (11, Some(10), button),
                (12, Some(10), button.disabled()),
                (13, Some(10), FocusableProps::new(ElementKind::Input { hidden_type: false })),
                (14, Some(10), FocusableProps::new(ElementKind::Link { has_href: false })),
                (20, Some(1), plain),
                (21, Some(20), button),
                (22, Some(20), button),
                (30, Some(1), plain),
                (31, Some(30), plain),
            ];
            Self {
                nodes,
                detached: HashSet::new(),
                refuse: HashSet::new(),
                active: Some(2),
                focused: Vec::new(),
            }
        }
    }

    impl ParentLookup<u32> for Doc {
        fn parent_of(&self, node: &u32) -> Option<u32> {
            self.nodes.iter().find(|(n, ..)| n == node).and_then(|(_, p, _)| *p)
        }
    }

    impl FocusHost<u32> for Doc {
        fn active_element(&self) -> Option<u32> {
            self.active
        }

        fn is_attached(&self, node: &u32) -> bool {
            !self.detached.contains(node) && self.nodes.iter().any(|(n, ..)| n == node)
        }

        fn descendants(&self, container: &u32) -> Vec<u32> {
            self.nodes
                .iter()
                .map(|(n, ..)| *n)
                .filter(|n| n != container && contains(self, container, n))
                .collect()
        }

        fn focusable_props(&self, node: &u32) -> FocusableProps {
            self.nodes
                .iter()
                .find(|(n, ..)| n == node)
                .map(|(_, _, props)| *props)
                .unwrap_or_default()
        }

        fn focus(&mut self, node: &u32) -> Result<(), HostError> {
            if self.refuse.contains(node) {
                return Err(HostError::Refused);
            }
            if !self.is_attached(node) {
                return Err(HostError::Detached);
            }
            self.active = Some(*node);
            self.focused.push(*node);
            Ok(())
        }
    }

    #[test]
    fn activation_focuses_first_focusable() {
        let mut doc = Doc::new();
        let mut traps = FocusTraps::new();
        let _trap = traps.activate(10, TrapOptions::default(), &mut doc);
        assert_eq!(doc.active, Some(11));
        assert_eq!(traps.len(), 1);
    }

    #[test]
    fn initial_focus_must_be_inside_container() {
        let mut doc = Doc::new();
        let mut traps = FocusTraps::new();
        let options = TrapOptions {
            initial_focus: Some(13),
            ..TrapOptions::default()
        };
        let trap = traps.activate(10, options, &mut doc);
        assert_eq!(doc.active, Some(13));
        traps.deactivate(trap, &mut doc);

        let options = TrapOptions {
            initial_focus: Some(21),
            ..TrapOptions::default()
        };
        let _trap = traps.activate(10, options, &mut doc);
        assert_eq!(doc.active, Some(11));
    }

    #[test]
    fn container_takes_focus_without_focusables() {
        let mut doc = Doc::new();
        let mut traps = FocusTraps::new();
        let trap = traps.activate(30, TrapOptions::default(), &mut doc);
        assert_eq!(doc.active, Some(30));
        assert!(traps.on_sentinel_focus(&trap, Edge::End, &mut doc));
        assert_eq!(doc.active, Some(30));
    }

    #[test]
    fn sentinels_wrap_around() {
        let mut doc = Doc::new();
        let mut traps = FocusTraps::new();
        let trap = traps.activate(10, TrapOptions::default(), &mut doc);

        // Tabbing past the last focusable (13) reaches the end sentinel.
        assert!(traps.on_sentinel_focus(&trap, Edge::End, &mut doc));
        assert_eq!(doc.active, Some(11));
        assert!(traps.on_sentinel_focus(&trap, Edge::Start, &mut doc));
        assert_eq!(doc.active, Some(13));
    }

    #[test]
    fn deactivation_restores_previous_focus() {
        let mut doc = Doc::new();
        let mut traps = FocusTraps::new();
        let trap = traps.activate(10, TrapOptions::default(), &mut doc);
        traps.deactivate(trap, &mut doc);
        assert_eq!(doc.active, Some(2));
        assert!(traps.is_empty());
    }

    #[test]
    fn restore_skips_detached_or_disabled() {
        let mut doc = Doc::new();
        let mut traps = FocusTraps::new();
        let trap = traps.activate(10, TrapOptions::default(), &mut doc);
        doc.detached.insert(2);
        traps.deactivate(trap, &mut doc);
        assert_eq!(doc.active, Some(11));
        assert_eq!(doc.focused, [11]);

        let mut doc = Doc::new();
        let options = TrapOptions {
            restore_focus: false,
            ..TrapOptions::default()
        };
        let trap = traps.activate(10, options, &mut doc);
        traps.deactivate(trap, &mut doc);
        assert_eq!(doc.active, Some(11));
    }

    #[test]
    fn nested_trap_takes_precedence() {
        let mut doc = Doc::new();
        let mut traps = FocusTraps::new();
        let outer = traps.activate(10, TrapOptions::default(), &mut doc);
        let inner = traps.activate(20, TrapOptions::default(), &mut doc);
        assert_eq!(doc.active, Some(21));
        assert!(traps.is_top(&inner));

        // The covered trap ignores its sentinels.
        assert!(!traps.on_sentinel_focus(&outer, Edge::End, &mut doc));
        assert_eq!(doc.active, Some(21));
        assert!(traps.on_sentinel_focus(&inner, Edge::Start, &mut doc));
        assert_eq!(doc.active, Some(22));

        // Closing the submodal restores the outer dialog's element.
        traps.deactivate(inner, &mut doc);
        assert_eq!(doc.active, Some(11));
        assert!(traps.on_sentinel_focus(&outer, Edge::Start, &mut doc));
        assert_eq!(doc.active, Some(13));
    }

    #[test]
    fn non_top_deactivation_does_not_restore() {
        let mut doc = Doc::new();
        let mut traps = FocusTraps::new();
        let outer = traps.activate(10, TrapOptions::default(), &mut doc);
        let inner = traps.activate(20, TrapOptions::default(), &mut doc);
        traps.deactivate(outer, &mut doc);
        assert_eq!(doc.active, Some(21));
        assert!(traps.is_top(&inner));
    }

    #[test]
    fn lost_handle_can_be_released_by_id() {
        let mut doc = Doc::new();
        let mut traps = FocusTraps::new();
        let outer = traps.activate(10, TrapOptions::default(), &mut doc);
        let inner_id = {
            let inner = traps.activate(20, TrapOptions::default(), &mut doc);
            inner.id()
        };
        assert_eq!(doc.active, Some(21));

        assert!(traps.deactivate_id(inner_id, &mut doc));
        assert_eq!(doc.active, Some(11));
        assert!(traps.is_top(&outer));
        assert!(!traps.deactivate_id(inner_id, &mut doc));

        traps.deactivate(outer, &mut doc);
        assert_eq!(doc.active, Some(2));
        assert!(traps.is_empty());
    }

    #[test]
    fn tab_key_loops_at_the_ends() {
        let mut doc = Doc::new();
        let mut traps = FocusTraps::new();
        let _trap = traps.activate(10, TrapOptions::default(), &mut doc);

        // Shift+Tab on the first focusable wraps to the last.
        assert!(traps.on_tab_key(true, &mut doc));
        assert_eq!(doc.active, Some(13));
        // Tab on the last wraps to the first.
        assert!(traps.on_tab_key(false, &mut doc));
        assert_eq!(doc.active, Some(11));
        // Tab in the middle is left to the platform.
        assert!(!traps.on_tab_key(false, &mut doc));
    }

    #[test]
    fn tab_key_without_trap_is_ignored() {
        let mut doc = Doc::new();
        let mut traps = FocusTraps::<u32>::new();
        assert!(!traps.on_tab_key(false, &mut doc));
        assert!(!traps.on_focus_in(2, &mut doc));
    }

    #[test]
    fn focus_escaping_is_pulled_back() {
        let mut doc = Doc::new();
        let mut traps = FocusTraps::new();
        let _trap = traps.activate(10, TrapOptions::default(), &mut doc);

        doc.active = Some(13);
        assert!(!traps.on_focus_in(13, &mut doc));

        doc.active = Some(2);
        assert!(traps.on_focus_in(2, &mut doc));
        assert_eq!(doc.active, Some(13));
    }

    #[test]
    fn focus_failures_are_swallowed() {
        let mut doc = Doc::new();
        doc.refuse.insert(11);
        let mut traps = FocusTraps::new();
        let trap = traps.activate(10, TrapOptions::default(), &mut doc);
        assert!(doc.focused.is_empty());
        assert!(traps.is_top(&trap));
        traps.deactivate(trap, &mut doc);
        assert_eq!(doc.focused, [2]);
    }
}
