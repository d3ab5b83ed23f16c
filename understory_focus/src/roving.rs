// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Roving tabindex: one tabbable item per composite widget.
//!
//! [`RovingFocus`] keeps a registry of items in registration order (which the
//! host keeps equal to visual order) and guarantees that after every change
//! exactly one enabled item has tab index `0` and every other item has `-1`.
//! If every item is disabled, all of them get `-1`.
//!
//! Arrow keys move the active item according to [`RovingConfig`]; Home and
//! End jump to the first and last enabled items. Moving focus calls
//! [`RovingItem::focus`] on the new item before the key handler returns.

use alloc::vec::Vec;

use understory_event_state::keys::{Key, Modifiers};

use crate::{Direction, Navigation, Orientation};

/// Host-side handle for an item in a roving focus group.
pub trait RovingItem {
    /// Whether the item is currently disabled.
    fn is_disabled(&self) -> bool;
    /// Apply a tab index to the underlying element.
    fn set_tab_index(&mut self, tab_index: i32);
    /// Move keyboard focus to the underlying element.
    fn focus(&mut self);
}

/// Configuration for [`RovingFocus`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RovingConfig {
    /// Which arrow keys move focus.
    pub orientation: Orientation,
    /// Wrap from the last item to the first and back.
    pub looping: bool,
    /// Reading direction, which decides what Left and Right mean.
    pub direction: Direction,
}

#[derive(Debug)]
struct Entry<K, I> {
    id: K,
    item: I,
    /// Last tab index pushed to the item.
    tab_index: Option<i32>,
}

/// Roving tabindex controller.
///
/// ```
/// use understory_event_state::keys::{Key, Modifiers};
/// use understory_focus::roving::{RovingFocus, RovingItem};
/// use understory_focus::RovingConfig;
///
/// #[derive(Default)]
/// struct Item { disabled: bool, tab_index: i32, focused: bool }
///
/// impl RovingItem for Item {
///     fn is_disabled(&self) -> bool { self.disabled }
///     fn set_tab_index(&mut self, tab_index: i32) { self.tab_index = tab_index; }
///     fn focus(&mut self) { self.focused = true; }
/// }
///
/// let mut group = RovingFocus::new(RovingConfig::default());
/// group.register('a', Item::default());
/// group.register('b', Item { disabled: true, ..Item::default() });
/// group.register('c', Item::default());
///
/// assert_eq!(group.active_id(), Some(&'a'));
/// let moved = group.handle_key_down(&'a', &Key::ArrowDown, Modifiers::empty());
/// assert_eq!(moved, Some('c'));
/// assert!(group.item(&'c').unwrap().focused);
/// assert_eq!(group.tab_index(&'c'), Some(0));
/// assert_eq!(group.tab_index(&'a'), Some(-1));
/// ```
#[derive(Debug)]
pub struct RovingFocus<K, I> {
    config: RovingConfig,
    entries: Vec<Entry<K, I>>,
    active: Option<K>,
}

impl<K: Copy + Eq + core::fmt::Debug, I: RovingItem> RovingFocus<K, I> {
    /// Create an empty group.
    pub fn new(config: RovingConfig) -> Self {
        Self {
            config,
            entries: Vec::new(),
            active: None,
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &RovingConfig {
        &self.config
    }

    /// Replace the configuration.
    pub fn set_config(&mut self, config: RovingConfig) {
        self.config = config;
    }

    /// Register an item at the end of the group.
    ///
    /// Registering an id that is already present replaces its handle in place.
    pub fn register(&mut self, id: K, item: I) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) {
            entry.item = item;
            entry.tab_index = None;
        } else {
            self.entries.push(Entry {
                id,
                item,
                tab_index: None,
            });
        }
        self.sync();
    }

    /// Remove an item, returning its handle.
    pub fn unregister(&mut self, id: &K) -> Option<I> {
        let index = self.index_of(id)?;
        let entry = self.entries.remove(index);
        self.sync();
        Some(entry.item)
    }

    /// Make `id` the tabbable item without moving focus.
    ///
    /// Returns `false` (and changes nothing) if `id` is unknown or disabled.
    pub fn set_active_id(&mut self, id: K) -> bool {
        match self.index_of(&id) {
            Some(index) if !self.entries[index].item.is_disabled() => {
                self.active = Some(id);
                self.sync();
                true
            }
            _ => false,
        }
    }

    /// Make `id` active and focus it.
    pub fn focus_item(&mut self, id: K) -> bool {
        match self.index_of(&id) {
            Some(index) if !self.entries[index].item.is_disabled() => {
                self.move_to(index);
                true
            }
            _ => false,
        }
    }

    /// Re-evaluate the active item and tab indices, for example after an
    /// item's disabled state changed.
    pub fn refresh(&mut self) {
        self.sync();
    }

    /// The active (tabbable) item.
    pub fn active_id(&self) -> Option<&K> {
        self.active.as_ref()
    }

    /// The tab index last applied to `id`.
    pub fn tab_index(&self, id: &K) -> Option<i32> {
        self.entries.iter().find(|e| e.id == *id)?.tab_index
    }

    /// The handle registered for `id`.
    pub fn item(&self, id: &K) -> Option<&I> {
        self.entries.iter().find(|e| e.id == *id).map(|e| &e.item)
    }

    /// Registered ids in order.
    pub fn ids(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.iter().map(|e| &e.id)
    }

    /// Number of registered items.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no items are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Handle a key press on the item `current`.
    ///
    /// Returns the id focus moved to; the host should prevent the key's
    /// default action in that case. Returns `None` for keys outside the
    /// configured orientation, keys held with Ctrl/Alt/Meta, and when there is
    /// nowhere to move.
    pub fn handle_key_down(&mut self, current: &K, key: &Key, modifiers: Modifiers) -> Option<K> {
        if modifiers.is_command() {
            return None;
        }
        let navigation = Navigation::from_key(key, self.config.orientation, self.config.direction)?;
        let origin = self.index_of(current)?;
        let target = match navigation {
            Navigation::First => self.scan_from(0, Step::Forward, false),
            Navigation::Last => self.scan_from(self.entries.len() - 1, Step::Backward, false),
            Navigation::Next => self.step_from(origin, Step::Forward),
            Navigation::Prev => self.step_from(origin, Step::Backward),
        }?;
        if target == origin {
            return None;
        }
        Some(self.move_to(target))
    }

    fn index_of(&self, id: &K) -> Option<usize> {
        self.entries.iter().position(|e| e.id == *id)
    }

    fn enabled(&self, index: usize) -> bool {
        !self.entries[index].item.is_disabled()
    }

    /// First enabled index strictly after (or before) `origin`.
    fn step_from(&self, origin: usize, step: Step) -> Option<usize> {
        let len = self.entries.len();
        let next = match step {
            Step::Forward if origin + 1 < len => origin + 1,
            Step::Backward if origin > 0 => origin - 1,
            _ if self.config.looping => match step {
                Step::Forward => 0,
                Step::Backward => len - 1,
            },
            _ => return None,
        };
        self.scan_from(next, step, self.config.looping)
    }

    /// First enabled index at or after (or before) `start`.
    fn scan_from(&self, start: usize, step: Step, wrap: bool) -> Option<usize> {
        let len = self.entries.len();
        if len == 0 {
            return None;
        }
        let mut index = start;
        for _ in 0..len {
            if self.enabled(index) {
                return Some(index);
            }
            index = match step {
                Step::Forward if index + 1 < len => index + 1,
                Step::Backward if index > 0 => index - 1,
                Step::Forward if wrap => 0,
                Step::Backward if wrap => len - 1,
                _ => return None,
            };
        }
        None
    }

    fn move_to(&mut self, index: usize) -> K {
        let id = self.entries[index].id;
        self.active = Some(id);
        self.sync();
        tracing::trace!(?id, "roving focus moved");
        self.entries[index].item.focus();
        id
    }

    fn sync(&mut self) {
        let keep = self
            .active
            .and_then(|id| self.index_of(&id))
            .filter(|&index| self.enabled(index));
        let active = keep
            .or_else(|| self.scan_from(0, Step::Forward, false))
            .map(|index| self.entries[index].id);
        self.active = active;

        for entry in &mut self.entries {
            let desired = if Some(entry.id) == active { 0 } else { -1 };
            if entry.tab_index != Some(desired) {
                entry.item.set_tab_index(desired);
                entry.tab_index = Some(desired);
            }
        }
    }
}

#[derive(Copy, Clone)]
enum Step {
    Forward,
    Backward,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::{Cell, RefCell};

    #[derive(Debug, PartialEq)]
    enum Call {
        TabIndex(char, i32),
        Focus(char),
    }

    struct TestItem {
        name: char,
        disabled: Rc<Cell<bool>>,
        log: Rc<RefCell<Vec<Call>>>,
    }

    impl RovingItem for TestItem {
        fn is_disabled(&self) -> bool {
            self.disabled.get()
        }
        fn set_tab_index(&mut self, tab_index: i32) {
            self.log.borrow_mut().push(Call::TabIndex(self.name, tab_index));
        }
        fn focus(&mut self) {
            self.log.borrow_mut().push(Call::Focus(self.name));
        }
    }

    struct Fixture {
        group: RovingFocus<char, TestItem>,
        log: Rc<RefCell<Vec<Call>>>,
        disabled: Vec<(char, Rc<Cell<bool>>)>,
    }

    impl Fixture {
        fn new(config: RovingConfig, items: &[(char, bool)]) -> Self {
            let log = Rc::new(RefCell::new(Vec::new()));
            let mut group = RovingFocus::new(config);
            let mut disabled = Vec::new();
            for &(name, is_disabled) in items {
                let flag = Rc::new(Cell::new(is_disabled));
                disabled.push((name, flag.clone()));
                group.register(
                    name,
                    TestItem {
                        name,
                        disabled: flag,
                        log: log.clone(),
                    },
                );
            }
            Self {
                group,
                log,
                disabled,
            }
        }

        fn key(&mut self, current: char, key: Key) -> Option<char> {
            self.group.handle_key_down(&current, &key, Modifiers::empty())
        }

        fn set_disabled(&mut self, name: char, value: bool) {
            let (_, flag) = self.disabled.iter().find(|(n, _)| *n == name).unwrap();
            flag.set(value);
            self.group.refresh();
        }

        fn tabbable(&self) -> Vec<char> {
            self.group
                .ids()
                .copied()
                .filter(|id| self.group.tab_index(id) == Some(0))
                .collect()
        }
    }

    fn abc() -> Fixture {
        Fixture::new(
            RovingConfig::default(),
            &[('a', false), ('b', true), ('c', false)],
        )
    }

    #[test]
    fn exactly_one_item_is_tabbable() {
        let mut f = abc();
        assert_eq!(f.tabbable(), vec!['a']);
        f.key('a', Key::ArrowDown);
        assert_eq!(f.tabbable(), vec!['c']);
        f.group.unregister(&'c');
        assert_eq!(f.tabbable(), vec!['a']);
    }

    #[test]
    fn arrows_skip_disabled_items() {
        let mut f = abc();
        assert_eq!(f.key('a', Key::ArrowDown), Some('c'));
        assert_eq!(f.key('c', Key::ArrowUp), Some('a'));
        assert_eq!(f.key('a', Key::ArrowRight), Some('c'));
    }

    #[test]
    fn focus_is_called_synchronously_on_move() {
        let mut f = abc();
        f.log.borrow_mut().clear();
        f.key('a', Key::ArrowDown);
        assert_eq!(
            *f.log.borrow(),
            vec![
                Call::TabIndex('a', -1),
                Call::TabIndex('c', 0),
                Call::Focus('c')
            ]
        );
    }

    #[test]
    fn home_and_end_jump_to_enabled_extremes() {
        let mut f = Fixture::new(
            RovingConfig::default(),
            &[('a', true), ('b', false), ('c', false), ('d', true)],
        );
        assert_eq!(f.group.active_id(), Some(&'b'));
        assert_eq!(f.key('b', Key::End), Some('c'));
        assert_eq!(f.key('c', Key::Home), Some('b'));
        assert_eq!(f.key('b', Key::Home), None);
    }

    #[test]
    fn no_loop_stops_at_boundary() {
        let mut f = abc();
        assert_eq!(f.key('c', Key::ArrowDown), None);
        assert_eq!(f.key('a', Key::ArrowUp), None);
    }

    #[test]
    fn loop_wraps_around() {
        let mut f = Fixture::new(
            RovingConfig {
                looping: true,
                ..RovingConfig::default()
            },
            &[('a', false), ('b', true), ('c', false)],
        );
        assert_eq!(f.key('c', Key::ArrowDown), Some('a'));
        assert_eq!(f.key('a', Key::ArrowUp), Some('c'));
    }

    #[test]
    fn orientation_gates_arrow_keys() {
        let mut f = Fixture::new(
            RovingConfig {
                orientation: Orientation::Vertical,
                ..RovingConfig::default()
            },
            &[('a', false), ('b', false)],
        );
        assert_eq!(f.key('a', Key::ArrowRight), None);
        assert_eq!(f.key('a', Key::ArrowDown), Some('b'));

        f.group.set_config(RovingConfig {
            orientation: Orientation::Horizontal,
            ..RovingConfig::default()
        });
        assert_eq!(f.key('b', Key::ArrowUp), None);
        assert_eq!(f.key('b', Key::ArrowLeft), Some('a'));
        assert_eq!(f.key('a', Key::End), Some('b'));
    }

    #[test]
    fn rtl_swaps_left_and_right() {
        let mut f = Fixture::new(
            RovingConfig {
                orientation: Orientation::Horizontal,
                direction: Direction::Rtl,
                ..RovingConfig::default()
            },
            &[('a', false), ('b', false)],
        );
        assert_eq!(f.key('a', Key::ArrowLeft), Some('b'));
        assert_eq!(f.key('b', Key::ArrowRight), Some('a'));
    }

    #[test]
    fn command_modifiers_are_ignored() {
        let mut f = abc();
        assert_eq!(f.group.handle_key_down(&'a', &Key::ArrowDown, Modifiers::CTRL), None);
    }

    #[test]
    fn active_item_falls_back_when_disabled_or_removed() {
        let mut f = abc();
        assert!(f.group.set_active_id('c'));
        f.set_disabled('c', true);
        assert_eq!(f.group.active_id(), Some(&'a'));

        f.set_disabled('a', true);
        assert_eq!(f.group.active_id(), None);
        assert!(f.tabbable().is_empty());

        f.set_disabled('b', false);
        assert_eq!(f.tabbable(), vec!['b']);
    }

    #[test]
    fn set_active_id_rejects_disabled_and_unknown() {
        let mut f = abc();
        assert!(!f.group.set_active_id('b'));
        assert!(!f.group.set_active_id('z'));
        assert_eq!(f.group.active_id(), Some(&'a'));
    }

    #[test]
    fn tab_index_is_only_pushed_on_change() {
        let mut f = abc();
        f.log.borrow_mut().clear();
        f.group.refresh();
        assert!(f.log.borrow().is_empty());
        assert!(f.group.set_active_id('a'));
        assert!(f.log.borrow().is_empty());
    }

    #[test]
    fn focus_item_activates_and_focuses() {
        let mut f = abc();
        f.log.borrow_mut().clear();
        assert!(f.group.focus_item('c'));
        assert_eq!(f.log.borrow().last(), Some(&Call::Focus('c')));
        assert!(!f.group.focus_item('b'));
    }
}
