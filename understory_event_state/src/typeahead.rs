// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typeahead search over a list of labelled items.
//!
//! Typing printable characters in quick succession builds a search string;
//! each keystroke returns the first enabled item whose text starts with it
//! (case-insensitively). Pressing the same letter repeatedly cycles through
//! items that share that initial.
//!
//! ```
//! use understory_event_state::keys::{Key, Modifiers};
//! use understory_event_state::typeahead::{Typeahead, TypeaheadCandidate};
//!
//! let items = [
//!     TypeaheadCandidate::new(1_u32, "Apple"),
//!     TypeaheadCandidate::new(2, "Banana"),
//!     TypeaheadCandidate::new(3, "Blueberry"),
//! ];
//! let mut search = Typeahead::default();
//!
//! let hit = search.handle_key(&Key::char('b'), Modifiers::empty(), 0, &items, Some(&1));
//! assert_eq!(hit, Some(2));
//! // Same letter again moves on to the next "b" item.
//! let hit = search.handle_key(&Key::char('b'), Modifiers::empty(), 100, &items, Some(&2));
//! assert_eq!(hit, Some(3));
//! ```

use alloc::string::String;

use crate::keys::{Key, Modifiers};
use crate::timer::{Millis, Timer};

/// Configuration for [`Typeahead`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TypeaheadConfig {
    /// Inactivity window after which the search string starts over.
    pub timeout: Millis,
    /// Whether the scan wraps from the last item to the first.
    pub looping: bool,
}

impl Default for TypeaheadConfig {
    fn default() -> Self {
        Self {
            timeout: 700,
            looping: true,
        }
    }
}

/// An item that typeahead can land on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TypeaheadCandidate<'a, K> {
    /// Item identifier.
    pub id: K,
    /// Text matched against the search string.
    pub text: &'a str,
    /// Disabled items are never matched.
    pub disabled: bool,
}

impl<'a, K> TypeaheadCandidate<'a, K> {
    /// An enabled candidate.
    pub const fn new(id: K, text: &'a str) -> Self {
        Self {
            id,
            text,
            disabled: false,
        }
    }
}

/// Search-string state for typeahead.
#[derive(Clone, Debug, Default)]
pub struct Typeahead {
    config: TypeaheadConfig,
    search: String,
    last_key_at: Option<Millis>,
    clear: Timer,
}

impl Typeahead {
    /// Create a typeahead with the given configuration.
    pub fn new(config: TypeaheadConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &TypeaheadConfig {
        &self.config
    }

    /// The accumulated search string.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// When the search string will be cleared, if it is pending.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.clear.deadline()
    }

    /// Drop the search string and cancel the pending clear.
    pub fn clear(&mut self) {
        self.search.clear();
        self.last_key_at = None;
        self.clear.cancel();
    }

    /// Clear the search string if the inactivity timeout has elapsed.
    ///
    /// Returns `true` if it was cleared.
    pub fn poll(&mut self, now: Millis) -> bool {
        if self.clear.fire(now) {
            self.search.clear();
            self.last_key_at = None;
            true
        } else {
            false
        }
    }

    /// Feed a key press and return the matched item, if any.
    ///
    /// Keys held with Ctrl, Alt, or Meta, keys that do not produce exactly
    /// one character, and whitespace are ignored and leave the search string
    /// untouched. `active` is the currently focused item; the scan starts
    /// just after it (or at it, once the search string is longer than one
    /// character, so that extending a prefix keeps the current match).
    pub fn handle_key<K: Clone + PartialEq>(
        &mut self,
        key: &Key,
        modifiers: Modifiers,
        now: Millis,
        items: &[TypeaheadCandidate<'_, K>],
        active: Option<&K>,
    ) -> Option<K> {
        if modifiers.is_command() {
            return None;
        }
        let c = key.single_char()?;
        if c.is_whitespace() {
            return None;
        }

        let expired = self
            .last_key_at
            .is_none_or(|last| now.saturating_sub(last) > self.config.timeout);
        if expired {
            self.search.clear();
        }
        self.search.push(c);
        self.last_key_at = Some(now);
        // A key exactly `timeout` after the last one still extends the search.
        self.clear.schedule(now, self.config.timeout.saturating_add(1));

        let multi = self.search.chars().nth(1).is_some();
        let hit = find_match(items, active, &self.search, multi, self.config.looping).or_else(|| {
            if multi {
                let mut single = String::new();
                single.push(c);
                find_match(items, active, &single, false, self.config.looping)
            } else {
                None
            }
        });
        tracing::trace!(search = %self.search, matched = hit.is_some(), "typeahead");
        hit
    }
}

fn find_match<K: Clone + PartialEq>(
    items: &[TypeaheadCandidate<'_, K>],
    active: Option<&K>,
    needle: &str,
    include_active: bool,
    looping: bool,
) -> Option<K> {
    let len = items.len();
    let (start, steps) = match active.and_then(|a| items.iter().position(|item| item.id == *a)) {
        Some(index) if include_active => (index, len),
        Some(index) => (index + 1, len - 1),
        None => (0, len),
    };
    (0..steps)
        .map(|step| start + step)
        .map_while(|index| match (index < len, looping) {
            (true, _) => Some(index),
            (false, true) => Some(index % len),
            (false, false) => None,
        })
        .map(|index| &items[index])
        .find(|item| !item.disabled && starts_with_ignore_case(item.text, needle))
        .map(|item| item.id.clone())
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    let mut text = text.chars().flat_map(char::to_lowercase);
    prefix
        .chars()
        .flat_map(char::to_lowercase)
        .all(|p| text.next() == Some(p))
}
