// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered activation registry.

use smallvec::SmallVec;

/// Activation order of overlay entries, bottom to top.
///
/// Entries are pushed on activation and removed on deactivation. Removal is
/// by value from any position, because components do not necessarily unmount
/// in the reverse order they mounted. The last entry is the top; only the top
/// reacts to global triggers.
///
/// ```
/// use understory_overlay::Stack;
///
/// let mut stack = Stack::new();
/// stack.push(1_u32);
/// stack.push(2);
/// stack.push(3);
///
/// // The middle entry unmounts first.
/// assert!(stack.remove(2));
/// assert!(stack.is_top(3));
/// assert!(stack.remove(3));
/// assert!(stack.is_top(1));
/// ```
#[derive(Clone, Debug)]
pub struct Stack<T> {
    entries: SmallVec<[T; 4]>,
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }
}

impl<T: Copy + Eq> Stack<T> {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `entry` on top. An entry already present moves to the top.
    pub fn push(&mut self, entry: T) {
        self.remove(entry);
        self.entries.push(entry);
    }

    /// Remove `entry` wherever it is. Returns `false` if it was not present.
    pub fn remove(&mut self, entry: T) -> bool {
        match self.entries.iter().position(|&e| e == entry) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Whether `entry` is the top of the stack.
    pub fn is_top(&self, entry: T) -> bool {
        self.top() == Some(entry)
    }

    /// The top entry.
    pub fn top(&self) -> Option<T> {
        self.entries.last().copied()
    }

    /// Whether `entry` is anywhere in the stack.
    pub fn contains(&self, entry: T) -> bool {
        self.entries.contains(&entry)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the stack is empty, as it must be when no overlay is active.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries from bottom to top.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = T> + '_ {
        self.entries.iter().copied()
    }
}
