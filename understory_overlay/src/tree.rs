// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Containment queries over the host's element tree.

/// Parent lookup over the host's element tree.
///
/// Closures of the shape `Fn(&K) -> Option<K>` implement this trait.
pub trait ParentLookup<K> {
    /// Return the parent of `node`, or `None` for a root.
    fn parent_of(&self, node: &K) -> Option<K>;
}

impl<K, F> ParentLookup<K> for F
where
    F: Fn(&K) -> Option<K>,
{
    fn parent_of(&self, node: &K) -> Option<K> {
        self(node)
    }
}

/// Whether `node` is `ancestor` or one of its descendants.
///
/// Walks parents from `node` to the root; the caller ensures acyclic ancestry.
pub fn contains<K: Copy + Eq>(
    lookup: &(impl ParentLookup<K> + ?Sized),
    ancestor: &K,
    node: &K,
) -> bool {
    let mut cur = *node;
    loop {
        if cur == *ancestor {
            return true;
        }
        match lookup.parent_of(&cur) {
            Some(parent) => cur = parent,
            None => return false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1 ── 2 ── 3
    //  └── 4
    fn parent(node: &u32) -> Option<u32> {
        match node {
            2 | 4 => Some(1),
            3 => Some(2),
            _ => None,
        }
    }

    #[test]
    fn containment_is_inclusive_and_transitive() {
        assert!(contains(&parent, &1, &3));
        assert!(contains(&parent, &2, &2));
        assert!(!contains(&parent, &2, &4));
        assert!(!contains(&parent, &3, &1));
    }

    #[test]
    fn unknown_nodes_are_outside() {
        assert!(!contains(&parent, &1, &99));
    }
}
