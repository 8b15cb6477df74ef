//! Lockstep structural diff of two maps.
//!
//! Physical sharing of a subtree witnesses that every pair beneath it is
//! equal in both maps, so shared subtrees are skipped wholesale and the
//! traversal touches only the unshared portion of the two tries.

use std::hash::{BuildHasher, Hash};

use archery::SharedPointerKind;

use crate::map::SharingMap;
use crate::node::{Container, Interior, Node};
use crate::view::{subtree_leaves, DeltaItem, DeltaView};

/// Level pushed for stack entries whose depth is temporarily undefined: an
/// interior paired against a shallow singular container. The real level is
/// not needed again until the container side meets a container, so any
/// value outside the trie height serves.
const RAGGED_LEVEL: u32 = u32::MAX;

impl<K, V, H, W, P, const BITS: u32, const CHUNK: u32> SharingMap<K, V, H, W, P, BITS, CHUNK>
where
    K: Hash + Eq,
    H: BuildHasher + Default,
    P: SharedPointerKind,
{
    /// Fills `delta_view` with the pairs of `self` whose hosting subtrees
    /// are not physically shared with `other`.
    ///
    /// Each reported item carries the counterpart value from `other` when
    /// the key exists in both maps. With `only_common`, keys present only
    /// in `self` are filtered out. The view is asymmetric by design: pairs
    /// present only in `other` are never reported.
    ///
    /// For two maps that diverged from a common ancestor the result is a
    /// lower bound on their symmetric difference, computed in time
    /// proportional to the unshared part of the tries rather than to the
    /// map sizes.
    ///
    /// `delta_view` must be empty on entry.
    pub fn get_delta_view<'a>(
        &'a self,
        other: &'a Self,
        delta_view: &mut DeltaView<'a, K, V>,
        only_common: bool,
    ) {
        debug_assert!(delta_view.is_empty());

        let Some(root) = self.root.as_deref() else {
            return;
        };
        let Some(other_root) = other.root.as_deref() else {
            if !only_common {
                for child in root.children() {
                    gather_all(child, delta_view);
                }
            }
            return;
        };

        if std::ptr::eq(root, other_root) {
            return;
        }

        // DFS in lockstep on both maps: the stack holds the pairs of
        // corresponding nodes still to be visited, with the depth at which
        // each pair sits.
        let mut stack: Vec<(&Node<K, V, P>, &Node<K, V, P>, u32)> = Vec::new();
        Self::diff_interiors(root, other_root, 0, &mut stack, delta_view, only_common);

        while let Some((a, b, level)) = stack.pop() {
            match (a, b) {
                (Node::Interior(ai), Node::Container(bc)) => {
                    // `bc` holds one leaf: only bottom containers chain, and
                    // a node paired with an interior cannot be at the
                    // bottom. The comparison is deferred until the left side
                    // reaches containers; the level is meaningless until
                    // then.
                    debug_assert!(bc.is_singular());
                    for child in ai.children() {
                        if !child.shares_with(b) {
                            stack.push((child, b, RAGGED_LEVEL));
                        }
                    }
                }
                (Node::Interior(ai), Node::Interior(bi)) => {
                    Self::diff_interiors(&**ai, &**bi, level, &mut stack, delta_view, only_common);
                }
                (Node::Container(ac), Node::Interior(bi)) => {
                    debug_assert_ne!(level, RAGGED_LEVEL);
                    Self::diff_lone_leaf(&**ac, &**bi, level, delta_view, only_common);
                }
                (Node::Container(ac), Node::Container(bc)) => {
                    Self::diff_containers(&**ac, &**bc, delta_view, only_common);
                }
            }
        }
    }

    /// Both sides interior: walk `a`'s digit map against `b`'s.
    fn diff_interiors<'a>(
        a: &'a Interior<K, V, P>,
        b: &'a Interior<K, V, P>,
        level: u32,
        stack: &mut Vec<(&'a Node<K, V, P>, &'a Node<K, V, P>, u32)>,
        delta_view: &mut DeltaView<'a, K, V>,
        only_common: bool,
    ) {
        for (digit, child) in a.digit_children() {
            match b.child(digit) {
                None => {
                    if !only_common {
                        gather_all(child, delta_view);
                    }
                }
                Some(other_child) => {
                    if !child.shares_with(other_child) {
                        stack.push((child, other_child, level + 1));
                    }
                }
            }
        }
    }

    /// `a` is a singular container above the bottom, `b` an interior at the
    /// same depth: chase the lone leaf's remaining hash digits down `b`.
    fn diff_lone_leaf<'a>(
        container: &'a Container<K, V, P>,
        interior: &'a Interior<K, V, P>,
        level: u32,
        delta_view: &mut DeltaView<'a, K, V>,
        only_common: bool,
    ) {
        debug_assert!(container.is_singular());
        let lone = &container.leaves[0];
        let mut suffix = Self::hash_of(&lone.key) >> (level * CHUNK);
        let mut current = interior;

        loop {
            let digit = (suffix & Self::MASK) as u32;
            match current.child(digit) {
                None => {
                    // The branch exists only in the queried map.
                    if !only_common {
                        delta_view.push(DeltaItem {
                            key: &lone.key,
                            value: &lone.value,
                            other_value: None,
                        });
                    }
                    return;
                }
                Some(Node::Interior(next)) => {
                    current = &**next;
                    suffix >>= CHUNK;
                }
                Some(Node::Container(other)) => {
                    if std::ptr::eq(container, &**other) {
                        return;
                    }
                    for other_leaf in &other.leaves {
                        if std::ptr::eq(&**lone, &**other_leaf) {
                            return;
                        }
                        if other_leaf.key == lone.key {
                            delta_view.push(DeltaItem {
                                key: &lone.key,
                                value: &lone.value,
                                other_value: Some(&other_leaf.value),
                            });
                            return;
                        }
                    }
                    delta_view.push(DeltaItem {
                        key: &lone.key,
                        value: &lone.value,
                        other_value: None,
                    });
                    return;
                }
            }
        }
    }

    /// Both sides container: linear key comparison of the two chains.
    fn diff_containers<'a>(
        a: &'a Container<K, V, P>,
        b: &'a Container<K, V, P>,
        delta_view: &mut DeltaView<'a, K, V>,
        only_common: bool,
    ) {
        for leaf in &a.leaves {
            match b.find(&leaf.key) {
                Some(other_leaf) => {
                    if !std::ptr::eq(&**leaf, &**other_leaf) {
                        delta_view.push(DeltaItem {
                            key: &leaf.key,
                            value: &leaf.value,
                            other_value: Some(&other_leaf.value),
                        });
                    }
                }
                None => {
                    if !only_common {
                        delta_view.push(DeltaItem {
                            key: &leaf.key,
                            value: &leaf.value,
                            other_value: None,
                        });
                    }
                }
            }
        }
    }
}

/// Dumps every pair of a subtree as present-in-one-map-only items.
fn gather_all<'a, K, V, P: SharedPointerKind>(
    start: &'a Node<K, V, P>,
    delta_view: &mut DeltaView<'a, K, V>,
) {
    subtree_leaves(start, &mut |leaf| {
        delta_view.push(DeltaItem {
            key: &leaf.key,
            value: &leaf.value,
            other_value: None,
        });
    });
}
