//! Erasure with cut-point branch removal.

use std::hash::{BuildHasher, Hash};

use archery::{SharedPointer, SharedPointerKind};

use crate::map::SharingMap;
use crate::node::{Interior, Node};

impl<K, V, H, W, P, const BITS: u32, const CHUNK: u32> SharingMap<K, V, H, W, P, BITS, CHUNK>
where
    K: Hash + Eq,
    H: BuildHasher + Default,
    P: SharedPointerKind,
{
    /// Erases `key`.
    ///
    /// When the key's container holds a single leaf, the whole branch down
    /// to it is cut at the deepest interior that keeps more than one child,
    /// so no empty interior outlives the erasure.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not present.
    pub fn erase(&mut self, key: &K) {
        let full = Self::hash_of(key);

        // First pass, read-only: locate the cut point — the deepest
        // interior with more than one child, or the root — and check which
        // removal applies to the target container.
        let (cut_level, cut_digit, singular) = {
            let mut interior = self.root.as_deref().expect("erase: key not found");
            let mut suffix = full;
            let mut level = 0u32;
            let mut cut_level = 0u32;
            let mut cut_digit = (suffix & Self::MASK) as u32;

            loop {
                let digit = (suffix & Self::MASK) as u32;
                if interior.child_count() > 1 || level == 0 {
                    cut_level = level;
                    cut_digit = digit;
                }
                match interior.child(digit).expect("erase: key not found") {
                    Node::Container(container) => {
                        if container.is_singular() {
                            assert!(container.leaves[0].key == *key, "erase: key not found");
                            break (cut_level, cut_digit, true);
                        }
                        assert!(container.find(key).is_some(), "erase: key not found");
                        break (cut_level, cut_digit, false);
                    }
                    Node::Interior(next) => {
                        interior = &**next;
                        suffix >>= CHUNK;
                        level += 1;
                    }
                }
            }
        };

        // Second pass: make nodes unique along the path and remove.
        let root = self.root.as_mut().expect("erase: key not found");
        if singular {
            Self::remove_branch(root, full, 0, cut_level, cut_digit);
            if root.child_count() == 0 {
                self.root = None;
            }
        } else {
            Self::remove_chained_leaf(root, full, key);
        }
        self.num -= 1;
    }

    /// Erases `key` if present; does nothing otherwise.
    pub fn erase_if_exists(&mut self, key: &K) {
        if self.contains_key(key) {
            self.erase(key);
        }
    }

    /// Cuts the child at the recorded cut point; the entire single-leaf
    /// branch below it is dropped in one handle release.
    fn remove_branch(
        interior: &mut SharedPointer<Interior<K, V, P>, P>,
        suffix: u64,
        level: u32,
        cut_level: u32,
        cut_digit: u32,
    ) {
        let inner = SharedPointer::make_mut(interior);
        if level == cut_level {
            inner.remove_child(cut_digit);
            return;
        }
        let digit = (suffix & Self::MASK) as u32;
        match inner.child_mut(digit) {
            Some(Node::Interior(next)) => {
                Self::remove_branch(next, suffix >> CHUNK, level + 1, cut_level, cut_digit);
            }
            _ => unreachable!("cut point lies on an interior path"),
        }
    }

    /// Removes one leaf from a multi-leaf bottom chain.
    fn remove_chained_leaf(
        interior: &mut SharedPointer<Interior<K, V, P>, P>,
        suffix: u64,
        key: &K,
    ) {
        let inner = SharedPointer::make_mut(interior);
        let digit = (suffix & Self::MASK) as u32;
        match inner.child_mut(digit) {
            Some(Node::Interior(next)) => Self::remove_chained_leaf(next, suffix >> CHUNK, key),
            Some(Node::Container(container)) => SharedPointer::make_mut(container).remove(key),
            None => unreachable!("container located in the first pass"),
        }
    }
}
