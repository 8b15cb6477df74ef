//! Materialized views of a map's contents.

use archery::SharedPointerKind;

use crate::map::SharingMap;
use crate::node::{Leaf, Node};

/// Borrowed `(key, value)` pairs covering every leaf of a map once.
pub type View<'a, K, V> = Vec<(&'a K, &'a V)>;

/// One entry of a delta view.
///
/// Reports a pair of the queried map together with the other map's value
/// for the same key, when the key exists there.
#[derive(Debug)]
pub struct DeltaItem<'a, K, V> {
    /// Key in the queried map.
    pub key: &'a K,
    /// Value in the queried map.
    pub value: &'a V,
    /// Value in the other map, when the key is present in both.
    pub other_value: Option<&'a V>,
}

/// Pairs of the queried map hosted in subtrees it does not physically share
/// with the other map. See
/// [`get_delta_view`](crate::SharingMap::get_delta_view).
pub type DeltaView<'a, K, V> = Vec<DeltaItem<'a, K, V>>;

impl<K, V> DeltaItem<'_, K, V> {
    /// Returns `true` if the key is present in both maps.
    #[must_use]
    pub const fn is_in_both_maps(&self) -> bool {
        self.other_value.is_some()
    }
}

impl<'a, K, V> Clone for DeltaItem<'a, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for DeltaItem<'_, K, V> {}

// ---------------------------------------------------------------------------
// Traversal
// ---------------------------------------------------------------------------

/// Explicit-stack DFS over one subtree, visiting every leaf once.
pub(crate) fn subtree_leaves<'a, K, V, P: SharedPointerKind>(
    start: &'a Node<K, V, P>,
    f: &mut impl FnMut(&'a Leaf<K, V>),
) {
    let mut stack = vec![start];
    while let Some(node) = stack.pop() {
        match node {
            Node::Interior(interior) => stack.extend(interior.children()),
            Node::Container(container) => {
                for leaf in &container.leaves {
                    f(&**leaf);
                }
            }
        }
    }
}

impl<K, V, H, W, P: SharedPointerKind, const BITS: u32, const CHUNK: u32>
    SharingMap<K, V, H, W, P, BITS, CHUNK>
{
    /// Calls `f` once for every key-value pair.
    ///
    /// Order follows the physical trie shape: deterministic for a given map
    /// instance, unspecified otherwise.
    pub fn iterate<'a>(&'a self, mut f: impl FnMut(&'a K, &'a V)) {
        let Some(root) = self.root.as_deref() else {
            return;
        };
        for child in root.children() {
            subtree_leaves(child, &mut |leaf| f(&leaf.key, &leaf.value));
        }
    }

    /// Fills `view` with one borrowed `(key, value)` pair per leaf.
    ///
    /// `view` must be empty on entry.
    pub fn get_view<'a>(&'a self, view: &mut View<'a, K, V>) {
        debug_assert!(view.is_empty());
        self.iterate(|k, v| view.push((k, v)));
    }
}
