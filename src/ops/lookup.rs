//! Read-only descent: a hash-digit walk to the container, then a linear
//! key scan of its leaf list.

use std::hash::{BuildHasher, Hash};

use archery::SharedPointerKind;

use crate::map::SharingMap;
use crate::node::{Container, Leaf, Node};

impl<K, V, H, W, P, const BITS: u32, const CHUNK: u32> SharingMap<K, V, H, W, P, BITS, CHUNK>
where
    K: Hash + Eq,
    H: BuildHasher + Default,
    P: SharedPointerKind,
{
    /// Walks the digits of `key`'s hash down to the container that would
    /// hold its leaf.
    pub(crate) fn container_for(&self, key: &K) -> Option<&Container<K, V, P>> {
        let mut interior = self.root.as_deref()?;
        let mut suffix = Self::hash_of(key);

        loop {
            let digit = (suffix & Self::MASK) as u32;
            match interior.child(digit)? {
                Node::Container(container) => return Some(&**container),
                Node::Interior(next) => {
                    interior = &**next;
                    suffix >>= CHUNK;
                }
            }
        }
    }

    /// Finds the leaf for `key`, if present.
    pub(crate) fn leaf_for(&self, key: &K) -> Option<&Leaf<K, V>> {
        let container = self.container_for(key)?;
        container.find(key).map(|leaf| &**leaf)
    }
}
