//! Value replacement and in-place update.

use std::hash::{BuildHasher, Hash};

use archery::{SharedPointer, SharedPointerKind};

use crate::map::SharingMap;
use crate::node::{Container, Interior, Leaf, Node};
use crate::policy::WritePolicy;

impl<K, V, H, W, P, const BITS: u32, const CHUNK: u32> SharingMap<K, V, H, W, P, BITS, CHUNK>
where
    K: Hash + Eq + Clone,
    V: Clone,
    H: BuildHasher + Default,
    W: WritePolicy<V>,
    P: SharedPointerKind,
{
    /// Replaces the value stored for `key`.
    ///
    /// # Panics
    ///
    /// Panics if `key` is absent, or — under the
    /// [`FailIfEqual`](crate::FailIfEqual) policy — if `value` equals the
    /// stored value: such writes break sharing without changing the map.
    pub fn replace(&mut self, key: &K, value: V) {
        let leaf = self.unique_leaf_for(key);
        assert!(
            !W::values_equal(&leaf.value, &value),
            "replace: value unchanged",
        );
        leaf.value = value;
    }

    /// Applies `mutator` to the value stored for `key`, in place.
    ///
    /// The closure receives the only live mutable reference to the value
    /// and must not retain it past the call.
    ///
    /// # Panics
    ///
    /// Panics if `key` is absent, or — under the
    /// [`FailIfEqual`](crate::FailIfEqual) policy — if the mutator made no
    /// change (use [`get`](Self::get) beforehand when unsure whether an
    /// update is needed).
    pub fn update(&mut self, key: &K, mutator: impl FnOnce(&mut V)) {
        let leaf = self.unique_leaf_for(key);
        let snapshot = W::snapshot(&leaf.value);
        mutator(&mut leaf.value);
        assert!(
            !W::unchanged(&snapshot, &leaf.value),
            "update: mutator made no change",
        );
    }

    /// Copy-on-write descent to the uniquely held leaf for `key`.
    fn unique_leaf_for(&mut self, key: &K) -> &mut Leaf<K, V> {
        let suffix = Self::hash_of(key);
        let root = self.root.as_mut().expect("key not found in map");
        let container = SharedPointer::make_mut(Self::unique_container(root, suffix));
        let leaf = container.find_mut(key).expect("key not found in map");
        SharedPointer::make_mut(leaf)
    }

    /// Walks the digit path with make-unique, returning the container
    /// handle at its end.
    fn unique_container(
        interior: &mut SharedPointer<Interior<K, V, P>, P>,
        suffix: u64,
    ) -> &mut SharedPointer<Container<K, V, P>, P> {
        let inner = SharedPointer::make_mut(interior);
        let digit = (suffix & Self::MASK) as u32;
        match inner.child_mut(digit).expect("key not found in map") {
            Node::Container(container) => container,
            Node::Interior(next) => Self::unique_container(next, suffix >> CHUNK),
        }
    }
}
