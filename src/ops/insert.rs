//! Insertion and collision migration.

use std::hash::{BuildHasher, Hash};

use archery::{SharedPointer, SharedPointerKind};

use crate::map::SharingMap;
use crate::node::{Container, Interior, Leaf, Node};

impl<K, V, H, W, P, const BITS: u32, const CHUNK: u32> SharingMap<K, V, H, W, P, BITS, CHUNK>
where
    K: Hash + Eq,
    H: BuildHasher + Default,
    P: SharedPointerKind,
{
    /// Inserts a new key-value pair.
    ///
    /// The key must not be present; inserting a duplicate is a contract
    /// violation (checked in debug builds), not a recoverable state. Use
    /// [`replace`](Self::replace) to overwrite and
    /// [`contains_key`](Self::contains_key) to decide between the two.
    pub fn insert(&mut self, key: K, value: V) {
        debug_assert!(!self.contains_key(&key), "insert: key already present");

        let suffix = Self::hash_of(&key);
        let leaf = SharedPointer::new(Leaf { key, value });
        let root = self
            .root
            .get_or_insert_with(|| SharedPointer::new(Interior::new()));
        Self::insert_rec(root, suffix, 0, leaf);
        self.num += 1;
    }

    /// Copy-on-write descent placing `leaf` under `interior`.
    ///
    /// `suffix` is the key's hash shifted past the digits consumed above
    /// `level`.
    fn insert_rec(
        interior: &mut SharedPointer<Interior<K, V, P>, P>,
        suffix: u64,
        level: u32,
        leaf: SharedPointer<Leaf<K, V>, P>,
    ) {
        let digit = (suffix & Self::MASK) as u32;
        let inner = SharedPointer::make_mut(interior);

        if !inner.has_child(digit) {
            inner.insert_child(
                digit,
                Node::Container(SharedPointer::new(Container::singular(leaf))),
            );
            return;
        }

        match inner.child_mut(digit) {
            Some(Node::Interior(next)) => {
                Self::insert_rec(next, suffix >> CHUNK, level + 1, leaf);
            }
            Some(Node::Container(container)) if level == Self::HEIGHT - 1 => {
                // Bottom of the trie: every key here collides on all hash
                // bits, so the pair joins the chain.
                SharedPointer::make_mut(container).prepend(leaf);
            }
            Some(child) => {
                // A singular container above the bottom: push it down until
                // the two hash suffixes diverge.
                let Node::Container(existing) = &*child else {
                    unreachable!()
                };
                debug_assert!(existing.is_singular());
                let existing = existing.clone();
                let existing_suffix =
                    Self::hash_of(&existing.leaves[0].key) >> ((level + 1) * CHUNK);
                *child = Self::migrate(existing, existing_suffix, suffix >> CHUNK, level + 1, leaf);
            }
            None => unreachable!(),
        }
    }

    /// Builds the interior spine that replaces a singular container when a
    /// new key collides with it above the bottom level.
    ///
    /// `existing_suffix` and `new_suffix` are the two hash codes shifted
    /// past the colliding digit; `level` is the depth of the spine node
    /// being built. The existing container handle moves down unchanged, so
    /// sharing of it and of its leaf survives the migration.
    fn migrate(
        existing: SharedPointer<Container<K, V, P>, P>,
        existing_suffix: u64,
        new_suffix: u64,
        level: u32,
        leaf: SharedPointer<Leaf<K, V>, P>,
    ) -> Node<K, V, P> {
        debug_assert!(level < Self::HEIGHT);

        let existing_digit = (existing_suffix & Self::MASK) as u32;
        let new_digit = (new_suffix & Self::MASK) as u32;

        let interior = if existing_digit != new_digit {
            Interior::with_pair(
                existing_digit,
                Node::Container(existing),
                new_digit,
                Node::Container(SharedPointer::new(Container::singular(leaf))),
            )
        } else if level == Self::HEIGHT - 1 {
            // The hashes agree on every digit: chain both leaves in one
            // bottom container, newest first.
            let existing_leaf = existing.leaves[0].clone();
            Interior::with_child(
                new_digit,
                Node::Container(SharedPointer::new(Container::chain(leaf, existing_leaf))),
            )
        } else {
            Interior::with_child(
                new_digit,
                Self::migrate(
                    existing,
                    existing_suffix >> CHUNK,
                    new_suffix >> CHUNK,
                    level + 1,
                    leaf,
                ),
            )
        };

        Node::Interior(SharedPointer::new(interior))
    }
}
