//! The sharing map type: construction, accessors, and trait impls.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{BuildHasher, BuildHasherDefault, Hash};
use std::marker::PhantomData;
use std::mem;
use std::ops;

use archery::{ArcK, RcK, SharedPointer, SharedPointerKind};

use crate::iter::Iter;
use crate::node::Interior;
use crate::policy::AllowEqual;

/// Hasher used when no explicit `BuildHasher` parameter is given.
///
/// Every map instance of a given type must hash keys identically — delta
/// views descend one map's trie using hashes of the other map's keys — so
/// the build-hasher is default-constructed on demand, never stored.
/// Randomly seeded hashers such as `RandomState` are unsuitable here.
pub type DefaultHashBuilder = BuildHasherDefault<DefaultHasher>;

/// A map implemented as a fixed-height hash trie whose subtrees are shared
/// between instances.
///
/// Cloning is O(1): both maps point at the same root, and every subsequent
/// mutation copies only the nodes on one root-to-leaf path (copy-on-write).
/// Untouched subtrees stay physically shared, which makes two things cheap:
/// snapshots of large evolving state, and
/// [`get_delta_view`](Self::get_delta_view), which compares two related maps
/// in time proportional to the part they do *not* share.
///
/// The trie consumes the `BITS` low-order bits of each key's hash, `CHUNK`
/// bits per level, giving height `BITS / CHUNK` and fan-out `2^CHUNK`. Keys
/// whose hashes collide on all `BITS` bits chain in a leaf list at the
/// bottom level and are told apart by key equality.
///
/// `insert`, `replace`, `update`, and `erase` have strict preconditions
/// (key absent, resp. present) and treat violations as programmer errors;
/// no operation has a recoverable failure mode. The `W` parameter selects
/// the write policy applied by `replace` and `update` ([`AllowEqual`] by
/// default, [`FailIfEqual`](crate::FailIfEqual) to catch sharing-hostile
/// no-op writes); the `P` parameter selects the refcount primitive (plain
/// for single-threaded use, atomic via [`SharingMapSync`]).
pub struct SharingMap<
    K,
    V,
    H = DefaultHashBuilder,
    W = AllowEqual,
    P: SharedPointerKind = RcK,
    const BITS: u32 = 30,
    const CHUNK: u32 = 3,
> {
    pub(crate) root: Option<SharedPointer<Interior<K, V, P>, P>>,
    pub(crate) num: usize,
    pub(crate) _config: PhantomData<(H, W)>,
}

/// Atomically refcounted sharing map.
///
/// Identical contract to [`SharingMap`], but clones may be moved to and
/// mutated on other threads; subtrees stay shared across threads until a
/// writer copies its path.
pub type SharingMapSync<K, V, H = DefaultHashBuilder, W = AllowEqual> =
    SharingMap<K, V, H, W, ArcK>;

// ---------------------------------------------------------------------------
// Construction & accessors — no key/value bounds
// ---------------------------------------------------------------------------

impl<K, V, H, W, P: SharedPointerKind, const BITS: u32, const CHUNK: u32>
    SharingMap<K, V, H, W, P, BITS, CHUNK>
{
    /// Rejects configurations the descent arithmetic cannot support.
    const CONFIG_OK: () = assert!(
        CHUNK > 0 && CHUNK <= 5 && BITS >= CHUNK && BITS % CHUNK == 0 && BITS <= 64,
        "BITS must be a positive multiple of CHUNK, with CHUNK in 1..=5",
    );

    /// Digit mask: the low `CHUNK` bits of a hash suffix.
    pub(crate) const MASK: u64 = (1 << CHUNK) - 1;

    /// Number of digits consumed on a full descent.
    pub(crate) const HEIGHT: u32 = BITS / CHUNK;

    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        let _ = Self::CONFIG_OK;
        Self {
            root: None,
            num: 0,
            _config: PhantomData,
        }
    }

    /// Returns the number of key-value pairs. O(1).
    #[must_use]
    pub const fn len(&self) -> usize {
        self.num
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.num == 0
    }

    /// Removes every entry by releasing the root handle.
    ///
    /// Nodes shared with other maps stay alive through their handles.
    pub fn clear(&mut self) {
        self.root = None;
        self.num = 0;
    }

    /// Exchanges the contents of two maps. O(1).
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Returns an iterator over `(&K, &V)` pairs.
    ///
    /// Order follows the physical trie shape: deterministic for a given map
    /// instance, unspecified otherwise.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut entries = Vec::with_capacity(self.num);
        self.iterate(|k, v| entries.push((k, v)));
        Iter::new(entries)
    }
}

// ---------------------------------------------------------------------------
// Read operations — K: Hash + Eq
// ---------------------------------------------------------------------------

impl<K, V, H, W, P, const BITS: u32, const CHUNK: u32> SharingMap<K, V, H, W, P, BITS, CHUNK>
where
    K: Hash + Eq,
    H: BuildHasher + Default,
    P: SharedPointerKind,
{
    pub(crate) fn hash_of(key: &K) -> u64 {
        H::default().hash_one(key)
    }

    /// Returns a reference to the value stored for `key`.
    ///
    /// The borrow is tied to this map; it ends at the next mutation of this
    /// map (mutating a clone does not disturb it).
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        let leaf = self.leaf_for(key)?;
        Some(&leaf.value)
    }

    /// Returns `true` if the map contains `key`.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.leaf_for(key).is_some()
    }
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

impl<K, V, H, W, P: SharedPointerKind, const BITS: u32, const CHUNK: u32> Clone
    for SharingMap<K, V, H, W, P, BITS, CHUNK>
{
    /// O(1): bumps the root refcount; all nodes are shared with the source
    /// until one of the two maps mutates them.
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            num: self.num,
            _config: PhantomData,
        }
    }
}

impl<K, V, H, W, P: SharedPointerKind, const BITS: u32, const CHUNK: u32> Default
    for SharingMap<K, V, H, W, P, BITS, CHUNK>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, H, W, P: SharedPointerKind, const BITS: u32, const CHUNK: u32> fmt::Debug
    for SharingMap<K, V, H, W, P, BITS, CHUNK>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharingMap")
            .field("len", &self.num)
            .finish_non_exhaustive()
    }
}

impl<K, V, H, W, P, const BITS: u32, const CHUNK: u32> ops::Index<&K>
    for SharingMap<K, V, H, W, P, BITS, CHUNK>
where
    K: Hash + Eq,
    H: BuildHasher + Default,
    P: SharedPointerKind,
{
    type Output = V;

    fn index(&self, key: &K) -> &V {
        self.get(key).expect("key not found")
    }
}

impl<'a, K, V, H, W, P: SharedPointerKind, const BITS: u32, const CHUNK: u32> IntoIterator
    for &'a SharingMap<K, V, H, W, P, BITS, CHUNK>
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}
