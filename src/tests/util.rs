//! Shared helpers for the test modules.

use std::hash::{BuildHasherDefault, Hasher};

use archery::RcK;

use crate::{AllowEqual, SharingMap};

/// Hasher whose output is the key's own value, for exact digit placement.
#[derive(Default)]
pub(crate) struct IdentityHasher(u64);

impl Hasher for IdentityHasher {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = (self.0 << 8) | u64::from(b);
        }
    }

    fn write_u64(&mut self, n: u64) {
        self.0 = n;
    }

    fn write_u8(&mut self, n: u8) {
        self.0 = u64::from(n);
    }
}

pub(crate) type IdentityBuild = BuildHasherDefault<IdentityHasher>;

/// Two-level trie (six hash bits in three-bit digits) with identity
/// hashing: octal key literals spell out the digit path, least-significant
/// digit first.
pub(crate) type MiniMap<V = &'static str> = SharingMap<u64, V, IdentityBuild, AllowEqual, RcK, 6, 3>;

/// Three-level variant for deeper migration spines.
pub(crate) type DeepMap = SharingMap<u64, &'static str, IdentityBuild, AllowEqual, RcK, 9, 3>;
