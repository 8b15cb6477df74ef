//! Diagnostic sharing statistics across a family of maps.

use std::collections::HashSet;

use archery::SharedPointerKind;

use crate::map::SharingMap;
use crate::node::{Container, Interior, Leaf, Node};

/// Node and leaf counts over a collection of maps.
///
/// `num_nodes` and `num_leaves` count a shared node once per map that
/// reaches it; the `num_unique_*` fields count each physical node once.
/// Leaves are nodes too, so `num_nodes >= num_leaves`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SharingStats {
    /// Interior, container, and leaf nodes, once per holding map.
    pub num_nodes: usize,
    /// Interior, container, and leaf nodes, once overall.
    pub num_unique_nodes: usize,
    /// Leaves, once per holding map.
    pub num_leaves: usize,
    /// Leaves, once overall.
    pub num_unique_leaves: usize,
}

enum Visit<'a, K, V, P: SharedPointerKind> {
    Interior(&'a Interior<K, V, P>),
    Container(&'a Container<K, V, P>),
}

impl<K, V, H, W, P: SharedPointerKind, const BITS: u32, const CHUNK: u32>
    SharingMap<K, V, H, W, P, BITS, CHUNK>
{
    /// Computes sharing statistics for a family of maps.
    ///
    /// One traversal per statistic keeps the bookkeeping independent; this
    /// is a diagnostic facility, not a fast path.
    #[must_use]
    pub fn sharing_stats(maps: &[&Self]) -> SharingStats {
        let mut marked = HashSet::new();
        let mut stats = SharingStats::default();

        for map in maps {
            stats.num_nodes += map.count_unmarked(false, &mut marked, false);
        }
        debug_assert!(marked.is_empty());

        for map in maps {
            stats.num_unique_nodes += map.count_unmarked(false, &mut marked, true);
        }
        marked.clear();

        for map in maps {
            stats.num_leaves += map.count_unmarked(true, &mut marked, false);
        }
        debug_assert!(marked.is_empty());

        for map in maps {
            stats.num_unique_leaves += map.count_unmarked(true, &mut marked, true);
        }

        stats
    }

    /// Counts this map's nodes (or only its leaves), skipping subtrees
    /// whose root is already in `marked` and, when `mark` is set, marking
    /// every node seen.
    fn count_unmarked(
        &self,
        leaves_only: bool,
        marked: &mut HashSet<*const ()>,
        mark: bool,
    ) -> usize {
        let Some(root) = self.root.as_deref() else {
            return 0;
        };

        let mut count = 0;
        let mut stack = vec![Visit::Interior(root)];

        while let Some(visit) = stack.pop() {
            let addr = match &visit {
                Visit::Interior(interior) => (*interior as *const Interior<K, V, P>).cast::<()>(),
                Visit::Container(container) => {
                    (*container as *const Container<K, V, P>).cast::<()>()
                }
            };
            if marked.contains(&addr) {
                continue;
            }
            if mark {
                marked.insert(addr);
            }
            if !leaves_only {
                count += 1;
            }

            match visit {
                Visit::Interior(interior) => {
                    for child in interior.children() {
                        stack.push(match child {
                            Node::Interior(p) => Visit::Interior(&**p),
                            Node::Container(p) => Visit::Container(&**p),
                        });
                    }
                }
                Visit::Container(container) => {
                    for leaf in &container.leaves {
                        let leaf_addr = (&**leaf as *const Leaf<K, V>).cast::<()>();
                        if marked.contains(&leaf_addr) {
                            continue;
                        }
                        if mark {
                            marked.insert(leaf_addr);
                        }
                        count += 1;
                    }
                }
            }
        }

        count
    }
}
