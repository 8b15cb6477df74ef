//! Delta views: structural diffs driven by physical sharing.

use super::util::MiniMap;
use crate::SharingMap;

#[test]
fn clone_with_one_replace_only_common() {
    let mut a: SharingMap<u64, &str> = SharingMap::new();
    a.insert(1_u64, "a");
    a.insert(2_u64, "b");
    let mut b = a.clone();
    b.replace(&1, "A");

    let mut out = Vec::new();
    a.get_delta_view(&b, &mut out, true);

    assert_eq!(out.len(), 1);
    assert_eq!(*out[0].key, 1);
    assert_eq!(*out[0].value, "a");
    assert_eq!(out[0].other_value, Some(&"A"));
    assert!(out[0].is_in_both_maps());
}

#[test]
fn clone_with_one_replace_full() {
    let mut a: SharingMap<u64, &str> = SharingMap::new();
    a.insert(1_u64, "a");
    a.insert(2_u64, "b");
    let mut b = a.clone();
    b.replace(&1, "A");

    // Key 2 still lives in a shared subtree, so the full view is no larger.
    let mut out = Vec::new();
    a.get_delta_view(&b, &mut out, false);
    assert_eq!(out.len(), 1);
    assert_eq!(*out[0].key, 1);
}

#[test]
fn identical_clones_have_an_empty_delta() {
    let mut a: SharingMap<u64, u64> = SharingMap::new();
    for i in 0_u64..50 {
        a.insert(i, i);
    }
    let b = a.clone();

    let mut out = Vec::new();
    a.get_delta_view(&b, &mut out, false);
    assert!(out.is_empty());
}

#[test]
fn independently_built_maps_report_everything_unshared() {
    let mut a: SharingMap<u64, &str> = SharingMap::new();
    a.insert(1_u64, "a");
    a.insert(2_u64, "b");
    let mut b: SharingMap<u64, &str> = SharingMap::new();
    b.insert(1_u64, "a");

    // No physical sharing: key 1 shows up as a difference even though the
    // values are equal, and key 2 as present only in `a`.
    let mut out = Vec::new();
    a.get_delta_view(&b, &mut out, false);
    assert_eq!(out.len(), 2);

    let one = out.iter().find(|item| *item.key == 1).unwrap();
    assert_eq!(one.other_value, Some(&"a"));
    let two = out.iter().find(|item| *item.key == 2).unwrap();
    assert_eq!(two.other_value, None);

    let mut common = Vec::new();
    a.get_delta_view(&b, &mut common, true);
    assert_eq!(common.len(), 1);
    assert_eq!(*common[0].key, 1);
}

#[test]
fn erased_key_is_reported_a_only() {
    let mut a: SharingMap<u64, u64> = SharingMap::new();
    for i in 0_u64..10 {
        a.insert(i, i);
    }
    let mut b = a.clone();
    b.erase(&3);

    let mut out = Vec::new();
    a.get_delta_view(&b, &mut out, false);
    assert_eq!(out.len(), 1);
    assert_eq!(*out[0].key, 3);
    assert!(!out[0].is_in_both_maps());

    let mut common = Vec::new();
    a.get_delta_view(&b, &mut common, true);
    assert!(common.is_empty());
}

/// The view is asymmetric: the erasing side has nothing unshared to report.
#[test]
fn reverse_direction_after_erase_is_empty() {
    let mut a: SharingMap<u64, u64> = SharingMap::new();
    for i in 0_u64..10 {
        a.insert(i, i);
    }
    let mut b = a.clone();
    b.erase(&3);

    let mut out = Vec::new();
    b.get_delta_view(&a, &mut out, false);
    assert!(out.is_empty());
}

#[test]
fn insert_on_clone_is_invisible_from_the_original() {
    let mut a: SharingMap<u64, u64> = SharingMap::new();
    for i in 0_u64..10 {
        a.insert(i, i);
    }
    let mut b = a.clone();
    b.insert(100, 100);

    let mut out = Vec::new();
    a.get_delta_view(&b, &mut out, false);
    assert!(out.is_empty());

    let mut reverse = Vec::new();
    b.get_delta_view(&a, &mut reverse, false);
    assert_eq!(reverse.len(), 1);
    assert_eq!(*reverse[0].key, 100);
}

#[test]
fn empty_maps() {
    let empty: SharingMap<u64, u64> = SharingMap::new();
    let mut full: SharingMap<u64, u64> = SharingMap::new();
    full.insert(1_u64, 1);

    let mut out = Vec::new();
    empty.get_delta_view(&full, &mut out, false);
    assert!(out.is_empty());

    let mut out = Vec::new();
    full.get_delta_view(&empty, &mut out, false);
    assert_eq!(out.len(), 1);

    let mut out = Vec::new();
    full.get_delta_view(&empty, &mut out, true);
    assert!(out.is_empty());
}

/// Divergent edit sets on two clones: the delta stays bounded by the keys
/// actually touched.
#[test]
fn delta_is_bounded_by_the_edit_sets() {
    let mut ancestor: SharingMap<u64, u64> = SharingMap::new();
    for i in 0_u64..50 {
        ancestor.insert(i, i);
    }
    let mut a = ancestor.clone();
    let mut b = ancestor.clone();

    a.replace(&10, 1_000);
    b.replace(&20, 2_000);
    b.replace(&21, 2_100);
    b.erase(&30);
    b.insert(99, 9_900);

    let mut out = Vec::new();
    a.get_delta_view(&b, &mut out, false);

    // Reported: 10 (changed in a), 20 and 21 (changed in b), 30 (a-only).
    let mut keys: Vec<u64> = out.iter().map(|item| *item.key).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec![10, 20, 21, 30]);
}

// ---------------------------------------------------------------------------
// Ragged pairings on the two-level identity-hash map
// ---------------------------------------------------------------------------

/// Migration moves the existing container handle down unchanged, so the
/// interior-against-container walk finds it shared and reports nothing.
#[test]
fn migrated_container_still_shares() {
    let mut b: MiniMap = MiniMap::new();
    b.insert(0o02, "x");
    let mut a = b.clone();
    a.insert(0o22, "y");

    let mut out = Vec::new();
    a.get_delta_view(&b, &mut out, false);
    assert_eq!(out.len(), 1);
    assert_eq!(*out[0].key, 0o22);
    assert!(!out[0].is_in_both_maps());

    let mut common = Vec::new();
    a.get_delta_view(&b, &mut common, true);
    assert!(common.is_empty());
}

/// The shallow side drives its lone leaf's hash down the deeper trie.
#[test]
fn lone_leaf_descends_into_the_deeper_map() {
    let mut b: MiniMap = MiniMap::new();
    b.insert(0o02, "x");
    let mut a = b.clone();
    a.insert(0o22, "y");

    let mut out = Vec::new();
    b.get_delta_view(&a, &mut out, false);
    assert!(out.is_empty(), "the lone leaf is still shared");

    a.replace(&0o02, "x2");
    let mut out = Vec::new();
    b.get_delta_view(&a, &mut out, false);
    assert_eq!(out.len(), 1);
    assert_eq!(*out[0].key, 0o02);
    assert_eq!(*out[0].value, "x");
    assert_eq!(out[0].other_value, Some(&"x2"));
}

/// A branch missing from the deeper map surfaces as present-only-here.
#[test]
fn lone_leaf_with_no_branch_in_the_other_map() {
    let mut a: MiniMap = MiniMap::new();
    a.insert(0o13, "mine");

    let mut b: MiniMap = MiniMap::new();
    b.insert(0o03, "left");
    b.insert(0o23, "right");

    let mut out = Vec::new();
    a.get_delta_view(&b, &mut out, false);
    assert_eq!(out.len(), 1);
    assert_eq!(*out[0].key, 0o13);
    assert!(!out[0].is_in_both_maps());

    let mut common = Vec::new();
    a.get_delta_view(&b, &mut common, true);
    assert!(common.is_empty());
}

/// Bottom chains compare leaf by leaf; untouched chain members stay shared.
#[test]
fn chain_delta_reports_only_the_replaced_leaf() {
    let mut a: MiniMap = MiniMap::new();
    a.insert(19, "a");
    a.insert(83, "b");
    let mut b = a.clone();
    b.replace(&19, "A");

    let mut out = Vec::new();
    a.get_delta_view(&b, &mut out, false);
    assert_eq!(out.len(), 1);
    assert_eq!(*out[0].key, 19);
    assert_eq!(out[0].other_value, Some(&"A"));
}
