//! Fail-if-equal write policy.

use crate::{DefaultHashBuilder, FailIfEqual, SharingMap};

type StrictMap = SharingMap<u64, i32, DefaultHashBuilder, FailIfEqual>;

#[test]
fn replace_with_a_different_value_is_fine() {
    let mut map = StrictMap::new();
    map.insert(1, 10);
    map.replace(&1, 20);
    assert_eq!(map.get(&1), Some(&20));
}

#[test]
#[should_panic(expected = "replace: value unchanged")]
fn replace_with_an_equal_value_panics() {
    let mut map = StrictMap::new();
    map.insert(1, 10);
    map.replace(&1, 10);
}

#[test]
fn update_that_changes_the_value_is_fine() {
    let mut map = StrictMap::new();
    map.insert(1, 10);
    map.update(&1, |v| *v += 1);
    assert_eq!(map.get(&1), Some(&11));
}

#[test]
#[should_panic(expected = "update: mutator made no change")]
fn update_that_makes_no_change_panics() {
    let mut map = StrictMap::new();
    map.insert(1, 10);
    map.update(&1, |_v| {});
}

/// The default policy accepts equal-value writes.
#[test]
fn default_policy_accepts_equal_writes() {
    let mut map: SharingMap<u64, i32> = SharingMap::new();
    map.insert(1_u64, 10);
    map.replace(&1, 10);
    map.update(&1, |_v| {});
    assert_eq!(map.get(&1), Some(&10));
}
