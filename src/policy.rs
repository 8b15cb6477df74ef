//! Write policies for `replace` and `update`.
//!
//! Replacing a value with an equal value needlessly breaks sharing: the
//! copy-on-write path from the root to the leaf is cloned even though no
//! observable change was made. The [`FailIfEqual`] policy turns such writes
//! into panics so callers can find and remove them; [`AllowEqual`] accepts
//! them silently and compiles the checks away.

/// Decides whether `replace`/`update` must reject writes that leave the
/// stored value unchanged.
pub trait WritePolicy<V> {
    /// Pre-write state captured by [`snapshot`](Self::snapshot) and consumed
    /// by [`unchanged`](Self::unchanged).
    type Snapshot;

    /// Captures whatever is needed to detect a no-change update.
    fn snapshot(value: &V) -> Self::Snapshot;

    /// Returns `true` if the value is unchanged relative to the snapshot.
    fn unchanged(snapshot: &Self::Snapshot, value: &V) -> bool;

    /// Returns `true` if `new` equals `old`.
    fn values_equal(old: &V, new: &V) -> bool;
}

/// Default policy: equal-value writes are permitted and never inspected.
///
/// Places no equality requirement on the value type.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllowEqual;

impl<V> WritePolicy<V> for AllowEqual {
    type Snapshot = ();

    fn snapshot(_value: &V) {}

    fn unchanged(_snapshot: &(), _value: &V) -> bool {
        false
    }

    fn values_equal(_old: &V, _new: &V) -> bool {
        false
    }
}

/// Debugging policy: `replace` and `update` panic when the written value
/// equals the previous one.
///
/// Selecting this policy requires `V: PartialEq` (and `V: Clone` for the
/// update-path snapshot); the requirement exists only when the policy does.
#[derive(Clone, Copy, Debug, Default)]
pub struct FailIfEqual;

impl<V: Clone + PartialEq> WritePolicy<V> for FailIfEqual {
    type Snapshot = V;

    fn snapshot(value: &V) -> V {
        value.clone()
    }

    fn unchanged(snapshot: &V, value: &V) -> bool {
        snapshot == value
    }

    fn values_equal(old: &V, new: &V) -> bool {
        old == new
    }
}
