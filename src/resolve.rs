//! Translating ids between index spaces.

use crate::index_set::IndexSet;
use crate::var::VarId;

/// Position of `id` within `set`, or `None` when `set` does not contain it.
///
/// Absence is an ordinary outcome: it means the partial derivative with
/// respect to `id` is zero.
#[inline]
pub fn resolve(id: VarId, set: &IndexSet) -> Option<usize> {
    set.as_slice().binary_search(&id).ok()
}

/// Where a merged id lives in the two operands of a binary operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Presence {
    /// Present in both operands, at `(left, right)`.
    Both(usize, usize),
    /// Only the left operand depends on the id.
    LeftOnly(usize),
    /// Only the right operand depends on the id.
    RightOnly(usize),
}

impl Presence {
    /// Resolve `id` against both operand sets.
    ///
    /// Returns `None` only if neither set contains `id`, which cannot happen
    /// for ids taken from the merge of the two sets.
    #[inline]
    pub fn of(id: VarId, left: &IndexSet, right: &IndexSet) -> Option<Presence> {
        match (resolve(id, left), resolve(id, right)) {
            (Some(l), Some(r)) => Some(Presence::Both(l, r)),
            (Some(l), None) => Some(Presence::LeftOnly(l)),
            (None, Some(r)) => Some(Presence::RightOnly(r)),
            (None, None) => None,
        }
    }
}
