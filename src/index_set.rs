//! Sorted, duplicate-free sets of variable ids and their union.
//!
//! An [`IndexSet`] labels the derivative slots of a
//! [`SparseDual`](crate::SparseDual): slot `i` holds the partial derivative
//! with respect to the `i`-th id of the set. Sets are immutable and shared
//! behind an `Arc`, so every dual produced from the same operands can point
//! at one allocation.

use std::fmt::{self, Display};
use std::sync::Arc;

use crate::error::IndexSetError;
use crate::var::VarId;

/// Strictly increasing sequence of [`VarId`]s.
#[derive(Clone)]
pub struct IndexSet {
    ids: Arc<[VarId]>,
}

impl IndexSet {
    /// The set with no ids. Constants carry it.
    #[inline]
    pub fn empty() -> Self {
        IndexSet { ids: Arc::from([]) }
    }

    /// The set `{id}`.
    #[inline]
    pub fn singleton(id: VarId) -> Self {
        IndexSet { ids: Arc::from([id]) }
    }

    /// Build a set from ids that must already be strictly increasing.
    ///
    /// # Errors
    ///
    /// Returns [`IndexSetError::Unsorted`] at the first position where the
    /// ids fail to increase.
    pub fn from_sorted(ids: Vec<VarId>) -> Result<Self, IndexSetError> {
        if let Some(position) = ids.windows(2).position(|w| w[0] >= w[1]) {
            let err = IndexSetError::Unsorted {
                position: position + 1,
                previous: ids[position],
                next: ids[position + 1],
            };
            tracing::trace!(%err, "rejected index set");
            return Err(err);
        }
        Ok(IndexSet { ids: ids.into() })
    }

    /// Wrap ids produced by merging; they are ascending by construction.
    #[inline]
    pub(crate) fn from_merged(ids: Vec<VarId>) -> Self {
        debug_assert!(ids.windows(2).all(|w| w[0] < w[1]));
        IndexSet { ids: ids.into() }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[VarId] {
        &self.ids
    }

    #[inline]
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, VarId>> {
        self.ids.iter().copied()
    }

    /// Position of `id` within the set, or `None` when absent.
    #[inline]
    pub fn position(&self, id: VarId) -> Option<usize> {
        crate::resolve::resolve(id, self)
    }

    #[inline]
    pub fn contains(&self, id: VarId) -> bool {
        self.position(id).is_some()
    }

    /// Whether every id of `self` also appears in `other`.
    pub fn is_subset(&self, other: &IndexSet) -> bool {
        if self.len() > other.len() {
            return false;
        }
        let mut rest = other.as_slice();
        for id in self.iter() {
            match rest.binary_search(&id) {
                Ok(pos) => rest = &rest[pos + 1..],
                Err(_) => return false,
            }
        }
        true
    }

    /// Whether both handles point at the same allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &IndexSet) -> bool {
        Arc::ptr_eq(&self.ids, &other.ids)
    }

    /// Same ids, same order. Cheap when the sets are shared.
    #[inline]
    pub(crate) fn same_as(&self, other: &IndexSet) -> bool {
        self.ptr_eq(other) || self.ids == other.ids
    }
}

/// Sorted union of two index sets.
///
/// Commutative and idempotent. When the operands are equal, or one of them is
/// empty, the result shares the other operand's allocation.
pub fn merge(a: &IndexSet, b: &IndexSet) -> IndexSet {
    if a.same_as(b) || b.is_empty() {
        return a.clone();
    }
    if a.is_empty() {
        return b.clone();
    }
    IndexSet::from_merged(union_sorted(a.as_slice(), b.as_slice()))
}

/// Two-pointer union of strictly increasing slices.
fn union_sorted(a: &[VarId], b: &[VarId]) -> Vec<VarId> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => {
                out.push(a[i]);
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                out.push(b[j]);
                j += 1;
            }
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out.extend_from_slice(&a[i..]);
    out.extend_from_slice(&b[j..]);
    out
}

impl Default for IndexSet {
    fn default() -> Self {
        IndexSet::empty()
    }
}

impl PartialEq for IndexSet {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl Eq for IndexSet {}

impl std::hash::Hash for IndexSet {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.ids.hash(state);
    }
}

impl fmt::Debug for IndexSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.ids.iter()).finish()
    }
}

impl Display for IndexSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, id) in self.ids.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", id)?;
        }
        write!(f, "}}")
    }
}

impl FromIterator<VarId> for IndexSet {
    /// Collect arbitrary ids; they are sorted and deduplicated.
    fn from_iter<I: IntoIterator<Item = VarId>>(iter: I) -> Self {
        let mut ids: Vec<VarId> = iter.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();
        IndexSet::from_merged(ids)
    }
}

impl<'a> IntoIterator for &'a IndexSet {
    type Item = VarId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, VarId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(feature = "serde")]
mod index_set_serde {
    use super::IndexSet;
    use crate::var::VarId;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for IndexSet {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            self.as_slice().serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for IndexSet {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let ids = Vec::<VarId>::deserialize(deserializer)?;
            IndexSet::from_sorted(ids).map_err(serde::de::Error::custom)
        }
    }
}
