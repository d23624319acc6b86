//! Identifiers for independent variables.

use std::fmt::{self, Display};

/// Opaque identifier of an independent variable.
///
/// Ids are totally ordered; an [`IndexSet`](crate::IndexSet) stores them in
/// ascending order. They carry no meaning beyond identity and order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct VarId(u32);

impl VarId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        VarId(id)
    }

    /// The raw numeric id.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// The id as a `usize`, handy for indexing dense input slices.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for VarId {
    #[inline]
    fn from(id: u32) -> Self {
        VarId(id)
    }
}

impl From<usize> for VarId {
    /// # Panics
    ///
    /// Panics if `id` does not fit in a `u32`.
    #[inline]
    fn from(id: usize) -> Self {
        let raw = u32::try_from(id).unwrap_or_else(|_| panic!("variable id {id} exceeds u32::MAX"));
        VarId(raw)
    }
}

impl Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}
