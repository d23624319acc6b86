use std::fmt;

use crate::var::VarId;

/// Errors raised when a caller hands in parts that break the index-set
/// invariants.
///
/// Arithmetic never produces these: sets built through seeding and merging
/// are valid by construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IndexSetError {
    /// Ids are not strictly increasing (out of order or duplicated).
    Unsorted {
        /// Position of the offending id.
        position: usize,
        /// The id just before it.
        previous: VarId,
        /// The offending id.
        next: VarId,
    },
    /// Derivative vector length differs from the index set size.
    LengthMismatch {
        /// Size of the index set.
        expected: usize,
        /// Length of the supplied derivatives.
        found: usize,
    },
}

impl fmt::Display for IndexSetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexSetError::Unsorted {
                position,
                previous,
                next,
            } => write!(
                f,
                "index set is not strictly increasing at position {}: {} follows {}",
                position, next, previous
            ),
            IndexSetError::LengthMismatch { expected, found } => write!(
                f,
                "derivative count {} does not match index set size {}",
                found, expected
            ),
        }
    }
}

impl std::error::Error for IndexSetError {}
