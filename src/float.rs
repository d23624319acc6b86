use std::fmt::{Debug, Display};

use num_traits::{Float as NumFloat, FloatConst, FromPrimitive};

/// Marker trait for the base floating-point types (`f32`, `f64`).
///
/// Values and partial derivatives of a [`SparseDual`](crate::SparseDual) are
/// stored in this type. Only primitive floats implement it.
pub trait Float:
    NumFloat + FloatConst + FromPrimitive + Copy + Send + Sync + Default + Debug + Display + 'static
{
}

impl Float for f32 {}
impl Float for f64 {}
