use num_traits::{FromPrimitive, One, ToPrimitive, Zero};

use crate::float::Float;
use crate::sparse_dual::SparseDual;

// Conversions from plain numbers produce constants; conversions out read the
// primal value.

impl<F: Float> Zero for SparseDual<F> {
    #[inline]
    fn zero() -> Self {
        SparseDual::constant(F::zero())
    }
    #[inline]
    fn is_zero(&self) -> bool {
        self.re.is_zero()
    }
}

impl<F: Float> One for SparseDual<F> {
    #[inline]
    fn one() -> Self {
        SparseDual::constant(F::one())
    }
}

impl<F: Float> FromPrimitive for SparseDual<F> {
    #[inline]
    fn from_i64(n: i64) -> Option<Self> {
        F::from_i64(n).map(SparseDual::constant)
    }
    #[inline]
    fn from_u64(n: u64) -> Option<Self> {
        F::from_u64(n).map(SparseDual::constant)
    }
    #[inline]
    fn from_f32(n: f32) -> Option<Self> {
        F::from_f32(n).map(SparseDual::constant)
    }
    #[inline]
    fn from_f64(n: f64) -> Option<Self> {
        F::from_f64(n).map(SparseDual::constant)
    }
}

impl<F: Float> ToPrimitive for SparseDual<F> {
    #[inline]
    fn to_i64(&self) -> Option<i64> {
        self.re.to_i64()
    }
    #[inline]
    fn to_u64(&self) -> Option<u64> {
        self.re.to_u64()
    }
    #[inline]
    fn to_f32(&self) -> Option<f32> {
        self.re.to_f32()
    }
    #[inline]
    fn to_f64(&self) -> Option<f64> {
        self.re.to_f64()
    }
}
