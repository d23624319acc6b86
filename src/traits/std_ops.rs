use std::iter::{Product, Sum};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::engine;
use crate::float::Float;
use crate::sparse_dual::SparseDual;

// ──────────────────────────────────────────────
//  SparseDual ⊕ SparseDual
// ──────────────────────────────────────────────

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $rule:path) => {
        impl<F: Float> $trait<&SparseDual<F>> for &SparseDual<F> {
            type Output = SparseDual<F>;
            #[inline]
            fn $method(self, rhs: &SparseDual<F>) -> SparseDual<F> {
                $rule(self, rhs)
            }
        }

        impl<F: Float> $trait<SparseDual<F>> for SparseDual<F> {
            type Output = SparseDual<F>;
            #[inline]
            fn $method(self, rhs: SparseDual<F>) -> SparseDual<F> {
                $rule(&self, &rhs)
            }
        }

        impl<F: Float> $trait<&SparseDual<F>> for SparseDual<F> {
            type Output = SparseDual<F>;
            #[inline]
            fn $method(self, rhs: &SparseDual<F>) -> SparseDual<F> {
                $rule(&self, rhs)
            }
        }

        impl<F: Float> $trait<SparseDual<F>> for &SparseDual<F> {
            type Output = SparseDual<F>;
            #[inline]
            fn $method(self, rhs: SparseDual<F>) -> SparseDual<F> {
                $rule(self, &rhs)
            }
        }
    };
}

impl_binary_op!(Add, add, engine::add);
impl_binary_op!(Sub, sub, engine::subtract);
impl_binary_op!(Mul, mul, engine::multiply);
impl_binary_op!(Div, div, engine::divide);

macro_rules! impl_assign_op {
    ($trait:ident, $method:ident, $rule:path) => {
        impl<F: Float> $trait<SparseDual<F>> for SparseDual<F> {
            #[inline]
            fn $method(&mut self, rhs: SparseDual<F>) {
                *self = $rule(&*self, &rhs);
            }
        }

        impl<F: Float> $trait<&SparseDual<F>> for SparseDual<F> {
            #[inline]
            fn $method(&mut self, rhs: &SparseDual<F>) {
                *self = $rule(&*self, rhs);
            }
        }
    };
}

impl_assign_op!(AddAssign, add_assign, engine::add);
impl_assign_op!(SubAssign, sub_assign, engine::subtract);
impl_assign_op!(MulAssign, mul_assign, engine::multiply);
impl_assign_op!(DivAssign, div_assign, engine::divide);

impl<F: Float> Neg for SparseDual<F> {
    type Output = Self;
    #[inline]
    fn neg(mut self) -> Self {
        self.re = -self.re;
        self.eps.iter_mut().for_each(|d| *d = -*d);
        self
    }
}

impl<F: Float> Neg for &SparseDual<F> {
    type Output = SparseDual<F>;
    #[inline]
    fn neg(self) -> SparseDual<F> {
        -self.clone()
    }
}

// ──────────────────────────────────────────────
//  Mixed ops with plain scalars
// ──────────────────────────────────────────────

// A scalar operand has no index set, so none of these merge.

#[inline]
fn shift<F: Float>(mut x: SparseDual<F>, c: F) -> SparseDual<F> {
    x.re = x.re + c;
    x
}

#[inline]
fn scale<F: Float>(mut x: SparseDual<F>, c: F) -> SparseDual<F> {
    x.re = x.re * c;
    x.eps.iter_mut().for_each(|d| *d = *d * c);
    x
}

/// `c - x`
#[inline]
fn rsub<F: Float>(x: SparseDual<F>, c: F) -> SparseDual<F> {
    shift(-x, c)
}

/// `c / x`
#[inline]
fn rdiv<F: Float>(mut x: SparseDual<F>, c: F) -> SparseDual<F> {
    let inv = F::one() / x.re;
    let factor = -c * inv * inv;
    x.re = c * inv;
    x.eps.iter_mut().for_each(|d| *d = *d * factor);
    x
}

macro_rules! impl_sparse_dual_scalar_ops {
    ($f:ty) => {
        impl Add<$f> for SparseDual<$f> {
            type Output = SparseDual<$f>;
            #[inline]
            fn add(self, rhs: $f) -> SparseDual<$f> {
                shift(self, rhs)
            }
        }

        impl Add<$f> for &SparseDual<$f> {
            type Output = SparseDual<$f>;
            #[inline]
            fn add(self, rhs: $f) -> SparseDual<$f> {
                shift(self.clone(), rhs)
            }
        }

        impl Add<SparseDual<$f>> for $f {
            type Output = SparseDual<$f>;
            #[inline]
            fn add(self, rhs: SparseDual<$f>) -> SparseDual<$f> {
                shift(rhs, self)
            }
        }

        impl Add<&SparseDual<$f>> for $f {
            type Output = SparseDual<$f>;
            #[inline]
            fn add(self, rhs: &SparseDual<$f>) -> SparseDual<$f> {
                shift(rhs.clone(), self)
            }
        }

        impl Sub<$f> for SparseDual<$f> {
            type Output = SparseDual<$f>;
            #[inline]
            fn sub(self, rhs: $f) -> SparseDual<$f> {
                shift(self, -rhs)
            }
        }

        impl Sub<$f> for &SparseDual<$f> {
            type Output = SparseDual<$f>;
            #[inline]
            fn sub(self, rhs: $f) -> SparseDual<$f> {
                shift(self.clone(), -rhs)
            }
        }

        impl Sub<SparseDual<$f>> for $f {
            type Output = SparseDual<$f>;
            #[inline]
            fn sub(self, rhs: SparseDual<$f>) -> SparseDual<$f> {
                rsub(rhs, self)
            }
        }

        impl Sub<&SparseDual<$f>> for $f {
            type Output = SparseDual<$f>;
            #[inline]
            fn sub(self, rhs: &SparseDual<$f>) -> SparseDual<$f> {
                rsub(rhs.clone(), self)
            }
        }

        impl Mul<$f> for SparseDual<$f> {
            type Output = SparseDual<$f>;
            #[inline]
            fn mul(self, rhs: $f) -> SparseDual<$f> {
                scale(self, rhs)
            }
        }

        impl Mul<$f> for &SparseDual<$f> {
            type Output = SparseDual<$f>;
            #[inline]
            fn mul(self, rhs: $f) -> SparseDual<$f> {
                scale(self.clone(), rhs)
            }
        }

        impl Mul<SparseDual<$f>> for $f {
            type Output = SparseDual<$f>;
            #[inline]
            fn mul(self, rhs: SparseDual<$f>) -> SparseDual<$f> {
                scale(rhs, self)
            }
        }

        impl Mul<&SparseDual<$f>> for $f {
            type Output = SparseDual<$f>;
            #[inline]
            fn mul(self, rhs: &SparseDual<$f>) -> SparseDual<$f> {
                scale(rhs.clone(), self)
            }
        }

        impl Div<$f> for SparseDual<$f> {
            type Output = SparseDual<$f>;
            #[inline]
            fn div(self, rhs: $f) -> SparseDual<$f> {
                scale(self, 1.0 / rhs)
            }
        }

        impl Div<$f> for &SparseDual<$f> {
            type Output = SparseDual<$f>;
            #[inline]
            fn div(self, rhs: $f) -> SparseDual<$f> {
                self.clone() / rhs
            }
        }

        impl Div<SparseDual<$f>> for $f {
            type Output = SparseDual<$f>;
            #[inline]
            fn div(self, rhs: SparseDual<$f>) -> SparseDual<$f> {
                rdiv(rhs, self)
            }
        }

        impl Div<&SparseDual<$f>> for $f {
            type Output = SparseDual<$f>;
            #[inline]
            fn div(self, rhs: &SparseDual<$f>) -> SparseDual<$f> {
                rdiv(rhs.clone(), self)
            }
        }

        impl AddAssign<$f> for SparseDual<$f> {
            #[inline]
            fn add_assign(&mut self, rhs: $f) {
                self.re += rhs;
            }
        }

        impl SubAssign<$f> for SparseDual<$f> {
            #[inline]
            fn sub_assign(&mut self, rhs: $f) {
                self.re -= rhs;
            }
        }

        impl MulAssign<$f> for SparseDual<$f> {
            #[inline]
            fn mul_assign(&mut self, rhs: $f) {
                self.re *= rhs;
                self.eps.iter_mut().for_each(|d| *d *= rhs);
            }
        }

        impl DivAssign<$f> for SparseDual<$f> {
            #[inline]
            fn div_assign(&mut self, rhs: $f) {
                let inv = 1.0 / rhs;
                self.re *= inv;
                self.eps.iter_mut().for_each(|d| *d *= inv);
            }
        }
    };
}

impl_sparse_dual_scalar_ops!(f32);
impl_sparse_dual_scalar_ops!(f64);

// ──────────────────────────────────────────────
//  Folding
// ──────────────────────────────────────────────

impl<F: Float> Sum for SparseDual<F> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(SparseDual::constant(F::zero()), |acc, x| engine::add(&acc, &x))
    }
}

impl<'a, F: Float> Sum<&'a SparseDual<F>> for SparseDual<F> {
    fn sum<I: Iterator<Item = &'a SparseDual<F>>>(iter: I) -> Self {
        iter.fold(SparseDual::constant(F::zero()), |acc, x| engine::add(&acc, x))
    }
}

impl<F: Float> Product for SparseDual<F> {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(SparseDual::constant(F::one()), |acc, x| {
            engine::multiply(&acc, &x)
        })
    }
}

impl<'a, F: Float> Product<&'a SparseDual<F>> for SparseDual<F> {
    fn product<I: Iterator<Item = &'a SparseDual<F>>>(iter: I) -> Self {
        iter.fold(SparseDual::constant(F::one()), |acc, x| {
            engine::multiply(&acc, x)
        })
    }
}
