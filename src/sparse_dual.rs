//! Forward-mode dual numbers with sparse derivative storage.

use std::fmt::{self, Display};

use crate::engine::{self, linear};
use crate::error::IndexSetError;
use crate::float::Float;
use crate::index_set::IndexSet;
use crate::var::VarId;

/// Forward-mode dual number carrying partials only for the variables it
/// depends on.
///
/// `eps[i]` is the partial derivative of `re` with respect to the `i`-th id
/// of `vars`; every other partial is zero and is not stored. Values are never
/// mutated after construction apart from the compound-assignment operators,
/// which replace `self` wholesale.
#[derive(Clone, Debug)]
pub struct SparseDual<F: Float> {
    pub(crate) re: F,
    pub(crate) vars: IndexSet,
    pub(crate) eps: Vec<F>,
}

impl<F: Float> Default for SparseDual<F> {
    fn default() -> Self {
        SparseDual::constant(F::zero())
    }
}

impl<F: Float> Display for SparseDual<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.re)?;
        for (id, d) in self.iter() {
            write!(f, " + {}\u{03b5}{}", d, id)?;
        }
        Ok(())
    }
}

impl<F: Float> From<F> for SparseDual<F> {
    #[inline]
    fn from(val: F) -> Self {
        SparseDual::constant(val)
    }
}

impl<F: Float> SparseDual<F> {
    /// Assemble a dual from explicit parts.
    ///
    /// # Errors
    ///
    /// Returns [`IndexSetError::LengthMismatch`] if `eps` does not have one
    /// entry per id of `vars`.
    pub fn from_parts(re: F, vars: IndexSet, eps: Vec<F>) -> Result<Self, IndexSetError> {
        if vars.len() != eps.len() {
            let err = IndexSetError::LengthMismatch {
                expected: vars.len(),
                found: eps.len(),
            };
            tracing::trace!(%err, "rejected sparse dual");
            return Err(err);
        }
        Ok(SparseDual { re, vars, eps })
    }

    /// A constant: depends on no variable.
    #[inline]
    pub fn constant(re: F) -> Self {
        SparseDual {
            re,
            vars: IndexSet::empty(),
            eps: Vec::new(),
        }
    }

    /// Seed an independent variable: derivative one with respect to `id`.
    #[inline]
    pub fn variable(re: F, id: VarId) -> Self {
        SparseDual {
            re,
            vars: IndexSet::singleton(id),
            eps: vec![F::one()],
        }
    }

    /// Primal value.
    #[inline]
    pub fn value(&self) -> F {
        self.re
    }

    /// The variables this value depends on.
    #[inline]
    pub fn index_set(&self) -> &IndexSet {
        &self.vars
    }

    /// Stored partials, aligned with [`index_set`](Self::index_set).
    #[inline]
    pub fn derivatives(&self) -> &[F] {
        &self.eps
    }

    /// Number of stored partials.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.eps.len()
    }

    /// Partial derivative with respect to `id`; zero when the value does not
    /// depend on it.
    #[inline]
    pub fn derivative(&self, id: VarId) -> F {
        self.vars.position(id).map_or_else(F::zero, |i| self.eps[i])
    }

    /// Dense partials over `ids`, in the order given.
    pub fn gradient(&self, ids: &[VarId]) -> Vec<F> {
        ids.iter().map(|&id| self.derivative(id)).collect()
    }

    /// `(id, partial)` pairs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (VarId, F)> + '_ {
        self.vars.iter().zip(self.eps.iter().copied())
    }

    /// Split into value, index set and partials; the inverse of
    /// [`from_parts`](Self::from_parts).
    pub fn into_parts(self) -> (F, IndexSet, Vec<F>) {
        (self.re, self.vars, self.eps)
    }

    /// Apply the chain rule: given `f(self.re)` and `f'(self.re)`, produce the dual result.
    #[inline]
    fn chain(&self, f_val: F, f_deriv: F) -> Self {
        SparseDual {
            re: f_val,
            vars: self.vars.clone(),
            eps: self.eps.iter().map(|&d| d * f_deriv).collect(),
        }
    }

    // ── Powers ──

    #[inline]
    pub fn recip(&self) -> Self {
        let inv = F::one() / self.re;
        self.chain(inv, -inv * inv)
    }

    #[inline]
    pub fn sqrt(&self) -> Self {
        let s = self.re.sqrt();
        let two = F::one() + F::one();
        self.chain(s, F::one() / (two * s))
    }

    #[inline]
    pub fn cbrt(&self) -> Self {
        let c = self.re.cbrt();
        let three = F::one() + F::one() + F::one();
        self.chain(c, F::one() / (three * c * c))
    }

    #[inline]
    pub fn powi(&self, n: i32) -> Self {
        let val = self.re.powi(n);
        // x^0 is constant even at x = 0, where x^-1 is infinite.
        let deriv = if n == 0 {
            F::zero()
        } else {
            F::from_i32(n).map_or_else(F::nan, |nf| nf * self.re.powi(n - 1))
        };
        self.chain(val, deriv)
    }

    /// `self^n` for a constant exponent.
    #[inline]
    pub fn powf(&self, n: F) -> Self {
        let deriv = if n.is_zero() {
            F::zero()
        } else {
            n * self.re.powf(n - F::one())
        };
        self.chain(self.re.powf(n), deriv)
    }

    /// `self^n` where the exponent is itself a dual.
    pub fn pow(&self, n: &Self) -> Self {
        // d(x^y) = y·x^(y-1)·dx + x^y·ln(x)·dy
        let val = self.re.powf(n.re);
        let a = if n.re.is_zero() {
            F::zero()
        } else {
            n.re * self.re.powf(n.re - F::one())
        };
        // 0^y is identically zero for y > 0, so ln(0) never enters.
        let b = if self.re.is_zero() && n.re > F::zero() {
            F::zero()
        } else {
            val * self.re.ln()
        };
        linear(self, n, val, a, b)
    }

    // ── Exp/Log ──

    #[inline]
    pub fn exp(&self) -> Self {
        let e = self.re.exp();
        self.chain(e, e)
    }

    #[inline]
    pub fn exp2(&self) -> Self {
        let e = self.re.exp2();
        self.chain(e, e * F::LN_2())
    }

    #[inline]
    pub fn exp_m1(&self) -> Self {
        self.chain(self.re.exp_m1(), self.re.exp())
    }

    #[inline]
    pub fn ln(&self) -> Self {
        self.chain(self.re.ln(), F::one() / self.re)
    }

    #[inline]
    pub fn log2(&self) -> Self {
        self.chain(self.re.log2(), F::one() / (self.re * F::LN_2()))
    }

    #[inline]
    pub fn log10(&self) -> Self {
        self.chain(self.re.log10(), F::one() / (self.re * F::LN_10()))
    }

    #[inline]
    pub fn ln_1p(&self) -> Self {
        self.chain(self.re.ln_1p(), F::one() / (F::one() + self.re))
    }

    #[inline]
    pub fn log(&self, base: &Self) -> Self {
        engine::divide(&self.ln(), &base.ln())
    }

    // ── Trig ──

    #[inline]
    pub fn sin(&self) -> Self {
        self.chain(self.re.sin(), self.re.cos())
    }

    #[inline]
    pub fn cos(&self) -> Self {
        self.chain(self.re.cos(), -self.re.sin())
    }

    #[inline]
    pub fn tan(&self) -> Self {
        let c = self.re.cos();
        self.chain(self.re.tan(), F::one() / (c * c))
    }

    #[inline]
    pub fn sin_cos(&self) -> (Self, Self) {
        let (s, c) = self.re.sin_cos();
        (self.chain(s, c), self.chain(c, -s))
    }

    #[inline]
    pub fn asin(&self) -> Self {
        self.chain(
            self.re.asin(),
            F::one() / (F::one() - self.re * self.re).sqrt(),
        )
    }

    #[inline]
    pub fn acos(&self) -> Self {
        self.chain(
            self.re.acos(),
            -F::one() / (F::one() - self.re * self.re).sqrt(),
        )
    }

    #[inline]
    pub fn atan(&self) -> Self {
        self.chain(self.re.atan(), F::one() / (F::one() + self.re * self.re))
    }

    /// Four-quadrant `atan2(self, other)` with `self` as `y`.
    pub fn atan2(&self, other: &Self) -> Self {
        // d atan2(y, x) = (x·dy - y·dx) / (x² + y²)
        let denom = self.re * self.re + other.re * other.re;
        linear(
            self,
            other,
            self.re.atan2(other.re),
            other.re / denom,
            -self.re / denom,
        )
    }

    // ── Hyperbolic ──

    #[inline]
    pub fn sinh(&self) -> Self {
        self.chain(self.re.sinh(), self.re.cosh())
    }

    #[inline]
    pub fn cosh(&self) -> Self {
        self.chain(self.re.cosh(), self.re.sinh())
    }

    #[inline]
    pub fn tanh(&self) -> Self {
        let c = self.re.cosh();
        self.chain(self.re.tanh(), F::one() / (c * c))
    }

    #[inline]
    pub fn asinh(&self) -> Self {
        self.chain(
            self.re.asinh(),
            F::one() / (self.re * self.re + F::one()).sqrt(),
        )
    }

    #[inline]
    pub fn acosh(&self) -> Self {
        self.chain(
            self.re.acosh(),
            F::one() / (self.re * self.re - F::one()).sqrt(),
        )
    }

    #[inline]
    pub fn atanh(&self) -> Self {
        self.chain(self.re.atanh(), F::one() / (F::one() - self.re * self.re))
    }

    // ── Misc ──

    #[inline]
    pub fn abs(&self) -> Self {
        self.chain(self.re.abs(), self.re.signum())
    }

    // Piecewise-constant functions drop every dependency.

    #[inline]
    pub fn signum(&self) -> Self {
        SparseDual::constant(self.re.signum())
    }

    #[inline]
    pub fn floor(&self) -> Self {
        SparseDual::constant(self.re.floor())
    }

    #[inline]
    pub fn ceil(&self) -> Self {
        SparseDual::constant(self.re.ceil())
    }

    #[inline]
    pub fn round(&self) -> Self {
        SparseDual::constant(self.re.round())
    }

    #[inline]
    pub fn trunc(&self) -> Self {
        SparseDual::constant(self.re.trunc())
    }

    #[inline]
    pub fn fract(&self) -> Self {
        SparseDual {
            re: self.re.fract(),
            vars: self.vars.clone(),
            eps: self.eps.clone(),
        }
    }

    /// `self * a + b`.
    pub fn mul_add(&self, a: &Self, b: &Self) -> Self {
        let prod = engine::multiply(self, a);
        let mut out = engine::add(&prod, b);
        out.re = self.re.mul_add(a.re, b.re);
        out
    }

    pub fn hypot(&self, other: &Self) -> Self {
        let h = self.re.hypot(other.re);
        linear(self, other, h, self.re / h, other.re / h)
    }

    #[inline]
    pub fn max(&self, other: &Self) -> Self {
        if self.re >= other.re {
            self.clone()
        } else {
            other.clone()
        }
    }

    #[inline]
    pub fn min(&self, other: &Self) -> Self {
        if self.re <= other.re {
            self.clone()
        } else {
            other.clone()
        }
    }
}

impl<F: Float> PartialEq for SparseDual<F> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.re == other.re
    }
}

impl<F: Float> PartialOrd for SparseDual<F> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.re.partial_cmp(&other.re)
    }
}

#[cfg(feature = "serde")]
mod sparse_dual_serde {
    use super::SparseDual;
    use crate::index_set::IndexSet;
    use crate::Float;
    use serde::ser::SerializeStruct;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl<F: Float + Serialize> Serialize for SparseDual<F> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut s = serializer.serialize_struct("SparseDual", 3)?;
            s.serialize_field("value", &self.re)?;
            s.serialize_field("vars", &self.vars)?;
            s.serialize_field("derivatives", &self.eps)?;
            s.end()
        }
    }

    impl<'de, F: Float + Deserialize<'de>> Deserialize<'de> for SparseDual<F> {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            #[derive(Deserialize)]
            struct SparseDualData<F> {
                value: F,
                vars: IndexSet,
                derivatives: Vec<F>,
            }

            let data = SparseDualData::<F>::deserialize(deserializer)?;
            SparseDual::from_parts(data.value, data.vars, data.derivatives)
                .map_err(serde::de::Error::custom)
        }
    }
}
