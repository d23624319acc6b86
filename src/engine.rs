//! Binary differentiation rules over operands with different index sets.
//!
//! Every binary operation runs the same scaffold: merge the operand index
//! sets, allocate one derivative slot per merged id, then resolve each id
//! into the operands and apply the rule to whatever contributions exist.
//! A missing contribution is an implicit zero and is never materialised.

use crate::float::Float;
use crate::index_set::{merge, IndexSet};
use crate::resolve::Presence;
use crate::sparse_dual::SparseDual;
use crate::var::VarId;

/// Merged sets with at least this many slots are filled in parallel when the
/// `parallel` feature is enabled.
pub const PARALLEL_THRESHOLD: usize = 1024;

/// The operand derivatives available for one merged slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Contribution<F> {
    /// `(dL, dR)`: both operands depend on the variable.
    Both(F, F),
    /// `dL`: only the left operand depends on it.
    Left(F),
    /// `dR`: only the right operand depends on it.
    Right(F),
}

/// Run a binary rule over the merged index space of `l` and `r`.
///
/// `rule` maps the contributions of one slot to the result derivative. It is
/// called exactly once per slot of `merge(l.vars, r.vars)`.
pub fn combine<F: Float>(
    l: &SparseDual<F>,
    r: &SparseDual<F>,
    re: F,
    rule: impl Fn(Contribution<F>) -> F + Sync + Send,
) -> SparseDual<F> {
    // Shared index space: slots line up positionally.
    if l.vars.same_as(&r.vars) {
        let eps = l
            .eps
            .iter()
            .zip(r.eps.iter())
            .map(|(&dl, &dr)| rule(Contribution::Both(dl, dr)))
            .collect();
        return SparseDual {
            re,
            vars: l.vars.clone(),
            eps,
        };
    }

    let vars = merge(&l.vars, &r.vars);
    let slot = |id: VarId| match Presence::of(id, &l.vars, &r.vars) {
        Some(Presence::Both(i, j)) => rule(Contribution::Both(l.eps[i], r.eps[j])),
        Some(Presence::LeftOnly(i)) => rule(Contribution::Left(l.eps[i])),
        Some(Presence::RightOnly(j)) => rule(Contribution::Right(r.eps[j])),
        None => unreachable!("merged id {id} missing from both operands"),
    };
    let eps = fill(&vars, slot);
    SparseDual { re, vars, eps }
}

#[cfg(feature = "parallel")]
fn fill<F: Float>(vars: &IndexSet, slot: impl Fn(VarId) -> F + Sync + Send) -> Vec<F> {
    use rayon::prelude::*;

    if vars.len() >= PARALLEL_THRESHOLD {
        vars.as_slice().par_iter().map(|&id| slot(id)).collect()
    } else {
        vars.iter().map(slot).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn fill<F: Float>(vars: &IndexSet, slot: impl Fn(VarId) -> F + Sync + Send) -> Vec<F> {
    vars.iter().map(slot).collect()
}

/// `a·dL + b·dR` at every slot, for rules that are linear in the operand
/// derivatives.
pub(crate) fn linear<F: Float>(
    l: &SparseDual<F>,
    r: &SparseDual<F>,
    re: F,
    a: F,
    b: F,
) -> SparseDual<F> {
    combine(l, r, re, move |c| match c {
        Contribution::Both(dl, dr) => dl * a + dr * b,
        Contribution::Left(dl) => dl * a,
        Contribution::Right(dr) => dr * b,
    })
}

/// Product rule: `d(LR) = dL·R + dR·L`.
pub fn multiply<F: Float>(l: &SparseDual<F>, r: &SparseDual<F>) -> SparseDual<F> {
    let (lv, rv) = (l.re, r.re);
    combine(l, r, lv * rv, move |c| match c {
        Contribution::Both(dl, dr) => dl * rv + dr * lv,
        Contribution::Left(dl) => dl * rv,
        Contribution::Right(dr) => dr * lv,
    })
}

/// Sum rule: `d(L + R) = dL + dR`.
pub fn add<F: Float>(l: &SparseDual<F>, r: &SparseDual<F>) -> SparseDual<F> {
    combine(l, r, l.re + r.re, |c| match c {
        Contribution::Both(dl, dr) => dl + dr,
        Contribution::Left(dl) => dl,
        Contribution::Right(dr) => dr,
    })
}

/// Difference rule: `d(L - R) = dL - dR`.
pub fn subtract<F: Float>(l: &SparseDual<F>, r: &SparseDual<F>) -> SparseDual<F> {
    combine(l, r, l.re - r.re, |c| match c {
        Contribution::Both(dl, dr) => dl - dr,
        Contribution::Left(dl) => dl,
        Contribution::Right(dr) => -dr,
    })
}

/// Quotient rule: `d(L / R) = (dL·R - L·dR) / R²`.
///
/// A zero denominator yields infinities or NaNs under ordinary IEEE rules.
pub fn divide<F: Float>(l: &SparseDual<F>, r: &SparseDual<F>) -> SparseDual<F> {
    let (lv, rv) = (l.re, r.re);
    let inv = F::one() / rv;
    combine(l, r, lv * inv, move |c| match c {
        Contribution::Both(dl, dr) => (dl * rv - lv * dr) * inv * inv,
        Contribution::Left(dl) => dl * inv,
        Contribution::Right(dr) => -lv * dr * inv * inv,
    })
}
