use approx::assert_relative_eq;
use sparse_dual::{SparseDual, SparseDual64, VarId};

const X: VarId = VarId::new(0);
const Y: VarId = VarId::new(1);

/// Central finite difference: (f(x+h) - f(x-h)) / 2h
fn finite_diff(f: impl Fn(f64) -> f64, x: f64) -> f64 {
    let h = 1e-7;
    (f(x + h) - f(x - h)) / (2.0 * h)
}

/// Test a unary elemental against finite differences.
fn check_elemental(
    f_dual: impl Fn(&SparseDual64) -> SparseDual64,
    f_f64: impl Fn(f64) -> f64,
    x: f64,
    tol: f64,
) {
    let seed = SparseDual::variable(x, X);
    let d = f_dual(&seed);
    assert_relative_eq!(d.value(), f_f64(x), max_relative = 1e-12);
    assert_relative_eq!(d.derivative(X), finite_diff(&f_f64, x), max_relative = tol);
    assert_eq!(d.index_set(), seed.index_set());
}

/// Test a binary elemental against finite differences in each argument.
fn check_binary(
    f_dual: impl Fn(&SparseDual64, &SparseDual64) -> SparseDual64,
    f_f64: impl Fn(f64, f64) -> f64,
    x: f64,
    y: f64,
    tol: f64,
) {
    let d = f_dual(&SparseDual::variable(x, X), &SparseDual::variable(y, Y));
    assert_relative_eq!(d.value(), f_f64(x, y), max_relative = 1e-12);
    assert_relative_eq!(d.derivative(X), finite_diff(|t| f_f64(t, y), x), max_relative = tol);
    assert_relative_eq!(d.derivative(Y), finite_diff(|t| f_f64(x, t), y), max_relative = tol);
}

// ── Powers ──

#[test]
fn recip() { check_elemental(|x| x.recip(), |x| x.recip(), 2.5, 1e-5); }

#[test]
fn sqrt() { check_elemental(|x| x.sqrt(), |x| x.sqrt(), 4.0, 1e-5); }

#[test]
fn cbrt() { check_elemental(|x| x.cbrt(), |x| x.cbrt(), 2.0, 1e-5); }

#[test]
fn powi() { check_elemental(|x| x.powi(3), |x| x.powi(3), 1.5, 1e-5); }

#[test]
fn powf() { check_elemental(|x| x.powf(2.5), |x| x.powf(2.5), 1.5, 1e-5); }

#[test]
fn pow_dual_exponent() { check_binary(|x, y| x.pow(y), |x, y| x.powf(y), 1.7, 2.3, 1e-5); }

// ── Exp/Log ──

#[test]
fn exp() { check_elemental(|x| x.exp(), |x| x.exp(), 1.0, 1e-5); }

#[test]
fn exp2() { check_elemental(|x| x.exp2(), |x| x.exp2(), 1.5, 1e-5); }

#[test]
fn exp_m1() { check_elemental(|x| x.exp_m1(), |x| x.exp_m1(), 0.5, 1e-5); }

#[test]
fn ln() { check_elemental(|x| x.ln(), |x| x.ln(), 2.0, 1e-5); }

#[test]
fn log2() { check_elemental(|x| x.log2(), |x| x.log2(), 3.0, 1e-5); }

#[test]
fn log10() { check_elemental(|x| x.log10(), |x| x.log10(), 3.0, 1e-5); }

#[test]
fn ln_1p() { check_elemental(|x| x.ln_1p(), |x| x.ln_1p(), 0.5, 1e-5); }

#[test]
fn log_base() { check_binary(|x, b| x.log(b), |x, b| x.log(b), 5.0, 3.0, 1e-5); }

// ── Trig ──

#[test]
fn sin() { check_elemental(|x| x.sin(), |x| x.sin(), 1.0, 1e-5); }

#[test]
fn cos() { check_elemental(|x| x.cos(), |x| x.cos(), 1.0, 1e-5); }

#[test]
fn tan() { check_elemental(|x| x.tan(), |x| x.tan(), 0.5, 1e-5); }

#[test]
fn asin() { check_elemental(|x| x.asin(), |x| x.asin(), 0.5, 1e-5); }

#[test]
fn acos() { check_elemental(|x| x.acos(), |x| x.acos(), 0.5, 1e-5); }

#[test]
fn atan() { check_elemental(|x| x.atan(), |x| x.atan(), 1.0, 1e-5); }

#[test]
fn atan2() { check_binary(|y, x| y.atan2(x), |y, x| y.atan2(x), 1.0, -2.0, 1e-5); }

#[test]
fn sin_cos_matches_separate_calls() {
    let x = SparseDual::variable(0.7, X);
    let (s, c) = x.sin_cos();
    assert_relative_eq!(s.derivative(X), x.sin().derivative(X));
    assert_relative_eq!(c.derivative(X), x.cos().derivative(X));
}

// ── Hyperbolic ──

#[test]
fn sinh() { check_elemental(|x| x.sinh(), |x| x.sinh(), 1.0, 1e-5); }

#[test]
fn cosh() { check_elemental(|x| x.cosh(), |x| x.cosh(), 1.0, 1e-5); }

#[test]
fn tanh() { check_elemental(|x| x.tanh(), |x| x.tanh(), 0.5, 1e-5); }

#[test]
fn asinh() { check_elemental(|x| x.asinh(), |x| x.asinh(), 1.0, 1e-5); }

#[test]
fn acosh() { check_elemental(|x| x.acosh(), |x| x.acosh(), 2.0, 1e-5); }

#[test]
fn atanh() { check_elemental(|x| x.atanh(), |x| x.atanh(), 0.5, 1e-5); }

// ── Misc ──

#[test]
fn abs_negative() { check_elemental(|x| x.abs(), |x| x.abs(), -2.0, 1e-5); }

#[test]
fn hypot() { check_binary(|x, y| x.hypot(y), |x, y| x.hypot(y), 3.0, 4.0, 1e-5); }

#[test]
fn mul_add() {
    let x = SparseDual::variable(2.0, X);
    let a = SparseDual::variable(3.0, Y);
    let b = SparseDual::variable(0.5, VarId::new(2));
    let r = x.mul_add(&a, &b);
    assert_relative_eq!(r.value(), 6.5);
    assert_relative_eq!(r.derivative(X), 3.0);
    assert_relative_eq!(r.derivative(Y), 2.0);
    assert_relative_eq!(r.derivative(VarId::new(2)), 1.0);
}

#[test]
fn piecewise_constant_functions_drop_dependencies() {
    let x = SparseDual::variable(2.6, X);
    for d in [x.floor(), x.ceil(), x.round(), x.trunc(), x.signum()] {
        assert!(d.index_set().is_empty());
        assert_eq!(d.derivative(X), 0.0);
    }
    assert_relative_eq!(x.fract().derivative(X), 1.0);
}

#[test]
fn max_min_select_operand() {
    let x = SparseDual::variable(2.0, X);
    let y = SparseDual::variable(3.0, Y);
    let hi = x.max(&y);
    let lo = x.min(&y);
    assert_eq!(hi.derivative(Y), 1.0);
    assert_eq!(hi.derivative(X), 0.0);
    assert_eq!(lo.derivative(X), 1.0);
    assert!(lo < hi);
}

// ── Composition ──

#[test]
fn chain_through_merged_operands() {
    // f(x, y) = exp(x·y) + sin(x)
    let (x0, y0): (f64, f64) = (0.3, 1.7);
    let x = SparseDual::variable(x0, X);
    let y = SparseDual::variable(y0, Y);
    let f = (&x * &y).exp() + x.sin();
    let e = (x0 * y0).exp();
    assert_relative_eq!(f.derivative(X), y0 * e + x0.cos(), max_relative = 1e-12);
    assert_relative_eq!(f.derivative(Y), x0 * e, max_relative = 1e-12);
}

// ── Powers at a zero base ──

#[test]
fn zeroth_power_at_zero_has_zero_derivative() {
    let x = SparseDual::variable(0.0, X);
    for d in [x.powi(0), x.powf(0.0)] {
        assert_eq!(d.value(), 1.0);
        assert_eq!(d.derivative(X), 0.0);
    }
}

#[test]
fn zero_base_is_flat_in_the_exponent() {
    let zero = SparseDual::constant(0.0);
    let y = SparseDual::variable(2.0, Y);
    let p = zero.pow(&y);
    assert_eq!(p.value(), 0.0);
    assert_eq!(p.derivative(Y), 0.0);
}

#[test]
fn zero_base_pow_does_not_poison_merged_sums() {
    // f(x, y) = x² + x^y at (0, 2): ∂f/∂x = 0, ∂f/∂y = 0
    let x = SparseDual::variable(0.0, X);
    let y = SparseDual::variable(2.0, Y);
    let f = &x * &x + x.pow(&y);
    assert_eq!(f.value(), 0.0);
    assert_eq!(f.derivative(X), 0.0);
    assert_eq!(f.derivative(Y), 0.0);
}
