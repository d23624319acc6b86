use approx::assert_relative_eq;
use sparse_dual::{gradient, jacobian, seed, sparsity, IndexSet, SparseDual, VarId};

/// Rosenbrock function over sparse duals.
fn rosenbrock(x: &[SparseDual<f64>]) -> SparseDual<f64> {
    let mut sum = SparseDual::constant(0.0);
    for i in 0..x.len() - 1 {
        let t1 = 1.0 - &x[i];
        let t2 = &x[i + 1] - &x[i] * &x[i];
        sum += &t1 * &t1 + 100.0 * (&t2 * &t2);
    }
    sum
}

fn rosenbrock_grad(x: &[f64]) -> Vec<f64> {
    let n = x.len();
    let mut g = vec![0.0; n];
    for i in 0..n - 1 {
        g[i] += -2.0 * (1.0 - x[i]) - 400.0 * x[i] * (x[i + 1] - x[i] * x[i]);
        g[i + 1] += 200.0 * (x[i + 1] - x[i] * x[i]);
    }
    g
}

#[test]
fn seed_assigns_positional_ids() {
    let s = seed(&[4.0, 5.0, 6.0]);
    for (i, xi) in s.iter().enumerate() {
        assert_eq!(xi.index_set().as_slice(), &[VarId::from(i)]);
        assert_eq!(xi.derivative(VarId::from(i)), 1.0);
    }
}

#[test]
fn gradient_of_rosenbrock() {
    let x = [0.5, -1.2, 1.1, 0.9, 2.0];
    let (value, g) = gradient(rosenbrock, &x);
    let expected = rosenbrock_grad(&x);
    let plain: f64 = (0..x.len() - 1)
        .map(|i| (1.0 - x[i]).powi(2) + 100.0 * (x[i + 1] - x[i] * x[i]).powi(2))
        .sum();
    assert_relative_eq!(value, plain, max_relative = 1e-12);
    for (gi, ei) in g.iter().zip(expected.iter()) {
        assert_relative_eq!(*gi, *ei, max_relative = 1e-10);
    }
}

#[test]
fn gradient_fills_unused_inputs_with_zero() {
    let (_, g) = gradient(|x| &x[0] * &x[2], &[2.0, 7.0, 3.0]);
    assert_eq!(g, vec![3.0, 0.0, 2.0]);
}

#[test]
fn jacobian_rows_match_partials() {
    let x = [1.0, 2.0, 3.0];
    let (values, jac) = jacobian(
        |v| vec![&v[0] * &v[1], &v[1] * &v[2], v[0].sin()],
        &x,
    );
    assert_eq!(values.len(), 3);
    assert_relative_eq!(values[1], 6.0);
    assert_eq!(jac[0], vec![2.0, 1.0, 0.0]);
    assert_eq!(jac[1], vec![0.0, 3.0, 2.0]);
    assert_relative_eq!(jac[2][0], 1.0_f64.cos());
    assert_eq!(jac[2][1], 0.0);
}

#[test]
fn sparsity_reports_true_dependencies() {
    // Banded: y_i depends on x_{i-1}, x_i, x_{i+1}.
    let n: usize = 6;
    let x: Vec<f64> = (0..n).map(|i| 0.1 * i as f64 + 0.5).collect();
    let pattern = sparsity(
        |v| {
            (0..n)
                .map(|i| {
                    let lo = i.saturating_sub(1);
                    let hi = (i + 1).min(n - 1);
                    v[lo..=hi].iter().product::<SparseDual<f64>>()
                })
                .collect()
        },
        &x,
    );
    for (i, set) in pattern.iter().enumerate() {
        let lo = i.saturating_sub(1);
        let hi = (i + 1).min(n - 1);
        let expected: IndexSet = (lo..=hi).map(VarId::from).collect();
        assert_eq!(set, &expected, "row {i}");
    }
}
