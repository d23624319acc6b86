use crate::float::Float;
use crate::index_set::IndexSet;
use crate::sparse_dual::SparseDual;
use crate::var::VarId;

/// Seed every input as its own independent variable: `x[i]` gets id `i`.
pub fn seed<F: Float>(x: &[F]) -> Vec<SparseDual<F>> {
    x.iter()
        .enumerate()
        .map(|(i, &xi)| SparseDual::variable(xi, VarId::from(i)))
        .collect()
}

fn dense_ids(n: usize) -> Vec<VarId> {
    (0..n).map(VarId::from).collect()
}

/// Value and gradient of a scalar function `f : R^n → R` in a single forward
/// pass.
///
/// ```
/// let (v, g) = sparse_dual::gradient(|x| &x[0] * &x[1] + x[0].sin(), &[1.0_f64, 2.0]);
/// assert!((v - (2.0 + 1.0_f64.sin())).abs() < 1e-12);
/// assert!((g[0] - (2.0 + 1.0_f64.cos())).abs() < 1e-12);
/// assert!((g[1] - 1.0).abs() < 1e-12);
/// ```
pub fn gradient<F: Float>(f: impl FnOnce(&[SparseDual<F>]) -> SparseDual<F>, x: &[F]) -> (F, Vec<F>) {
    let inputs = seed(x);
    let output = f(&inputs);
    tracing::debug!(inputs = x.len(), nnz = output.nnz(), "sparse gradient");
    (output.value(), output.gradient(&dense_ids(x.len())))
}

/// Values and Jacobian `J[i][j] = ∂f_i/∂x_j` of `f : R^n → R^m` in a single
/// forward pass.
pub fn jacobian<F: Float>(
    f: impl FnOnce(&[SparseDual<F>]) -> Vec<SparseDual<F>>,
    x: &[F],
) -> (Vec<F>, Vec<Vec<F>>) {
    let inputs = seed(x);
    let outputs = f(&inputs);
    let ids = dense_ids(x.len());
    tracing::debug!(
        inputs = x.len(),
        outputs = outputs.len(),
        nnz = outputs.iter().map(SparseDual::nnz).sum::<usize>(),
        "sparse jacobian"
    );
    let values = outputs.iter().map(SparseDual::value).collect();
    let rows = outputs.iter().map(|y| y.gradient(&ids)).collect();
    (values, rows)
}

/// The set of inputs each output of `f` structurally depends on, evaluated at
/// `x`.
///
/// Branches taken inside `f` can make the pattern point-dependent.
pub fn sparsity<F: Float>(
    f: impl FnOnce(&[SparseDual<F>]) -> Vec<SparseDual<F>>,
    x: &[F],
) -> Vec<IndexSet> {
    let inputs = seed(x);
    let outputs = f(&inputs);
    tracing::debug!(inputs = x.len(), outputs = outputs.len(), "sparsity pattern");
    outputs.iter().map(|y| y.index_set().clone()).collect()
}
