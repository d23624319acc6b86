//! Forward-mode automatic differentiation with sparse dual numbers.
//!
//! A [`SparseDual`] stores its value plus partial derivatives only for the
//! independent variables it actually depends on, labelled by an
//! [`IndexSet`]. Binary operations merge the operands' index sets and fill
//! each slot from whichever operands depend on that variable.
//!
//! ```
//! use sparse_dual::{SparseDual, VarId};
//!
//! let x = SparseDual::variable(1.1_f64, VarId::new(0));
//! let y = SparseDual::variable(1.2_f64, VarId::new(1));
//! let z = &x * &y;
//! assert!((z.value() - 1.32).abs() < 1e-12);
//! assert!((z.derivative(VarId::new(0)) - 1.2).abs() < 1e-12);
//! assert!((z.derivative(VarId::new(1)) - 1.1).abs() < 1e-12);
//! assert_eq!(z.derivative(VarId::new(7)), 0.0);
//! ```

pub mod api;
pub mod engine;
pub mod error;
pub mod float;
pub mod index_set;
pub mod resolve;
pub mod sparse_dual;
pub mod var;
mod traits;

pub use api::{gradient, jacobian, seed, sparsity};
pub use engine::{add, divide, multiply, subtract};
pub use error::IndexSetError;
pub use float::Float;
pub use index_set::{merge, IndexSet};
pub use resolve::{resolve, Presence};
pub use sparse_dual::SparseDual;
pub use var::VarId;

/// Type alias for sparse dual numbers over `f64`.
pub type SparseDual64 = SparseDual<f64>;
/// Type alias for sparse dual numbers over `f32`.
pub type SparseDual32 = SparseDual<f32>;
