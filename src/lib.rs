//! # costmat
//!
//! Pairwise cost matrices between two point sets, as the input to an optimal-transport
//! or assignment solver.
//!
//! Given `a` (`n×d`) and `b` (`m×d`), every operation fills an `n×m` matrix whose entry
//! `(i, j)` is a distance between row `i` of `a` and row `j` of `b`:
//!
//! | Operation | Metric | Entry |
//! |-----------|--------|-------|
//! | [`cost::l2sq`] | squared Euclidean | \(\sum_k (a_{ik} - b_{jk})^2\) |
//! | [`cost::l2`] | Euclidean | \(\sqrt{\sum_k (a_{ik} - b_{jk})^2}\) |
//! | [`cost::l1`] | Manhattan | \(\sum_k \lvert a_{ik} - b_{jk} \rvert\) |
//! | [`cost::lp`] | Minkowski | \((\sum_k \lvert a_{ik} - b_{jk} \rvert^p)^{1/p}\) |
//!
//! This crate is intentionally small:
//!
//! - it computes cost matrices and nothing else,
//! - it does not solve transport problems (hand the matrix to `wass` or similar),
//! - it does not pick a metric for you.
//!
//! ## Quick start
//!
//! ```rust
//! use costmat::cost;
//! use ndarray::{array, Array2};
//!
//! let a = array![[0.0, 0.0], [3.0, 4.0]];
//! let b = array![[0.0, 0.0]];
//!
//! let mut out = Array2::<f64>::zeros((0, 0));
//! cost::l2(&a.view(), &b.view(), &mut out)?;
//! assert_eq!(out, array![[0.0], [5.0]]);
//! # Ok::<(), costmat::Error>(())
//! ```
//!
//! ## Public invariants (must not change)
//!
//! - **Caller-owned output**: `out` is reshaped to `n×m` when needed and every cell is
//!   overwritten. Nothing is read from its previous contents.
//! - **Eager validation**: dimension and exponent checks run before any cell is written.
//! - **No sanitization**: NaN and infinities in the point sets propagate through the
//!   arithmetic. They are not errors.
//! - **Determinism**: the parallel path (feature `parallel`) computes each cell with the
//!   same arithmetic as the serial path, so the output is bit-identical.
//!
//! ## Module map
//!
//! - `cost`: the four operations, metric dispatch, [`cost::CostConfig`]
//! - `metric`: the [`Metric`] selector (parse / display / validate)
//! - `kernel`: per-pair reductions shared by the matrix and single-pair paths
//! - `expanded`: the \(\lVert a \rVert^2 + \lVert b \rVert^2 - 2\,a \cdot b\) strategy for L2sq
//!
//! ## Feature flags
//!
//! - `parallel`: distribute output rows over the rayon pool (opt-in per call via
//!   [`cost::CostConfig::parallel`]). The rayon path is only compiled, and only tested,
//!   under `cargo test --features parallel`.

pub mod cost;
mod expanded;
mod kernel;
pub mod metric;

pub use cost::{CostConfig, SqEuclideanStrategy};
pub use metric::Metric;

/// costmat error variants.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The two point sets do not live in the same dimension.
    #[error("dimension mismatch: a has {a_cols} columns, b has {b_cols}")]
    DimensionMismatch { a_cols: usize, b_cols: usize },
    /// A scalar parameter is outside its domain (e.g. a Minkowski exponent `p <= 0`).
    #[error("invalid parameter {name} = {value}")]
    InvalidParameter { name: &'static str, value: f64 },
    /// A metric name that [`Metric::from_str`](std::str::FromStr) does not recognize.
    #[error("unknown metric: {0:?}")]
    UnknownMetric(String),
}

pub type Result<T> = std::result::Result<T, Error>;
