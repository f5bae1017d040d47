//! Cost matrix construction.
//!
//! All operations share one contract:
//!
//! - `a` is `n×d`, `b` is `m×d`; `a.ncols() != b.ncols()` is [`Error::DimensionMismatch`].
//! - `out` is replaced by an `n×m` matrix when its shape differs, then every cell is
//!   overwritten. After an error its contents are unspecified.
//! - Checks run before any cell is written.
//! - NaN / infinities in `a` or `b` propagate; they are not errors.
//!
//! The fill walks output rows; each row `i` reads only `a.row(i)` and all of `b`, so with
//! the `parallel` feature rows are handed to rayon with no synchronization.

use ndarray::{Array2, ArrayView1, ArrayView2, ArrayViewMut1, Zip};
use tracing::{debug, trace};

use crate::expanded;
use crate::kernel::{self, Kernel, Reduction};
use crate::metric::Metric;
use crate::{Error, Result};

/// How squared Euclidean costs (and therefore Euclidean ones) are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqEuclideanStrategy {
    /// Direct `Σ (a_k - b_k)²` per cell. Exact zeros on identical rows.
    Naive,
    /// `‖a‖² + ‖b‖² - 2 a·b` via one matrix product.
    ///
    /// Faster for large `d`, but agrees with [`Naive`](Self::Naive) only within
    /// floating tolerance: identical rows may come out as tiny positives, and
    /// infinite coordinates yield NaN instead of `inf`. Always serial.
    Expanded,
}

impl Default for SqEuclideanStrategy {
    fn default() -> Self {
        Self::Naive
    }
}

/// Knobs for [`cost_matrix_with`]. The defaults reproduce the plain triple loop.
#[derive(Debug, Clone, Default)]
pub struct CostConfig {
    /// Strategy for [`Metric::SqEuclidean`] and [`Metric::Euclidean`].
    pub sq_euclidean: SqEuclideanStrategy,
    /// Fill output rows on the rayon pool. Ignored unless built with the `parallel` feature.
    pub parallel: bool,
}

/// Squared Euclidean cost matrix: `out[i, j] = Σ_k (a[i, k] - b[j, k])²`.
pub fn l2sq(a: &ArrayView2<f64>, b: &ArrayView2<f64>, out: &mut Array2<f64>) -> Result<()> {
    cost_matrix(Metric::SqEuclidean, a, b, out)
}

/// Euclidean cost matrix: `out[i, j] = sqrt(Σ_k (a[i, k] - b[j, k])²)`.
pub fn l2(a: &ArrayView2<f64>, b: &ArrayView2<f64>, out: &mut Array2<f64>) -> Result<()> {
    cost_matrix(Metric::Euclidean, a, b, out)
}

/// Manhattan cost matrix: `out[i, j] = Σ_k |a[i, k] - b[j, k]|`.
pub fn l1(a: &ArrayView2<f64>, b: &ArrayView2<f64>, out: &mut Array2<f64>) -> Result<()> {
    cost_matrix(Metric::Manhattan, a, b, out)
}

/// Minkowski cost matrix: `out[i, j] = (Σ_k |a[i, k] - b[j, k]|^p)^(1/p)`.
///
/// `p` must be positive and finite, otherwise [`Error::InvalidParameter`].
/// `p = 1` and `p = 2` give exactly [`l1`] and [`l2`].
pub fn lp(a: &ArrayView2<f64>, b: &ArrayView2<f64>, out: &mut Array2<f64>, p: f64) -> Result<()> {
    cost_matrix(Metric::Minkowski(p), a, b, out)
}

/// Fill `out` with `metric` costs using [`CostConfig::default`].
pub fn cost_matrix(
    metric: Metric,
    a: &ArrayView2<f64>,
    b: &ArrayView2<f64>,
    out: &mut Array2<f64>,
) -> Result<()> {
    cost_matrix_with(metric, a, b, out, &CostConfig::default())
}

/// Fill `out` with `metric` costs under an explicit [`CostConfig`].
pub fn cost_matrix_with(
    metric: Metric,
    a: &ArrayView2<f64>,
    b: &ArrayView2<f64>,
    out: &mut Array2<f64>,
    cfg: &CostConfig,
) -> Result<()> {
    let kernel = Kernel::for_metric(metric)?;
    check_dims(a.ncols(), b.ncols())?;

    let (n, m, d) = (a.nrows(), b.nrows(), a.ncols());
    if out.dim() != (n, m) {
        trace!(from = ?out.dim(), to = ?(n, m), "reshaping cost matrix");
        *out = Array2::zeros((n, m));
    }

    let parallel = cfg.parallel && cfg!(feature = "parallel");
    debug!(
        %metric,
        n,
        m,
        d,
        strategy = ?cfg.sq_euclidean,
        parallel,
        "filling cost matrix"
    );

    let expanded = cfg.sq_euclidean == SqEuclideanStrategy::Expanded;
    match kernel {
        Kernel::SqEuclidean if expanded => expanded::sq_euclidean_into(a, b, out),
        Kernel::Euclidean if expanded => {
            expanded::sq_euclidean_into(a, b, out);
            out.mapv_inplace(kernel::sqrt_clamped);
        }
        Kernel::SqEuclidean => fill(kernel::SqEuclidean, a, b, out, parallel),
        Kernel::Euclidean => fill(kernel::Euclidean, a, b, out, parallel),
        Kernel::Manhattan => fill(kernel::Manhattan, a, b, out, parallel),
        Kernel::Minkowski(k) => fill(k, a, b, out, parallel),
    }
    Ok(())
}

/// Allocate and return the `n×m` cost matrix.
pub fn pairwise(metric: Metric, a: &ArrayView2<f64>, b: &ArrayView2<f64>) -> Result<Array2<f64>> {
    let mut out = Array2::zeros((a.nrows(), b.nrows()));
    cost_matrix(metric, a, b, &mut out)?;
    Ok(out)
}

/// Distance between a single pair of points, with the same checks and kernels as the
/// matrix operations: `pairwise(metric, a, b)?[[i, j]] == distance(metric, &a.row(i), &b.row(j))?`.
pub fn distance(metric: Metric, x: &ArrayView1<f64>, y: &ArrayView1<f64>) -> Result<f64> {
    let kernel = Kernel::for_metric(metric)?;
    check_dims(x.len(), y.len())?;
    Ok(kernel.distance(x, y))
}

fn check_dims(a_cols: usize, b_cols: usize) -> Result<()> {
    if a_cols != b_cols {
        return Err(Error::DimensionMismatch { a_cols, b_cols });
    }
    Ok(())
}

fn fill<R: Reduction>(
    r: R,
    a: &ArrayView2<f64>,
    b: &ArrayView2<f64>,
    out: &mut Array2<f64>,
    parallel: bool,
) {
    let fill_row = |mut out_row: ArrayViewMut1<f64>, a_row: ArrayView1<f64>| {
        for (c, b_row) in out_row.iter_mut().zip(b.rows()) {
            *c = kernel::reduce(r, &a_row, &b_row);
        }
    };
    let rows = Zip::from(out.rows_mut()).and(a.rows());

    #[cfg(feature = "parallel")]
    {
        if parallel {
            trace!(threads = rayon::current_num_threads(), "parallel row fill");
            rows.par_for_each(fill_row);
            return;
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;
    rows.for_each(fill_row);
}
