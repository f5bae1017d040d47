//! Squared Euclidean costs through the Gram identity
//!
//! \[
//! \lVert a_i - b_j \rVert^2 = \lVert a_i \rVert^2 + \lVert b_j \rVert^2 - 2\, a_i \cdot b_j,
//! \]
//!
//! so the `O(n·m·d)` work becomes one matrix product (`general_mat_mul`) plus two row-norm
//! passes.
//!
//! Caveats, all of which are stated on [`crate::SqEuclideanStrategy::Expanded`]:
//! - cancellation leaves round-off of order `eps · (‖a‖² + ‖b‖²)`, so identical points are
//!   only approximately zero;
//! - negative round-off is clamped to zero;
//! - `inf - inf` turns infinite coordinates into NaN where the naive path gives `inf`.

use ndarray::linalg::general_mat_mul;
use ndarray::{Array1, Array2, ArrayView2, Zip};

/// Fill `out` (already shaped `n×m`) with squared Euclidean costs.
pub(crate) fn sq_euclidean_into(a: &ArrayView2<'_, f64>, b: &ArrayView2<'_, f64>, out: &mut Array2<f64>) {
    debug_assert_eq!(a.ncols(), b.ncols());
    debug_assert_eq!(out.dim(), (a.nrows(), b.nrows()));
    if out.is_empty() {
        return;
    }
    if a.ncols() == 0 {
        out.fill(0.0);
        return;
    }

    let a_sq = row_sq_norms(a);
    let b_sq = row_sq_norms(b);

    // out = -2 · a · bᵀ
    out.fill(0.0);
    general_mat_mul(-2.0, a, &b.t(), 0.0, out);

    Zip::indexed(out).for_each(|(i, j), c| {
        let s = a_sq[i] + b_sq[j] + *c;
        *c = if s < 0.0 { 0.0 } else { s };
    });
}

fn row_sq_norms(x: &ArrayView2<'_, f64>) -> Array1<f64> {
    x.rows().into_iter().map(|r| r.dot(&r)).collect()
}
