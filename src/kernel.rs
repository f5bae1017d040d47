//! Per-pair reductions.
//!
//! Every metric is a sum over coordinates of a per-coordinate term, followed by an
//! elementwise finish. Each one is a zero-sized (or tiny) `Copy` type so the matrix
//! fill is monomorphized per metric.

use ndarray::ArrayView1;

use crate::metric::{validate_exponent, Metric};
use crate::Result;

pub(crate) trait Reduction: Copy + Send + Sync {
    fn term(self, diff: f64) -> f64;

    #[inline]
    fn finish(self, acc: f64) -> f64 {
        acc
    }

    /// Sum of `term` over coordinates, then `finish`.
    #[inline]
    fn pair(self, x: &ArrayView1<'_, f64>, y: &ArrayView1<'_, f64>) -> f64 {
        let mut acc = 0.0f64;
        for (&xk, &yk) in x.iter().zip(y.iter()) {
            acc += self.term(xk - yk);
        }
        self.finish(acc)
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct SqEuclidean;

#[derive(Debug, Clone, Copy)]
pub(crate) struct Euclidean;

#[derive(Debug, Clone, Copy)]
pub(crate) struct Manhattan;

#[derive(Debug, Clone, Copy)]
pub(crate) struct Minkowski {
    p: f64,
    inv_p: f64,
}

impl Minkowski {
    pub(crate) fn new(p: f64) -> Result<Self> {
        validate_exponent(p)?;
        Ok(Self { p, inv_p: 1.0 / p })
    }
}

impl Reduction for SqEuclidean {
    #[inline]
    fn term(self, diff: f64) -> f64 {
        diff * diff
    }
}

impl Reduction for Euclidean {
    #[inline]
    fn term(self, diff: f64) -> f64 {
        diff * diff
    }

    #[inline]
    fn finish(self, acc: f64) -> f64 {
        sqrt_clamped(acc)
    }
}

impl Reduction for Manhattan {
    #[inline]
    fn term(self, diff: f64) -> f64 {
        diff.abs()
    }
}

impl Reduction for Minkowski {
    #[inline]
    fn term(self, diff: f64) -> f64 {
        diff.abs().powf(self.p)
    }

    #[inline]
    fn finish(self, acc: f64) -> f64 {
        acc.powf(self.inv_p)
    }

    /// `s · (Σ (|x_k - y_k| / s)^p)^(1/p)` with `s = max_k |x_k - y_k|`, so large `p`
    /// neither overflows to `inf` nor underflows to 0. A zero, infinite or NaN `s`
    /// is the distance itself.
    fn pair(self, x: &ArrayView1<'_, f64>, y: &ArrayView1<'_, f64>) -> f64 {
        let mut s = 0.0f64;
        for (&xk, &yk) in x.iter().zip(y.iter()) {
            let a = (xk - yk).abs();
            if a.is_nan() {
                return f64::NAN;
            }
            if a > s {
                s = a;
            }
        }
        if s == 0.0 || s.is_infinite() {
            return s;
        }

        let mut acc = 0.0f64;
        for (&xk, &yk) in x.iter().zip(y.iter()) {
            acc += self.term((xk - yk) / s);
        }
        s * self.finish(acc)
    }
}

/// Square root of a sum of squares, with round-off negatives clamped to zero.
///
/// `f64::max` would map NaN to 0, so the comparison is explicit.
#[inline]
pub(crate) fn sqrt_clamped(s: f64) -> f64 {
    if s < 0.0 {
        0.0
    } else {
        s.sqrt()
    }
}

#[inline]
pub(crate) fn reduce<R: Reduction>(r: R, x: &ArrayView1<'_, f64>, y: &ArrayView1<'_, f64>) -> f64 {
    debug_assert_eq!(x.len(), y.len());
    r.pair(x, y)
}

/// The kernel a [`Metric`] resolves to.
///
/// Minkowski with `p = 1` or `p = 2` resolves to the Manhattan / Euclidean kernels, so
/// those exponents agree exactly with [`Metric::Manhattan`] / [`Metric::Euclidean`] and
/// skip `powf`.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Kernel {
    SqEuclidean,
    Euclidean,
    Manhattan,
    Minkowski(Minkowski),
}

impl Kernel {
    pub(crate) fn for_metric(metric: Metric) -> Result<Self> {
        Ok(match metric {
            Metric::SqEuclidean => Kernel::SqEuclidean,
            Metric::Euclidean => Kernel::Euclidean,
            Metric::Manhattan => Kernel::Manhattan,
            Metric::Minkowski(p) => {
                let k = Minkowski::new(p)?;
                if p == 1.0 {
                    Kernel::Manhattan
                } else if p == 2.0 {
                    Kernel::Euclidean
                } else {
                    Kernel::Minkowski(k)
                }
            }
        })
    }

    pub(crate) fn distance(self, x: &ArrayView1<'_, f64>, y: &ArrayView1<'_, f64>) -> f64 {
        match self {
            Kernel::SqEuclidean => reduce(SqEuclidean, x, y),
            Kernel::Euclidean => reduce(Euclidean, x, y),
            Kernel::Manhattan => reduce(Manhattan, x, y),
            Kernel::Minkowski(k) => reduce(k, x, y),
        }
    }
}
