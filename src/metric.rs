//! Metric selector.
//!
//! [`Metric`] is a plain tag: it names which kernel fills the cost matrix and carries
//! the Minkowski exponent. Parsing accepts the short names used in solver configs
//! (`l2sq`, `l2`, `l1`, `lp:<p>`) and the long ones (`sqeuclidean`, `euclidean`,
//! `manhattan`, `minkowski:<p>`), case-insensitively.

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Which distance fills the cost matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric {
    /// \(\sum_k (x_k - y_k)^2\)
    SqEuclidean,
    /// \(\sqrt{\sum_k (x_k - y_k)^2}\)
    Euclidean,
    /// \(\sum_k \lvert x_k - y_k \rvert\)
    Manhattan,
    /// \((\sum_k \lvert x_k - y_k \rvert^p)^{1/p}\), with `p` positive and finite.
    Minkowski(f64),
}

impl Default for Metric {
    fn default() -> Self {
        Self::SqEuclidean
    }
}

impl Metric {
    /// Check the Minkowski exponent. Other metrics have no parameters.
    pub fn validate(self) -> Result<()> {
        match self {
            Metric::Minkowski(p) => validate_exponent(p),
            _ => Ok(()),
        }
    }
}

pub(crate) fn validate_exponent(p: f64) -> Result<()> {
    if !(p > 0.0) || !p.is_finite() {
        return Err(Error::InvalidParameter {
            name: "p",
            value: p,
        });
    }
    Ok(())
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::SqEuclidean => f.write_str("l2sq"),
            Metric::Euclidean => f.write_str("l2"),
            Metric::Manhattan => f.write_str("l1"),
            Metric::Minkowski(p) => write!(f, "lp:{p}"),
        }
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        if let Some((head, p)) = name.split_once(':') {
            return match head.trim() {
                "lp" | "minkowski" => {
                    let p: f64 = p
                        .trim()
                        .parse()
                        .map_err(|_| Error::UnknownMetric(s.to_string()))?;
                    validate_exponent(p)?;
                    Ok(Metric::Minkowski(p))
                }
                _ => Err(Error::UnknownMetric(s.to_string())),
            };
        }
        match name.as_str() {
            "l2sq" | "sqeuclidean" => Ok(Metric::SqEuclidean),
            "l2" | "euclidean" => Ok(Metric::Euclidean),
            "l1" | "manhattan" => Ok(Metric::Manhattan),
            _ => Err(Error::UnknownMetric(s.to_string())),
        }
    }
}
