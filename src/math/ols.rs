//! Ordinary least squares.
//!
//! The trend estimator solves a tiny regression of the form:
//!
//! ```text
//! minimize Σ (y_i - β0 - β1 x_i)^2
//! ```
//!
//! Notes:
//! - We solve with SVD (nalgebra), tall design matrices included.
//! - `fit_line` centers `x` before building the design matrix. The slope is
//!   unaffected by the shift; the intercept is mapped back.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    for &tol in &[1e-12, 1e-10, 1e-8] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Fitted straight line `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    pub intercept: f64,
    pub slope: f64,
}

/// Fit a straight line through `(x, y)` pairs.
///
/// Returns `None` for mismatched lengths, fewer than two points, or when all
/// `x` are equal (slope undefined).
pub fn fit_line(x: &[f64], y: &[f64]) -> Option<LineFit> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }

    let n = x.len();
    let x_mean = x.iter().sum::<f64>() / n as f64;
    let spread = x.iter().map(|v| (v - x_mean).abs()).fold(0.0, f64::max);
    if !(spread.is_finite() && spread > 0.0) {
        return None;
    }

    let design = DMatrix::from_fn(n, 2, |i, j| if j == 0 { 1.0 } else { x[i] - x_mean });
    let target = DVector::from_column_slice(y);
    let beta = solve_least_squares(&design, &target)?;

    Some(LineFit {
        intercept: beta[0] - beta[1] * x_mean,
        slope: beta[1],
    })
}
