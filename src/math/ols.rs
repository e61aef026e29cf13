//! Least squares solver.
//!
//! Used only for the descriptive trend lines drawn on scatter charts:
//!
//! ```text
//! minimize Σ (y_i - x_i^T β)^2
//! ```
//!
//! The design is tiny (n countries × 2 columns), so a full SVD is cheap and
//! handles the degenerate case (all x equal) without panicking: the solve
//! either returns a finite β or `None`.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    if x.nrows() != y.len() || x.nrows() < x.ncols() {
        return None;
    }

    let svd = x.clone().svd(true, true);

    // Rank deficiency shows up as a (near) zero singular value; a pseudo-inverse
    // solve would silently return a minimum-norm β, which is not a line fit.
    let max_sv = svd.singular_values.max();
    let min_sv = svd.singular_values.min();
    if !(max_sv > 0.0) || min_sv <= max_sv * 1e-12 {
        return None;
    }

    svd.solve(y, 1e-12)
        .ok()
        .filter(|beta| beta.iter().all(|v| v.is_finite()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-10);
        assert!((beta[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn collinear_design_has_no_solution() {
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 4.0, 1.0, 4.0, 1.0, 4.0]);
        let y = DVector::from_row_slice(&[1.0, 2.0, 3.0]);
        assert!(solve_least_squares(&x, &y).is_none());
    }
}
