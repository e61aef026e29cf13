//! Descriptive trend lines for scatter charts.
//!
//! The line is drawn for the reader's eye only; nothing in the Solow model
//! consumes it.

use nalgebra::{DMatrix, DVector};

use crate::math::solve_least_squares;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendLine {
    pub intercept: f64,
    pub slope: f64,
}

impl TrendLine {
    pub fn at(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Ordinary least squares line through `(x, y)` points.
///
/// `None` when there are fewer than two distinct x values.
pub fn fit_line(points: &[(f64, f64)]) -> Option<TrendLine> {
    if points.len() < 2 {
        return None;
    }

    let mut design = Vec::with_capacity(points.len() * 2);
    for &(x, _) in points {
        design.push(1.0);
        design.push(x);
    }
    let x = DMatrix::from_row_slice(points.len(), 2, &design);
    let y = DVector::from_iterator(points.len(), points.iter().map(|&(_, y)| y));

    let beta = solve_least_squares(&x, &y)?;
    Some(TrendLine {
        intercept: beta[0],
        slope: beta[1],
    })
}
