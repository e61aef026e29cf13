//! Descriptive statistics over the income measures of a full year slice.

use crate::domain::IncomeRecord;
use crate::math::{mean, quantile_sorted, sample_std};

/// Row labels, in output order.
pub const STAT_LABELS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub name: &'static str,
    pub count: usize,
    pub mean: f64,
    /// `NaN` when fewer than two values.
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
    pub max: f64,
}

impl ColumnSummary {
    fn from_values(name: &'static str, values: &[f64]) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let q = |p: f64| quantile_sorted(&sorted, p).unwrap_or(f64::NAN);

        Self {
            name,
            count: values.len(),
            mean: mean(values).unwrap_or(f64::NAN),
            std: sample_std(values).unwrap_or(f64::NAN),
            min: q(0.0),
            q25: q(0.25),
            q50: q(0.5),
            q75: q(0.75),
            max: q(1.0),
        }
    }

    /// Values in `STAT_LABELS` order.
    pub fn values(&self) -> [f64; 8] {
        [
            self.count as f64,
            self.mean,
            self.std,
            self.min,
            self.q25,
            self.q50,
            self.q75,
            self.max,
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub columns: Vec<ColumnSummary>,
}

/// Summarize `y_per_person`, `y_per_worker` and `rel_income_US`.
///
/// Pass the full normalized slice, not the ranked subset.
pub fn describe(records: &[IncomeRecord]) -> Summary {
    let column = |f: fn(&IncomeRecord) -> f64| records.iter().map(f).collect::<Vec<_>>();
    Summary {
        columns: vec![
            ColumnSummary::from_values("y_per_person", &column(|r| r.y_per_person)),
            ColumnSummary::from_values("y_per_worker", &column(|r| r.y_per_worker)),
            ColumnSummary::from_values("rel_income_US", &column(|r| r.rel_income_us)),
        ],
    }
}
