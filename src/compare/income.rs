//! Income comparison against a reference country.

use tracing::debug;

use crate::data::select_year;
use crate::domain::{CleanedTable, IncomeRecord, RankedComparison, YearSlice};
use crate::error::{PipelineError, Result};

/// Slice the table to `year`, normalize every country's income per person to
/// `reference`, and rank the `subset` countries by that ratio (descending).
///
/// Countries in `subset` that have no record in `year` are left out of the
/// ranking without error.
pub fn compare_income(
    table: &CleanedTable,
    year: i32,
    reference: &str,
    subset: &[String],
) -> Result<RankedComparison> {
    let slice = select_year(table, year)?;
    let (reference_income, normalized) = normalize_to_reference(&slice, reference)?;
    let ranked = rank_subset(&normalized, subset);

    debug!(
        year,
        reference,
        reference_income,
        requested = subset.len(),
        ranked = ranked.len(),
        "ranked income comparison"
    );

    Ok(RankedComparison {
        year,
        reference: reference.to_string(),
        reference_income,
        normalized,
        ranked,
    })
}

/// Attach `rel_income_US` to every record of the slice.
///
/// The reference must match exactly one record; zero or several matches is an
/// error. Returns the reference income alongside the normalized records.
pub fn normalize_to_reference(slice: &YearSlice, reference: &str) -> Result<(f64, Vec<IncomeRecord>)> {
    let matches: Vec<_> = slice.records.iter().filter(|r| r.country() == reference).collect();
    let [reference_record] = matches.as_slice() else {
        return Err(PipelineError::ReferenceNotFound {
            country: reference.to_string(),
            year: slice.year,
            matches: matches.len(),
        });
    };

    let reference_income = reference_record.y_per_person;
    if reference_income == 0.0 {
        return Err(PipelineError::DivisionByZero {
            stage: "compare",
            quantity: "rel_income_US",
            divisor: "reference y_per_person",
            country: reference.to_string(),
            year: slice.year,
        });
    }

    let normalized = slice
        .records
        .iter()
        .map(|r| {
            let rel_income_us = r.y_per_person / reference_income;
            if !rel_income_us.is_finite() {
                return Err(PipelineError::NonFiniteRatio {
                    stage: "compare",
                    quantity: "rel_income_US",
                    divisor: "reference y_per_person",
                    country: r.country().to_string(),
                    year: slice.year,
                });
            }
            Ok(IncomeRecord {
                country: r.country().to_string(),
                y_per_person: r.y_per_person,
                y_per_worker: r.y_per_worker,
                rel_income_us,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok((reference_income, normalized))
}

/// Keep the records whose country is in `subset` and sort them by
/// `rel_income_US`, highest first. Ties keep slice order.
pub fn rank_subset(normalized: &[IncomeRecord], subset: &[String]) -> Vec<IncomeRecord> {
    let mut ranked: Vec<IncomeRecord> = normalized
        .iter()
        .filter(|r| subset.iter().any(|c| c == &r.country))
        .cloned()
        .collect();
    // `sort_by` is stable; `total_cmp` keeps the order total even for NaN.
    ranked.sort_by(|a, b| b.rel_income_us.total_cmp(&a.rel_income_us));
    ranked
}
