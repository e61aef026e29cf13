//! Single-year cross-section with per-person and per-worker income.

use tracing::debug;

use crate::domain::{CleanedTable, PanelRecord, YearRecord, YearSlice};
use crate::error::{PipelineError, Result};

/// Filter the cleaned table to `year` and derive income per person/worker.
///
/// Zero population or employment is an error rather than an infinite ratio, as
/// is a divisor small enough to overflow the quotient.
pub fn select_year(table: &CleanedTable, year: i32) -> Result<YearSlice> {
    let records = table
        .records()
        .iter()
        .filter(|r| r.year == year)
        .map(derive_income)
        .collect::<Result<Vec<_>>>()?;

    if records.is_empty() {
        return Err(PipelineError::YearNotFound { year });
    }

    debug!(year, n = records.len(), "selected year slice");
    Ok(YearSlice { year, records })
}

fn derive_income(record: &PanelRecord) -> Result<YearRecord> {
    Ok(YearRecord {
        y_per_person: checked_ratio(record, record.rgdpo, record.pop, "y_per_person", "pop")?,
        y_per_worker: checked_ratio(record, record.rgdpo, record.emp, "y_per_worker", "emp")?,
        panel: record.clone(),
    })
}

/// `numerator / denominator`, failing on a zero denominator or a non-finite
/// quotient.
fn checked_ratio(
    record: &PanelRecord,
    numerator: f64,
    denominator: f64,
    quantity: &'static str,
    divisor: &'static str,
) -> Result<f64> {
    if denominator == 0.0 {
        return Err(PipelineError::DivisionByZero {
            stage: "slice",
            quantity,
            divisor,
            country: record.country.clone(),
            year: record.year,
        });
    }
    let ratio = numerator / denominator;
    if !ratio.is_finite() {
        return Err(PipelineError::NonFiniteRatio {
            stage: "slice",
            quantity,
            divisor,
            country: record.country.clone(),
            year: record.year,
        });
    }
    Ok(ratio)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(country: &str, year: i32, rgdpo: f64, pop: f64, emp: f64) -> PanelRecord {
        PanelRecord {
            country: country.to_string(),
            year,
            rgdpo,
            rgdpe: rgdpo,
            cn: rgdpo * 3.0,
            pop,
            emp,
        }
    }

    #[test]
    fn filters_to_year_and_derives_income() {
        let table = CleanedTable::new(vec![
            record("Hungary", 2022, 290_000.0, 10.0, 4.4),
            record("Hungary", 2023, 300_000.0, 10.0, 4.5),
            record("France", 2023, 3_500_000.0, 66.0, 30.0),
        ]);

        let slice = select_year(&table, 2023).unwrap();
        assert_eq!(slice.year, 2023);
        assert_eq!(slice.records.len(), 2);
        assert_eq!(slice.records[0].country(), "Hungary");
        assert_eq!(slice.records[0].y_per_person, 300_000.0 / 10.0);
        assert_eq!(slice.records[0].y_per_worker, 300_000.0 / 4.5);
        assert_eq!(slice.records[1].country(), "France");
    }

    #[test]
    fn absent_year_names_the_year() {
        let table = CleanedTable::new(vec![record("Hungary", 2022, 1.0, 1.0, 1.0)]);
        let err = select_year(&table, 2023).unwrap_err();
        assert!(matches!(err, PipelineError::YearNotFound { year: 2023 }));
        assert!(err.to_string().contains("2023"));
    }

    #[test]
    fn zero_employment_is_division_by_zero() {
        let table = CleanedTable::new(vec![
            record("France", 2023, 3_500_000.0, 66.0, 30.0),
            record("Tuvalu", 2023, 60.0, 0.01, 0.0),
        ]);
        match select_year(&table, 2023) {
            Err(PipelineError::DivisionByZero { quantity, divisor, country, year, .. }) => {
                assert_eq!(quantity, "y_per_worker");
                assert_eq!(divisor, "emp");
                assert_eq!(country, "Tuvalu");
                assert_eq!(year, 2023);
            }
            other => panic!("expected DivisionByZero, got {other:?}"),
        }
    }

    #[test]
    fn zero_population_is_division_by_zero() {
        let table = CleanedTable::new(vec![record("Nowhere", 2023, 1.0, 0.0, 1.0)]);
        let err = select_year(&table, 2023).unwrap_err();
        assert!(matches!(err, PipelineError::DivisionByZero { divisor: "pop", .. }));
    }

    #[test]
    fn subnormal_population_does_not_produce_infinite_income() {
        let table = CleanedTable::new(vec![
            record("France", 2023, 3_500_000.0, 66.0, 30.0),
            record("Lilliput", 2023, 1e10, 1e-310, 1.0),
        ]);
        match select_year(&table, 2023) {
            Err(PipelineError::NonFiniteRatio { quantity, divisor, country, .. }) => {
                assert_eq!(quantity, "y_per_person");
                assert_eq!(divisor, "pop");
                assert_eq!(country, "Lilliput");
            }
            other => panic!("expected NonFiniteRatio, got {other:?}"),
        }
    }
}
