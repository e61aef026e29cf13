//! Panel cleaning.
//!
//! Turns raw rows into a [`CleanedTable`] in which every record has all seven
//! required fields present and numeric:
//!
//! - numeric cells are coerced; a cell that does not parse to a finite number is
//!   treated exactly like an empty one
//! - a row with any missing field is dropped whole (no partial records)
//! - surviving rows keep their input order
//!
//! Cleaning never fails. Dropped rows are returned as diagnostics and it is up
//! to the caller to decide whether an empty table is fatal.

use std::fmt;

use crate::domain::{CleanedTable, PanelRecord, RawRecord};

/// Why a single field could not be used.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldIssue {
    Missing,
    Unparseable(String),
}

/// A field-level coercion failure. Never fatal on its own: it only causes the
/// row to be dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct CoercionFailure {
    pub field: &'static str,
    pub issue: FieldIssue,
}

impl fmt::Display for CoercionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.issue {
            FieldIssue::Missing => write!(f, "`{}` missing", self.field),
            FieldIssue::Unparseable(v) => write!(f, "`{}` not numeric ('{v}')", self.field),
        }
    }
}

/// A row removed by the cleaner.
#[derive(Debug, Clone, PartialEq)]
pub struct DroppedRow {
    pub line: usize,
    pub country: Option<String>,
    pub failures: Vec<CoercionFailure>,
}

impl DroppedRow {
    pub fn describe(&self) -> String {
        let reasons: Vec<String> = self.failures.iter().map(ToString::to_string).collect();
        format!(
            "line {} ({}): {}",
            self.line,
            self.country.as_deref().unwrap_or("?"),
            reasons.join(", ")
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CleanOutput {
    pub table: CleanedTable,
    pub dropped: Vec<DroppedRow>,
    pub rows_read: usize,
}

/// Coerce and filter raw rows into a cleaned table.
pub fn clean(rows: &[RawRecord]) -> CleanOutput {
    let mut records = Vec::with_capacity(rows.len());
    let mut dropped = Vec::new();

    for row in rows {
        match clean_row(row) {
            Ok(record) => records.push(record),
            Err(failures) => dropped.push(DroppedRow {
                line: row.line,
                country: text(row.country.as_deref()).map(str::to_string),
                failures,
            }),
        }
    }

    CleanOutput {
        table: CleanedTable::new(records),
        dropped,
        rows_read: rows.len(),
    }
}

fn clean_row(row: &RawRecord) -> Result<PanelRecord, Vec<CoercionFailure>> {
    let mut failures = Vec::new();

    let country = text(row.country.as_deref()).map(str::to_string);
    if country.is_none() {
        failures.push(CoercionFailure {
            field: "country",
            issue: FieldIssue::Missing,
        });
    }

    // Collect every failure before bailing so the diagnostics are complete.
    let mut take = |result: Result<f64, CoercionFailure>| match result {
        Ok(v) => Some(v),
        Err(e) => {
            failures.push(e);
            None
        }
    };
    let year = take(coerce_year(row.year.as_deref()));
    let rgdpo = take(coerce_f64("rgdpo", row.rgdpo.as_deref()));
    let rgdpe = take(coerce_f64("rgdpe", row.rgdpe.as_deref()));
    let cn = take(coerce_f64("cn", row.cn.as_deref()));
    let pop = take(coerce_f64("pop", row.pop.as_deref()));
    let emp = take(coerce_f64("emp", row.emp.as_deref()));

    match (country, year, rgdpo, rgdpe, cn, pop, emp) {
        (Some(country), Some(year), Some(rgdpo), Some(rgdpe), Some(cn), Some(pop), Some(emp)) => Ok(PanelRecord {
            country,
            year: year as i32,
            rgdpo,
            rgdpe,
            cn,
            pop,
            emp,
        }),
        _ => Err(failures),
    }
}

fn text(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn coerce_f64(field: &'static str, value: Option<&str>) -> Result<f64, CoercionFailure> {
    let Some(s) = text(value) else {
        return Err(CoercionFailure {
            field,
            issue: FieldIssue::Missing,
        });
    };
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(CoercionFailure {
            field,
            issue: FieldIssue::Unparseable(s.to_string()),
        }),
    }
}

/// Years may arrive as integral floats (`2023.0`) when the exporting tool
/// stored the column as floating point.
fn coerce_year(value: Option<&str>) -> Result<f64, CoercionFailure> {
    let v = coerce_f64("year", value)?;
    if v.fract() == 0.0 && v >= f64::from(i32::MIN) && v <= f64::from(i32::MAX) {
        Ok(v)
    } else {
        Err(CoercionFailure {
            field: "year",
            issue: FieldIssue::Unparseable(text(value).unwrap_or_default().to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(line: usize, country: &str, year: &str, rgdpo: &str, pop: &str, emp: &str, cn: &str) -> RawRecord {
        let cell = |s: &str| {
            if s.is_empty() {
                None
            } else {
                Some(s.to_string())
            }
        };
        RawRecord {
            line,
            country: cell(country),
            year: cell(year),
            rgdpo: cell(rgdpo),
            rgdpe: cell(rgdpo),
            cn: cell(cn),
            pop: cell(pop),
            emp: cell(emp),
        }
    }

    fn sample_rows() -> Vec<RawRecord> {
        vec![
            raw(2, "France", "2023", "3500000", "66", "30", "17000000"),
            raw(3, "Brazil", "2023", "n/a", "216", "100", "9000000"),
            raw(4, "", "2023", "100", "1", "1", "1"),
            raw(5, "India", "2023.0", "14000000", "1430", "600", "40000000"),
            raw(6, "Chad", "2023", "40000", "18", "", "60000"),
            raw(7, "Peru", "2023", "inf", "34", "17", "900000"),
        ]
    }

    #[test]
    fn keeps_only_complete_rows_in_order() {
        let out = clean(&sample_rows());
        let countries: Vec<&str> = out.table.records().iter().map(|r| r.country.as_str()).collect();
        assert_eq!(countries, vec!["France", "India"]);
        assert_eq!(out.rows_read, 6);
        assert_eq!(out.dropped.len(), 4);
        assert_eq!(out.table.records()[1].year, 2023);
    }

    #[test]
    fn unparseable_values_become_missing_and_drop_the_row() {
        let out = clean(&sample_rows());
        let brazil = out.dropped.iter().find(|d| d.line == 3).unwrap();
        assert_eq!(brazil.country.as_deref(), Some("Brazil"));
        // rgdpo and rgdpe share the same bad cell in this fixture.
        assert_eq!(brazil.failures.len(), 2);
        assert_eq!(brazil.failures[0].field, "rgdpo");
        assert_eq!(brazil.failures[0].issue, FieldIssue::Unparseable("n/a".to_string()));

        let peru = out.dropped.iter().find(|d| d.line == 7).unwrap();
        assert!(peru.failures.iter().all(|f| matches!(f.issue, FieldIssue::Unparseable(_))));

        let chad = out.dropped.iter().find(|d| d.line == 6).unwrap();
        assert_eq!(chad.failures, vec![CoercionFailure { field: "emp", issue: FieldIssue::Missing }]);
        assert!(chad.describe().contains("line 6 (Chad)"));
    }

    #[test]
    fn non_integral_year_is_rejected() {
        let out = clean(&[raw(2, "Chile", "2023.5", "1", "1", "1", "1")]);
        assert!(out.table.is_empty());
        assert_eq!(out.dropped[0].failures[0].field, "year");
    }

    #[test]
    fn cleaning_is_idempotent() {
        let once = clean(&sample_rows()).table;
        let twice = clean(&once.to_raw());
        assert_eq!(twice.table, once);
        assert!(twice.dropped.is_empty());
    }

    #[test]
    fn empty_input_is_not_an_error() {
        let out = clean(&[]);
        assert!(out.table.is_empty());
        assert!(out.dropped.is_empty());
    }
}
