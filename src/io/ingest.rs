//! Panel ingest (CSV or spreadsheet workbook).
//!
//! Reads a Penn World Table style panel into [`RawRecord`]s. No coercion happens
//! here: every cell is kept as text so the cleaner sees exactly what the file
//! contained.
//!
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Extra columns ignored** (the full PWT has dozens)
//! - **Row-level tolerance**: a row the CSV parser rejects becomes an all-empty
//!   raw row, which the cleaner then drops and reports
//! - **Workbooks** (`.xlsx`, `.xlsm`, `.xls`, `.ods`) are read from the
//!   [`WORKBOOK_SHEET`] sheet, falling back to the first sheet

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use calamine::{Reader, open_workbook_auto};
use csv::StringRecord;
use tracing::{debug, warn};

use crate::domain::RawRecord;
use crate::error::{PipelineError, Result};

/// Sheet holding the panel in the PWT workbook.
pub const WORKBOOK_SHEET: &str = "Data";

/// Load every row of the panel at `path`, dispatching on the file extension.
pub fn read_raw_panel(path: &Path) -> Result<Vec<RawRecord>> {
    let rows = if is_workbook(path) {
        read_workbook_panel(path)?
    } else {
        let file = File::open(path).map_err(|e| PipelineError::io("ingest: failed to open CSV", path, e))?;
        read_raw_panel_from(file)?
    };
    debug!(path = %path.display(), rows = rows.len(), "read raw panel");
    Ok(rows)
}

fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| matches!(ext.to_ascii_lowercase().as_str(), "xlsx" | "xlsm" | "xls" | "ods"))
}

/// Load every row of the panel sheet of a spreadsheet workbook.
pub fn read_workbook_panel(path: &Path) -> Result<Vec<RawRecord>> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| PipelineError::workbook("ingest: failed to open workbook", path, e))?;

    let names = workbook.sheet_names();
    let sheet = names
        .iter()
        .find(|name| name.as_str() == WORKBOOK_SHEET)
        .or_else(|| names.first())
        .cloned()
        .unwrap_or_else(|| WORKBOOK_SHEET.to_string());
    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| PipelineError::workbook("ingest: failed to read worksheet", path, e))?;
    debug!(sheet = %sheet, rows = range.height(), "read workbook sheet");

    // Sheet rows are 0-based; reported lines are 1-based like the CSV path.
    let header_line = range.start().map_or(0, |(row, _)| row as usize) + 1;
    let rows = range
        .rows()
        .map(|cells| cells.iter().map(|cell| cell.to_string()).collect::<Vec<_>>());
    read_raw_rows(rows, header_line)
}

/// Header row, then data rows, as text cells.
fn read_raw_rows(mut rows: impl Iterator<Item = Vec<String>>, header_line: usize) -> Result<Vec<RawRecord>> {
    let headers = StringRecord::from(rows.next().unwrap_or_default());
    let columns = ColumnIndex::resolve(&build_header_map(&headers))?;
    Ok(rows
        .enumerate()
        .map(|(idx, cells)| columns.extract(&StringRecord::from(cells), header_line + idx + 1))
        .collect())
}

/// Load every row of a panel CSV from any reader.
pub fn read_raw_panel_from(input: impl std::io::Read) -> Result<Vec<RawRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| PipelineError::csv("ingest: failed to read CSV headers", e))?
        .clone();
    let header_map = build_header_map(&headers);
    let columns = ColumnIndex::resolve(&header_map)?;

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // +2: records() starts after the header line and lines are 1-based.
        let line = idx + 2;
        match result {
            Ok(record) => rows.push(columns.extract(&record, line)),
            Err(e) => {
                warn!(line, error = %e, "unreadable CSV row");
                rows.push(RawRecord {
                    line,
                    ..RawRecord::default()
                });
            }
        }
    }

    Ok(rows)
}

/// Positions of the required columns in the header.
struct ColumnIndex {
    country: usize,
    year: usize,
    rgdpo: usize,
    rgdpe: usize,
    cn: usize,
    pop: usize,
    emp: usize,
}

impl ColumnIndex {
    fn resolve(header_map: &HashMap<String, usize>) -> Result<Self> {
        let find = |name: &'static str| {
            header_map
                .get(name)
                .copied()
                .ok_or(PipelineError::MissingColumn(name))
        };
        Ok(Self {
            country: find("country")?,
            year: find("year")?,
            rgdpo: find("rgdpo")?,
            rgdpe: find("rgdpe")?,
            cn: find("cn")?,
            pop: find("pop")?,
            emp: find("emp")?,
        })
    }

    fn extract(&self, record: &StringRecord, line: usize) -> RawRecord {
        RawRecord {
            line,
            country: get_optional(record, self.country),
            year: get_optional(record, self.year),
            rgdpo: get_optional(record, self.rgdpo),
            rgdpe: get_optional(record, self.rgdpe),
            cn: get_optional(record, self.cn),
            pop: get_optional(record, self.pop),
            emp: get_optional(record, self.emp),
        }
    }
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    let mut map = HashMap::new();
    for (idx, name) in headers.iter().enumerate() {
        // First occurrence wins for duplicated headers.
        map.entry(normalize_header_name(name)).or_insert(idx);
    }
    map
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header. If we don't strip it, schema validation will incorrectly
    // report missing columns.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn get_optional(record: &StringRecord, idx: usize) -> Option<String> {
    record
        .get(idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_required_columns_and_ignores_extras() {
        let csv = "\u{feff}countrycode,Country,Year,rgdpe,rgdpo,pop,emp,hc,cn\n\
                   USA,United States,2023,24000000,23000000,340,165,3.7,90000000\n\
                   HUN,Hungary,2023,,n/a,9.6,4.7,3.4,1300000\n";
        let rows = read_raw_panel_from(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);

        let us = &rows[0];
        assert_eq!(us.line, 2);
        assert_eq!(us.country.as_deref(), Some("United States"));
        assert_eq!(us.year.as_deref(), Some("2023"));
        assert_eq!(us.rgdpo.as_deref(), Some("23000000"));
        assert_eq!(us.rgdpe.as_deref(), Some("24000000"));
        assert_eq!(us.cn.as_deref(), Some("90000000"));

        let hu = &rows[1];
        assert_eq!(hu.rgdpe, None);
        assert_eq!(hu.rgdpo.as_deref(), Some("n/a"));
    }

    #[test]
    fn short_rows_yield_missing_cells() {
        let csv = "country,year,rgdpo,rgdpe,cn,pop,emp\nChad,2023,40000\n";
        let rows = read_raw_panel_from(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].country.as_deref(), Some("Chad"));
        assert_eq!(rows[0].emp, None);
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let csv = "country,year,rgdpo,rgdpe,cn,pop\nChad,2023,1,1,1,1\n";
        let err = read_raw_panel_from(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, PipelineError::MissingColumn("emp")));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn workbook_rows_share_the_csv_schema() {
        let rows = vec![
            vec!["countrycode", "country", "year", "rgdpe", "rgdpo", "pop", "emp", "cn"],
            vec!["FRA", "France", "2023", "3600000", "3500000", "66", "30", "17000000"],
            vec!["NGA", "Nigeria", "2023", "1250000", "1200000", "224", "70", ""],
        ];
        let rows = rows
            .into_iter()
            .map(|r| r.into_iter().map(str::to_string).collect::<Vec<_>>());
        let raw = read_raw_rows(rows, 2).unwrap();

        assert_eq!(raw.len(), 2);
        assert_eq!(raw[0].line, 3);
        assert_eq!(raw[0].country.as_deref(), Some("France"));
        assert_eq!(raw[0].rgdpo.as_deref(), Some("3500000"));
        assert_eq!(raw[1].cn, None);
    }

    #[test]
    fn empty_sheet_is_missing_columns() {
        let err = read_raw_rows(std::iter::empty(), 1).unwrap_err();
        assert!(matches!(err, PipelineError::MissingColumn("country")));
    }

    #[test]
    fn workbook_extensions_are_detected() {
        assert!(is_workbook(Path::new("data/raw/pwt110.xlsx")));
        assert!(is_workbook(Path::new("PWT.XLSX")));
        assert!(is_workbook(Path::new("panel.ods")));
        assert!(!is_workbook(Path::new("data/raw/pwt110.csv")));
        assert!(!is_workbook(Path::new("pwt110")));
    }

    #[test]
    fn corrupt_workbook_is_an_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pwt110.xlsx");
        std::fs::write(&path, "country,year\nChad,2023\n").unwrap();

        let err = read_raw_panel(&path).unwrap_err();
        assert!(matches!(err, PipelineError::Workbook { .. }));
        assert!(err.to_string().starts_with("ingest: failed to open workbook"));
        assert_eq!(err.exit_code(), 2);
    }
}
