//! CSV exports.
//!
//! The exports are meant to be easy to consume in spreadsheets or downstream
//! scripts. Column names follow the Penn World Table / analysis conventions
//! (`rel_income_US`, `lnZ_implied`, ...).

use std::path::Path;

use serde::Serialize;

use crate::domain::{CleanedTable, IncomeRecord, SolowFit};
use crate::error::{PipelineError, Result};
use crate::report::summary::{STAT_LABELS, Summary};

/// Write the cleaned panel. The file is valid input for another run.
pub fn write_cleaned_csv(path: &Path, table: &CleanedTable) -> Result<()> {
    write_rows(path, table.records())
}

/// Write the ranked income comparison.
pub fn write_comparison_csv(path: &Path, ranked: &[IncomeRecord]) -> Result<()> {
    write_rows(path, ranked)
}

/// Write the per-country Solow table.
pub fn write_solow_csv(path: &Path, fit: &SolowFit) -> Result<()> {
    write_rows(path, &fit.records)
}

/// Write summary statistics: one row per statistic, one column per measure.
pub fn write_summary_csv(path: &Path, summary: &Summary) -> Result<()> {
    let mut writer = create_writer(path)?;

    let mut header = vec![String::new()];
    header.extend(summary.columns.iter().map(|c| c.name.to_string()));
    writer
        .write_record(&header)
        .map_err(|e| PipelineError::csv("export: failed to write summary header", e))?;

    for (i, label) in STAT_LABELS.iter().enumerate() {
        let mut row = vec![label.to_string()];
        row.extend(summary.columns.iter().map(|c| c.values()[i].to_string()));
        writer
            .write_record(&row)
            .map_err(|e| PipelineError::csv("export: failed to write summary row", e))?;
    }

    flush(writer, path)
}

fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer = create_writer(path)?;
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| PipelineError::csv("export: failed to write CSV row", e))?;
    }
    flush(writer, path)
}

fn create_writer(path: &Path) -> Result<csv::Writer<std::fs::File>> {
    csv::Writer::from_path(path).map_err(|e| PipelineError::csv("export: failed to create CSV", e))
}

fn flush(mut writer: csv::Writer<std::fs::File>, path: &Path) -> Result<()> {
    writer
        .flush()
        .map_err(|e| PipelineError::io("export: failed to flush CSV", path, e))
}
