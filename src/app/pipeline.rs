//! Shared pipeline logic used by every subcommand.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! ingest -> clean -> (income comparison | year slice -> Solow fit) -> summary
//!
//! Computation and persistence are separate steps: every table is computed
//! before the first file is written, so a failing run leaves no partial output.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::compare::compare_income;
use crate::data::{CleanOutput, clean, select_year};
use crate::domain::{CleanedTable, RankedComparison, RunConfig, SolowFit};
use crate::error::{PipelineError, Result};
use crate::fit::fit_solow;
use crate::io::{
    ScalarReport, read_raw_panel, write_cleaned_csv, write_comparison_csv, write_scalars_json,
    write_solow_csv, write_summary_csv,
};
use crate::plot::Chart;
use crate::report::{Summary, describe};

/// Dropped rows beyond this many are summarized instead of logged one by one.
const MAX_DROPPED_WARNINGS: usize = 10;

/// Read the raw panel and clean it. An empty result is fatal.
pub fn load_cleaned(config: &RunConfig) -> Result<CleanOutput> {
    let raw = read_raw_panel(&config.input)?;
    let out = clean(&raw);

    for row in out.dropped.iter().take(MAX_DROPPED_WARNINGS) {
        debug!(line = row.line, "dropped row: {}", row.describe());
    }
    if !out.dropped.is_empty() {
        warn!(
            dropped = out.dropped.len(),
            "rows with missing or non-numeric required fields were dropped"
        );
    }
    info!(
        path = %config.input.display(),
        rows_read = out.rows_read,
        rows_kept = out.table.len(),
        "cleaned panel"
    );

    if out.table.is_empty() {
        return Err(PipelineError::EmptyResult { rows_read: out.rows_read });
    }
    Ok(out)
}

/// Income comparison plus descriptive statistics over the full year slice.
pub fn run_comparison(table: &CleanedTable, config: &RunConfig) -> Result<(RankedComparison, Summary)> {
    let comparison = compare_income(table, config.year, &config.reference, &config.countries)?;
    let summary = describe(&comparison.normalized);

    let missing: Vec<&str> = config
        .countries
        .iter()
        .filter(|c| !comparison.ranked.iter().any(|r| &r.country == *c))
        .map(String::as_str)
        .collect();
    if !missing.is_empty() {
        warn!(year = config.year, ?missing, "requested countries not present in the year slice");
    }
    info!(year = config.year, ranked = comparison.ranked.len(), "compared incomes");

    Ok((comparison, summary))
}

/// Solow fit on the year slice, independent of the income comparison.
pub fn run_solow(table: &CleanedTable, config: &RunConfig) -> Result<SolowFit> {
    let slice = select_year(table, config.year)?;
    let fit = fit_solow(&slice, config.alpha)?;

    if !fit.excluded.is_empty() {
        warn!(excluded = ?fit.excluded, "countries outside the log domain left out of the Solow fit");
    }
    info!(
        year = fit.year,
        n_fit = fit.records.len(),
        ln_z_equal = fit.ln_z_equal,
        ln_psi = fit.ln_psi,
        "fitted Solow model"
    );
    Ok(fit)
}

/// Output file locations under the configured root.
pub struct OutputPaths {
    pub cleaned_dir: PathBuf,
    pub graphs_dir: PathBuf,
}

impl OutputPaths {
    /// Create `cleaned/` and `graphs/` if they do not exist.
    pub fn prepare(config: &RunConfig) -> Result<Self> {
        let paths = Self {
            cleaned_dir: config.cleaned_dir(),
            graphs_dir: config.graphs_dir(),
        };
        for dir in [&paths.cleaned_dir, &paths.graphs_dir] {
            fs::create_dir_all(dir).map_err(|e| PipelineError::io("export: failed to create directory", dir, e))?;
        }
        Ok(paths)
    }

    pub fn export_cleaned(&self, table: &CleanedTable) -> Result<PathBuf> {
        let path = self.cleaned_dir.join("pwt_cleaned.csv");
        write_cleaned_csv(&path, table)?;
        Ok(logged(path))
    }

    pub fn export_comparison(&self, comparison: &RankedComparison, summary: &Summary) -> Result<Vec<PathBuf>> {
        let cmp_path = self.cleaned_dir.join("income_comparison.csv");
        write_comparison_csv(&cmp_path, &comparison.ranked)?;
        let summary_path = self.cleaned_dir.join("summary_statistics.csv");
        write_summary_csv(&summary_path, summary)?;
        Ok(vec![logged(cmp_path), logged(summary_path)])
    }

    pub fn export_solow(&self, fit: &SolowFit) -> Result<Vec<PathBuf>> {
        let table_path = self.cleaned_dir.join("solow_computed_columns.csv");
        write_solow_csv(&table_path, fit)?;
        let scalars_path = self.cleaned_dir.join("solow_scalars.json");
        write_scalars_json(&scalars_path, &ScalarReport::from_fit(fit, Utc::now()))?;
        Ok(vec![logged(table_path), logged(scalars_path)])
    }

    pub fn write_charts(&self, charts: &[Chart]) -> Result<Vec<PathBuf>> {
        charts
            .iter()
            .map(|chart| {
                let path = self.graphs_dir.join(chart.file_name);
                write_svg(&path, &chart.svg)?;
                Ok(logged(path))
            })
            .collect()
    }
}

fn write_svg(path: &Path, body: &str) -> Result<()> {
    fs::write(path, body).map_err(|e| PipelineError::io("export: failed to write chart", path, e))
}

fn logged(path: PathBuf) -> PathBuf {
    debug!(path = %path.display(), "wrote output");
    path
}
