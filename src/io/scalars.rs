//! Read/write the Solow scalar report (JSON).
//!
//! The report is the portable summary of a fit:
//! - run metadata (tool, timestamp, year, alpha)
//! - `lnZ_equal` / `ln_psi` and their levels
//! - which countries were fitted and which were excluded

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::SolowFit;
use crate::error::{PipelineError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarReport {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub year: i32,
    pub alpha: f64,
    #[serde(rename = "lnZ_equal")]
    pub ln_z_equal: f64,
    #[serde(rename = "Z_equal")]
    pub z_equal: f64,
    pub ln_psi: f64,
    pub psi: f64,
    pub n_fit: usize,
    pub excluded: Vec<String>,
}

impl ScalarReport {
    pub fn from_fit(fit: &SolowFit, generated_at: DateTime<Utc>) -> Self {
        Self {
            tool: "growth".to_string(),
            generated_at,
            year: fit.year,
            alpha: fit.alpha,
            ln_z_equal: fit.ln_z_equal,
            z_equal: fit.z_equal(),
            ln_psi: fit.ln_psi,
            psi: fit.psi(),
            n_fit: fit.records.len(),
            excluded: fit.excluded.clone(),
        }
    }
}

/// Write a scalar report JSON file.
pub fn write_scalars_json(path: &Path, report: &ScalarReport) -> Result<()> {
    let file = File::create(path).map_err(|e| PipelineError::io("export: failed to create JSON", path, e))?;
    serde_json::to_writer_pretty(file, report).map_err(|e| PipelineError::json("export: failed to write JSON", e))
}

/// Read a scalar report JSON file.
pub fn read_scalars_json(path: &Path) -> Result<ScalarReport> {
    let file = File::open(path).map_err(|e| PipelineError::io("ingest: failed to open JSON", path, e))?;
    serde_json::from_reader(file).map_err(|e| PipelineError::json("ingest: failed to parse scalar JSON", e))
}
