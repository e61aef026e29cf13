//! Shared domain types.
//!
//! Each pipeline stage produces a new table type rather than mutating the one
//! it was given:
//!
//! ```text
//! RawRecord -> CleanedTable -> YearSlice -> RankedComparison
//!                                       \-> SolowFit
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Capital's share of output in the Cobb-Douglas production function.
pub const DEFAULT_ALPHA: f64 = 1.0 / 3.0;

/// Cross-section year used when none is given.
pub const DEFAULT_YEAR: i32 = 2023;

/// Country every per-capita income is expressed relative to.
pub const DEFAULT_REFERENCE: &str = "United States";

/// Countries shown in the income comparison table and bar charts.
pub const DEFAULT_COUNTRIES: [&str; 7] = [
    "China", "India", "France", "Vietnam", "Nigeria", "Brazil", "Hungary",
];

/// A raw input row: every cell as read, before any coercion.
///
/// `None` means the cell was absent or empty. `line` is the 1-based line in the
/// source file (0 for rows that did not come from a file).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    pub line: usize,
    pub country: Option<String>,
    pub year: Option<String>,
    pub rgdpo: Option<String>,
    pub rgdpe: Option<String>,
    pub cn: Option<String>,
    pub pop: Option<String>,
    pub emp: Option<String>,
}

impl From<&PanelRecord> for RawRecord {
    fn from(r: &PanelRecord) -> Self {
        // `f64::to_string` prints the shortest representation that parses back
        // to the same value, so re-cleaning is lossless.
        Self {
            line: 0,
            country: Some(r.country.clone()),
            year: Some(r.year.to_string()),
            rgdpo: Some(r.rgdpo.to_string()),
            rgdpe: Some(r.rgdpe.to_string()),
            cn: Some(r.cn.to_string()),
            pop: Some(r.pop.to_string()),
            emp: Some(r.emp.to_string()),
        }
    }
}

/// One complete country-year observation.
///
/// Units follow the Penn World Table: output and capital in millions of
/// 2021 USD, population and employment in millions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelRecord {
    pub country: String,
    pub year: i32,
    pub rgdpo: f64,
    pub rgdpe: f64,
    pub cn: f64,
    pub pop: f64,
    pub emp: f64,
}

/// Ordered, complete panel records. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanedTable {
    records: Vec<PanelRecord>,
}

impl CleanedTable {
    pub fn new(records: Vec<PanelRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[PanelRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct years present, ascending.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.records.iter().map(|r| r.year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    /// The table as raw rows, e.g. to feed it back through the cleaner.
    pub fn to_raw(&self) -> Vec<RawRecord> {
        self.records.iter().map(RawRecord::from).collect()
    }
}

/// A panel record with income per person and per worker attached.
#[derive(Debug, Clone, PartialEq)]
pub struct YearRecord {
    pub panel: PanelRecord,
    pub y_per_person: f64,
    pub y_per_worker: f64,
}

impl YearRecord {
    pub fn country(&self) -> &str {
        &self.panel.country
    }
}

/// All records of one year, in cleaned-table order.
#[derive(Debug, Clone, PartialEq)]
pub struct YearSlice {
    pub year: i32,
    pub records: Vec<YearRecord>,
}

/// Income measures of one country, normalized to the reference country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeRecord {
    pub country: String,
    pub y_per_person: f64,
    pub y_per_worker: f64,
    #[serde(rename = "rel_income_US")]
    pub rel_income_us: f64,
}

/// Output of the income comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedComparison {
    pub year: i32,
    pub reference: String,
    /// `y_per_person` of the reference country.
    pub reference_income: f64,
    /// Every record of the year slice, in slice order.
    pub normalized: Vec<IncomeRecord>,
    /// Requested countries present in the slice, by `rel_income_US` descending.
    pub ranked: Vec<IncomeRecord>,
}

/// Per-country Solow growth-accounting quantities (all in logs).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolowRecord {
    pub country: String,
    pub ln_y: f64,
    pub ln_k: f64,
    pub ln_y_hat_equal: f64,
    #[serde(rename = "lnZ_implied")]
    pub ln_z_implied: f64,
    #[serde(rename = "lnZ_tilde")]
    pub ln_z_tilde: f64,
    pub ln_y_hat_full: f64,
}

/// Result of fitting both Solow variants to one year slice.
#[derive(Debug, Clone, PartialEq)]
pub struct SolowFit {
    pub year: i32,
    pub alpha: f64,
    /// Common log technology level under the equal-technology assumption.
    pub ln_z_equal: f64,
    /// Log of the average capital to effective labor ratio.
    pub ln_psi: f64,
    pub records: Vec<SolowRecord>,
    /// Countries left out of the fit because a log argument was not positive
    /// and finite.
    pub excluded: Vec<String>,
}

impl SolowFit {
    pub fn z_equal(&self) -> f64 {
        self.ln_z_equal.exp()
    }

    pub fn psi(&self) -> f64 {
        self.ln_psi.exp()
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus environment and defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: PathBuf,
    /// Root of the output tree; `cleaned/` and `graphs/` live below it.
    pub out_dir: PathBuf,
    pub year: i32,
    pub reference: String,
    pub countries: Vec<String>,
    pub alpha: f64,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    pub export: bool,
}

impl RunConfig {
    pub fn cleaned_dir(&self) -> PathBuf {
        self.out_dir.join("cleaned")
    }

    pub fn graphs_dir(&self) -> PathBuf {
        self.out_dir.join("graphs")
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data/raw/pwt110.csv"),
            out_dir: PathBuf::from("data"),
            year: DEFAULT_YEAR,
            reference: DEFAULT_REFERENCE.to_string(),
            countries: DEFAULT_COUNTRIES.iter().map(|c| c.to_string()).collect(),
            alpha: DEFAULT_ALPHA,
            plot: true,
            plot_width: 60,
            plot_height: 20,
            export: true,
        }
    }
}
