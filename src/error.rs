//! Error types.
//!
//! Two layers:
//!
//! - [`PipelineError`]: what the library stages return. One variant per fatal
//!   failure class; every message names the stage, the quantity and the
//!   record/year/entity involved.
//! - [`AppError`]: what the binary turns into an exit code and a single line on
//!   stderr.
//!
//! Exit codes:
//! - `2`: input / output problems (missing file, missing column, write failure)
//! - `3`: the data does not contain what the run asks for
//! - `4`: numeric preconditions violated

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("clean: no usable rows remain after cleaning ({rows_read} rows read, all dropped)")]
    EmptyResult { rows_read: usize },

    #[error("slice: year {year} not found in the cleaned table")]
    YearNotFound { year: i32 },

    /// Zero matches, or more than one: ambiguous reference data is not resolved by picking one.
    #[error("compare: expected exactly one record for reference country '{country}' in year {year}, found {matches}")]
    ReferenceNotFound { country: String, year: i32, matches: usize },

    #[error("{stage}: division by zero computing {quantity} for '{country}' ({year}): {divisor} is 0")]
    DivisionByZero {
        stage: &'static str,
        quantity: &'static str,
        divisor: &'static str,
        country: String,
        year: i32,
    },

    /// A nonzero but tiny divisor that still overflows the quotient.
    #[error("{stage}: {quantity} for '{country}' ({year}) is not finite: {divisor} is too close to 0")]
    NonFiniteRatio {
        stage: &'static str,
        quantity: &'static str,
        divisor: &'static str,
        country: String,
        year: i32,
    },

    #[error(
        "solow: insufficient data in year {year}: {eligible} record(s) with positive finite \
         output and capital per worker, at least {required} required"
    )]
    InsufficientData { year: i32, eligible: usize, required: usize },

    #[error("solow: alpha must be finite and strictly between 0 and 1, got {alpha}")]
    InvalidAlpha { alpha: f64 },

    #[error("ingest: missing required column `{0}`")]
    MissingColumn(&'static str),

    #[error("{context} '{}': {source}", .path.display())]
    Io {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{context}: {source}")]
    Csv {
        context: &'static str,
        #[source]
        source: csv::Error,
    },

    #[error("{context} '{}': {source}", .path.display())]
    Workbook {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("{context}: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("plot: failed to render chart '{chart}': {message}")]
    Render { chart: String, message: String },
}

pub type Result<T> = std::result::Result<T, PipelineError>;

impl PipelineError {
    pub fn io(context: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            context,
            path: path.into(),
            source,
        }
    }

    pub fn csv(context: &'static str, source: csv::Error) -> Self {
        Self::Csv { context, source }
    }

    pub fn workbook(context: &'static str, path: impl Into<PathBuf>, source: calamine::Error) -> Self {
        Self::Workbook {
            context,
            path: path.into(),
            source,
        }
    }

    pub fn json(context: &'static str, source: serde_json::Error) -> Self {
        Self::Json { context, source }
    }

    /// Process exit code for this failure class.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::MissingColumn(_)
            | Self::Io { .. }
            | Self::Csv { .. }
            | Self::Workbook { .. }
            | Self::Json { .. }
            | Self::Render { .. } => 2,
            Self::EmptyResult { .. }
            | Self::YearNotFound { .. }
            | Self::ReferenceNotFound { .. } => 3,
            Self::DivisionByZero { .. }
            | Self::NonFiniteRatio { .. }
            | Self::InsufficientData { .. }
            | Self::InvalidAlpha { .. } => 4,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        Self::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
