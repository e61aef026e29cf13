//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - raw and cleaned panel rows (`RawRecord`, `PanelRecord`, `CleanedTable`)
//! - derived tables (`YearSlice`, `RankedComparison`, `SolowFit`)
//! - run configuration and the fixed defaults (`RunConfig`, `DEFAULT_*`)

pub mod types;

pub use types::*;
