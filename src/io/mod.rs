//! Input/output helpers.
//!
//! - CSV ingest (`ingest`)
//! - CSV exports of every output table (`export`)
//! - Solow scalar report JSON read/write (`scalars`)

pub mod export;
pub mod ingest;
pub mod scalars;

pub use export::*;
pub use ingest::*;
pub use scalars::*;
