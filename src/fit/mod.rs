//! Model fitting.
//!
//! Responsibilities:
//!
//! - fit the equal-technology and steady-state-inversion Solow variants
//! - fit descriptive trend lines for the scatter charts

pub mod solow;
pub mod trend;

pub use solow::*;
pub use trend::*;
