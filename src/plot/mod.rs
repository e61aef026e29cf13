//! Charts: ASCII for the terminal, SVG for `graphs/`.

pub mod ascii;
pub mod charts;
pub mod svg;

pub use ascii::*;
pub use charts::*;
pub use svg::*;
