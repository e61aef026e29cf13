//! Cross-country income comparison.

pub mod income;

pub use income::*;
