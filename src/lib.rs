//! `growth-accounting` library crate.
//!
//! The binary (`growth`) is a thin wrapper around this library so that:
//!
//! - every stage is testable without spawning processes
//! - the stages compose explicitly: `data::clean` -> `compare::compare_income`
//!   and `data::select_year` -> `fit::fit_solow`
//! - presentation (`report`, `plot`) and persistence (`io`) stay out of the math

pub mod app;
pub mod cli;
pub mod compare;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
