//! Command-line parsing for the growth-accounting pipeline.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the data and model code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{DEFAULT_ALPHA, DEFAULT_COUNTRIES, DEFAULT_REFERENCE, DEFAULT_YEAR};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "growth", version, about = "Cross-country income comparison and Solow growth accounting")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log debug details to stderr.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Clean the panel, compare incomes, fit the Solow model, write tables and charts.
    Run(RunArgs),
    /// Clean the panel and write the cleaned CSV only.
    Clean(RunArgs),
    /// Print (and export) the income comparison only.
    Compare(RunArgs),
    /// Print (and export) the Solow fit only.
    Solow(RunArgs),
}

/// Options shared by every subcommand.
#[derive(Debug, Args, Clone)]
pub struct RunArgs {
    /// Raw panel (Penn World Table layout): CSV, or an `.xlsx`/`.ods` workbook.
    #[arg(short, long, env = "GROWTH_INPUT", default_value = "data/raw/pwt110.csv")]
    pub input: PathBuf,

    /// Output root; `cleaned/` and `graphs/` are created below it.
    #[arg(short, long, env = "GROWTH_OUT_DIR", default_value = "data")]
    pub out_dir: PathBuf,

    /// Cross-section year.
    #[arg(short, long, default_value_t = DEFAULT_YEAR)]
    pub year: i32,

    /// Reference country for relative income.
    #[arg(long, default_value = DEFAULT_REFERENCE)]
    pub reference: String,

    /// Countries to rank (comma separated).
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_COUNTRIES.map(String::from))]
    pub countries: Vec<String>,

    /// Capital share of output, strictly between 0 and 1.
    #[arg(long, default_value_t = DEFAULT_ALPHA)]
    pub alpha: f64,

    /// Chart width (columns).
    #[arg(long, default_value_t = 60)]
    pub width: usize,

    /// Scatter chart height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Do not print charts to the terminal (chart files are still written).
    #[arg(long)]
    pub no_plot: bool,

    /// Do not write any files.
    #[arg(long)]
    pub no_export: bool,
}
