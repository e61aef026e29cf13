//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - initializes logging
//! - runs the requested stages
//! - prints tables/charts and writes the output files

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, RunArgs};
use crate::domain::RunConfig;
use crate::error::AppError;
use crate::plot::{Chart, income_charts, solow_charts};
use crate::report::{format_clean_summary, format_comparison, format_solow, format_summary};

pub mod pipeline;

use pipeline::OutputPaths;

/// Entry point for the `growth` binary.
pub fn run() -> Result<(), AppError> {
    // A missing `.env` is fine; variables may come from the real environment.
    let _ = dotenvy::dotenv();

    let argv = rewrite_args(std::env::args().collect());
    let cli = Cli::parse_from(argv);
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::Run(args) => handle_run(&config_from_args(&args)),
        Command::Clean(args) => handle_clean(&config_from_args(&args)),
        Command::Compare(args) => handle_compare(&config_from_args(&args)),
        Command::Solow(args) => handle_solow(&config_from_args(&args)),
    }
}

fn handle_run(config: &RunConfig) -> Result<(), AppError> {
    let cleaned = pipeline::load_cleaned(config)?;
    let (comparison, summary) = pipeline::run_comparison(&cleaned.table, config)?;
    let fit = pipeline::run_solow(&cleaned.table, config)?;

    let mut charts = income_charts(&comparison, config.plot_width)?;
    charts.extend(solow_charts(&fit, config.plot_width, config.plot_height)?);

    println!("{}", format_clean_summary(&cleaned));
    println!("{}", format_comparison(&comparison));
    println!("{}", format_summary(&summary, config.year));
    println!("{}", format_solow(&fit));
    print_charts(config, &charts);

    if config.export {
        let paths = OutputPaths::prepare(config)?;
        let mut written = vec![paths.export_cleaned(&cleaned.table)?];
        written.extend(paths.export_comparison(&comparison, &summary)?);
        written.extend(paths.export_solow(&fit)?);
        written.extend(paths.write_charts(&charts)?);
        info!(files = written.len(), out_dir = %config.out_dir.display(), "run complete");
    }

    Ok(())
}

fn handle_clean(config: &RunConfig) -> Result<(), AppError> {
    let cleaned = pipeline::load_cleaned(config)?;
    println!("{}", format_clean_summary(&cleaned));
    for row in &cleaned.dropped {
        println!("dropped {}", row.describe());
    }

    if config.export {
        let path = OutputPaths::prepare(config)?.export_cleaned(&cleaned.table)?;
        info!(path = %path.display(), "wrote cleaned panel");
    }
    Ok(())
}

fn handle_compare(config: &RunConfig) -> Result<(), AppError> {
    let cleaned = pipeline::load_cleaned(config)?;
    let (comparison, summary) = pipeline::run_comparison(&cleaned.table, config)?;
    let charts = income_charts(&comparison, config.plot_width)?;

    println!("{}", format_comparison(&comparison));
    println!("{}", format_summary(&summary, config.year));
    print_charts(config, &charts);

    if config.export {
        let paths = OutputPaths::prepare(config)?;
        let mut written = paths.export_comparison(&comparison, &summary)?;
        written.extend(paths.write_charts(&charts)?);
        info!(files = written.len(), "wrote income comparison");
    }
    Ok(())
}

fn handle_solow(config: &RunConfig) -> Result<(), AppError> {
    let cleaned = pipeline::load_cleaned(config)?;
    let fit = pipeline::run_solow(&cleaned.table, config)?;
    let charts = solow_charts(&fit, config.plot_width, config.plot_height)?;

    println!("{}", format_solow(&fit));
    print_charts(config, &charts);

    if config.export {
        let paths = OutputPaths::prepare(config)?;
        let mut written = paths.export_solow(&fit)?;
        written.extend(paths.write_charts(&charts)?);
        info!(files = written.len(), "wrote Solow fit");
    }
    Ok(())
}

fn print_charts(config: &RunConfig, charts: &[Chart]) {
    if config.plot {
        for chart in charts {
            println!("{}", chart.body);
        }
    }
}

pub fn config_from_args(args: &RunArgs) -> RunConfig {
    RunConfig {
        input: args.input.clone(),
        out_dir: args.out_dir.clone(),
        year: args.year,
        reference: args.reference.clone(),
        countries: args.countries.iter().map(|c| c.trim().to_string()).collect(),
        alpha: args.alpha,
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export: !args.no_export,
    }
}

/// `-v` / `-q` win over `RUST_LOG`; otherwise `RUST_LOG`, else `info`.
fn init_logging(verbose: bool, quiet: bool) {
    let filter = match (verbose, quiet) {
        (true, _) => EnvFilter::new("debug"),
        (_, true) => EnvFilter::new("warn"),
        _ => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Rewrite argv so `growth` defaults to `growth run`.
///
/// Rules:
/// - `growth`                      -> `growth run`
/// - `growth -i pwt.csv ...`       -> `growth run -i pwt.csv ...`
/// - `growth --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("run".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "run" | "clean" | "compare" | "solow");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "run flags".
    if arg1.starts_with('-') {
        argv.insert(1, "run".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_runs_everything() {
        assert_eq!(rewrite_args(args(&["growth"])), args(&["growth", "run"]));
        assert_eq!(
            rewrite_args(args(&["growth", "-i", "pwt.csv"])),
            args(&["growth", "run", "-i", "pwt.csv"])
        );
        assert_eq!(rewrite_args(args(&["growth", "--help"])), args(&["growth", "--help"]));
        assert_eq!(rewrite_args(args(&["growth", "solow"])), args(&["growth", "solow"]));
    }

    #[test]
    fn config_trims_country_names() {
        let cli = Cli::parse_from(["growth", "run", "--countries", "Chile, Peru", "--no-export"]);
        let Command::Run(run_args) = cli.command else {
            panic!("expected run");
        };
        let config = config_from_args(&run_args);
        assert_eq!(config.countries, vec!["Chile".to_string(), "Peru".to_string()]);
        assert!(!config.export);
        assert!(config.plot);
    }
}
