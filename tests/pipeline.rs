use std::fs;
use std::path::Path;

use growth_accounting::app::pipeline::{self, OutputPaths};
use growth_accounting::domain::RunConfig;
use growth_accounting::error::PipelineError;
use growth_accounting::io::read_scalars_json;
use growth_accounting::plot::{income_charts, solow_charts};

const PANEL: &str = "\
countrycode,country,currency_unit,year,rgdpe,rgdpo,pop,emp,avh,hc,cn
USA,United States,US Dollar,2022,23500000,23100000,333,163,1790,3.7,88000000
USA,United States,US Dollar,2023,24100000,23800000,335,165,1790,3.7,90000000
FRA,France,Euro,2023,3600000,3500000,66,30,1500,3.4,17000000
HUN,Hungary,Forint,2023,390000,380000,9.6,4.7,1700,3.4,1300000
IND,India,Indian Rupee,2023,14500000,14200000,1430,600,2100,2.2,40000000
NGA,Nigeria,Naira,2023,1250000,1200000,224,70,,1.9,3000000
BRA,Brazil,Brazilian Real,2023,n/a,4000000,216,100,1700,3.1,15000000
VNM,Viet Nam,Dong,2023,1300000,1250000,99,55,2100,2.8,
XXX,Atlantis,None,2023,1000,1000,1,1,1,1,0
";

fn config_for(dir: &Path, input: &Path) -> RunConfig {
    RunConfig {
        input: input.to_path_buf(),
        out_dir: dir.join("out"),
        ..RunConfig::default()
    }
}

fn write_panel(dir: &Path, body: &str) -> std::path::PathBuf {
    let path = dir.join("pwt.csv");
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn full_run_produces_every_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_panel(dir.path(), PANEL);
    let config = config_for(dir.path(), &input);

    let cleaned = pipeline::load_cleaned(&config).unwrap();
    assert_eq!(cleaned.rows_read, 9);
    // Brazil (rgdpe "n/a") and Viet Nam (no cn) are dropped.
    assert_eq!(cleaned.table.len(), 7);
    assert_eq!(cleaned.dropped.len(), 2);

    let (comparison, summary) = pipeline::run_comparison(&cleaned.table, &config).unwrap();
    let ranked: Vec<&str> = comparison.ranked.iter().map(|r| r.country.as_str()).collect();
    // Brazil was dropped; "Vietnam" is spelled "Viet Nam" in the data; China is absent.
    assert_eq!(ranked, vec!["France", "Hungary", "India", "Nigeria"]);
    assert_eq!(summary.columns[0].count, 6);

    let fit = pipeline::run_solow(&cleaned.table, &config).unwrap();
    assert_eq!(fit.records.len(), 5);
    assert_eq!(fit.excluded, vec!["Atlantis".to_string()]);

    let paths = OutputPaths::prepare(&config).unwrap();
    paths.export_cleaned(&cleaned.table).unwrap();
    paths.export_comparison(&comparison, &summary).unwrap();
    paths.export_solow(&fit).unwrap();
    let mut charts = income_charts(&comparison, 40).unwrap();
    charts.extend(solow_charts(&fit, 40, 12).unwrap());
    let chart_files = paths.write_charts(&charts).unwrap();
    assert_eq!(chart_files.len(), 6);

    let cleaned_dir = dir.path().join("out/cleaned");
    for name in [
        "pwt_cleaned.csv",
        "income_comparison.csv",
        "summary_statistics.csv",
        "solow_computed_columns.csv",
        "solow_scalars.json",
    ] {
        assert!(cleaned_dir.join(name).is_file(), "missing {name}");
    }
    let graphs_dir = dir.path().join("out/graphs");
    for name in [
        "income_relative_to_US.svg",
        "y_per_person_barplot.svg",
        "y_per_worker_barplot.svg",
        "solow_equaltech_lnY_vs_lnYhat.svg",
        "implied_lnZ_vs_lnY.svg",
        "solow_fullmodel_lnYhat_vs_lnY.svg",
    ] {
        let svg = fs::read_to_string(graphs_dir.join(name)).unwrap();
        assert!(svg.contains("<svg"), "{name} is not an SVG document");
    }
    let income_svg = fs::read_to_string(graphs_dir.join("income_relative_to_US.svg")).unwrap();
    for country in ranked {
        assert!(income_svg.contains(country), "{country} missing from bar chart");
    }

    let scalars = read_scalars_json(&cleaned_dir.join("solow_scalars.json")).unwrap();
    assert_eq!(scalars.ln_z_equal, fit.ln_z_equal);
    assert_eq!(scalars.ln_psi, fit.ln_psi);
    assert_eq!(scalars.n_fit, 5);

    // The cleaned export is itself valid input and cleans to the same table.
    let again = pipeline::load_cleaned(&config_for(dir.path(), &cleaned_dir.join("pwt_cleaned.csv"))).unwrap();
    assert_eq!(again.table, cleaned.table);
}

#[test]
fn all_rows_dropped_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_panel(dir.path(), "country,year,rgdpo,rgdpe,cn,pop,emp\nChad,2023,x,y,1,1,1\n");
    let err = pipeline::load_cleaned(&config_for(dir.path(), &input)).unwrap_err();
    assert!(matches!(err, PipelineError::EmptyResult { rows_read: 1 }));
}

#[test]
fn absent_year_is_reported_by_both_stages() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_panel(dir.path(), PANEL);
    let config = RunConfig {
        year: 1950,
        ..config_for(dir.path(), &input)
    };
    let cleaned = pipeline::load_cleaned(&config).unwrap();

    let err = pipeline::run_comparison(&cleaned.table, &config).unwrap_err();
    assert!(err.to_string().contains("1950"));
    let err = pipeline::run_solow(&cleaned.table, &config).unwrap_err();
    assert!(matches!(err, PipelineError::YearNotFound { year: 1950 }));
}

#[test]
fn zero_employment_halts_before_logs() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_panel(
        dir.path(),
        "country,year,rgdpo,rgdpe,cn,pop,emp\n\
         United States,2023,20000000,20000000,80000000,330,160\n\
         Hungary,2023,300000,300000,1200000,10,0\n",
    );
    let config = config_for(dir.path(), &input);
    let cleaned = pipeline::load_cleaned(&config).unwrap();

    let err = pipeline::run_solow(&cleaned.table, &config).unwrap_err();
    assert!(matches!(err, PipelineError::DivisionByZero { divisor: "emp", .. }));
    assert_eq!(err.exit_code(), 4);
    assert!(!dir.path().join("out").exists());
}

#[test]
fn one_eligible_country_is_insufficient() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_panel(
        dir.path(),
        "country,year,rgdpo,rgdpe,cn,pop,emp\n\
         United States,2023,20000000,20000000,80000000,330,160\n\
         Hungary,2023,300000,300000,0,10,4.5\n\
         France,2023,3500000,3500000,-1,66,30\n",
    );
    let config = config_for(dir.path(), &input);
    let cleaned = pipeline::load_cleaned(&config).unwrap();

    // The comparison still works with every country.
    let (comparison, _) = pipeline::run_comparison(&cleaned.table, &config).unwrap();
    assert_eq!(comparison.normalized.len(), 3);

    let err = pipeline::run_solow(&cleaned.table, &config).unwrap_err();
    assert!(matches!(err, PipelineError::InsufficientData { eligible: 1, .. }));
}
