//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the stage code stays free of presentation concerns
//! - output changes are localized

use crate::data::CleanOutput;
use crate::domain::{IncomeRecord, RankedComparison, SolowFit};
use crate::report::summary::{STAT_LABELS, Summary};

/// One-paragraph account of what the cleaner kept and dropped.
pub fn format_clean_summary(out: &CleanOutput) -> String {
    let mut s = String::new();
    s.push_str("=== growth - panel cleaning ===\n");
    s.push_str(&format!(
        "Rows: read={} | kept={} | dropped={}\n",
        out.rows_read,
        out.table.len(),
        out.dropped.len()
    ));
    let years = out.table.years();
    if let (Some(first), Some(last)) = (years.first(), years.last()) {
        s.push_str(&format!("Years: {first}..{last} ({} distinct)\n", years.len()));
    }
    s
}

/// Ranked income comparison table.
pub fn format_comparison(cmp: &RankedComparison) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Income relative to {} ({}), reference y_per_person = {:.2}\n",
        cmp.reference, cmp.year, cmp.reference_income
    ));
    out.push_str(&format_income_table(&cmp.ranked));
    out
}

fn format_income_table(rows: &[IncomeRecord]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<20} {:>14} {:>14} {:>14}\n",
        "country", "y_per_person", "y_per_worker", "rel_income_US"
    ));
    out.push_str(&format!("{:-<20} {:-<14} {:-<14} {:-<14}\n", "", "", "", ""));
    for r in rows {
        out.push_str(&format!(
            "{:<20} {:>14.2} {:>14.2} {:>14.4}\n",
            truncate(&r.country, 20),
            r.y_per_person,
            r.y_per_worker,
            r.rel_income_us
        ));
    }
    out
}

/// Solow scalars followed by the per-country table.
pub fn format_solow(fit: &SolowFit) -> String {
    let mut out = String::new();
    out.push_str(&format!("Solow model ({}), alpha = {:.4}\n", fit.year, fit.alpha));
    out.push_str(&format!(
        "- equal technology : lnZ = {:.6} (Z = {:.4})\n",
        fit.ln_z_equal,
        fit.z_equal()
    ));
    out.push_str(&format!(
        "- steady state     : ln psi = {:.6} (psi = {:.4})\n",
        fit.ln_psi,
        fit.psi()
    ));
    out.push_str(&format!(
        "- countries        : fitted={} excluded={}\n\n",
        fit.records.len(),
        fit.excluded.len()
    ));

    out.push_str(&format!(
        "{:<20} {:>9} {:>9} {:>9} {:>9} {:>9} {:>9}\n",
        "country", "ln_y", "ln_k", "y_hat_eq", "lnZ_impl", "lnZ_tld", "y_hat_ful"
    ));
    out.push_str(&format!(
        "{:-<20} {:-<9} {:-<9} {:-<9} {:-<9} {:-<9} {:-<9}\n",
        "", "", "", "", "", "", ""
    ));
    for r in &fit.records {
        out.push_str(&format!(
            "{:<20} {:>9.4} {:>9.4} {:>9.4} {:>9.4} {:>9.4} {:>9.4}\n",
            truncate(&r.country, 20),
            r.ln_y,
            r.ln_k,
            r.ln_y_hat_equal,
            r.ln_z_implied,
            r.ln_z_tilde,
            r.ln_y_hat_full
        ));
    }
    out
}

/// Statistics as rows, measures as columns.
pub fn format_summary(summary: &Summary, year: i32) -> String {
    let mut out = String::new();
    out.push_str(&format!("Summary statistics ({year}, all countries)\n"));
    out.push_str(&format!("{:<6}", ""));
    for c in &summary.columns {
        out.push_str(&format!(" {:>16}", c.name));
    }
    out.push('\n');

    for (i, label) in STAT_LABELS.iter().enumerate() {
        out.push_str(&format!("{label:<6}"));
        for c in &summary.columns {
            out.push_str(&format!(" {:>16}", fmt_stat(c.values()[i])));
        }
        out.push('\n');
    }
    out
}

fn fmt_stat(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else {
        format!("{v:.4}")
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SolowRecord;
    use crate::report::describe;

    fn income(country: &str, rel: f64) -> IncomeRecord {
        IncomeRecord {
            country: country.to_string(),
            y_per_person: rel * 80_000.0,
            y_per_worker: rel * 160_000.0,
            rel_income_us: rel,
        }
    }

    #[test]
    fn comparison_table_lists_ranked_rows() {
        let cmp = RankedComparison {
            year: 2023,
            reference: "United States".to_string(),
            reference_income: 80_000.0,
            normalized: vec![income("United States", 1.0), income("France", 0.7)],
            ranked: vec![income("France", 0.7)],
        };
        let txt = format_comparison(&cmp);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("United States (2023)"));
        assert!(lines[3].starts_with("France"));
        assert!(lines[3].ends_with("0.7000"));
    }

    #[test]
    fn solow_report_shows_scalars() {
        let fit = SolowFit {
            year: 2023,
            alpha: 1.0 / 3.0,
            ln_z_equal: 0.0,
            ln_psi: 1.0,
            records: vec![SolowRecord {
                country: "A very long country name indeed".to_string(),
                ln_y: 1.0,
                ln_k: 2.0,
                ln_y_hat_equal: 0.5,
                ln_z_implied: 0.5,
                ln_z_tilde: 1.0,
                ln_y_hat_full: 1.3333,
            }],
            excluded: vec![],
        };
        let txt = format_solow(&fit);
        assert!(txt.contains("lnZ = 0.000000 (Z = 1.0000)"));
        assert!(txt.contains("fitted=1 excluded=0"));
        assert!(txt.contains("A very long country."));
    }

    #[test]
    fn summary_has_one_line_per_statistic() {
        let s = describe(&[income("A", 1.0)]);
        let txt = format_summary(&s, 2023);
        assert_eq!(txt.lines().count(), 2 + STAT_LABELS.len());
        assert!(txt.lines().any(|l| l.starts_with("std") && l.contains("NaN")));
    }
}
