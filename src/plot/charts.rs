//! The fixed set of charts produced by a full run.

use crate::domain::{IncomeRecord, RankedComparison, SolowFit, SolowRecord};
use crate::error::Result;
use crate::fit::fit_line;
use crate::plot::ascii::{Overlay, render_bar_chart, render_scatter};
use crate::plot::svg::{render_bar_svg, render_scatter_svg};

/// A rendered chart: `body` is printed to the terminal, `svg` is saved as
/// `graphs/<file_name>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub file_name: &'static str,
    pub body: String,
    pub svg: String,
}

/// Bar charts of the ranked comparison (in ranking order).
pub fn income_charts(cmp: &RankedComparison, width: usize) -> Result<Vec<Chart>> {
    let bars = |f: fn(&IncomeRecord) -> f64| -> Vec<(String, f64)> {
        cmp.ranked.iter().map(|r| (r.country.clone(), f(r))).collect()
    };

    Ok(vec![
        bar_chart(
            "income_relative_to_US.svg",
            &format!("Per-capita income relative to {} ({})", cmp.reference, cmp.year),
            &format!("Income relative to {}", cmp.reference),
            &bars(|r| r.rel_income_us),
            width,
        )?,
        bar_chart(
            "y_per_person_barplot.svg",
            &format!("Income per person by country ({})", cmp.year),
            "Income per person",
            &bars(|r| r.y_per_person),
            width,
        )?,
        bar_chart(
            "y_per_worker_barplot.svg",
            &format!("Income per worker by country ({})", cmp.year),
            "Income per worker",
            &bars(|r| r.y_per_worker),
            width,
        )?,
    ])
}

/// Predicted vs actual scatters for both Solow variants, plus implied
/// technology against output.
pub fn solow_charts(fit: &SolowFit, width: usize, height: usize) -> Result<Vec<Chart>> {
    let points = |f: fn(&SolowRecord) -> f64| -> Vec<(f64, f64)> {
        fit.records.iter().map(|r| (r.ln_y, f(r))).collect()
    };
    let equal = points(|r| r.ln_y_hat_equal);
    let implied = points(|r| r.ln_z_implied);
    let full = points(|r| r.ln_y_hat_full);
    let size = (width, height);

    Ok(vec![
        scatter_chart(
            "solow_equaltech_lnY_vs_lnYhat.svg",
            &format!("Solow model prediction, equal technology ({})", fit.year),
            ("actual ln output per worker", "predicted ln output per worker"),
            &equal,
            Overlay {
                identity: true,
                trend: None,
            },
            size,
        )?,
        scatter_chart(
            "implied_lnZ_vs_lnY.svg",
            &format!("Implied ln Z_i vs ln y ({})", fit.year),
            ("ln output per worker", "implied ln Z_i"),
            &implied,
            Overlay {
                identity: false,
                trend: fit_line(&implied),
            },
            size,
        )?,
        scatter_chart(
            "solow_fullmodel_lnYhat_vs_lnY.svg",
            &format!("Full model prediction, steady-state inversion ({})", fit.year),
            ("actual ln output per worker", "predicted ln output per worker"),
            &full,
            Overlay {
                identity: true,
                trend: fit_line(&full),
            },
            size,
        )?,
    ])
}

fn bar_chart(
    file_name: &'static str,
    title: &str,
    value_label: &str,
    bars: &[(String, f64)],
    width: usize,
) -> Result<Chart> {
    Ok(Chart {
        file_name,
        body: render_bar_chart(title, bars, width),
        svg: render_bar_svg(title, value_label, bars)?,
    })
}

fn scatter_chart(
    file_name: &'static str,
    title: &str,
    (x_label, y_label): (&str, &str),
    points: &[(f64, f64)],
    overlay: Overlay,
    (width, height): (usize, usize),
) -> Result<Chart> {
    Ok(Chart {
        file_name,
        body: render_scatter(title, x_label, y_label, points, &overlay, width, height),
        svg: render_scatter_svg(title, x_label, y_label, points, &overlay)?,
    })
}
