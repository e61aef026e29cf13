//! Solow growth accounting on a single cross-section.
//!
//! Production per worker is Cobb-Douglas in capital per worker:
//!
//! ```text
//! ln y_i = α ln k_i + (1 - α) ln Z_i
//! ```
//!
//! Two variants are fitted:
//!
//! - **equal technology**: every country shares one `ln Z`, backed out from the
//!   cross-sectional means: `ln Z = (mean(ln y) - α mean(ln k)) / (1 - α)`.
//! - **steady-state inversion**: `ln k_i = ln ψ + ln Z_i` with a common
//!   `ln ψ = mean(ln k) - ln Z`, so each country's technology is
//!   `ln Z̃_i = ln k_i - ln ψ`.
//!
//! Everything is closed-form arithmetic: no search, no iteration. Identical
//! inputs give bit-identical outputs.

use tracing::debug;

use crate::domain::{SolowFit, SolowRecord, YearRecord, YearSlice};
use crate::error::{PipelineError, Result};
use crate::math::mean;

/// Fewer eligible countries than this and the fit is refused: the means of a
/// single point reproduce that point exactly and carry no cross-sectional
/// information.
pub const MIN_FIT_RECORDS: usize = 2;

/// Fit both Solow variants to the countries of `slice` with positive, finite
/// output and capital per worker. Other countries are listed in
/// [`SolowFit::excluded`].
pub fn fit_solow(slice: &YearSlice, alpha: f64) -> Result<SolowFit> {
    validate_alpha(alpha)?;

    let mut eligible: Vec<(&str, f64, f64)> = Vec::with_capacity(slice.records.len());
    let mut excluded = Vec::new();
    for record in &slice.records {
        match log_intensities(record) {
            Some((ln_y, ln_k)) => eligible.push((record.country(), ln_y, ln_k)),
            None => excluded.push(record.country().to_string()),
        }
    }

    let insufficient = || PipelineError::InsufficientData {
        year: slice.year,
        eligible: eligible.len(),
        required: MIN_FIT_RECORDS,
    };
    if eligible.len() < MIN_FIT_RECORDS {
        return Err(insufficient());
    }

    let ln_ys: Vec<f64> = eligible.iter().map(|&(_, ln_y, _)| ln_y).collect();
    let ln_ks: Vec<f64> = eligible.iter().map(|&(_, _, ln_k)| ln_k).collect();
    let mean_ln_y = mean(&ln_ys).ok_or_else(insufficient)?;
    let mean_ln_k = mean(&ln_ks).ok_or_else(insufficient)?;

    let ln_z_equal = implied_technology(alpha, mean_ln_y, mean_ln_k);
    let ln_psi = mean_ln_k - ln_z_equal;

    let records = eligible
        .iter()
        .map(|&(country, ln_y, ln_k)| {
            let ln_z_tilde = ln_k - ln_psi;
            SolowRecord {
                country: country.to_string(),
                ln_y,
                ln_k,
                ln_y_hat_equal: predict_ln_y(alpha, ln_k, ln_z_equal),
                ln_z_implied: implied_technology(alpha, ln_y, ln_k),
                ln_z_tilde,
                ln_y_hat_full: predict_ln_y(alpha, ln_k, ln_z_tilde),
            }
        })
        .collect();

    debug!(
        year = slice.year,
        n_fit = eligible.len(),
        n_excluded = excluded.len(),
        ln_z_equal,
        ln_psi,
        "fitted solow model"
    );

    Ok(SolowFit {
        year: slice.year,
        alpha,
        ln_z_equal,
        ln_psi,
        records,
        excluded,
    })
}

/// Log output per worker predicted from log capital per worker and log
/// technology.
pub fn predict_ln_y(alpha: f64, ln_k: f64, ln_z: f64) -> f64 {
    alpha * ln_k + (1.0 - alpha) * ln_z
}

/// The log technology that reconciles `ln_y` with `ln_k` exactly.
pub fn implied_technology(alpha: f64, ln_y: f64, ln_k: f64) -> f64 {
    (ln_y - alpha * ln_k) / (1.0 - alpha)
}

fn validate_alpha(alpha: f64) -> Result<()> {
    if alpha.is_finite() && alpha > 0.0 && alpha < 1.0 {
        Ok(())
    } else {
        Err(PipelineError::InvalidAlpha { alpha })
    }
}

/// `(ln y, ln k)` per worker, or `None` outside the log domain.
fn log_intensities(record: &YearRecord) -> Option<(f64, f64)> {
    let y = record.y_per_worker;
    let k = record.panel.cn / record.panel.emp;
    if !(y.is_finite() && y > 0.0 && k.is_finite() && k > 0.0) {
        return None;
    }
    let (ln_y, ln_k) = (y.ln(), k.ln());
    (ln_y.is_finite() && ln_k.is_finite()).then_some((ln_y, ln_k))
}
