//! ASCII charts for terminal output.
//!
//! The chart files themselves are SVG (see [`super::svg`]); this renderer is
//! intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Scatter elements:
//! - observations: `o`
//! - 45° reference line (`y = x`): `.`
//! - descriptive trend line: `-`

use crate::fit::TrendLine;

/// Optional lines drawn under the scatter points.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overlay {
    /// Draw `y = x` between the smallest and largest observed x.
    pub identity: bool,
    pub trend: Option<TrendLine>,
}

/// Horizontal bar chart, one row per `(label, value)`, in the given order.
///
/// Bars scale to the largest value; non-positive values get an empty bar.
pub fn render_bar_chart(title: &str, bars: &[(String, f64)], width: usize) -> String {
    let width = width.max(10);
    let label_width = bars.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let max = bars
        .iter()
        .map(|&(_, v)| v)
        .filter(|v| v.is_finite())
        .fold(0.0, f64::max);

    let mut out = String::new();
    out.push_str(title);
    out.push('\n');

    for (label, value) in bars {
        let len = if max > 0.0 && value.is_finite() && *value > 0.0 {
            ((value / max) * width as f64).round() as usize
        } else {
            0
        };
        let line = format!("{label:<label_width$} | {} {}", "#".repeat(len), fmt_value(*value));
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

/// Scatter plot of `(x, y)` points with optional reference/trend lines.
pub fn render_scatter(
    title: &str,
    x_label: &str,
    y_label: &str,
    points: &[(f64, f64)],
    overlay: &Overlay,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (x_min, x_max) = range(points.iter().map(|&(x, _)| x)).unwrap_or((0.0, 1.0));

    let mut lines: Vec<((f64, f64), (f64, f64), char)> = Vec::new();
    if overlay.identity {
        lines.push(((x_min, x_min), (x_max, x_max), '.'));
    }
    if let Some(trend) = overlay.trend {
        lines.push(((x_min, trend.at(x_min)), (x_max, trend.at(x_max)), '-'));
    }

    let ys = points
        .iter()
        .map(|&(_, y)| y)
        .chain(lines.iter().flat_map(|&((_, y0), (_, y1), _)| [y0, y1]));
    let (y_min, y_max) = range(ys).unwrap_or((0.0, 1.0));
    let (x_min, x_max) = pad_range(x_min, x_max, 0.05);
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Lines first so points overlay them.
    for &((x0, y0), (x1, y1), ch) in &lines {
        draw_line(
            &mut grid,
            map_x(x0, x_min, x_max, width),
            map_y(y0, y_min, y_max, height),
            map_x(x1, x_min, x_max, width),
            map_y(y1, y_min, y_max, height),
            ch,
        );
    }

    for &(x, y) in points {
        if x.is_finite() && y.is_finite() {
            grid[map_y(y, y_min, y_max, height)][map_x(x, x_min, x_max, width)] = 'o';
        }
    }

    let mut out = String::new();
    out.push_str(title);
    out.push('\n');
    out.push_str(&format!(
        "x: {x_label} [{x_min:.3}, {x_max:.3}] | y: {y_label} [{y_min:.3}, {y_max:.3}]\n"
    ));
    if let Some(trend) = overlay.trend {
        out.push_str(&format!(
            "trend: y = {:.4} + {:.4} x\n",
            trend.intercept, trend.slope
        ));
    }

    for row in grid {
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }

    out
}

fn fmt_value(v: f64) -> String {
    if v.abs() >= 1000.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.3}")
    }
}

pub(crate) fn range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values.filter(|v| v.is_finite()) {
        min = min.min(v);
        max = max.max(v);
    }
    (min.is_finite() && max.is_finite()).then_some((min, max))
}

pub(crate) fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    // A single point (zero span) still needs a non-empty axis.
    let pad = if span > 0.0 { span * frac } else { 0.5 };
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish). Only fills blank cells.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
