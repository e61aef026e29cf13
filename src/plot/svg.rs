//! SVG chart files rendered with Plotters.
//!
//! Each chart is drawn into an in-memory string; the pipeline writes the
//! strings to `graphs/` only after every stage has succeeded.
//!
//! We build with Plotters' `svg_backend` only: no font or bitmap system
//! dependencies, and the output is plain text that diffs well.

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::error::{PipelineError, Result};
use crate::plot::ascii::{Overlay, pad_range, range};

/// Canvas size of the bar charts, in pixels.
pub const BAR_CHART_SIZE: (u32, u32) = (800, 500);

/// Canvas size of the scatter charts, in pixels.
pub const SCATTER_CHART_SIZE: (u32, u32) = (700, 500);

const STEEL_BLUE: RGBColor = RGBColor(70, 130, 180);
const DARK_ORANGE: RGBColor = RGBColor(255, 140, 0);
const GREY: RGBColor = RGBColor(120, 120, 120);

type DrawResult<DB> =
    std::result::Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

/// Horizontal bar chart, first bar on top.
pub fn render_bar_svg(title: &str, x_label: &str, bars: &[(String, f64)]) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, BAR_CHART_SIZE).into_drawing_area();
        draw_bars(&root, title, x_label, bars)
            .and_then(|()| root.present())
            .map_err(|e| render_error(title, e))?;
    }
    Ok(svg)
}

/// Scatter of `(x, y)` points with the same overlays as the terminal chart.
pub fn render_scatter_svg(
    title: &str,
    x_label: &str,
    y_label: &str,
    points: &[(f64, f64)],
    overlay: &Overlay,
) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, SCATTER_CHART_SIZE).into_drawing_area();
        draw_scatter(&root, title, x_label, y_label, points, overlay)
            .and_then(|()| root.present())
            .map_err(|e| render_error(title, e))?;
    }
    Ok(svg)
}

fn render_error(title: &str, err: impl std::fmt::Display) -> PipelineError {
    PipelineError::Render {
        chart: title.to_string(),
        message: err.to_string(),
    }
}

fn draw_bars<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    title: &str,
    x_label: &str,
    bars: &[(String, f64)],
) -> DrawResult<DB> {
    root.fill(&WHITE)?;

    // The value axis always includes 0 so bar lengths stay comparable.
    let (lo, hi) = range(bars.iter().map(|&(_, v)| v).chain([0.0])).unwrap_or((0.0, 1.0));
    let hi = if hi > lo {
        hi + (hi - lo) * 0.05
    } else {
        lo + 1.0
    };

    // Integer ranges are inclusive in Plotters, so `0..n` has one spare slot on top.
    let n = bars.len().max(1) as i32;
    let label_for = |v: &SegmentValue<i32>| match v {
        SegmentValue::CenterOf(slot) => bar_at(bars, *slot)
            .map(|(l, _)| l.clone())
            .unwrap_or_default(),
        _ => String::new(),
    };

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 20))
        .margin(15)
        .set_label_area_size(LabelAreaPosition::Left, 120)
        .set_label_area_size(LabelAreaPosition::Bottom, 45)
        .build_cartesian_2d(lo..hi, (0..n).into_segmented())?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(bars.len() + 1)
        .y_label_formatter(&label_for)
        .x_label_formatter(&|v| format!("{v:.2}"))
        .x_desc(x_label)
        .y_desc("Country")
        .draw()?;

    chart.draw_series((0..n).filter_map(|slot| {
        let (_, value) = bar_at(bars, slot)?;
        if !value.is_finite() {
            return None;
        }
        let mut bar = Rectangle::new(
            [(0.0, SegmentValue::Exact(slot)), (*value, SegmentValue::Exact(slot + 1))],
            STEEL_BLUE.filled(),
        );
        bar.set_margin(6, 6, 0, 0);
        Some(bar)
    }))?;

    Ok(())
}

/// The bar drawn in `slot`; slot 0 is the bottom row, so the order is reversed.
fn bar_at(bars: &[(String, f64)], slot: i32) -> Option<&(String, f64)> {
    let slot = usize::try_from(slot).ok()?;
    bars.len().checked_sub(slot + 1).and_then(|i| bars.get(i))
}

fn draw_scatter<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    title: &str,
    x_label: &str,
    y_label: &str,
    points: &[(f64, f64)],
    overlay: &Overlay,
) -> DrawResult<DB> {
    root.fill(&WHITE)?;

    let (x_min, x_max) = range(points.iter().map(|&(x, _)| x)).unwrap_or((0.0, 1.0));
    let identity = overlay.identity.then_some([(x_min, x_min), (x_max, x_max)]);
    let trend = overlay
        .trend
        .map(|t| (t, [(x_min, t.at(x_min)), (x_max, t.at(x_max))]));

    let ys = points
        .iter()
        .map(|&(_, y)| y)
        .chain(identity.iter().flatten().map(|&(_, y)| y))
        .chain(trend.iter().flat_map(|(_, line)| line.map(|(_, y)| y)));
    let (y_min, y_max) = range(ys).unwrap_or((0.0, 1.0));
    let (x0, x1) = pad_range(x_min, x_max, 0.05);
    let (y0, y1) = pad_range(y_min, y_max, 0.05);

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 20))
        .margin(15)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 45)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    chart
        .configure_mesh()
        .x_desc(x_label)
        .y_desc(y_label)
        .x_labels(6)
        .y_labels(6)
        .x_label_formatter(&|v| format!("{v:.2}"))
        .y_label_formatter(&|v| format!("{v:.2}"))
        .draw()?;

    if let Some(line) = identity {
        chart
            .draw_series(LineSeries::new(line, GREY.stroke_width(2)))?
            .label("45° line")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREY));
    }
    if let Some((fit, line)) = trend {
        chart
            .draw_series(LineSeries::new(line, DARK_ORANGE.stroke_width(2)))?
            .label(format!("trend: y = {:.4} + {:.4} x", fit.intercept, fit.slope))
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], DARK_ORANGE));
    }

    chart
        .draw_series(
            points
                .iter()
                .filter(|(x, y)| x.is_finite() && y.is_finite())
                .map(|&(x, y)| Circle::new((x, y), 4, STEEL_BLUE.filled())),
        )?
        .label("countries")
        .legend(|(x, y)| Circle::new((x + 10, y), 4, STEEL_BLUE.filled()));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    Ok(())
}
