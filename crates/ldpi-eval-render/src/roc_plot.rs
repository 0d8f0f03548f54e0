//! ROC curve plot.

use std::path::Path;

use ldpi_eval_core::{emit_artifact_written, Evaluation};
use tracing::debug;

use crate::axes::{draw_legend, Corner, Frame, LegendEntry, Swatch};
use crate::error::Result;
use crate::style::PlotStyle;
use crate::svg::{Axis, Stroke, Svg};
use crate::track_render;

const CURVE_COLOR: &str = "#ff8c00";
const EER_COLOR: &str = "#000080";

const X_RANGE: (f64, f64) = (-0.05, 1.0);
const Y_RANGE: (f64, f64) = (0.0, 1.05);

/// Legend text for an evaluation, e.g. `(AUC = 0.8889, EER = 0.3333)`.
pub fn roc_legend_label(evaluation: &Evaluation) -> String {
    format!(
        "(AUC = {:.4}, EER = {:.4})",
        evaluation.auroc(),
        evaluation.eer()
    )
}

/// Draw the ROC curve of `evaluation` with its EER operating point.
///
/// Collinear interior points are dropped before drawing; the polyline is
/// identical.
pub fn render_roc_svg(evaluation: &Evaluation, style: &PlotStyle) -> Result<String> {
    track_render("roc", || draw(evaluation, style))
}

fn draw(evaluation: &Evaluation, style: &PlotStyle) -> Result<String> {
    style.validate()?;
    let area = style.plot_area();
    let x = Axis::linear(X_RANGE.0, X_RANGE.1, area.x0, area.x1);
    let y = Axis::linear(Y_RANGE.0, Y_RANGE.1, area.y1, area.y0);

    let mut svg = Svg::new(style.width, style.height, &style.background, &style.font_family);
    Frame {
        x,
        y,
        x_label: "False Positive Rate",
        y_label: "True Positive Rate",
        tick_target: 5,
    }
    .draw(&mut svg, style);

    svg.begin_clip(area.x0, area.y0, area.width(), area.height());

    let guide = Stroke::dashed(EER_COLOR, style.line_width, &style.dotted_pattern);
    svg.line(x.map(0.0), y.map(0.0), x.map(0.0), y.map(1.0), guide);
    svg.line(x.map(0.0), y.map(1.0), x.map(1.0), y.map(1.0), guide);

    let curve = evaluation.curve.without_intermediate();
    let points: Vec<(f64, f64)> = curve
        .fpr
        .iter()
        .zip(&curve.tpr)
        .map(|(f, t)| (x.map(*f), y.map(*t)))
        .collect();
    debug!(
        curve_points = evaluation.curve.len(),
        drawn_points = points.len(),
        "drawing roc curve"
    );
    svg.polyline(&points, Stroke::solid(CURVE_COLOR, style.line_width));

    let eer = evaluation.eer();
    svg.circle(x.map(eer), y.map(1.0 - eer), style.marker_size, EER_COLOR);

    svg.end_group();

    let entries = [LegendEntry {
        label: roc_legend_label(evaluation),
        swatch: Swatch::Line {
            color: CURVE_COLOR,
            width: style.line_width,
            dash: None,
        },
    }];
    draw_legend(&mut svg, style, &entries, Corner::LowerRight);

    Ok(svg.finish())
}

/// Render and write the ROC plot to `path`.
pub fn write_roc_svg(path: &Path, evaluation: &Evaluation, style: &PlotStyle) -> Result<()> {
    let doc = render_roc_svg(evaluation, style)?;
    std::fs::write(path, doc)?;
    emit_artifact_written("roc_svg", path);
    Ok(())
}
