//! Score histograms on a logarithmic count axis.

use std::path::Path;

use ldpi_eval_core::{emit_artifact_written, percent_label, MulticlassDistribution, ScoreDistribution};

use crate::axes::{draw_legend, Corner, Frame, LegendEntry, Swatch};
use crate::error::Result;
use crate::style::{categorical_color, PlotArea, PlotStyle};
use crate::svg::{Anchor, Axis, Stroke, Svg, TextOpts};
use crate::track_render;

pub const ABNORMAL_COLOR: &str = "#DC3912";
pub const NORMAL_COLOR: &str = "#3366cc";
const NORMAL_OPACITY: f64 = 0.9;
const CLASS_OPACITY: f64 = 0.7;
const THRESHOLD_COLOR: &str = "#3366cc";
const THRESHOLD_WIDTH: f64 = 1.5;

struct Series<'a> {
    counts: &'a [u64],
    color: &'a str,
    opacity: f64,
}

/// Normal vs. anomalous score histogram with the detection threshold marked.
///
/// The threshold legend entry carries the detection rate at that threshold.
pub fn render_score_distribution_svg(
    dist: &ScoreDistribution,
    style: &PlotStyle,
    legend: bool,
) -> Result<String> {
    track_render("score_distribution", || {
        let series = [
            Series {
                counts: &dist.abnormal_counts,
                color: ABNORMAL_COLOR,
                opacity: 1.0,
            },
            Series {
                counts: &dist.normal_counts,
                color: NORMAL_COLOR,
                opacity: NORMAL_OPACITY,
            },
        ];
        let threshold_label = format!("DR: {}", percent_label(dist.metrics.detection_rate));

        let (mut svg, x, area) = histogram_canvas(style, &dist.edges, &series, "# of Flows (log)")?;
        draw_threshold(&mut svg, style, &x, &area, dist.threshold);
        annotate(&mut svg, style, &x, &area, dist.max_abnormal, "Max. Abnormal", false);

        if legend {
            let entries = [
                LegendEntry {
                    label: "Anomaly".to_string(),
                    swatch: Swatch::Patch {
                        color: ABNORMAL_COLOR,
                        opacity: 1.0,
                    },
                },
                LegendEntry {
                    label: "Normal Traffic".to_string(),
                    swatch: Swatch::Patch {
                        color: NORMAL_COLOR,
                        opacity: NORMAL_OPACITY,
                    },
                },
                threshold_entry(style, threshold_label),
            ];
            draw_legend(&mut svg, style, &entries, Corner::UpperRight);
        }
        Ok(svg.finish())
    })
}

/// One histogram per class, coloured from the categorical palette.
pub fn render_multiclass_svg(
    dist: &MulticlassDistribution,
    style: &PlotStyle,
    legend: bool,
) -> Result<String> {
    track_render("multiclass_distribution", || {
        let n = dist.classes.len();
        let series: Vec<Series<'_>> = dist
            .classes
            .iter()
            .enumerate()
            .map(|(i, class)| Series {
                counts: &class.counts,
                color: categorical_color(i, n),
                opacity: CLASS_OPACITY,
            })
            .collect();

        let (mut svg, x, area) =
            histogram_canvas(style, &dist.edges, &series, "# of Samples (log)")?;
        draw_threshold(&mut svg, style, &x, &area, dist.threshold);

        if legend {
            let mut entries: Vec<LegendEntry<'_>> = dist
                .classes
                .iter()
                .enumerate()
                .map(|(i, class)| LegendEntry {
                    label: format!("Class {}", class.class),
                    swatch: Swatch::Patch {
                        color: categorical_color(i, n),
                        opacity: CLASS_OPACITY,
                    },
                })
                .collect();
            entries.push(threshold_entry(style, format!("Threshold: {}", dist.threshold)));
            draw_legend(&mut svg, style, &entries, Corner::UpperRight);
        }
        Ok(svg.finish())
    })
}

pub fn write_score_distribution_svg(
    path: &Path,
    dist: &ScoreDistribution,
    style: &PlotStyle,
    legend: bool,
) -> Result<()> {
    let doc = render_score_distribution_svg(dist, style, legend)?;
    std::fs::write(path, doc)?;
    emit_artifact_written("score_distribution_svg", path);
    Ok(())
}

pub fn write_multiclass_svg(
    path: &Path,
    dist: &MulticlassDistribution,
    style: &PlotStyle,
    legend: bool,
) -> Result<()> {
    let doc = render_multiclass_svg(dist, style, legend)?;
    std::fs::write(path, doc)?;
    emit_artifact_written("multiclass_distribution_svg", path);
    Ok(())
}

/// Upper end of the count axis: the decade at or above the tallest bar.
fn count_ceiling(max: u64) -> f64 {
    let max = (max as f64).max(2.0);
    let top = 10f64.powf(max.log10().ceil());
    if top <= max {
        top * 10.0
    } else {
        top
    }
}

/// Frame plus bars; returns the open document, the x axis and plot area.
fn histogram_canvas(
    style: &PlotStyle,
    edges: &[f64],
    series: &[Series<'_>],
    y_label: &str,
) -> Result<(Svg, Axis, PlotArea)> {
    style.validate()?;
    let area = style.plot_area();
    let (lo, hi) = match (edges.first(), edges.last()) {
        (Some(lo), Some(hi)) if hi > lo => (*lo, *hi),
        _ => (0.0, 1.0),
    };
    let tallest = series
        .iter()
        .flat_map(|s| s.counts.iter().copied())
        .max()
        .unwrap_or(0);

    let x = Axis::linear(lo, hi, area.x0, area.x1);
    let y = Axis::log10(1.0, count_ceiling(tallest), area.y1, area.y0);

    let mut svg = Svg::new(style.width, style.height, &style.background, &style.font_family);
    Frame {
        x,
        y,
        x_label: "Anomaly Score",
        y_label,
        tick_target: 8,
    }
    .draw(&mut svg, style);

    svg.begin_clip(area.x0, area.y0, area.width(), area.height());
    for s in series {
        for (bin, count) in s.counts.iter().enumerate() {
            if *count == 0 || bin + 1 >= edges.len() {
                continue;
            }
            let left = x.map(edges[bin]);
            let right = x.map(edges[bin + 1]);
            let top = y.map(*count as f64);
            svg.rect(left, top, right - left, area.y1 - top, s.color, s.opacity);
        }
    }
    svg.end_group();

    Ok((svg, x, area))
}

/// Dashed threshold line, clipped to the x range, plus its label.
///
/// The label follows [`annotate`] and may sit in the margin when the line
/// itself is out of range.
fn draw_threshold(svg: &mut Svg, style: &PlotStyle, x: &Axis, area: &PlotArea, threshold: f64) {
    if x.contains(threshold) {
        let px = x.map(threshold);
        svg.line(
            px,
            area.y0,
            px,
            area.y1,
            Stroke::dashed(THRESHOLD_COLOR, THRESHOLD_WIDTH, &style.dashed_pattern),
        );
    }
    annotate(svg, style, x, area, threshold, "Threshold", true);
}

/// Vertical label reading upward from the bottom of the plot at `at`.
///
/// Labels just past the plot area still land in the margin; anything off the
/// figure is skipped.
fn annotate(
    svg: &mut Svg,
    style: &PlotStyle,
    x: &Axis,
    area: &PlotArea,
    at: f64,
    text: &str,
    halo: bool,
) {
    let px = x.map(at);
    if !(px >= 0.0 && px <= style.width) {
        return;
    }
    let mut opts = TextOpts::new(style.font_size * 0.83)
        .anchor(Anchor::Start)
        .rotate(90.0);
    if halo {
        opts = opts.halo();
    }
    svg.text(px - 2.0, area.y1 - 4.0, text, opts);
}

fn threshold_entry(style: &PlotStyle, label: String) -> LegendEntry<'_> {
    LegendEntry {
        label,
        swatch: Swatch::Line {
            color: THRESHOLD_COLOR,
            width: THRESHOLD_WIDTH,
            dash: Some(&style.dashed_pattern),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_class() -> ScoreDistribution {
        let scores = [0.1, 0.15, 0.2, 0.22, 0.3, 0.7, 0.8, 0.9, 0.95, 1.0];
        let labels = [false, false, false, false, false, true, true, true, true, true];
        ScoreDistribution::build(&scores, &labels, 0.5, 20).unwrap()
    }

    #[test]
    fn test_count_ceiling_rounds_up_to_decade() {
        assert_eq!(count_ceiling(0), 10.0);
        assert_eq!(count_ceiling(7), 10.0);
        assert_eq!(count_ceiling(10), 100.0);
        assert_eq!(count_ceiling(420), 1000.0);
    }

    #[test]
    fn test_distribution_svg_annotations() {
        let doc = render_score_distribution_svg(&two_class(), &PlotStyle::strip(), false).unwrap();
        assert!(doc.contains("Threshold"));
        assert!(doc.contains("Max. Abnormal"));
        assert!(doc.contains("Anomaly Score"));
        assert!(doc.contains("# of Flows (log)"));
        assert!(doc.contains(ABNORMAL_COLOR));
        assert!(doc.contains(r#"paint-order="stroke""#));
        assert!(!doc.contains("Normal Traffic"));
    }

    #[test]
    fn test_distribution_legend_reports_detection_rate() {
        let doc = render_score_distribution_svg(&two_class(), &PlotStyle::strip(), true).unwrap();
        assert!(doc.contains("Normal Traffic"));
        assert!(doc.contains(">Anomaly<"));
        assert!(doc.contains("DR: 100%"));
    }

    #[test]
    fn test_threshold_off_figure_is_not_drawn() {
        let mut dist = two_class();
        dist.threshold = 5.0;
        let doc = render_score_distribution_svg(&dist, &PlotStyle::strip(), false).unwrap();
        assert!(!doc.contains(">Threshold<"));
    }

    #[test]
    fn test_threshold_just_past_range_keeps_label_but_not_line() {
        let mut dist = two_class();
        let (_, hi) = dist.range();
        dist.threshold = hi + 1e-4;
        let doc = render_score_distribution_svg(&dist, &PlotStyle::strip(), false).unwrap();
        assert!(doc.contains(">Threshold<"));
        assert!(!doc.contains(r##"stroke="#3366cc" stroke-width="1.5""##));
    }

    #[test]
    fn test_threshold_in_range_draws_dashed_line() {
        let doc = render_score_distribution_svg(&two_class(), &PlotStyle::strip(), false).unwrap();
        assert!(doc.contains(r##"stroke="#3366cc" stroke-width="1.5""##));
    }

    #[test]
    fn test_multiclass_legend_lists_classes() {
        let scores = [0.1, 0.2, 0.3, 0.5, 0.6, 0.9];
        let classes = [0, 0, 1, 1, 2, 2];
        let dist = MulticlassDistribution::build(&scores, &classes, 0.4, 10).unwrap();
        let doc = render_multiclass_svg(&dist, &PlotStyle::strip(), true).unwrap();
        assert!(doc.contains("Class 0"));
        assert!(doc.contains("Class 2"));
        assert!(doc.contains("Threshold: 0.4"));
        assert!(doc.contains("# of Samples (log)"));
        assert!(doc.contains(categorical_color(2, 3)));
    }
}
