//! Axis frames, tick marks, grid and legends shared by every plot.

use crate::style::{PlotArea, PlotStyle};
use crate::svg::{Anchor, Axis, Scale, Stroke, Svg, TextOpts};

const TICK_LEN: f64 = 4.0;

/// Upper bound on ticks per axis.
const MAX_TICKS: usize = 64;

/// Evenly spaced "nice" tick values covering `[lo, hi]`.
///
/// When the tick index itself is beyond float resolution (a narrow range at
/// a huge magnitude) only the two ends are returned.
pub fn linear_ticks(lo: f64, hi: f64, target: usize) -> Vec<f64> {
    if !(hi > lo) || target == 0 {
        return vec![lo];
    }
    let raw = (hi - lo) / target as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|s| *s >= raw)
        .unwrap_or(10.0 * magnitude);

    let first = (lo / step).ceil();
    let last = (hi / step).floor();
    if !(first.is_finite() && last.is_finite()) || first + 1.0 == first {
        return vec![lo, hi];
    }

    let count = ((last - first).max(0.0) as usize).min(MAX_TICKS);
    (0..=count)
        // Snap away float noise such as 0.30000000000000004.
        .map(|i| ((first + i as f64) * step * 1e9).round() / 1e9)
        .filter(|v| *v <= hi)
        .collect()
}

/// Powers of ten within `[lo, hi]`.
pub fn log_ticks(lo: f64, hi: f64) -> Vec<f64> {
    if !(lo > 0.0 && hi >= lo) {
        return Vec::new();
    }
    let first = lo.log10().ceil() as i32;
    let last = hi.log10().floor() as i32;
    (first..=last).map(|e| 10f64.powi(e)).collect()
}

/// Tick label text for a linear tick given the tick spacing.
pub fn format_tick(value: f64, ticks: &[f64]) -> String {
    let step = ticks
        .windows(2)
        .map(|w| w[1] - w[0])
        .fold(f64::INFINITY, f64::min);
    if !(step.is_finite() && step > 0.0) {
        return format!("{:.2}", value);
    }
    let step = (step * 1e9).round() / 1e9;
    let decimals = (-step.log10().floor()).max(0.0) as usize;
    // 2.5 steps need one more digit than their magnitude suggests.
    let scaled = step * 10f64.powi(decimals as i32);
    let decimals = if (scaled - scaled.round()).abs() > 1e-6 {
        decimals + 1
    } else {
        decimals
    };
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{:.*}", decimals, value)
}

/// Log tick label: `10^k` written with a superscript exponent.
fn format_log_tick(value: f64) -> String {
    let exp = value.log10().round() as i32;
    let sup: String = exp
        .to_string()
        .chars()
        .map(|c| match c {
            '-' => '\u{207b}',
            '0' => '\u{2070}',
            '1' => '\u{00b9}',
            '2' => '\u{00b2}',
            '3' => '\u{00b3}',
            d => char::from_u32(0x2070 + d.to_digit(10).unwrap_or(0)).unwrap_or(d),
        })
        .collect();
    format!("10{}", sup)
}

/// Axis labels and tick spacing for one plot.
pub struct Frame<'a> {
    pub x: Axis,
    pub y: Axis,
    pub x_label: &'a str,
    pub y_label: &'a str,
    /// Approximate number of linear ticks per axis.
    pub tick_target: usize,
}

impl Frame<'_> {
    fn ticks(&self, axis: &Axis) -> Vec<(f64, String)> {
        match axis.scale {
            Scale::Linear { lo, hi } => {
                let ticks = linear_ticks(lo.min(hi), lo.max(hi), self.tick_target);
                ticks.iter().map(|t| (*t, format_tick(*t, &ticks))).collect()
            }
            Scale::Log10 { lo, hi } => log_ticks(lo.min(hi), lo.max(hi))
                .into_iter()
                .map(|t| (t, format_log_tick(t)))
                .collect(),
        }
    }

    /// Grid, box, ticks and axis labels.
    pub fn draw(&self, svg: &mut Svg, style: &PlotStyle) {
        let area = style.plot_area();
        let grid = Stroke::dashed(&style.grid.color, style.grid.width, &style.grid.dash);
        let axis_stroke = Stroke::solid("#000000", 0.8);
        let tick_font = TextOpts::new(style.font_size * 0.9);

        let x_ticks = self.ticks(&self.x);
        let y_ticks = self.ticks(&self.y);

        for (value, _) in &x_ticks {
            let px = self.x.map(*value);
            svg.line(px, area.y0, px, area.y1, grid);
        }
        for (value, _) in &y_ticks {
            let py = self.y.map(*value);
            svg.line(area.x0, py, area.x1, py, grid);
        }

        svg.frame(area.x0, area.y0, area.width(), area.height(), axis_stroke);

        for (value, label) in &x_ticks {
            let px = self.x.map(*value);
            svg.line(px, area.y1, px, area.y1 + TICK_LEN, axis_stroke);
            svg.text(
                px,
                area.y1 + TICK_LEN + style.font_size,
                label,
                tick_font.anchor(Anchor::Middle),
            );
        }
        for (value, label) in &y_ticks {
            let py = self.y.map(*value);
            svg.line(area.x0 - TICK_LEN, py, area.x0, py, axis_stroke);
            svg.text(
                area.x0 - TICK_LEN - 2.0,
                py + style.font_size * 0.3,
                label,
                tick_font.anchor(Anchor::End),
            );
        }

        let label_font = TextOpts::new(style.font_size).anchor(Anchor::Middle);
        svg.text(
            (area.x0 + area.x1) / 2.0,
            style.height - style.font_size * 0.6,
            self.x_label,
            label_font,
        );
        let y_mid = (area.y0 + area.y1) / 2.0;
        let y_label_x = style.font_size * 1.2;
        svg.text(y_label_x, y_mid, self.y_label, label_font.rotate(90.0));
    }
}

/// Sample drawn next to a legend label.
#[derive(Debug, Clone, Copy)]
pub enum Swatch<'a> {
    Line { color: &'a str, width: f64, dash: Option<&'a [f64]> },
    Patch { color: &'a str, opacity: f64 },
}

#[derive(Debug, Clone)]
pub struct LegendEntry<'a> {
    pub label: String,
    pub swatch: Swatch<'a>,
}

/// Corner of the plot area a legend is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    UpperRight,
    LowerRight,
}

/// Boxed legend inside the plot area.
pub fn draw_legend(svg: &mut Svg, style: &PlotStyle, entries: &[LegendEntry<'_>], corner: Corner) {
    if entries.is_empty() {
        return;
    }
    let area: PlotArea = style.plot_area();
    let size = style.font_size * 0.9;
    let row = size * 1.5;
    let swatch_w = size * 2.0;
    let pad = size * 0.5;
    // Rough glyph width; good enough to size the box.
    let text_w = entries
        .iter()
        .map(|e| e.label.chars().count() as f64 * size * 0.6)
        .fold(0.0, f64::max);
    let box_w = pad * 3.0 + swatch_w + text_w;
    let box_h = pad * 2.0 + row * entries.len() as f64;

    let x0 = area.x1 - box_w - pad;
    let y0 = match corner {
        Corner::UpperRight => area.y0 + pad,
        Corner::LowerRight => area.y1 - box_h - pad,
    };

    svg.rect(x0, y0, box_w, box_h, "#ffffff", 0.8);
    svg.frame(x0, y0, box_w, box_h, Stroke::solid("#cccccc", 0.8));

    for (i, entry) in entries.iter().enumerate() {
        let cy = y0 + pad + row * (i as f64 + 0.5);
        let sx = x0 + pad;
        match entry.swatch {
            Swatch::Line { color, width, dash } => {
                let stroke = Stroke { color, width, dash };
                svg.line(sx, cy, sx + swatch_w, cy, stroke);
            }
            Swatch::Patch { color, opacity } => {
                svg.rect(sx, cy - size * 0.4, swatch_w, size * 0.8, color, opacity);
            }
        }
        svg.text(sx + swatch_w + pad, cy + size * 0.35, &entry.label, TextOpts::new(size));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_ticks_unit_interval() {
        assert_eq!(linear_ticks(0.0, 1.0, 5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    }

    #[test]
    fn test_linear_ticks_skip_outside_range() {
        let ticks = linear_ticks(-0.05, 1.0, 5);
        assert_eq!(ticks.first(), Some(&0.0));
        assert_eq!(ticks.last(), Some(&1.0));
    }

    #[test]
    fn test_linear_ticks_terminate_at_large_magnitude() {
        let ticks = linear_ticks(1e17, 1e17 + 64.0, 8);
        assert!(!ticks.is_empty());
        assert!(ticks.len() <= MAX_TICKS + 1);
        assert!(ticks.iter().all(|t| t.is_finite()));
    }

    #[test]
    fn test_linear_ticks_are_capped() {
        assert!(linear_ticks(0.0, 1.0, 10_000).len() <= MAX_TICKS + 1);
    }

    #[test]
    fn test_log_ticks_are_decades() {
        assert_eq!(log_ticks(1.0, 5000.0), vec![1.0, 10.0, 100.0, 1000.0]);
        assert!(log_ticks(0.0, 10.0).is_empty());
    }

    #[test]
    fn test_format_tick_uses_step_precision() {
        let ticks = linear_ticks(0.0, 1.0, 5);
        assert_eq!(format_tick(0.4, &ticks), "0.4");
        let ticks = vec![0.0, 0.25, 0.5];
        assert_eq!(format_tick(0.25, &ticks), "0.25");
        let ticks = vec![0.0, 10.0, 20.0];
        assert_eq!(format_tick(10.0, &ticks), "10");
    }

    #[test]
    fn test_log_tick_superscripts() {
        assert_eq!(format_log_tick(1000.0), "10\u{00b3}");
        assert_eq!(format_log_tick(1.0), "10\u{2070}");
    }
}
