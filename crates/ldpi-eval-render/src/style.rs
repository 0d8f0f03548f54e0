//! Plot styling.
//!
//! Every knob a plot reads lives on [`PlotStyle`], and a style is always
//! passed explicitly to the renderer. There is no process-wide style state,
//! so rendering one plot can never change how another is drawn, and nothing
//! here is visible to the evaluator.

use crate::error::{RenderError, Result};

/// Ten-colour categorical palette used for per-class histograms.
pub const CATEGORICAL_PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Colour for series `i` of `n`, spread evenly across [`CATEGORICAL_PALETTE`].
///
/// The palette is sampled at `n` evenly spaced positions in `[0, 1]` rather
/// than taken from the front, so two classes get the first and last colours
/// and more than ten classes reuse neighbouring colours in runs.
pub fn categorical_color(i: usize, n: usize) -> &'static str {
    let last = CATEGORICAL_PALETTE.len() - 1;
    if n <= 1 {
        return CATEGORICAL_PALETTE[0];
    }
    let pos = i.min(n - 1) as f64 / (n - 1) as f64;
    let idx = ((pos * CATEGORICAL_PALETTE.len() as f64) as usize).min(last);
    CATEGORICAL_PALETTE[idx]
}

/// Space between the figure edge and the plot area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Grid line appearance.
#[derive(Debug, Clone, PartialEq)]
pub struct GridStyle {
    pub color: String,
    pub width: f64,
    pub dash: Vec<f64>,
}

/// Pixel rectangle of the data area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl PlotArea {
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotStyle {
    /// Figure width in pixels.
    pub width: f64,
    /// Figure height in pixels.
    pub height: f64,
    pub margin: Margin,
    pub background: String,
    pub font_family: String,
    pub font_size: f64,
    pub line_width: f64,
    pub marker_size: f64,
    pub grid: GridStyle,
    pub dashed_pattern: Vec<f64>,
    pub dotted_pattern: Vec<f64>,
    /// Colours handed out in order to successive series.
    pub color_cycle: Vec<String>,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self::roc()
    }
}

impl PlotStyle {
    /// 8x6 inch figure at 80 dpi, the layout used for ROC plots.
    pub fn roc() -> Self {
        Self {
            width: 8.0 * 80.0,
            height: 6.0 * 80.0,
            margin: Margin {
                top: 20.0,
                right: 20.0,
                bottom: 56.0,
                left: 68.0,
            },
            background: "#ffffff".to_string(),
            font_family: "DejaVu Sans, Arial, sans-serif".to_string(),
            font_size: 12.0,
            line_width: 0.9,
            marker_size: 3.0,
            grid: GridStyle {
                color: "#000000".to_string(),
                width: 0.5,
                dash: vec![1.0, 3.0],
            },
            dashed_pattern: vec![6.0, 6.0],
            dotted_pattern: vec![1.0, 3.0],
            // b g r c m y k
            color_cycle: ["#0000ff", "#008000", "#ff0000", "#00bfbf", "#bf00bf", "#bfbf00", "#000000"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
        }
    }

    /// Wide, short 650x200 pixel strip used for score histograms.
    pub fn strip() -> Self {
        Self {
            width: 650.0,
            height: 200.0,
            margin: Margin {
                top: 12.0,
                right: 14.0,
                bottom: 44.0,
                left: 64.0,
            },
            font_size: 10.0,
            line_width: 1.0,
            grid: GridStyle {
                color: "#b0b0b0".to_string(),
                width: 0.5,
                dash: vec![1.0, 3.0],
            },
            ..Self::roc()
        }
    }

    /// Override the figure size in pixels.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Reject sizes that leave no room for a plot area.
    pub fn validate(&self) -> Result<()> {
        let area = self.plot_area();
        if !(self.width.is_finite() && self.height.is_finite()) {
            return Err(RenderError::InvalidStyle("figure size must be finite".to_string()));
        }
        if area.width() <= 0.0 || area.height() <= 0.0 {
            return Err(RenderError::InvalidStyle(format!(
                "figure {}x{} leaves no plot area inside its margins",
                self.width, self.height
            )));
        }
        if !(self.font_size > 0.0) {
            return Err(RenderError::InvalidStyle("font size must be positive".to_string()));
        }
        Ok(())
    }

    pub fn plot_area(&self) -> PlotArea {
        PlotArea {
            x0: self.margin.left,
            y0: self.margin.top,
            x1: self.width - self.margin.right,
            y1: self.height - self.margin.bottom,
        }
    }

    /// Colour for the `i`-th series, cycling through `color_cycle`.
    pub fn cycle_color(&self, i: usize) -> &str {
        if self.color_cycle.is_empty() {
            "#000000"
        } else {
            &self.color_cycle[i % self.color_cycle.len()]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roc_preset_is_640_by_480() {
        let style = PlotStyle::roc();
        assert_eq!((style.width, style.height), (640.0, 480.0));
        assert!(style.validate().is_ok());
    }

    #[test]
    fn test_strip_preset_is_valid() {
        let style = PlotStyle::strip();
        assert_eq!((style.width, style.height), (650.0, 200.0));
        assert!(style.validate().is_ok());
    }

    #[test]
    fn test_tiny_figure_rejected() {
        let err = PlotStyle::roc().with_size(50.0, 50.0).validate().unwrap_err();
        assert!(err.to_string().contains("no plot area"));
    }

    #[test]
    fn test_categorical_color_spreads_small_sets() {
        assert_eq!(categorical_color(0, 1), "#1f77b4");
        assert_eq!(categorical_color(0, 2), "#1f77b4");
        assert_eq!(categorical_color(1, 2), "#17becf");
        assert_eq!(categorical_color(1, 3), "#8c564b");
        // More classes than colours: sampled, not cycled.
        assert_eq!(categorical_color(1, 12), CATEGORICAL_PALETTE[0]);
        assert_eq!(categorical_color(10, 12), CATEGORICAL_PALETTE[9]);
        assert_eq!(categorical_color(11, 12), CATEGORICAL_PALETTE[9]);
    }

    #[test]
    fn test_color_cycle_wraps() {
        let style = PlotStyle::roc();
        assert_eq!(style.cycle_color(0), style.cycle_color(7));
    }
}
