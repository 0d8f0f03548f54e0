//! Minimal SVG document writer and axis scales.

use std::fmt::Write as _;

/// Horizontal text anchoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_str(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

/// Options for [`Svg::text`].
#[derive(Debug, Clone, Copy)]
pub struct TextOpts<'a> {
    pub size: f64,
    pub anchor: Anchor,
    pub color: &'a str,
    /// Degrees, counter-clockwise.
    pub rotate: f64,
    /// Draw a white outline behind the glyphs.
    pub halo: bool,
}

impl<'a> TextOpts<'a> {
    pub fn new(size: f64) -> Self {
        Self {
            size,
            anchor: Anchor::Start,
            color: "#000000",
            rotate: 0.0,
            halo: false,
        }
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn color(mut self, color: &'a str) -> Self {
        self.color = color;
        self
    }

    pub fn rotate(mut self, degrees: f64) -> Self {
        self.rotate = degrees;
        self
    }

    pub fn halo(mut self) -> Self {
        self.halo = true;
        self
    }
}

/// Stroke options for lines.
#[derive(Debug, Clone, Copy)]
pub struct Stroke<'a> {
    pub color: &'a str,
    pub width: f64,
    pub dash: Option<&'a [f64]>,
}

impl<'a> Stroke<'a> {
    pub fn solid(color: &'a str, width: f64) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    pub fn dashed(color: &'a str, width: f64, dash: &'a [f64]) -> Self {
        Self {
            color,
            width,
            dash: Some(dash),
        }
    }

    fn attrs(&self) -> String {
        let mut out = format!(
            r#"stroke="{}" stroke-width="{}" fill="none""#,
            self.color,
            num(self.width)
        );
        if let Some(dash) = self.dash.filter(|d| !d.is_empty()) {
            let pattern: Vec<String> = dash.iter().map(|d| num(*d)).collect();
            let _ = write!(out, r#" stroke-dasharray="{}""#, pattern.join(","));
        }
        out
    }
}

/// An SVG document under construction.
pub struct Svg {
    out: String,
    clip_ids: usize,
}

impl Svg {
    pub fn new(width: f64, height: f64, background: &str, font_family: &str) -> Self {
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="{f}">"#,
            w = num(width),
            h = num(height),
            f = escape(font_family)
        );
        let _ = writeln!(
            out,
            r#"<rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
            num(width),
            num(height),
            background
        );
        Self { out, clip_ids: 0 }
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: Stroke<'_>) {
        let _ = writeln!(
            self.out,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" {}/>"#,
            num(x1),
            num(y1),
            num(x2),
            num(y2),
            stroke.attrs()
        );
    }

    pub fn polyline(&mut self, points: &[(f64, f64)], stroke: Stroke<'_>) {
        let pts: Vec<String> = points
            .iter()
            .map(|(x, y)| format!("{},{}", num(*x), num(*y)))
            .collect();
        let _ = writeln!(
            self.out,
            r#"<polyline points="{}" {} stroke-linejoin="round"/>"#,
            pts.join(" "),
            stroke.attrs()
        );
    }

    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: &str, opacity: f64) {
        let _ = writeln!(
            self.out,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" fill-opacity="{}"/>"#,
            num(x),
            num(y),
            num(w),
            num(h),
            fill,
            num(opacity)
        );
    }

    pub fn frame(&mut self, x: f64, y: f64, w: f64, h: f64, stroke: Stroke<'_>) {
        let _ = writeln!(
            self.out,
            r#"<rect x="{}" y="{}" width="{}" height="{}" {}/>"#,
            num(x),
            num(y),
            num(w),
            num(h),
            stroke.attrs()
        );
    }

    pub fn circle(&mut self, cx: f64, cy: f64, r: f64, fill: &str) {
        let _ = writeln!(
            self.out,
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
            num(cx),
            num(cy),
            num(r),
            fill
        );
    }

    pub fn text(&mut self, x: f64, y: f64, content: &str, opts: TextOpts<'_>) {
        let mut attrs = format!(
            r#"x="{}" y="{}" font-size="{}" text-anchor="{}" fill="{}""#,
            num(x),
            num(y),
            num(opts.size),
            opts.anchor.as_str(),
            opts.color
        );
        if opts.rotate != 0.0 {
            // SVG rotates clockwise.
            let _ = write!(
                attrs,
                r#" transform="rotate({} {} {})""#,
                num(-opts.rotate),
                num(x),
                num(y)
            );
        }
        if opts.halo {
            attrs.push_str(r##" stroke="#ffffff" stroke-width="1.5" paint-order="stroke""##);
        }
        let _ = writeln!(self.out, "<text {}>{}</text>", attrs, escape(content));
    }

    /// Start a group clipped to the given rectangle. Close with [`end_group`](Self::end_group).
    pub fn begin_clip(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.clip_ids += 1;
        let id = format!("clip{}", self.clip_ids);
        let _ = writeln!(
            self.out,
            r#"<clipPath id="{}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath>"#,
            id,
            num(x),
            num(y),
            num(w),
            num(h)
        );
        let _ = writeln!(self.out, r#"<g clip-path="url(#{})">"#, id);
    }

    pub fn end_group(&mut self) {
        self.out.push_str("</g>\n");
    }

    pub fn finish(mut self) -> String {
        self.out.push_str("</svg>\n");
        self.out
    }
}

/// Escape text for inclusion in SVG character data or attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Compact number formatting: two decimals, trailing zeros dropped.
pub fn num(v: f64) -> String {
    let s = format!("{:.2}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Mapping from data space to pixels along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scale {
    Linear { lo: f64, hi: f64 },
    /// Base-10 logarithmic; `lo` and `hi` must be positive.
    Log10 { lo: f64, hi: f64 },
}

/// An axis: a data-space scale plus its pixel span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axis {
    pub scale: Scale,
    pub px_lo: f64,
    pub px_hi: f64,
}

impl Axis {
    pub fn linear(lo: f64, hi: f64, px_lo: f64, px_hi: f64) -> Self {
        Self {
            scale: Scale::Linear { lo, hi },
            px_lo,
            px_hi,
        }
    }

    pub fn log10(lo: f64, hi: f64, px_lo: f64, px_hi: f64) -> Self {
        Self {
            scale: Scale::Log10 { lo, hi },
            px_lo,
            px_hi,
        }
    }

    /// Pixel position of `v`. Non-positive values on a log axis map to `px_lo`.
    pub fn map(&self, v: f64) -> f64 {
        let t = match self.scale {
            Scale::Linear { lo, hi } => (v - lo) / (hi - lo),
            Scale::Log10 { lo, hi } => {
                if v <= 0.0 {
                    0.0
                } else {
                    (v.log10() - lo.log10()) / (hi.log10() - lo.log10())
                }
            }
        };
        self.px_lo + t * (self.px_hi - self.px_lo)
    }

    pub fn contains(&self, v: f64) -> bool {
        let (lo, hi) = match self.scale {
            Scale::Linear { lo, hi } | Scale::Log10 { lo, hi } => (lo, hi),
        };
        v >= lo.min(hi) && v <= lo.max(hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_trims() {
        assert_eq!(num(1.0), "1");
        assert_eq!(num(0.5), "0.5");
        assert_eq!(num(2.345), "2.35");
        assert_eq!(num(-0.001), "0");
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }

    #[test]
    fn test_linear_axis_maps_endpoints() {
        let axis = Axis::linear(0.0, 1.0, 100.0, 200.0);
        assert_eq!(axis.map(0.0), 100.0);
        assert_eq!(axis.map(1.0), 200.0);
        assert_eq!(axis.map(0.5), 150.0);
    }

    #[test]
    fn test_log_axis_maps_decades() {
        // Pixel y grows downward, so px_lo is the bottom.
        let axis = Axis::log10(1.0, 100.0, 300.0, 100.0);
        assert_eq!(axis.map(1.0), 300.0);
        assert!((axis.map(10.0) - 200.0).abs() < 1e-9);
        assert!((axis.map(100.0) - 100.0).abs() < 1e-9);
        assert_eq!(axis.map(0.0), 300.0);
    }

    #[test]
    fn test_document_is_closed() {
        let mut svg = Svg::new(10.0, 10.0, "#fff", "sans");
        svg.circle(5.0, 5.0, 1.0, "#000");
        let doc = svg.finish();
        assert!(doc.starts_with("<svg"));
        assert!(doc.trim_end().ends_with("</svg>"));
    }
}
