//! SVG plots for LDPI evaluations.
//!
//! Renders the ROC curve of an [`Evaluation`](ldpi_eval_core::Evaluation) and
//! the score histograms built by `ldpi-eval-core`. All styling comes from the
//! [`PlotStyle`] passed to each call.

pub mod axes;
pub mod dist_plot;
pub mod error;
pub mod roc_plot;
pub mod style;
pub mod svg;

pub use dist_plot::{
    render_multiclass_svg, render_score_distribution_svg, write_multiclass_svg,
    write_score_distribution_svg,
};
pub use error::{RenderError, Result};
pub use roc_plot::{render_roc_svg, roc_legend_label, write_roc_svg};
pub use style::{categorical_color, PlotStyle, CATEGORICAL_PALETTE};

use ldpi_eval_core::{emit_render_completed, emit_render_failed, METRICS};

/// Run a renderer, counting and logging the outcome.
pub(crate) fn track_render<F>(plot: &str, render: F) -> Result<String>
where
    F: FnOnce() -> Result<String>,
{
    match render() {
        Ok(doc) => {
            METRICS.inc_renders_completed();
            emit_render_completed(plot, doc.len());
            Ok(doc)
        }
        Err(e) => {
            METRICS.inc_renders_failed();
            emit_render_failed(plot, &e);
            Err(e)
        }
    }
}
