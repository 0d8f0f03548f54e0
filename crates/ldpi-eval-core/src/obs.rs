//! Structured tracing hooks for evaluation and rendering.
//!
//! Every emitter logs one event with a stable `event = "..."` field so log
//! pipelines can filter on it. None of them influence computed values.

use tracing::{debug, info, warn};

/// RAII guard that enters an evaluation-scoped span.
///
/// ```ignore
/// let _span = EvaluationSpan::enter("3f2a...");
/// // events emitted while the guard lives carry evaluation_id = "3f2a..."
/// ```
pub struct EvaluationSpan {
    _span: tracing::span::EnteredSpan,
}

impl EvaluationSpan {
    pub fn enter(evaluation_id: &str) -> Self {
        let span = tracing::info_span!("ldpi.evaluation", evaluation_id = %evaluation_id);
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: evaluation started on a validated population.
pub fn emit_evaluation_started(samples: usize, positives: usize, negatives: usize) {
    debug!(
        event = "evaluation.started",
        samples = samples,
        positives = positives,
        negatives = negatives,
    );
}

/// Emit event: evaluation finished with its two scalar outputs.
pub fn emit_evaluation_completed(auroc: f64, eer: f64, curve_points: usize) {
    info!(
        event = "evaluation.completed",
        auroc = auroc,
        eer = eer,
        curve_points = curve_points,
    );
}

/// Emit event: evaluation rejected (warning level).
pub fn emit_evaluation_failed(kind: &str, error: &dyn std::fmt::Display) {
    warn!(event = "evaluation.failed", kind = %kind, error = %error);
}

/// Emit event: a report or summary artifact was written.
pub fn emit_artifact_written(artifact: &str, path: &std::path::Path) {
    info!(event = "artifact.written", artifact = %artifact, path = %path.display());
}

/// Emit event: a plot was rendered.
pub fn emit_render_completed(plot: &str, bytes: usize) {
    info!(event = "render.completed", plot = %plot, bytes = bytes);
}

/// Emit event: a plot could not be produced (warning level).
pub fn emit_render_failed(plot: &str, error: &dyn std::fmt::Display) {
    warn!(event = "render.failed", plot = %plot, error = %error);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluation_span_create() {
        let _span = EvaluationSpan::enter("test-evaluation-id");
    }
}
