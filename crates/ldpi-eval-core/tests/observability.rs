//! Structured tracing emitted around evaluations.

use ldpi_eval_core::{
    emit_artifact_written, emit_evaluation_completed, emit_evaluation_failed,
    emit_render_completed, emit_render_failed, evaluate, EvaluationSpan, METRICS,
};
use tracing_test::traced_test;

#[traced_test]
#[test]
fn test_emit_evaluation_completed_logs_scalars() {
    emit_evaluation_completed(0.91, 0.12, 42);
    assert!(logs_contain("evaluation.completed"));
    assert!(logs_contain("auroc=0.91"));
}

#[traced_test]
#[test]
fn test_emit_evaluation_failed_logs_kind() {
    emit_evaluation_failed("degenerate_labels", &"only one class");
    assert!(logs_contain("evaluation.failed"));
    assert!(logs_contain("degenerate_labels"));
}

#[traced_test]
#[test]
fn test_evaluate_emits_completion_event() {
    let _span = EvaluationSpan::enter("obs-test");
    evaluate(&[0.9, 0.1], &[true, false]).expect("evaluate");
    assert!(logs_contain("evaluation.completed"));
}

#[traced_test]
#[test]
fn test_failed_evaluation_is_logged_and_counted() {
    let before = METRICS.evaluations_failed();
    let _ = evaluate(&[0.9, 0.1], &[true, true]);
    assert!(logs_contain("evaluation.failed"));
    assert!(METRICS.evaluations_failed() > before);
}

#[traced_test]
#[test]
fn test_render_and_artifact_events() {
    emit_render_completed("roc", 1024);
    emit_render_failed("distribution", &"disk full");
    emit_artifact_written("evaluation_report", std::path::Path::new("/tmp/report.json"));
    assert!(logs_contain("render.completed"));
    assert!(logs_contain("render.failed"));
    assert!(logs_contain("artifact.written"));
}
