//! LDPI evaluation core.
//!
//! Scores produced by the LDPI anomaly detector are judged here: ROC curve,
//! AUROC and equal-error rate for labelled populations, fixed-threshold
//! detection metrics, and the histograms behind the score-distribution plots.
//! Nothing in this crate draws; see `ldpi-eval-render` for that.

pub mod digest;
pub mod distribution;
pub mod error;
pub mod evaluator;
pub mod metrics;
pub mod obs;
pub mod population;
pub mod reporting;
pub mod roc;
pub mod root;
pub mod telemetry;
pub mod threshold;

pub use digest::input_digest;
pub use distribution::{
    histogram, linspace, percentile, ClassHistogram, MulticlassDistribution, ScoreDistribution,
    DEFAULT_BINS,
};
pub use error::{DomainError, EvalError, Result, ValidationError};
pub use evaluator::{evaluate, BinaryClassifierEvaluator, Evaluation, EvaluationResult};
pub use metrics::METRICS;
pub use obs::{
    emit_artifact_written, emit_evaluation_completed, emit_evaluation_failed,
    emit_evaluation_started, emit_render_completed, emit_render_failed, EvaluationSpan,
};
pub use population::{ScorePopulation, ScoreSample};
pub use reporting::{
    render_evaluation_summary_md, write_evaluation_report_json, write_evaluation_summary_md,
    EvaluationReport, RocPointArtifact,
};
pub use roc::{roc_curve, RocCurve};
pub use root::{brentq, SolverConfig};
pub use telemetry::init_tracing;
pub use threshold::{percent_label, threshold_metrics, ThresholdMetrics};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
