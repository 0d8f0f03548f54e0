//! Persisted evaluation artifacts: a JSON report and a markdown summary.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::digest::input_digest;
use crate::error::Result;
use crate::evaluator::Evaluation;
use crate::obs;
use crate::threshold::{percent_label, ThresholdMetrics};

pub const REPORT_SCHEMA_VERSION: &str = "1.0";

/// One ROC point in the report. `threshold` is `None` for the `(0, 0)`
/// sentinel, whose threshold is `+inf` and has no JSON representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RocPointArtifact {
    pub fpr: f64,
    pub tpr: f64,
    pub threshold: Option<f64>,
}

/// Canonical evaluation artifact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvaluationReport {
    pub schema_version: String,
    pub generated_at: DateTime<Utc>,
    pub evaluation_id: Uuid,
    pub input_digest: String,
    pub samples: usize,
    pub positives: usize,
    pub negatives: usize,
    pub auroc: f64,
    pub eer: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<ThresholdMetrics>,
    pub curve: Vec<RocPointArtifact>,
}

impl EvaluationReport {
    /// Build a report for `evaluation`, digesting the inputs it came from.
    pub fn new(evaluation: &Evaluation, scores: &[f64], labels: &[bool]) -> Self {
        let curve = evaluation
            .curve
            .points()
            .map(|(fpr, tpr, threshold)| RocPointArtifact {
                fpr,
                tpr,
                threshold: threshold.is_finite().then_some(threshold),
            })
            .collect();

        Self {
            schema_version: REPORT_SCHEMA_VERSION.to_string(),
            generated_at: Utc::now(),
            evaluation_id: Uuid::new_v4(),
            input_digest: input_digest(scores, labels),
            samples: evaluation.samples(),
            positives: evaluation.positives,
            negatives: evaluation.negatives,
            auroc: evaluation.auroc(),
            eer: evaluation.eer(),
            threshold: None,
            curve,
        }
    }

    /// Attach fixed-threshold metrics.
    pub fn with_threshold_metrics(mut self, metrics: ThresholdMetrics) -> Self {
        self.threshold = Some(metrics);
        self
    }
}

/// Write the report as pretty JSON.
pub fn write_evaluation_report_json(path: &Path, report: &EvaluationReport) -> Result<()> {
    let content = serde_json::to_string_pretty(report)?;
    std::fs::write(path, content)?;
    obs::emit_artifact_written("evaluation_report", path);
    Ok(())
}

/// Render a short markdown summary of the report.
pub fn render_evaluation_summary_md(report: &EvaluationReport) -> String {
    let mut out = String::new();
    out.push_str("# Evaluation Summary\n\n");
    out.push_str(&format!(
        "- samples: {} ({} anomalous, {} normal)\n- AUROC: {:.4}\n- EER: {:.4}\n",
        report.samples, report.positives, report.negatives, report.auroc, report.eer
    ));

    if let Some(m) = &report.threshold {
        out.push_str(&format!("\n## Threshold {}\n", m.threshold));
        out.push_str(&format!(
            "- detection rate: {}\n- false alarm rate: {}\n- precision: {:.4}\n- recall: {:.4}\n- F-score: {:.4}\n- accuracy: {:.4}\n",
            percent_label(m.detection_rate),
            percent_label(m.false_alarm_rate),
            m.precision,
            m.recall,
            m.f_score,
            m.accuracy
        ));
    }

    out.push_str(&format!("\ninput digest: `{}`\n", report.input_digest));
    out
}

/// Write the markdown summary.
pub fn write_evaluation_summary_md(path: &Path, report: &EvaluationReport) -> Result<()> {
    std::fs::write(path, render_evaluation_summary_md(report))?;
    obs::emit_artifact_written("evaluation_summary", path);
    Ok(())
}
