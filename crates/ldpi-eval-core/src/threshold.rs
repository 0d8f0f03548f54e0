//! Fixed-threshold detection metrics.
//!
//! A sample is predicted anomalous when `score >= threshold`, matching the
//! comparison used by the ROC sweep.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::population::check_samples;

/// Confusion counts and derived rates at one decision threshold.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ThresholdMetrics {
    pub threshold: f64,
    pub true_positives: usize,
    pub false_positives: usize,
    pub true_negatives: usize,
    pub false_negatives: usize,
    pub accuracy: f64,
    /// Zero when nothing is predicted anomalous.
    pub precision: f64,
    pub recall: f64,
    /// Harmonic mean of precision and recall; zero when both are zero.
    pub f_score: f64,
    /// Share of anomaly alerts that were wrong, `1 - precision`.
    pub false_alarm_rate: f64,
    /// Share of anomalies caught, equal to `recall`.
    pub detection_rate: f64,
}

/// Compute [`ThresholdMetrics`] for `scores`/`labels` at `threshold`.
///
/// Unlike the ROC evaluation this accepts single-class input; rates with an
/// empty denominator are reported as zero.
pub fn threshold_metrics(threshold: f64, scores: &[f64], labels: &[bool]) -> Result<ThresholdMetrics> {
    check_samples(scores, labels.len())?;

    let (mut tp, mut fp, mut tn, mut fneg) = (0usize, 0usize, 0usize, 0usize);
    for (&score, &label) in scores.iter().zip(labels) {
        match (score >= threshold, label) {
            (true, true) => tp += 1,
            (true, false) => fp += 1,
            (false, false) => tn += 1,
            (false, true) => fneg += 1,
        }
    }

    let accuracy = ratio(tp + tn, scores.len());
    let precision = ratio(tp, tp + fp);
    let recall = ratio(tp, tp + fneg);
    let f_score = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };

    Ok(ThresholdMetrics {
        threshold,
        true_positives: tp,
        false_positives: fp,
        true_negatives: tn,
        false_negatives: fneg,
        accuracy,
        precision,
        recall,
        f_score,
        false_alarm_rate: 1.0 - precision,
        detection_rate: recall,
    })
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// Format a rate as a whole percentage, e.g. `0.874` -> `"87%"`.
pub fn percent_label(rate: f64) -> String {
    format!("{:.0}%", rate * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EvalError, ValidationError};

    #[test]
    fn test_confusion_counts() {
        let scores = [0.9, 0.8, 0.7, 0.4, 0.3, 0.2];
        let labels = [true, true, false, true, false, false];
        let m = threshold_metrics(0.5, &scores, &labels).unwrap();
        assert_eq!(
            (m.true_positives, m.false_positives, m.true_negatives, m.false_negatives),
            (2, 1, 2, 1)
        );
        assert!((m.accuracy - 4.0 / 6.0).abs() < 1e-12);
        assert!((m.precision - 2.0 / 3.0).abs() < 1e-12);
        assert!((m.recall - 2.0 / 3.0).abs() < 1e-12);
        assert!((m.f_score - 2.0 / 3.0).abs() < 1e-12);
        assert!((m.false_alarm_rate - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(m.detection_rate, m.recall);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let m = threshold_metrics(0.4, &[0.4, 0.1], &[true, false]).unwrap();
        assert_eq!(m.true_positives, 1);
        assert_eq!(m.accuracy, 1.0);
    }

    #[test]
    fn test_no_alerts_gives_zero_precision() {
        let m = threshold_metrics(10.0, &[0.1, 0.2], &[true, false]).unwrap();
        assert_eq!(m.precision, 0.0);
        assert_eq!(m.f_score, 0.0);
        assert_eq!(m.false_alarm_rate, 1.0);
    }

    #[test]
    fn test_length_mismatch() {
        let err = threshold_metrics(0.5, &[0.1], &[true, false]).unwrap_err();
        assert!(matches!(
            err,
            EvalError::Validation(ValidationError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_percent_label() {
        assert_eq!(percent_label(0.874), "87%");
        assert_eq!(percent_label(1.0), "100%");
        assert_eq!(percent_label(0.0), "0%");
    }
}
