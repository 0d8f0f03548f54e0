//! Binary classifier evaluation: AUROC and equal-error rate.
//!
//! [`BinaryClassifierEvaluator`] is a pure function of its inputs. It returns
//! data only; drawing the curve is left to a separate consumer that takes an
//! [`Evaluation`] and never feeds anything back.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::metrics::METRICS;
use crate::obs;
use crate::population::ScorePopulation;
use crate::roc::RocCurve;
use crate::root::{brentq, SolverConfig};

/// The two scalar outputs of an evaluation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EvaluationResult {
    /// Area under the ROC curve, in `[0, 1]`.
    pub auroc: f64,
    /// False-positive rate at which it equals the false-negative rate, in `[0, 1]`.
    pub eer: f64,
}

/// An [`EvaluationResult`] together with the curve it was derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub result: EvaluationResult,
    pub curve: RocCurve,
    pub positives: usize,
    pub negatives: usize,
}

impl Evaluation {
    pub fn auroc(&self) -> f64 {
        self.result.auroc
    }

    pub fn eer(&self) -> f64 {
        self.result.eer
    }

    pub fn samples(&self) -> usize {
        self.positives + self.negatives
    }
}

/// Computes ROC, AUROC and EER for score/label populations.
#[derive(Debug, Clone, Default)]
pub struct BinaryClassifierEvaluator {
    solver: SolverConfig,
}

impl BinaryClassifierEvaluator {
    /// Evaluator with default root-finder tolerances.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the tolerances used for the equal-error root-find.
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    pub fn solver(&self) -> &SolverConfig {
        &self.solver
    }

    /// Compute AUROC and EER.
    ///
    /// # Errors
    ///
    /// * `LengthMismatch` / `NonFiniteScore` for malformed inputs.
    /// * `DegenerateLabels` when only one class is present.
    /// * `RootNotBracketed` / `RootNotConverged` when the EER root-find fails.
    pub fn evaluate(&self, scores: &[f64], labels: &[bool]) -> Result<EvaluationResult> {
        self.evaluate_curve(scores, labels).map(|e| e.result)
    }

    /// Same as [`evaluate`](Self::evaluate) but keeps the ROC curve.
    pub fn evaluate_curve(&self, scores: &[f64], labels: &[bool]) -> Result<Evaluation> {
        let outcome = self.run(scores, labels);
        match &outcome {
            Ok(evaluation) => {
                METRICS.inc_evaluations_completed();
                obs::emit_evaluation_completed(
                    evaluation.result.auroc,
                    evaluation.result.eer,
                    evaluation.curve.len(),
                );
            }
            Err(err) => {
                METRICS.inc_evaluations_failed();
                obs::emit_evaluation_failed(err.kind(), err);
            }
        }
        outcome
    }

    /// Equal-error rate of an existing curve.
    ///
    /// Solves `1 - x = tpr(x)` on `[0, 1]`, where `tpr` is the curve's
    /// piecewise-linear interpolant.
    pub fn equal_error_rate(&self, curve: &RocCurve) -> Result<f64> {
        let g = |x: f64| 1.0 - x - curve.tpr_at(x);
        let eer = brentq(g, 0.0, 1.0, &self.solver)?;
        Ok(eer.clamp(0.0, 1.0))
    }

    fn run(&self, scores: &[f64], labels: &[bool]) -> Result<Evaluation> {
        let population = ScorePopulation::new(scores, labels)?;
        obs::emit_evaluation_started(
            population.len(),
            population.positives(),
            population.negatives(),
        );

        let curve = RocCurve::from_population(&population);
        let auroc = curve.auc().clamp(0.0, 1.0);
        let eer = self.equal_error_rate(&curve)?;

        Ok(Evaluation {
            result: EvaluationResult { auroc, eer },
            curve,
            positives: population.positives(),
            negatives: population.negatives(),
        })
    }
}

/// Evaluate with default settings.
pub fn evaluate(scores: &[f64], labels: &[bool]) -> Result<EvaluationResult> {
    BinaryClassifierEvaluator::new().evaluate(scores, labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DomainError, EvalError, ValidationError};

    #[test]
    fn test_hand_example() {
        let scores = [0.9, 0.8, 0.7, 0.4, 0.3, 0.2];
        let labels = [true, true, false, true, false, false];
        let result = evaluate(&scores, &labels).unwrap();
        assert!((result.auroc - 0.8889).abs() < 1e-3);
        assert!((0.0..=0.34).contains(&result.eer));
        assert!((result.eer - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_perfect_separator() {
        let scores = [0.1, 0.2, 0.3, 0.7, 0.8, 0.9];
        let labels = [false, false, false, true, true, true];
        let result = evaluate(&scores, &labels).unwrap();
        assert_eq!(result.auroc, 1.0);
        assert_eq!(result.eer, 0.0);
    }

    #[test]
    fn test_inverted_separator() {
        let scores = [0.9, 0.8, 0.1, 0.2];
        let labels = [false, false, true, true];
        let result = evaluate(&scores, &labels).unwrap();
        assert_eq!(result.auroc, 0.0);
        assert!((result.eer - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_all_tied_scores() {
        let scores = [0.5; 4];
        let labels = [true, false, true, false];
        let result = evaluate(&scores, &labels).unwrap();
        assert!((result.auroc - 0.5).abs() < 1e-12);
        assert!((result.eer - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_eer_on_sloped_crossing_has_small_residual() {
        let scores = [0.5, 0.5, 0.4, 0.9, 0.1];
        let labels = [true, false, true, true, false];
        let evaluator = BinaryClassifierEvaluator::new();
        let evaluation = evaluator.evaluate_curve(&scores, &labels).unwrap();
        let eer = evaluation.eer();
        let residual = eer - (1.0 - evaluation.curve.tpr_at(eer));
        assert!(residual.abs() < 1e-9, "residual {residual}");
    }

    #[test]
    fn test_length_mismatch() {
        let err = evaluate(&[0.1, 0.2, 0.3, 0.4, 0.5], &[true, false, true, false]).unwrap_err();
        assert!(matches!(
            err,
            EvalError::Validation(ValidationError::LengthMismatch {
                scores: 5,
                labels: 4
            })
        ));
    }

    #[test]
    fn test_single_class_is_degenerate() {
        let err = evaluate(&[0.3, 0.1, 0.9], &[true, true, true]).unwrap_err();
        assert!(matches!(
            err,
            EvalError::Domain(DomainError::DegenerateLabels {
                positives: 3,
                negatives: 0
            })
        ));
    }

    #[test]
    fn test_equal_error_rate_rejects_malformed_curve() {
        // tpr above 1 keeps g negative at both ends of [0, 1].
        let curve = RocCurve {
            fpr: vec![0.0, 1.0],
            tpr: vec![1.5, 1.5],
            thresholds: vec![f64::INFINITY, 0.5],
        };
        let err = BinaryClassifierEvaluator::new()
            .equal_error_rate(&curve)
            .unwrap_err();
        match err {
            EvalError::Domain(DomainError::RootNotBracketed { g_lo, g_hi }) => {
                assert_eq!(g_lo, -0.5);
                assert_eq!(g_hi, -1.5);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_custom_solver_is_used() {
        let solver = SolverConfig {
            xtol: 1e-3,
            ..SolverConfig::default()
        };
        let evaluator = BinaryClassifierEvaluator::new().with_solver(solver);
        assert_eq!(evaluator.solver().xtol, 1e-3);
        let result = evaluator
            .evaluate(&[0.9, 0.8, 0.7, 0.4, 0.3, 0.2], &[true, true, false, true, false, false])
            .unwrap();
        assert!((result.eer - 1.0 / 3.0).abs() < 1e-3);
    }
}
