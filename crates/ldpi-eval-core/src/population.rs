//! Validated score/label populations.
//!
//! Every evaluation entry point funnels its raw slices through this module so
//! that length, finiteness and class-balance checks run once, in a fixed
//! order: length first, then scores, then labels.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, Result, ValidationError};

/// A single detector output with its ground-truth label.
///
/// `label == true` marks the anomalous (positive) class.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScoreSample {
    pub score: f64,
    pub label: bool,
}

/// Parallel score/label slices that passed validation.
///
/// # Invariants
///
/// `scores.len() == labels.len()`, every score is finite, and both classes
/// are present (so `len() >= 2`).
#[derive(Debug, Clone, Copy)]
pub struct ScorePopulation<'a> {
    scores: &'a [f64],
    labels: &'a [bool],
    positives: usize,
}

impl<'a> ScorePopulation<'a> {
    /// Validate `scores` and `labels` as a two-class population.
    pub fn new(scores: &'a [f64], labels: &'a [bool]) -> Result<Self> {
        check_samples(scores, labels.len())?;

        let positives = labels.iter().filter(|&&l| l).count();
        let negatives = labels.len() - positives;
        if positives == 0 || negatives == 0 {
            return Err(DomainError::DegenerateLabels {
                positives,
                negatives,
            }
            .into());
        }

        Ok(Self {
            scores,
            labels,
            positives,
        })
    }

    pub fn scores(&self) -> &'a [f64] {
        self.scores
    }

    pub fn labels(&self) -> &'a [bool] {
        self.labels
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Always false for a validated population; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn positives(&self) -> usize {
        self.positives
    }

    pub fn negatives(&self) -> usize {
        self.labels.len() - self.positives
    }

    /// Iterate the population as [`ScoreSample`] pairs.
    pub fn samples(&self) -> impl Iterator<Item = ScoreSample> + 'a {
        self.scores
            .iter()
            .zip(self.labels.iter())
            .map(|(&score, &label)| ScoreSample { score, label })
    }
}

/// Length and finiteness checks shared by every entry point.
///
/// Does not look at label contents, so it also serves multiclass inputs.
pub fn check_samples(scores: &[f64], label_count: usize) -> Result<()> {
    if scores.len() != label_count {
        return Err(ValidationError::LengthMismatch {
            scores: scores.len(),
            labels: label_count,
        }
        .into());
    }
    if let Some(index) = scores.iter().position(|s| !s.is_finite()) {
        return Err(ValidationError::NonFiniteScore { index }.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvalError;

    #[test]
    fn test_population_counts_classes() {
        let scores = [0.1, 0.5, 0.9];
        let labels = [false, true, true];
        let pop = ScorePopulation::new(&scores, &labels).expect("valid population");
        assert_eq!(pop.len(), 3);
        assert_eq!(pop.positives(), 2);
        assert_eq!(pop.negatives(), 1);
        assert_eq!(pop.samples().filter(|s| s.label).count(), 2);
    }

    #[test]
    fn test_length_checked_before_labels() {
        // Single-class labels, but the length mismatch must win.
        let err = ScorePopulation::new(&[0.1, 0.2], &[true]).unwrap_err();
        assert!(matches!(
            err,
            EvalError::Validation(ValidationError::LengthMismatch {
                scores: 2,
                labels: 1
            })
        ));
    }

    #[test]
    fn test_nan_score_rejected() {
        let err = ScorePopulation::new(&[0.1, f64::NAN], &[true, false]).unwrap_err();
        assert!(matches!(
            err,
            EvalError::Validation(ValidationError::NonFiniteScore { index: 1 })
        ));
    }

    #[test]
    fn test_empty_is_degenerate() {
        let err = ScorePopulation::new(&[], &[]).unwrap_err();
        assert!(matches!(
            err,
            EvalError::Domain(DomainError::DegenerateLabels {
                positives: 0,
                negatives: 0
            })
        ));
    }
}
