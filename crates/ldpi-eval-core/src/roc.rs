//! Empirical ROC curve construction.
//!
//! The curve is built by sweeping a decision threshold over every distinct
//! score in descending order. A sample is flagged anomalous when its score is
//! greater than or equal to the threshold, so tied scores enter the curve
//! together as a single (possibly diagonal) step.

use crate::error::Result;
use crate::population::ScorePopulation;

/// Cross-product magnitude below which three curve points count as collinear.
const COLLINEAR_EPS: f64 = 1e-12;

/// Receiver operating characteristic curve.
///
/// # Invariants
///
/// * `fpr`, `tpr` and `thresholds` have the same length (at least 2).
/// * Points are ordered by strictly decreasing threshold; `fpr` and `tpr`
///   are non-decreasing along that order.
/// * The first point is `(0, 0)` with threshold `+inf`; the last point is
///   `(1, 1)` at the minimum observed score.
#[derive(Debug, Clone, PartialEq)]
pub struct RocCurve {
    pub fpr: Vec<f64>,
    pub tpr: Vec<f64>,
    pub thresholds: Vec<f64>,
}

/// Build the ROC curve for raw score/label slices.
pub fn roc_curve(scores: &[f64], labels: &[bool]) -> Result<RocCurve> {
    let population = ScorePopulation::new(scores, labels)?;
    Ok(RocCurve::from_population(&population))
}

impl RocCurve {
    /// Build the curve for an already-validated population.
    pub fn from_population(population: &ScorePopulation<'_>) -> Self {
        let scores = population.scores();
        let labels = population.labels();
        let positives = population.positives() as f64;
        let negatives = population.negatives() as f64;

        let mut order: Vec<usize> = (0..scores.len()).collect();
        order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

        let mut fpr = vec![0.0];
        let mut tpr = vec![0.0];
        let mut thresholds = vec![f64::INFINITY];

        let mut tp = 0usize;
        let mut fp = 0usize;
        for (pos, &idx) in order.iter().enumerate() {
            if labels[idx] {
                tp += 1;
            } else {
                fp += 1;
            }

            // Emit one point per distinct score, after the whole tie group.
            let run_ends = order
                .get(pos + 1)
                .map_or(true, |&next| scores[next] != scores[idx]);
            if run_ends {
                fpr.push(fp as f64 / negatives);
                tpr.push(tp as f64 / positives);
                thresholds.push(scores[idx]);
            }
        }

        Self {
            fpr,
            tpr,
            thresholds,
        }
    }

    /// Number of points on the curve, including the `(0, 0)` sentinel.
    pub fn len(&self) -> usize {
        self.fpr.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fpr.is_empty()
    }

    /// Area under the piecewise-linear curve (trapezoidal rule).
    pub fn auc(&self) -> f64 {
        self.fpr
            .windows(2)
            .zip(self.tpr.windows(2))
            .map(|(x, y)| (x[1] - x[0]) * (y[0] + y[1]) / 2.0)
            .sum()
    }

    /// Piecewise-linear interpolation of tpr as a function of fpr.
    ///
    /// Vertical segments (several points sharing one fpr) evaluate to the
    /// largest tpr at that fpr, which makes the interpolant right-continuous.
    /// Arguments outside `[0, 1]` clamp to the end values.
    pub fn tpr_at(&self, x: f64) -> f64 {
        let hi = self.fpr.partition_point(|&f| f <= x);
        if hi == 0 {
            return self.tpr[0];
        }
        if hi == self.fpr.len() {
            return self.tpr[hi - 1];
        }

        let lo = hi - 1;
        let (x0, x1) = (self.fpr[lo], self.fpr[hi]);
        let (y0, y1) = (self.tpr[lo], self.tpr[hi]);
        y0 + (y1 - y0) * (x - x0) / (x1 - x0)
    }

    /// Copy of the curve without interior points that lie on a straight line
    /// between their neighbours.
    ///
    /// Area and [`tpr_at`](Self::tpr_at) are unchanged; only the corner points
    /// needed to draw the curve are kept.
    pub fn without_intermediate(&self) -> Self {
        let n = self.len();
        if n <= 2 {
            return self.clone();
        }

        let mut keep = vec![0];
        for i in 1..n - 1 {
            let k = keep[keep.len() - 1];
            let (ax, ay) = (self.fpr[i] - self.fpr[k], self.tpr[i] - self.tpr[k]);
            let (bx, by) = (self.fpr[i + 1] - self.fpr[i], self.tpr[i + 1] - self.tpr[i]);
            if (ax * by - ay * bx).abs() > COLLINEAR_EPS {
                keep.push(i);
            }
        }
        keep.push(n - 1);

        Self {
            fpr: keep.iter().map(|&i| self.fpr[i]).collect(),
            tpr: keep.iter().map(|&i| self.tpr[i]).collect(),
            thresholds: keep.iter().map(|&i| self.thresholds[i]).collect(),
        }
    }

    /// Iterate `(fpr, tpr, threshold)` triples in curve order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.fpr
            .iter()
            .zip(self.tpr.iter())
            .zip(self.thresholds.iter())
            .map(|((&f, &t), &th)| (f, t, th))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_curve() -> RocCurve {
        let scores = [0.9, 0.8, 0.7, 0.4, 0.3, 0.2];
        let labels = [true, true, false, true, false, false];
        roc_curve(&scores, &labels).expect("valid curve")
    }

    #[test]
    fn test_curve_points_match_hand_sweep() {
        let curve = sample_curve();
        let third = 1.0 / 3.0;
        assert_eq!(curve.len(), 7);
        let expected = [
            (0.0, 0.0),
            (0.0, third),
            (0.0, 2.0 * third),
            (third, 2.0 * third),
            (third, 1.0),
            (2.0 * third, 1.0),
            (1.0, 1.0),
        ];
        for ((f, t, _), (ef, et)) in curve.points().zip(expected.iter()) {
            assert!((f - ef).abs() < 1e-12, "fpr {f} != {ef}");
            assert!((t - et).abs() < 1e-12, "tpr {t} != {et}");
        }
        assert_eq!(curve.thresholds[0], f64::INFINITY);
        assert_eq!(curve.thresholds[1..], [0.9, 0.8, 0.7, 0.4, 0.3, 0.2]);
    }

    #[test]
    fn test_ties_collapse_into_one_point() {
        let scores = [0.5, 0.5, 0.5, 0.1];
        let labels = [true, false, true, false];
        let curve = roc_curve(&scores, &labels).unwrap();
        assert_eq!(curve.len(), 3);
        assert_eq!(curve.fpr, vec![0.0, 0.5, 1.0]);
        assert_eq!(curve.tpr, vec![0.0, 1.0, 1.0]);
        assert!((curve.auc() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_auc_of_hand_example() {
        assert!((sample_curve().auc() - 8.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_tpr_at_takes_top_of_vertical_segment() {
        let curve = sample_curve();
        assert!((curve.tpr_at(0.0) - 2.0 / 3.0).abs() < 1e-12);
        assert!((curve.tpr_at(1.0 / 3.0) - 1.0).abs() < 1e-12);
        assert!((curve.tpr_at(0.2) - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(curve.tpr_at(1.0), 1.0);
        assert_eq!(curve.tpr_at(-0.5), 0.0);
        assert_eq!(curve.tpr_at(2.0), 1.0);
    }

    #[test]
    fn test_tpr_at_interpolates_diagonal_step() {
        let curve = roc_curve(&[0.5, 0.5], &[true, false]).unwrap();
        assert!((curve.tpr_at(0.25) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_without_intermediate_keeps_corners() {
        let curve = sample_curve();
        let slim = curve.without_intermediate();
        assert_eq!(slim.len(), 5);
        assert_eq!(slim.fpr[0], 0.0);
        assert_eq!(slim.tpr[0], 0.0);
        assert_eq!(slim.fpr[slim.len() - 1], 1.0);
        assert_eq!(slim.tpr[slim.len() - 1], 1.0);
        assert!((slim.auc() - curve.auc()).abs() < 1e-12);
        for x in [0.0, 0.1, 1.0 / 3.0, 0.5, 0.9, 1.0] {
            assert!((slim.tpr_at(x) - curve.tpr_at(x)).abs() < 1e-12);
        }
    }
}
