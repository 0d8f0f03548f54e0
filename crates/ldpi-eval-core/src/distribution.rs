//! Score histograms for the distribution plots.
//!
//! Bin edges stop at a high percentile of the anomalous scores rather than
//! their maximum, so a handful of extreme outliers do not squash the rest of
//! the histogram into the first few bins.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::population::{check_samples, ScorePopulation};
use crate::threshold::{threshold_metrics, ThresholdMetrics};

/// Default number of histogram bins: 150 edges, 149 bins.
pub const DEFAULT_BINS: usize = 149;

/// Upper percentile used for the histogram range.
pub const RANGE_PERCENTILE: f64 = 99.95;

/// Percentile marking the "max. abnormal" annotation.
pub const MAX_ABNORMAL_PERCENTILE: f64 = 99.99;

/// `q`-th percentile (0..=100) with linear interpolation between closest
/// ranks. `None` for an empty slice.
pub fn percentile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = (q.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// `num` evenly spaced values from `start` to `stop` inclusive.
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            let mut out: Vec<f64> = (0..num).map(|i| start + step * i as f64).collect();
            out[num - 1] = stop;
            out
        }
    }
}

/// Count `values` into the bins delimited by `edges`.
///
/// Bins are half-open `[e_i, e_i+1)` except the last, which also includes
/// its right edge. Values outside the edges are ignored.
pub fn histogram(values: &[f64], edges: &[f64]) -> Vec<u64> {
    if edges.len() < 2 {
        return Vec::new();
    }
    let bins = edges.len() - 1;
    let last = edges[bins];
    let mut counts = vec![0u64; bins];

    for &v in values {
        if v == last {
            counts[bins - 1] += 1;
            continue;
        }
        let idx = edges.partition_point(|&e| e <= v);
        if idx == 0 || idx > bins {
            continue;
        }
        counts[idx - 1] += 1;
    }
    counts
}

/// Edges for `[lo, hi]`, widened when the range collapses.
///
/// The widening is at least 0.5 and grows with the magnitude of the scores,
/// so it still separates the edges where 0.5 is below float resolution.
fn bin_edges(lo: f64, hi: f64, bins: usize) -> Vec<f64> {
    let (lo, hi) = if hi > lo {
        (lo, hi)
    } else {
        let pad = 0.5_f64.max(lo.abs().max(hi.abs()) * 1e-9);
        (lo - pad, hi + pad)
    };
    linspace(lo, hi, bins.max(1) + 1)
}

/// Normal vs. anomalous score histograms sharing one set of bin edges.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreDistribution {
    pub edges: Vec<f64>,
    pub normal_counts: Vec<u64>,
    pub abnormal_counts: Vec<u64>,
    pub threshold: f64,
    /// `MAX_ABNORMAL_PERCENTILE` of the anomalous scores.
    pub max_abnormal: f64,
    pub metrics: ThresholdMetrics,
}

impl ScoreDistribution {
    /// Split a two-class population and bin both halves.
    ///
    /// Edges run from the smallest normal score to the
    /// [`RANGE_PERCENTILE`] of the anomalous scores.
    pub fn build(scores: &[f64], labels: &[bool], threshold: f64, bins: usize) -> Result<Self> {
        let population = ScorePopulation::new(scores, labels)?;

        let (abnormal, normal): (Vec<_>, Vec<_>) = population.samples().partition(|s| s.label);
        let normal: Vec<f64> = normal.into_iter().map(|s| s.score).collect();
        let abnormal: Vec<f64> = abnormal.into_iter().map(|s| s.score).collect();

        let lo = normal.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = percentile(&abnormal, RANGE_PERCENTILE).unwrap_or(lo);
        let max_abnormal = percentile(&abnormal, MAX_ABNORMAL_PERCENTILE).unwrap_or(hi);
        let edges = bin_edges(lo, hi, bins);

        Ok(Self {
            normal_counts: histogram(&normal, &edges),
            abnormal_counts: histogram(&abnormal, &edges),
            edges,
            threshold,
            max_abnormal,
            metrics: threshold_metrics(threshold, scores, labels)?,
        })
    }

    pub fn bins(&self) -> usize {
        self.edges.len().saturating_sub(1)
    }

    /// `(first edge, last edge)`.
    pub fn range(&self) -> (f64, f64) {
        (self.edges[0], self.edges[self.edges.len() - 1])
    }
}

/// Histogram for one class of a multiclass population.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassHistogram {
    pub class: u32,
    pub samples: usize,
    pub counts: Vec<u64>,
}

/// Per-class score histograms sharing one set of bin edges.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MulticlassDistribution {
    pub edges: Vec<f64>,
    /// Ascending by class id.
    pub classes: Vec<ClassHistogram>,
    pub threshold: f64,
}

impl MulticlassDistribution {
    /// Bin every class over the range `[min(scores), p99.95(scores)]`.
    pub fn build(scores: &[f64], classes: &[u32], threshold: f64, bins: usize) -> Result<Self> {
        check_samples(scores, classes.len())?;
        if scores.is_empty() {
            return Err(ValidationError::EmptyInput.into());
        }

        let lo = scores.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = percentile(scores, RANGE_PERCENTILE).unwrap_or(lo);
        let edges = bin_edges(lo, hi, bins);

        let mut grouped: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
        for (&score, &class) in scores.iter().zip(classes) {
            grouped.entry(class).or_default().push(score);
        }

        let classes = grouped
            .into_iter()
            .map(|(class, values)| ClassHistogram {
                class,
                samples: values.len(),
                counts: histogram(&values, &edges),
            })
            .collect();

        Ok(Self {
            edges,
            classes,
            threshold,
        })
    }

    pub fn bins(&self) -> usize {
        self.edges.len().saturating_sub(1)
    }

    pub fn range(&self) -> (f64, f64) {
        (self.edges[0], self.edges[self.edges.len() - 1])
    }
}
