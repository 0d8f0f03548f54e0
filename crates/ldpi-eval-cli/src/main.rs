//! LDPI evaluation CLI
//!
//! The `ldpi-eval` command scores anomaly-detector output against labels.
//!
//! ## Commands
//!
//! - `roc`: AUROC and equal-error rate, with optional plot and report artifacts
//! - `dist`: normal vs. anomalous score histogram at a fixed threshold
//! - `multiclass`: per-class score histogram at a fixed threshold

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn, Level};

use ldpi_eval_core::{
    init_tracing, input_digest, percent_label, threshold_metrics, write_evaluation_report_json,
    write_evaluation_summary_md, BinaryClassifierEvaluator, EvaluationReport, EvaluationSpan,
    MulticlassDistribution, ScoreDistribution, DEFAULT_BINS, METRICS,
};
use ldpi_eval_render::{write_multiclass_svg, write_roc_svg, write_score_distribution_svg, PlotStyle};

#[derive(Parser)]
#[command(name = "ldpi-eval")]
#[command(author = "LDPI Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Evaluate LDPI anomaly scores (ROC, AUROC, EER, score distributions)", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true, env = "LDPI_EVAL_LOG_JSON")]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute AUROC and EER for a labelled score file
    Roc {
        /// Score file (JSON: {"scores": [...], "labels": [...]})
        #[arg(short, long)]
        input: PathBuf,

        /// Write the ROC plot as SVG
        #[arg(long)]
        svg: Option<PathBuf>,

        /// Write a JSON evaluation report
        #[arg(long)]
        report: Option<PathBuf>,

        /// Write a markdown summary
        #[arg(long)]
        summary: Option<PathBuf>,

        /// Also report detection metrics at this threshold
        #[arg(short, long)]
        threshold: Option<f64>,
    },

    /// Plot normal vs. anomalous score distributions at a threshold
    Dist {
        /// Score file (JSON: {"scores": [...], "labels": [...]})
        #[arg(short, long)]
        input: PathBuf,

        /// Detection threshold
        #[arg(short, long)]
        threshold: f64,

        /// Output SVG path
        #[arg(long)]
        svg: PathBuf,

        /// Number of histogram bins
        #[arg(long, default_value_t = DEFAULT_BINS)]
        bins: usize,

        /// Draw a legend
        #[arg(long)]
        legend: bool,
    },

    /// Plot per-class score distributions at a threshold
    Multiclass {
        /// Score file with integer class labels
        #[arg(short, long)]
        input: PathBuf,

        /// Detection threshold
        #[arg(short, long)]
        threshold: f64,

        /// Output SVG path
        #[arg(long)]
        svg: PathBuf,

        /// Number of histogram bins
        #[arg(long, default_value_t = DEFAULT_BINS)]
        bins: usize,

        /// Draw a legend
        #[arg(long)]
        legend: bool,
    },
}

/// One label as it may appear in a score file.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(untagged)]
enum LabelValue {
    Flag(bool),
    Class(u64),
}

#[derive(Debug, Deserialize)]
struct ScoreFile {
    scores: Vec<f64>,
    labels: Vec<LabelValue>,
}

impl ScoreFile {
    fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read score file {:?}", path))?;
        serde_json::from_str(&raw).with_context(|| format!("Failed to parse score file {:?}", path))
    }

    /// Labels as anomalous flags; integers must be 0 or 1.
    fn binary_labels(&self) -> Result<Vec<bool>> {
        self.labels
            .iter()
            .enumerate()
            .map(|(i, label)| match label {
                LabelValue::Flag(b) => Ok(*b),
                LabelValue::Class(0) => Ok(false),
                LabelValue::Class(1) => Ok(true),
                LabelValue::Class(n) => Err(anyhow!(
                    "label {} at index {} is not binary (expected 0 or 1)",
                    n,
                    i
                )),
            })
            .collect()
    }

    fn class_labels(&self) -> Result<Vec<u32>> {
        self.labels
            .iter()
            .enumerate()
            .map(|(i, label)| match label {
                LabelValue::Flag(b) => Ok(u32::from(*b)),
                LabelValue::Class(n) => u32::try_from(*n)
                    .with_context(|| format!("class label {} at index {} is too large", n, i)),
            })
            .collect()
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    init_tracing(cli.json, level);

    let result = match cli.command {
        Commands::Roc {
            input,
            svg,
            report,
            summary,
            threshold,
        } => cmd_roc(&input, svg.as_deref(), report.as_deref(), summary.as_deref(), threshold),
        Commands::Dist {
            input,
            threshold,
            svg,
            bins,
            legend,
        } => cmd_dist(&input, threshold, &svg, bins, legend),
        Commands::Multiclass {
            input,
            threshold,
            svg,
            bins,
            legend,
        } => cmd_multiclass(&input, threshold, &svg, bins, legend),
    };

    METRICS.flush();
    result
}

fn cmd_roc(
    input: &Path,
    svg: Option<&Path>,
    report_path: Option<&Path>,
    summary_path: Option<&Path>,
    threshold: Option<f64>,
) -> Result<()> {
    let file = ScoreFile::load(input)?;
    let labels = file.binary_labels()?;
    let digest = input_digest(&file.scores, &labels);
    let _span = EvaluationSpan::enter(&digest[..12]);

    let evaluation = BinaryClassifierEvaluator::new()
        .evaluate_curve(&file.scores, &labels)
        .context("Evaluation failed")?;

    println!("AUROC: {:.4}", evaluation.auroc());
    println!("EER:   {:.4}", evaluation.eer());

    let mut report = EvaluationReport::new(&evaluation, &file.scores, &labels);
    if let Some(t) = threshold {
        let metrics = threshold_metrics(t, &file.scores, &labels)
            .context("Failed to compute threshold metrics")?;
        print_rates(metrics.false_alarm_rate, metrics.detection_rate);
        report = report.with_threshold_metrics(metrics);
    }

    if let Some(path) = svg {
        // Plot failures are logged, not fatal.
        if let Err(e) = write_roc_svg(path, &evaluation, &PlotStyle::roc()) {
            warn!(path = %path.display(), error = %e, "ROC plot not written");
        }
    }
    if let Some(path) = report_path {
        write_evaluation_report_json(path, &report)
            .with_context(|| format!("Failed to write report {:?}", path))?;
        info!(path = %path.display(), "Wrote evaluation report");
    }
    if let Some(path) = summary_path {
        write_evaluation_summary_md(path, &report)
            .with_context(|| format!("Failed to write summary {:?}", path))?;
        info!(path = %path.display(), "Wrote evaluation summary");
    }

    Ok(())
}

fn cmd_dist(input: &Path, threshold: f64, svg: &Path, bins: usize, legend: bool) -> Result<()> {
    let file = ScoreFile::load(input)?;
    let labels = file.binary_labels()?;
    let dist = ScoreDistribution::build(&file.scores, &labels, threshold, bins)
        .context("Failed to build score distribution")?;

    print_rates(dist.metrics.false_alarm_rate, dist.metrics.detection_rate);

    if let Err(e) = write_score_distribution_svg(svg, &dist, &PlotStyle::strip(), legend) {
        warn!(path = %svg.display(), error = %e, "Distribution plot not written");
    }
    Ok(())
}

fn cmd_multiclass(
    input: &Path,
    threshold: f64,
    svg: &Path,
    bins: usize,
    legend: bool,
) -> Result<()> {
    let file = ScoreFile::load(input)?;
    let classes = file.class_labels()?;
    let dist = MulticlassDistribution::build(&file.scores, &classes, threshold, bins)
        .context("Failed to build multiclass distribution")?;

    for class in &dist.classes {
        println!("Class {}: {} samples", class.class, class.samples);
    }

    if let Err(e) = write_multiclass_svg(svg, &dist, &PlotStyle::strip(), legend) {
        warn!(path = %svg.display(), error = %e, "Multiclass plot not written");
    }
    Ok(())
}

fn print_rates(false_alarm_rate: f64, detection_rate: f64) {
    println!("FAR {}", percent_label(false_alarm_rate));
    println!("detection rate {}", percent_label(detection_rate));
}
