//! Error taxonomy for score evaluation.

/// Input rejected before any computation takes place.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("length mismatch: {scores} scores vs {labels} labels")]
    LengthMismatch { scores: usize, labels: usize },

    #[error("score at index {index} is not finite")]
    NonFiniteScore { index: usize },

    #[error("input contains no samples")]
    EmptyInput,
}

/// The inputs are well-formed but the requested quantity is undefined for them.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error(
        "degenerate labels: need at least one of each class, got {positives} positive and {negatives} negative"
    )]
    DegenerateLabels { positives: usize, negatives: usize },

    #[error("equal-error root not bracketed: g(0) = {g_lo}, g(1) = {g_hi}")]
    RootNotBracketed { g_lo: f64, g_hi: f64 },

    #[error("root finder did not converge after {iterations} iterations")]
    RootNotConverged { iterations: usize },
}

/// Evaluation errors.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for evaluation operations.
pub type Result<T> = std::result::Result<T, EvalError>;

impl EvalError {
    /// Short machine-readable tag used in log events.
    pub fn kind(&self) -> &'static str {
        match self {
            EvalError::Validation(ValidationError::LengthMismatch { .. }) => "length_mismatch",
            EvalError::Validation(ValidationError::NonFiniteScore { .. }) => "non_finite_score",
            EvalError::Validation(ValidationError::EmptyInput) => "empty_input",
            EvalError::Domain(DomainError::DegenerateLabels { .. }) => "degenerate_labels",
            EvalError::Domain(DomainError::RootNotBracketed { .. }) => "root_not_bracketed",
            EvalError::Domain(DomainError::RootNotConverged { .. }) => "root_not_converged",
            EvalError::Serialization(_) => "serialization",
            EvalError::Io(_) => "io",
        }
    }
}
