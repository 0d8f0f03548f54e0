//! Error types for plot rendering

use thiserror::Error;

/// Errors that can occur while producing a plot
#[derive(Error, Debug)]
pub enum RenderError {
    /// Style values that cannot produce a drawable figure
    #[error("invalid plot style: {0}")]
    InvalidStyle(String),

    /// IO error while writing the artifact
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for rendering
pub type Result<T> = std::result::Result<T, RenderError>;
