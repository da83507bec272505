//! Error types for the analysis pipeline
//!
//! The parser itself never fails. These errors cover everything around it:
//! talking to the completion service and loading configuration.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalyzeError>;

#[derive(Error, Debug)]
pub enum AnalyzeError {
    /// Transport failure (connect, timeout, TLS, body decode)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Completion service answered with a non-success status
    #[error("Completion service returned {status}: {body}")]
    Api { status: u16, body: String },

    /// Completion service answered but produced no text
    #[error("No content in completion response")]
    EmptyCompletion,

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}
