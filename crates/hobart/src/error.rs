//! Error types for screening runs.

use hobart_data::DataError;
use hobart_scoring::ScoringError;
use thiserror::Error;

/// Result type for screening operations.
pub type Result<T> = std::result::Result<T, ScreenError>;

/// Errors that can occur while configuring or running a screen.
#[derive(Debug, Error)]
pub enum ScreenError {
    /// Scoring configuration or table construction failed
    #[error(transparent)]
    Scoring(#[from] ScoringError),

    /// Fundamentals could not be loaded
    #[error(transparent)]
    Data(#[from] DataError),

    /// Profile name not among the built-in profiles
    #[error("Unknown profile: {0}")]
    UnknownProfile(String),

    /// Subsector name not recognised
    #[error("Unknown subsector: {0}")]
    UnknownSubsector(String),

    /// Profile file is not valid JSON
    #[error("Invalid profile file: {0}")]
    InvalidProfile(#[from] serde_json::Error),

    /// Profile file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
