//! Error types for scoring operations.

use thiserror::Error;

/// Result type for scoring operations.
pub type Result<T> = std::result::Result<T, ScoringError>;

/// Errors that can occur while configuring or running the scorer.
///
/// Conditions the engine tolerates (weight sums off by more than the tolerance,
/// metrics without any usable value) are reported as
/// [`ScoringWarning`](crate::ScoringWarning)s instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScoringError {
    /// Adjusted weights sum to zero or less
    #[error("Invalid weights: adjusted weights sum to {total}, expected a positive total")]
    InvalidWeights {
        /// Sum of the scaled weights
        total: f64,
    },

    /// A single weight lies outside [0, 1] or is not finite
    #[error("Invalid weight for {key}: {weight} (must be between 0 and 1)")]
    InvalidWeight {
        /// Metric key
        key: String,
        /// Offending weight
        weight: f64,
    },

    /// A modifier is negative or not finite
    #[error("Invalid modifier for {key}: {multiplier} (must be a non-negative number)")]
    InvalidModifier {
        /// Metric key
        key: String,
        /// Offending multiplier
        multiplier: f64,
    },

    /// Weight vector without any entries
    #[error("Weight vector is empty")]
    EmptyWeights,

    /// Weight references a metric the direction policy does not know
    #[error("Unknown metric key: {0}")]
    UnknownMetric(String),

    /// Normalization selector that is neither `minmax` nor `zscore`
    #[error("Unknown normalization: {0} (expected 'minmax' or 'zscore')")]
    UnknownNormalization(String),

    /// Instrument inserted twice into a metric table
    #[error("Duplicate instrument: {0}")]
    DuplicateInstrument(String),
}
