//! Run-level scoring configuration.

use crate::normalize::Normalization;
use serde::{Deserialize, Serialize};

/// Configuration for a scoring run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Normalization strategy applied to every metric (default: minmax)
    pub normalization: Normalization,
    /// Fill missing cells with the peer median (default: true)
    pub impute_missing: bool,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            normalization: Normalization::MinMax,
            impute_missing: true,
        }
    }
}

impl ScoringConfig {
    /// Use the given normalization strategy.
    #[must_use]
    pub const fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    /// Toggle peer-median imputation.
    #[must_use]
    pub const fn with_imputation(mut self, impute_missing: bool) -> Self {
        self.impute_missing = impute_missing;
        self
    }
}
