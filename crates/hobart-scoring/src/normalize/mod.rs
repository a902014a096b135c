//! Cross-sectional normalization of one metric column onto a 0-100 scale.
//!
//! Two strategies are available and exactly one is used per scoring run:
//! min-max scaling and clamped z-scores. Both keep the input length and order,
//! pass missing cells through untouched and never produce values outside
//! [0, 100].

pub mod minmax;
pub mod zscore;

pub use minmax::MinMaxNormalizer;
pub use zscore::ZScoreNormalizer;

use crate::direction::Direction;
use crate::error::ScoringError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lowest normalized score.
pub const MIN_SCORE: f64 = 0.0;

/// Highest normalized score.
pub const MAX_SCORE: f64 = 100.0;

/// Score given to every value when a column carries no discriminating signal.
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Trait for column normalizers
pub trait Normalizer: Send + Sync + fmt::Debug {
    /// Normalize a column of values across the peer group
    ///
    /// # Arguments
    /// * `values` - One entry per instrument; `None` marks a missing value
    /// * `direction` - Orientation of the metric
    ///
    /// # Returns
    /// * Scores in [0, 100], aligned with `values`; `None` where the input was `None`
    fn normalize(&self, values: &[Option<f64>], direction: Direction) -> Vec<Option<f64>>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}

/// Normalization selector for a scoring run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Normalization {
    /// Min-max scaling onto 0-100
    #[default]
    MinMax,
    /// Population z-scores mapped so that ±3σ spans 0-100
    ZScore,
}

impl Normalization {
    /// The strategy implementing this selector.
    pub fn normalizer(self) -> &'static dyn Normalizer {
        match self {
            Self::MinMax => &MinMaxNormalizer,
            Self::ZScore => &ZScoreNormalizer,
        }
    }

    /// Normalize a column with the selected strategy.
    pub fn normalize(self, values: &[Option<f64>], direction: Direction) -> Vec<Option<f64>> {
        self.normalizer().normalize(values, direction)
    }

    /// Configuration spelling of the selector.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MinMax => "minmax",
            Self::ZScore => "zscore",
        }
    }
}

impl fmt::Display for Normalization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Normalization {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], "").as_str() {
            "minmax" => Ok(Self::MinMax),
            "zscore" => Ok(Self::ZScore),
            _ => Err(ScoringError::UnknownNormalization(s.to_string())),
        }
    }
}

/// Values that take part in the statistics of a column.
pub(crate) fn present_values(values: &[Option<f64>]) -> Vec<f64> {
    values.iter().flatten().copied().collect()
}

/// Map every present value to the neutral score.
pub(crate) fn neutral(values: &[Option<f64>]) -> Vec<Option<f64>> {
    values.iter().map(|v| v.map(|_| NEUTRAL_SCORE)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("minmax", Normalization::MinMax)]
    #[case("MinMax", Normalization::MinMax)]
    #[case("min-max", Normalization::MinMax)]
    #[case("zscore", Normalization::ZScore)]
    #[case("z_score", Normalization::ZScore)]
    fn test_parse_normalization(#[case] input: &str, #[case] expected: Normalization) {
        assert_eq!(input.parse::<Normalization>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown_normalization() {
        let err = "rank".parse::<Normalization>().unwrap_err();
        assert_eq!(err, ScoringError::UnknownNormalization("rank".to_string()));
    }

    #[test]
    fn test_serde_spelling() {
        assert_eq!(
            serde_json::to_string(&Normalization::ZScore).unwrap(),
            r#""zscore""#
        );
        let parsed: Normalization = serde_json::from_str(r#""minmax""#).unwrap();
        assert_eq!(parsed, Normalization::MinMax);
    }

    #[rstest]
    #[case(Normalization::MinMax)]
    #[case(Normalization::ZScore)]
    fn test_scores_stay_in_bounds(#[case] normalization: Normalization) {
        let values = [
            Some(-1.0e6),
            Some(0.0),
            None,
            Some(3.5),
            Some(42.0),
            Some(1.0e9),
        ];
        for direction in [Direction::HigherIsBetter, Direction::LowerIsBetter] {
            let scores = normalization.normalize(&values, direction);
            assert_eq!(scores.len(), values.len());
            assert!(scores[2].is_none());
            for score in scores.into_iter().flatten() {
                assert!((MIN_SCORE..=MAX_SCORE).contains(&score), "{score} out of bounds");
            }
        }
    }

    #[rstest]
    #[case(Normalization::MinMax)]
    #[case(Normalization::ZScore)]
    fn test_constant_column_is_neutral(#[case] normalization: Normalization) {
        let scores = normalization.normalize(&[Some(7.0), None, Some(7.0)], Direction::LowerIsBetter);
        assert_eq!(scores, vec![Some(50.0), None, Some(50.0)]);
    }
}
