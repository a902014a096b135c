//! Z-score normalization.

use super::{MAX_SCORE, MIN_SCORE, NEUTRAL_SCORE, Normalizer, neutral, present_values};
use crate::direction::Direction;

/// Number of standard deviations mapped onto each half of the 0-100 range.
pub const SATURATION_SIGMA: f64 = 3.0;

/// Score points per standard deviation (so ±3σ spans 0-100).
pub const POINTS_PER_SIGMA: f64 = NEUTRAL_SCORE / SATURATION_SIGMA;

/// Maps population z-scores onto 0-100 around a neutral 50.
///
/// Values more than three standard deviations from the mean saturate at the
/// bounds. Columns with fewer than two present values, or with zero
/// dispersion, score 50 everywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZScoreNormalizer;

impl ZScoreNormalizer {
    /// Population mean and standard deviation.
    fn moments(values: &[f64]) -> (f64, f64) {
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        (mean, variance.sqrt())
    }

    /// Largest absolute value; z-scores are invariant under this rescaling.
    fn scale(values: &[f64]) -> f64 {
        values.iter().fold(0.0, |acc: f64, v| acc.max(v.abs()))
    }
}

impl Normalizer for ZScoreNormalizer {
    fn normalize(&self, values: &[Option<f64>], direction: Direction) -> Vec<Option<f64>> {
        let present = present_values(values);
        if present.len() < 2 {
            return neutral(values);
        }

        let scale = Self::scale(&present);
        if scale == 0.0 {
            return neutral(values);
        }
        let scaled: Vec<f64> = present.iter().map(|v| v / scale).collect();
        let (mean, std_dev) = Self::moments(&scaled);
        if std_dev == 0.0 {
            return neutral(values);
        }

        values
            .iter()
            .map(|v| {
                v.map(|v| {
                    let z = (v / scale - mean) / std_dev;
                    let z = if direction.higher_is_better() { z } else { -z };
                    (NEUTRAL_SCORE + z * POINTS_PER_SIGMA).clamp(MIN_SCORE, MAX_SCORE)
                })
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "zscore"
    }
}
