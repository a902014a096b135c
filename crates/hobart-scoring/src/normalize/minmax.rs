//! Min-max normalization.

use super::{MAX_SCORE, MIN_SCORE, Normalizer, neutral, present_values};
use crate::direction::Direction;

/// Scales a column linearly so its minimum maps to 0 and its maximum to 100.
///
/// Lower-is-better columns are mirrored around the midpoint (`100 - score`).
/// A column whose present values are all equal carries no signal and scores
/// 50 everywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinMaxNormalizer;

impl Normalizer for MinMaxNormalizer {
    fn normalize(&self, values: &[Option<f64>], direction: Direction) -> Vec<Option<f64>> {
        let present = present_values(values);
        if present.is_empty() {
            return vec![None; values.len()];
        }

        let min = present.iter().copied().fold(f64::INFINITY, f64::min);
        let max = present.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if min == max {
            return neutral(values);
        }

        // halved operands keep the span finite for columns near ±f64::MAX
        let (low, range) = (min / 2.0, max / 2.0 - min / 2.0);
        if range == 0.0 {
            return neutral(values);
        }
        values
            .iter()
            .map(|v| {
                v.map(|v| {
                    let score = ((v / 2.0 - low) / range * MAX_SCORE).clamp(MIN_SCORE, MAX_SCORE);
                    if direction.higher_is_better() {
                        score
                    } else {
                        MAX_SCORE - score
                    }
                })
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "minmax"
    }
}
