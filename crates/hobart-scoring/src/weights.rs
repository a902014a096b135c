//! Weight vectors, modifier vectors and the weight adjuster.

use crate::error::{Result, ScoringError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::warn;

/// Allowed distance of a weight vector's sum from 1.0 before a warning is raised.
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// Mapping from metric key to a weight in [0, 1].
///
/// Weights are validated on construction. Their sum is *not* forced to 1.0:
/// the scorer warns when it strays outside the tolerance and then uses the
/// weights as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct WeightVector {
    weights: BTreeMap<String, f64>,
}

impl WeightVector {
    /// Build a weight vector, rejecting weights outside [0, 1] and empty input.
    pub fn new<I, K>(weights: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let weights: BTreeMap<String, f64> =
            weights.into_iter().map(|(k, w)| (k.into(), w)).collect();
        if weights.is_empty() {
            return Err(ScoringError::EmptyWeights);
        }
        for (key, &weight) in &weights {
            if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
                return Err(ScoringError::InvalidWeight {
                    key: key.clone(),
                    weight,
                });
            }
        }
        Ok(Self { weights })
    }

    /// Weight of `key`, zero when absent.
    pub fn get(&self, key: &str) -> f64 {
        self.weights.get(key).copied().unwrap_or(0.0)
    }

    /// Whether the vector lists `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.weights.contains_key(key)
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(k, &w)| (k.as_str(), w))
    }

    /// Keys with a strictly positive weight.
    pub fn active_keys(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|(_, w)| *w > 0.0).map(|(k, _)| k)
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f64 {
        self.weights.values().sum()
    }

    /// Whether the sum lies within [`WEIGHT_SUM_TOLERANCE`] of 1.0.
    pub fn is_normalized(&self) -> bool {
        (self.sum() - 1.0).abs() <= WEIGHT_SUM_TOLERANCE
    }

    /// Log a warning when the sum is outside tolerance. Returns the sum in that case.
    pub fn check_sum(&self, context: &str) -> Option<f64> {
        if self.is_normalized() {
            return None;
        }
        let sum = self.sum();
        warn!(context, sum, "weights do not sum to 1.0, using them as given");
        Some(sum)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether the vector has no entries.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl TryFrom<BTreeMap<String, f64>> for WeightVector {
    type Error = ScoringError;

    fn try_from(weights: BTreeMap<String, f64>) -> Result<Self> {
        Self::new(weights)
    }
}

impl From<WeightVector> for BTreeMap<String, f64> {
    fn from(vector: WeightVector) -> Self {
        vector.weights
    }
}

/// Multiplicative per-metric adjustment; unlisted keys use 1.0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct ModifierVector {
    multipliers: BTreeMap<String, f64>,
}

impl ModifierVector {
    /// Build a modifier vector, rejecting negative or non-finite multipliers.
    pub fn new<I, K>(multipliers: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let multipliers: BTreeMap<String, f64> =
            multipliers.into_iter().map(|(k, m)| (k.into(), m)).collect();
        for (key, &multiplier) in &multipliers {
            if !multiplier.is_finite() || multiplier < 0.0 {
                return Err(ScoringError::InvalidModifier {
                    key: key.clone(),
                    multiplier,
                });
            }
        }
        Ok(Self { multipliers })
    }

    /// The identity modifier.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Multiplier for `key` (1.0 when unlisted).
    pub fn multiplier(&self, key: &str) -> f64 {
        self.multipliers.get(key).copied().unwrap_or(1.0)
    }

    /// Listed entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.multipliers.iter().map(|(k, &m)| (k.as_str(), m))
    }

    /// Whether no multipliers are listed.
    pub fn is_empty(&self) -> bool {
        self.multipliers.is_empty()
    }
}

impl TryFrom<BTreeMap<String, f64>> for ModifierVector {
    type Error = ScoringError;

    fn try_from(multipliers: BTreeMap<String, f64>) -> Result<Self> {
        Self::new(multipliers)
    }
}

impl From<ModifierVector> for BTreeMap<String, f64> {
    fn from(vector: ModifierVector) -> Self {
        vector.multipliers
    }
}

/// Derive a weight vector from a base vector and a modifier vector.
///
/// Each base weight is multiplied by its modifier (1.0 when unlisted) and the
/// result is rescaled to sum to 1.0. Modifier keys absent from the base are
/// ignored.
///
/// # Errors
/// [`ScoringError::InvalidWeights`] when the scaled weights sum to zero or less.
pub fn adjust(base: &WeightVector, modifier: &ModifierVector) -> Result<WeightVector> {
    base.check_sum("base weights");

    let scaled: BTreeMap<String, f64> = base
        .iter()
        .map(|(key, weight)| (key.to_string(), weight * modifier.multiplier(key)))
        .collect();
    let total: f64 = scaled.values().sum();
    if total <= 0.0 {
        return Err(ScoringError::InvalidWeights { total });
    }

    Ok(WeightVector {
        weights: scaled.into_iter().map(|(k, w)| (k, w / total)).collect(),
    })
}

/// How weight vectors are assigned to the instruments of a run.
#[derive(Debug, Clone, PartialEq)]
pub enum WeightAssignment {
    /// Every instrument uses the same vector
    Uniform(WeightVector),
    /// Instruments may carry their own vector (e.g. per subsector)
    PerInstrument {
        /// Vector for instruments without an override
        default: WeightVector,
        /// Vectors keyed by instrument symbol
        overrides: HashMap<String, WeightVector>,
    },
}

impl WeightAssignment {
    /// Start a per-instrument assignment from a default vector.
    pub fn per_instrument(default: WeightVector) -> Self {
        Self::PerInstrument {
            default,
            overrides: HashMap::new(),
        }
    }

    /// Builder-style override for one instrument. Turns a uniform assignment
    /// into a per-instrument one.
    #[must_use]
    pub fn with_override(self, symbol: impl Into<String>, weights: WeightVector) -> Self {
        let (default, mut overrides) = match self {
            Self::Uniform(default) => (default, HashMap::new()),
            Self::PerInstrument { default, overrides } => (default, overrides),
        };
        overrides.insert(symbol.into(), weights);
        Self::PerInstrument { default, overrides }
    }

    /// Vector used for `symbol`.
    pub fn weights_for(&self, symbol: &str) -> &WeightVector {
        match self {
            Self::Uniform(weights) => weights,
            Self::PerInstrument { default, overrides } => overrides.get(symbol).unwrap_or(default),
        }
    }

    /// Every distinct vector with a label, default first, overrides by symbol.
    pub fn labelled_vectors(&self) -> Vec<(String, &WeightVector)> {
        match self {
            Self::Uniform(weights) => vec![("weights".to_string(), weights)],
            Self::PerInstrument { default, overrides } => {
                let mut symbols: Vec<&String> = overrides.keys().collect();
                symbols.sort();
                std::iter::once(("default weights".to_string(), default))
                    .chain(
                        symbols
                            .into_iter()
                            .map(|s| (format!("weights for {s}"), &overrides[s])),
                    )
                    .collect()
            }
        }
    }

    /// Union of positively weighted keys over all vectors, sorted.
    pub fn active_keys(&self) -> BTreeSet<String> {
        self.labelled_vectors()
            .into_iter()
            .flat_map(|(_, v)| v.active_keys().map(str::to_string).collect::<Vec<_>>())
            .collect()
    }

    /// Union of all listed keys over all vectors, sorted.
    pub fn keys(&self) -> BTreeSet<String> {
        self.labelled_vectors()
            .into_iter()
            .flat_map(|(_, v)| v.iter().map(|(k, _)| k.to_string()).collect::<Vec<_>>())
            .collect()
    }
}

impl From<WeightVector> for WeightAssignment {
    fn from(weights: WeightVector) -> Self {
        Self::Uniform(weights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn vector(entries: &[(&str, f64)]) -> WeightVector {
        WeightVector::new(entries.iter().map(|&(k, w)| (k, w))).unwrap()
    }

    #[test]
    fn test_adjust_doubles_one_weight() {
        let base = vector(&[("a", 0.5), ("b", 0.5)]);
        let modifier = ModifierVector::new([("a", 2.0)]).unwrap();

        let adjusted = adjust(&base, &modifier).unwrap();
        assert_relative_eq!(adjusted.get("a"), 2.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(adjusted.get("b"), 1.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(adjusted.sum(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_adjust_identity_renormalizes() {
        let base = vector(&[("a", 0.2), ("b", 0.2)]);
        let adjusted = adjust(&base, &ModifierVector::identity()).unwrap();
        assert_relative_eq!(adjusted.get("a"), 0.5);
        assert_relative_eq!(adjusted.get("b"), 0.5);
    }

    #[test]
    fn test_adjust_ignores_unknown_modifier_keys() {
        let base = vector(&[("a", 1.0)]);
        let modifier = ModifierVector::new([("zzz", 5.0)]).unwrap();
        let adjusted = adjust(&base, &modifier).unwrap();
        assert!(!adjusted.contains("zzz"));
        assert_relative_eq!(adjusted.get("a"), 1.0);
    }

    #[test]
    fn test_adjust_zero_total_fails() {
        let base = vector(&[("a", 0.5), ("b", 0.5)]);
        let modifier = ModifierVector::new([("a", 0.0), ("b", 0.0)]).unwrap();
        let err = adjust(&base, &modifier).unwrap_err();
        assert_eq!(err, ScoringError::InvalidWeights { total: 0.0 });
    }

    #[rstest]
    #[case(-0.1)]
    #[case(1.5)]
    #[case(f64::NAN)]
    fn test_invalid_weight_rejected(#[case] weight: f64) {
        let err = WeightVector::new([("a", weight)]).unwrap_err();
        assert!(matches!(err, ScoringError::InvalidWeight { ref key, .. } if key == "a"));
    }

    #[test]
    fn test_empty_weights_rejected() {
        let entries: [(&str, f64); 0] = [];
        assert_eq!(
            WeightVector::new(entries).unwrap_err(),
            ScoringError::EmptyWeights
        );
    }

    #[rstest]
    #[case(-1.0)]
    #[case(f64::INFINITY)]
    fn test_invalid_modifier_rejected(#[case] multiplier: f64) {
        assert!(matches!(
            ModifierVector::new([("roic", multiplier)]),
            Err(ScoringError::InvalidModifier { .. })
        ));
    }

    #[test]
    fn test_sum_tolerance() {
        assert!(vector(&[("a", 0.5), ("b", 0.505)]).is_normalized());
        assert!(!vector(&[("a", 0.5), ("b", 0.3)]).is_normalized());
        assert_eq!(vector(&[("a", 0.5), ("b", 0.5)]).check_sum("test"), None);
        assert!(vector(&[("a", 0.4)]).check_sum("test").is_some());
    }

    #[test]
    fn test_serde_validates() {
        let parsed: WeightVector = serde_json::from_str(r#"{"a": 0.25, "b": 0.75}"#).unwrap();
        assert_relative_eq!(parsed.get("b"), 0.75);
        assert!(serde_json::from_str::<WeightVector>(r#"{"a": 2.0}"#).is_err());
        assert!(serde_json::from_str::<ModifierVector>(r#"{"a": -2.0}"#).is_err());
    }

    #[test]
    fn test_assignment_lookup() {
        let default = vector(&[("a", 1.0)]);
        let special = vector(&[("b", 1.0)]);
        let assignment = WeightAssignment::from(default.clone()).with_override("TSM", special.clone());

        assert_eq!(assignment.weights_for("TSM"), &special);
        assert_eq!(assignment.weights_for("NVDA"), &default);
        assert_eq!(
            assignment.active_keys().into_iter().collect::<Vec<_>>(),
            ["a", "b"]
        );
        assert_eq!(assignment.labelled_vectors().len(), 2);
    }

    #[test]
    fn test_active_keys_skip_zero_weights() {
        let assignment = WeightAssignment::from(vector(&[("a", 1.0), ("b", 0.0)]));
        assert_eq!(assignment.active_keys().len(), 1);
        assert_eq!(assignment.keys().len(), 2);
    }
}
