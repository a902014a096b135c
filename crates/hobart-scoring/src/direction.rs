//! Direction policy: which way each metric points.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Orientation of a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Larger values score higher (margins, growth, coverage)
    #[default]
    HigherIsBetter,
    /// Smaller values score higher (valuation multiples, leverage)
    LowerIsBetter,
}

impl Direction {
    /// Convert from a higher-is-better flag.
    pub const fn from_higher_is_better(higher_is_better: bool) -> Self {
        if higher_is_better {
            Self::HigherIsBetter
        } else {
            Self::LowerIsBetter
        }
    }

    /// Whether larger values are better.
    pub const fn higher_is_better(self) -> bool {
        matches!(self, Self::HigherIsBetter)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HigherIsBetter => f.pad("higher is better"),
            Self::LowerIsBetter => f.pad("lower is better"),
        }
    }
}

/// Mapping from metric key to [`Direction`].
///
/// Lookups of keys the policy does not list fall back to
/// [`Direction::HigherIsBetter`]; [`Scorer::new`](crate::Scorer::new) refuses
/// weights for such keys, so the fallback only matters for ad-hoc callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DirectionPolicy {
    directions: BTreeMap<String, Direction>,
}

impl DirectionPolicy {
    /// Create an empty policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, direction: Direction) -> Self {
        self.insert(key, direction);
        self
    }

    /// Insert or replace the direction of a metric.
    pub fn insert(&mut self, key: impl Into<String>, direction: Direction) {
        self.directions.insert(key.into(), direction);
    }

    /// Direction of a metric (higher-is-better when unknown).
    pub fn direction(&self, key: &str) -> Direction {
        self.directions.get(key).copied().unwrap_or_default()
    }

    /// Whether larger values of `key` are better.
    pub fn higher_is_better(&self, key: &str) -> bool {
        self.direction(key).higher_is_better()
    }

    /// Whether the policy lists `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.directions.contains_key(key)
    }

    /// Listed metric keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.directions.keys().map(String::as_str)
    }

    /// Number of listed metrics.
    pub fn len(&self) -> usize {
        self.directions.len()
    }

    /// Whether the policy lists no metrics.
    pub fn is_empty(&self) -> bool {
        self.directions.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Direction)> for DirectionPolicy {
    fn from_iter<T: IntoIterator<Item = (K, Direction)>>(iter: T) -> Self {
        Self {
            directions: iter.into_iter().map(|(k, d)| (k.into(), d)).collect(),
        }
    }
}
