//! Metric values and the per-run metric value table.

use crate::error::{Result, ScoringError};
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

/// Marker written for not-applicable cells in serialized tables.
pub const NOT_APPLICABLE_MARKER: &str = "N/A";

/// Value of one metric for one instrument.
///
/// `NotApplicable` means the metric is economically meaningless for the
/// instrument and is left out of its score. `Missing` means the metric should
/// apply but could not be computed; it is imputed from the peer group.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MetricValue {
    /// A finite metric value
    Number(f64),
    /// The metric does not apply to this instrument
    NotApplicable,
    /// The metric could not be obtained
    #[default]
    Missing,
}

impl MetricValue {
    /// Build a value from an optional number. Non-finite numbers become `Missing`.
    pub fn from_option(value: Option<f64>) -> Self {
        match value {
            Some(v) if v.is_finite() => Self::Number(v),
            _ => Self::Missing,
        }
    }

    /// The numeric value, if any.
    pub const fn number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Whether the value is the not-applicable marker.
    pub const fn is_not_applicable(&self) -> bool {
        matches!(self, Self::NotApplicable)
    }

    /// Whether the value is missing.
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        Self::from_option(Some(value))
    }
}

impl From<Option<f64>> for MetricValue {
    fn from(value: Option<f64>) -> Self {
        Self::from_option(value)
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v:.2}"),
            Self::NotApplicable => f.write_str(NOT_APPLICABLE_MARKER),
            Self::Missing => f.write_str("-"),
        }
    }
}

impl Serialize for MetricValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Number(v) => serializer.serialize_f64(*v),
            Self::NotApplicable => serializer.serialize_str(NOT_APPLICABLE_MARKER),
            Self::Missing => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for MetricValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Cell {
            Number(f64),
            Marker(String),
        }

        match Option::<Cell>::deserialize(deserializer)? {
            None => Ok(Self::Missing),
            Some(Cell::Number(v)) => Ok(Self::from(v)),
            // "NaN" is how older cached result files spelled not-applicable
            Some(Cell::Marker(m)) if m == NOT_APPLICABLE_MARKER || m.eq_ignore_ascii_case("nan") => {
                Ok(Self::NotApplicable)
            }
            Some(Cell::Marker(m)) => Err(de::Error::custom(format!(
                "unexpected metric marker '{m}', expected a number, null or '{NOT_APPLICABLE_MARKER}'"
            ))),
        }
    }
}

/// Snapshot of metric values for a peer group.
///
/// Instruments keep the order in which they were added; that order is the
/// peer-group order used for every column. Cells that were never set read as
/// [`MetricValue::Missing`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricTable {
    instruments: Vec<String>,
    rows: HashMap<String, BTreeMap<String, MetricValue>>,
}

impl MetricTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a complete row for a new instrument.
    pub fn insert_row<I, K>(&mut self, symbol: impl Into<String>, values: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, MetricValue)>,
        K: Into<String>,
    {
        let symbol = symbol.into();
        if self.rows.contains_key(&symbol) {
            return Err(ScoringError::DuplicateInstrument(symbol));
        }
        let row = values.into_iter().map(|(k, v)| (k.into(), v)).collect();
        self.instruments.push(symbol.clone());
        self.rows.insert(symbol, row);
        Ok(())
    }

    /// Add an instrument with no values yet. Existing instruments are left untouched.
    pub fn add_instrument(&mut self, symbol: impl Into<String>) {
        let symbol = symbol.into();
        if !self.rows.contains_key(&symbol) {
            self.instruments.push(symbol.clone());
            self.rows.insert(symbol, BTreeMap::new());
        }
    }

    /// Set one cell, adding the instrument if needed.
    pub fn set(&mut self, symbol: impl Into<String>, key: impl Into<String>, value: MetricValue) {
        let symbol = symbol.into();
        self.add_instrument(symbol.clone());
        if let Some(row) = self.rows.get_mut(&symbol) {
            row.insert(key.into(), value);
        }
    }

    /// Value of `key` for `symbol`; absent cells are `Missing`.
    pub fn get(&self, symbol: &str, key: &str) -> MetricValue {
        self.rows
            .get(symbol)
            .and_then(|row| row.get(key))
            .copied()
            .unwrap_or_default()
    }

    /// All values recorded for one instrument.
    pub fn row(&self, symbol: &str) -> Option<&BTreeMap<String, MetricValue>> {
        self.rows.get(symbol)
    }

    /// Values of one metric across the peer group, in peer-group order.
    pub fn column(&self, key: &str) -> Vec<MetricValue> {
        self.instruments
            .iter()
            .map(|symbol| self.get(symbol, key))
            .collect()
    }

    /// Instruments in peer-group order.
    pub fn instruments(&self) -> &[String] {
        &self.instruments
    }

    /// Every metric key present in at least one row.
    pub fn metric_keys(&self) -> BTreeSet<String> {
        self.rows
            .values()
            .flat_map(|row| row.keys().cloned())
            .collect()
    }

    /// Whether the table contains the instrument.
    pub fn contains(&self, symbol: &str) -> bool {
        self.rows.contains_key(symbol)
    }

    /// Number of instruments.
    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    /// Whether the table has no instruments.
    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }
}

impl Serialize for MetricTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.instruments.len()))?;
        for symbol in &self.instruments {
            map.serialize_entry(symbol, &self.rows[symbol])?;
        }
        map.end()
    }
}

/// Reads rows in document order so the peer-group order survives a round trip.
struct MetricTableVisitor;

impl<'de> Visitor<'de> for MetricTableVisitor {
    type Value = MetricTable;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of instrument symbols to metric rows")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
        let mut table = MetricTable::new();
        while let Some((symbol, row)) = access.next_entry::<String, BTreeMap<String, MetricValue>>()? {
            table.insert_row(symbol, row).map_err(de::Error::custom)?;
        }
        Ok(table)
    }
}

impl<'de> Deserialize<'de> for MetricTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(MetricTableVisitor)
    }
}
