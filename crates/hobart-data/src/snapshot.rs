//! Point-in-time fundamentals snapshots stored as JSON.
//!
//! ```json
//! {
//!   "as_of": "2024-06-30",
//!   "fundamentals": {
//!     "NVDA": { "revenue": 60922.0, "free_cash_flow": 27021.0 },
//!     "AMD": { "revenue": 22680.0 }
//!   }
//! }
//! ```

use crate::error::{DataError, Result};
use crate::fundamentals::FundamentalData;
use crate::provider::{FundamentalsProvider, normalize_symbol};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    as_of: Option<NaiveDate>,
    fundamentals: BTreeMap<String, FundamentalData>,
}

/// Provider serving fundamentals from a loaded snapshot.
#[derive(Debug, Clone, Default)]
pub struct SnapshotProvider {
    as_of: Option<NaiveDate>,
    records: BTreeMap<String, FundamentalData>,
}

impl SnapshotProvider {
    /// Build a snapshot from records.
    pub fn new(as_of: Option<NaiveDate>, records: impl IntoIterator<Item = FundamentalData>) -> Self {
        let records = records
            .into_iter()
            .map(|mut data| {
                data.symbol = data.symbol.trim().to_uppercase();
                (data.symbol.clone(), data)
            })
            .collect();
        Self { as_of, records }
    }

    /// Parse a snapshot from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: SnapshotFile = serde_json::from_str(json)?;
        let mut records = BTreeMap::new();
        for (key, mut data) in file.fundamentals {
            let symbol = normalize_symbol(&key)
                .map_err(|_| DataError::Parse("snapshot contains an empty symbol".to_string()))?;
            data.symbol = symbol.clone();
            records.insert(symbol, data);
        }
        debug!(records = records.len(), as_of = ?file.as_of, "loaded fundamentals snapshot");
        Ok(Self {
            as_of: file.as_of,
            records,
        })
    }

    /// Load a snapshot from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serialize the snapshot back to pretty JSON.
    pub fn to_json_string(&self) -> Result<String> {
        let file = SnapshotFile {
            as_of: self.as_of,
            fundamentals: self.records.clone(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Date the snapshot was taken, if recorded.
    pub const fn as_of(&self) -> Option<NaiveDate> {
        self.as_of
    }

    /// Symbols in the snapshot, sorted.
    pub fn symbols(&self) -> Vec<String> {
        self.records.keys().cloned().collect()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl FundamentalsProvider for SnapshotProvider {
    fn name(&self) -> &str {
        "snapshot"
    }

    async fn fetch_fundamentals(&self, symbol: &str) -> Result<FundamentalData> {
        let symbol = normalize_symbol(symbol)?;
        self.records
            .get(&symbol)
            .cloned()
            .ok_or_else(|| DataError::MissingData {
                symbol,
                reason: "not in snapshot".to_string(),
            })
    }
}
