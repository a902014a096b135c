//! Fundamentals provider interface and an in-memory implementation.

use crate::error::{DataError, Result};
use crate::fundamentals::FundamentalData;
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::warn;

/// Source of company fundamentals.
#[async_trait]
pub trait FundamentalsProvider: Send + Sync {
    /// Provider name used in logs and errors.
    fn name(&self) -> &str;

    /// Fetch fundamentals for one symbol.
    async fn fetch_fundamentals(&self, symbol: &str) -> Result<FundamentalData>;

    /// Fetch fundamentals for several symbols one after another.
    ///
    /// Failed symbols are logged and left out of the result.
    async fn fetch_fundamentals_batch(&self, symbols: &[String]) -> Vec<FundamentalData> {
        let mut fundamentals = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            match self.fetch_fundamentals(symbol).await {
                Ok(data) => fundamentals.push(data),
                Err(e) => {
                    warn!(provider = self.name(), %symbol, error = %e, "failed to fetch fundamentals");
                }
            }
        }
        fundamentals
    }
}

/// Trim and upper-case a ticker, rejecting empty input.
pub fn normalize_symbol(symbol: &str) -> Result<String> {
    let symbol = symbol.trim();
    if symbol.is_empty() {
        return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
    }
    Ok(symbol.to_uppercase())
}

/// Provider backed by an in-memory map.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    records: HashMap<String, FundamentalData>,
}

impl StaticProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record, keyed by its symbol.
    #[must_use]
    pub fn with(mut self, data: FundamentalData) -> Self {
        self.insert(data);
        self
    }

    /// Add or replace a record, keyed by its upper-cased symbol.
    pub fn insert(&mut self, mut data: FundamentalData) {
        data.symbol = data.symbol.trim().to_uppercase();
        self.records.insert(data.symbol.clone(), data);
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the provider holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<FundamentalData> for StaticProvider {
    fn from_iter<T: IntoIterator<Item = FundamentalData>>(iter: T) -> Self {
        let mut provider = Self::new();
        for data in iter {
            provider.insert(data);
        }
        provider
    }
}

#[async_trait]
impl FundamentalsProvider for StaticProvider {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch_fundamentals(&self, symbol: &str) -> Result<FundamentalData> {
        let symbol = normalize_symbol(symbol)?;
        self.records
            .get(&symbol)
            .cloned()
            .ok_or_else(|| DataError::MissingData {
                symbol,
                reason: "not in provider".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> StaticProvider {
        [
            FundamentalData {
                revenue: Some(60.9),
                ..FundamentalData::empty("NVDA")
            },
            FundamentalData::empty("amd"),
        ]
        .into_iter()
        .collect()
    }

    #[tokio::test]
    async fn test_fetch_fundamentals() {
        let data = provider().fetch_fundamentals(" nvda ").await.unwrap();
        assert_eq!(data.symbol, "NVDA");
        assert_eq!(data.revenue, Some(60.9));
    }

    #[tokio::test]
    async fn test_invalid_symbol() {
        let result = provider().fetch_fundamentals("  ").await;
        assert!(matches!(result, Err(DataError::InvalidSymbol(_))));
    }

    #[tokio::test]
    async fn test_unknown_symbol() {
        let result = provider().fetch_fundamentals("INTC").await;
        assert!(matches!(result, Err(DataError::MissingData { symbol, .. }) if symbol == "INTC"));
    }

    #[tokio::test]
    async fn test_batch_skips_failures() {
        let symbols = vec!["NVDA".to_string(), "INTC".to_string(), "AMD".to_string()];
        let batch = provider().fetch_fundamentals_batch(&symbols).await;
        let fetched: Vec<_> = batch.iter().map(|d| d.symbol.as_str()).collect();
        assert_eq!(fetched, ["NVDA", "AMD"]);
    }
}
