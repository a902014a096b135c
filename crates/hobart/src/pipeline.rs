//! Fundamentals fetching and metric table construction.

use crate::error::Result;
use futures::stream::{self, StreamExt};
use hobart_data::{FundamentalData, FundamentalsProvider, normalize_symbol};
use hobart_metrics::{Metric, build_table};
use hobart_scoring::MetricTable;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Default number of concurrent provider requests.
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Configuration for data fetching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Maximum number of requests in flight
    pub concurrency: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl FetchConfig {
    /// Set the concurrency, at least 1.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}

/// Normalize symbols, dropping empty and repeated ones.
fn peer_symbols(symbols: &[String]) -> Vec<String> {
    let mut peers: Vec<String> = Vec::with_capacity(symbols.len());
    for raw in symbols {
        match normalize_symbol(raw) {
            Ok(symbol) if peers.contains(&symbol) => {
                warn!(%symbol, "duplicate symbol ignored");
            }
            Ok(symbol) => peers.push(symbol),
            Err(e) => warn!(symbol = %raw, error = %e, "invalid symbol ignored"),
        }
    }
    peers
}

/// Fetch fundamentals for every symbol with bounded concurrency.
///
/// Results keep the input order. A failed fetch yields
/// [`FundamentalData::empty`], so the company stays in the peer group with
/// every metric missing. `on_progress` is called once per completed symbol.
pub async fn fetch_all<P, F>(
    provider: &P,
    symbols: &[String],
    config: &FetchConfig,
    mut on_progress: F,
) -> Vec<FundamentalData>
where
    P: FundamentalsProvider + ?Sized,
    F: FnMut(&str),
{
    let symbols = peer_symbols(symbols);
    info!(
        provider = provider.name(),
        symbols = symbols.len(),
        concurrency = config.concurrency,
        "fetching fundamentals"
    );

    let fetches = stream::iter(symbols)
        .map(|symbol| async move {
            match provider.fetch_fundamentals(&symbol).await {
                Ok(mut data) => {
                    data.symbol = symbol;
                    data
                }
                Err(e) => {
                    warn!(provider = provider.name(), %symbol, error = %e, "failed to fetch fundamentals");
                    FundamentalData::empty(symbol)
                }
            }
        })
        .buffered(config.concurrency.max(1));
    let mut fetches = std::pin::pin!(fetches);

    let mut rows = Vec::new();
    while let Some(data) = fetches.next().await {
        on_progress(&data.symbol);
        rows.push(data);
    }
    rows
}

/// Fetch fundamentals and evaluate `metrics` for every symbol.
///
/// The table's peer-group order equals the order of `symbols`.
pub async fn screen<P, F>(
    provider: &P,
    symbols: &[String],
    metrics: &[Box<dyn Metric>],
    config: &FetchConfig,
    on_progress: F,
) -> Result<MetricTable>
where
    P: FundamentalsProvider + ?Sized,
    F: FnMut(&str),
{
    let rows = fetch_all(provider, symbols, config, on_progress).await;
    let empty = rows.iter().filter(|r| r.is_empty()).count();
    if empty > 0 {
        warn!(empty, total = rows.len(), "companies without fundamentals");
    }
    Ok(build_table(&rows, metrics)?)
}
