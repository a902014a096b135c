//! Screening universes.
//!
//! A universe is a list of symbols, optionally split into segments whose
//! names select a weight modifier in a [`Profile`](crate::profiles::Profile).

pub mod semiconductors;

pub use semiconductors::{SemiconductorUniverse, Subsector};

/// Trait for stock universes.
pub trait Universe {
    /// Get all symbols in the universe.
    fn symbols(&self) -> Vec<String>;

    /// Check if a symbol is in the universe.
    fn contains(&self, symbol: &str) -> bool {
        self.symbols().iter().any(|s| s == symbol)
    }

    /// Get the number of constituents.
    fn size(&self) -> usize {
        self.symbols().len()
    }

    /// Segment name of a symbol, if the universe classifies it.
    fn segment(&self, _symbol: &str) -> Option<String> {
        None
    }
}

impl Universe for SemiconductorUniverse {
    fn symbols(&self) -> Vec<String> {
        self.symbols()
    }

    fn contains(&self, symbol: &str) -> bool {
        self.subsector(symbol).is_some()
    }

    fn segment(&self, symbol: &str) -> Option<String> {
        self.subsector(symbol).map(|s| s.as_str().to_string())
    }
}

/// Unclassified list of symbols.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Watchlist {
    symbols: Vec<String>,
}

impl Watchlist {
    /// Create a watchlist; symbols are trimmed, upper-cased and de-duplicated.
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list: Vec<String> = Vec::new();
        for symbol in symbols {
            let symbol = symbol.as_ref().trim().to_uppercase();
            if !symbol.is_empty() && !list.contains(&symbol) {
                list.push(symbol);
            }
        }
        Self { symbols: list }
    }

    /// Parse a comma separated list such as `"NVDA, amd,TSM"`.
    pub fn parse(list: &str) -> Self {
        Self::new(list.split(','))
    }
}

impl Universe for Watchlist {
    fn symbols(&self) -> Vec<String> {
        self.symbols.clone()
    }
}
