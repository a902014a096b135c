#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod fundamentals;
pub mod provider;
pub mod snapshot;

pub use error::{DataError, Result};
pub use fundamentals::FundamentalData;
pub use provider::{FundamentalsProvider, StaticProvider, normalize_symbol};
pub use snapshot::SnapshotProvider;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
