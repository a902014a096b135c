#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod pipeline;
pub mod profiles;
pub mod run;
pub mod universe;

// Re-export main types from sub-crates
pub use hobart_data as data;
pub use hobart_metrics as metrics;
pub use hobart_output as output;
pub use hobart_scoring as scoring;

pub use error::{Result, ScreenError};
pub use pipeline::{DEFAULT_CONCURRENCY, FetchConfig, fetch_all, screen};
pub use profiles::{BUILTIN_PROFILES, Profile, builtin_profiles, profile};
pub use run::{ScoreReport, ScreenRun};
pub use universe::{SemiconductorUniverse, Subsector, Universe, Watchlist};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
