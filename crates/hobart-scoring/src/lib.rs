#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod aggregate;
pub mod config;
pub mod direction;
pub mod error;
pub mod normalize;
pub mod resolve;
pub mod value;
pub mod weights;

pub use aggregate::{
    Breakdown, BreakdownRow, CompositeScore, RankedInstrument, ScoreCard, ScoredInstrument,
    Scorer, ScoringRun, ScoringWarning, UndefinedReason,
};
pub use config::ScoringConfig;
pub use direction::{Direction, DirectionPolicy};
pub use error::{Result, ScoringError};
pub use normalize::{MinMaxNormalizer, Normalization, Normalizer, ZScoreNormalizer};
pub use resolve::{Resolution, ResolvedColumn, peer_median, resolve};
pub use value::{MetricTable, MetricValue, NOT_APPLICABLE_MARKER};
pub use weights::{ModifierVector, WeightAssignment, WeightVector, adjust};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
