//! Weighted aggregation of normalized metric scores into composite scores.
//!
//! For every metric carrying weight in at least one instrument's vector the
//! scorer resolves the peer column, normalizes it and adds `score × weight` to
//! each instrument that has a weight for it. Not-applicable cells add neither
//! score nor weight, and the final composite divides by the weight actually
//! used. An instrument is therefore judged on the metrics that apply to it.

use crate::config::ScoringConfig;
use crate::direction::DirectionPolicy;
use crate::error::{Result, ScoringError};
use crate::normalize::{MAX_SCORE, MIN_SCORE};
use crate::resolve::{Resolution, resolve};
use crate::value::{MetricTable, MetricValue};
use crate::weights::WeightAssignment;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::{debug, info};

/// Why an instrument has no composite score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UndefinedReason {
    /// Every weighted metric was not applicable (or had no signal)
    NoApplicableMetrics,
    /// A weighted metric had no value after resolution (imputation disabled)
    UnresolvedValue {
        /// Metric that could not be resolved
        metric: String,
    },
}

impl fmt::Display for UndefinedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoApplicableMetrics => f.write_str("no applicable metrics"),
            Self::UnresolvedValue { metric } => write!(f, "no value for {metric}"),
        }
    }
}

/// Composite score of one instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositeScore {
    /// Score in [0, 100]
    Defined(f64),
    /// No score could be formed
    Undefined(UndefinedReason),
}

impl CompositeScore {
    /// The numeric score, if defined.
    pub const fn value(&self) -> Option<f64> {
        match self {
            Self::Defined(v) => Some(*v),
            Self::Undefined(_) => None,
        }
    }

    /// Whether the score is defined.
    pub const fn is_defined(&self) -> bool {
        matches!(self, Self::Defined(_))
    }

    /// Ranking order: higher scores first, undefined scores after every defined one.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        match (self.value(), other.value()) {
            (Some(a), Some(b)) => b.total_cmp(&a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl fmt::Display for CompositeScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Defined(v) => write!(f, "{v:.1}"),
            Self::Undefined(_) => f.write_str("N/A"),
        }
    }
}

/// An instrument with its composite score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredInstrument {
    /// Instrument symbol
    pub symbol: String,
    /// Composite score
    pub score: CompositeScore,
}

/// An instrument's position in a ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedInstrument {
    /// 1-based rank
    pub rank: usize,
    /// Instrument symbol
    pub symbol: String,
    /// Composite score
    pub score: CompositeScore,
}

/// Composite scores of a peer group, in peer-group order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreCard {
    entries: Vec<ScoredInstrument>,
}

impl ScoreCard {
    /// Score of one instrument.
    pub fn get(&self, symbol: &str) -> Option<&CompositeScore> {
        self.entries
            .iter()
            .find(|e| e.symbol == symbol)
            .map(|e| &e.score)
    }

    /// Entries in peer-group order.
    pub fn iter(&self) -> impl Iterator<Item = &ScoredInstrument> {
        self.entries.iter()
    }

    /// Entries sorted by descending score with undefined scores last.
    /// Ties keep peer-group order.
    pub fn ranked(&self) -> Vec<RankedInstrument> {
        let mut sorted: Vec<&ScoredInstrument> = self.entries.iter().collect();
        sorted.sort_by(|a, b| a.score.rank_cmp(&b.score));
        sorted
            .into_iter()
            .enumerate()
            .map(|(i, e)| RankedInstrument {
                rank: i + 1,
                symbol: e.symbol.clone(),
                score: e.score.clone(),
            })
            .collect()
    }

    /// Scores keyed by symbol, `None` for undefined.
    pub fn to_map(&self) -> BTreeMap<String, Option<f64>> {
        self.entries
            .iter()
            .map(|e| (e.symbol.clone(), e.score.value()))
            .collect()
    }

    /// Number of instruments with a defined score.
    pub fn defined_count(&self) -> usize {
        self.entries.iter().filter(|e| e.score.is_defined()).count()
    }

    /// Number of instruments.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the card is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-metric normalized scores of one instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownRow {
    /// Instrument symbol
    pub symbol: String,
    /// Normalized score per metric before weighting
    pub scores: BTreeMap<String, MetricValue>,
    /// Metrics whose raw value was filled with the peer median
    pub imputed: BTreeSet<String>,
    /// Composite score
    pub total: CompositeScore,
}

/// Detailed view of a run: normalized score of every scored metric for every instrument.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    metrics: Vec<String>,
    rows: Vec<BreakdownRow>,
}

impl Breakdown {
    /// Metrics that were scored, in processing order.
    pub fn metrics(&self) -> &[String] {
        &self.metrics
    }

    /// Rows in peer-group order.
    pub fn rows(&self) -> &[BreakdownRow] {
        &self.rows
    }

    /// Row of one instrument.
    pub fn row(&self, symbol: &str) -> Option<&BreakdownRow> {
        self.rows.iter().find(|r| r.symbol == symbol)
    }

    /// Normalized score of one cell; `Missing` when the metric was not scored.
    pub fn score(&self, symbol: &str, metric: &str) -> MetricValue {
        self.row(symbol)
            .and_then(|r| r.scores.get(metric))
            .copied()
            .unwrap_or_default()
    }
}

/// Non-fatal conditions met during a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringWarning {
    /// A weight vector sums outside 1.0 ± 0.01
    WeightSum {
        /// Which vector
        context: String,
        /// Its sum
        sum: f64,
    },
    /// A weighted metric has no numeric value anywhere in the peer group
    NoSignal {
        /// Metric key
        metric: String,
    },
}

impl fmt::Display for ScoringWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WeightSum { context, sum } => {
                write!(f, "{context} sum to {sum:.3}, not 1.0")
            }
            Self::NoSignal { metric } => {
                write!(f, "{metric} has no values in the peer group and was skipped")
            }
        }
    }
}

/// Everything a scoring run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringRun {
    /// Composite scores
    pub card: ScoreCard,
    /// Per-metric normalized scores
    pub breakdown: Breakdown,
    /// Non-fatal conditions
    pub warnings: Vec<ScoringWarning>,
}

#[derive(Debug, Clone, Default)]
struct Accumulator {
    score: f64,
    weight: f64,
    undefined: Option<UndefinedReason>,
}

impl Accumulator {
    fn add(&mut self, metric: &str, cell: MetricValue, weight: f64) {
        if self.undefined.is_some() {
            return;
        }
        match cell {
            // weight of a not-applicable metric is redistributed by the final division
            MetricValue::NotApplicable => {}
            MetricValue::Number(score) => {
                self.score += score * weight;
                self.weight += weight;
            }
            MetricValue::Missing => {
                self.undefined = Some(UndefinedReason::UnresolvedValue {
                    metric: metric.to_string(),
                });
            }
        }
    }

    fn finish(self) -> CompositeScore {
        match self.undefined {
            Some(reason) => CompositeScore::Undefined(reason),
            None if self.weight > 0.0 => {
                CompositeScore::Defined((self.score / self.weight).clamp(MIN_SCORE, MAX_SCORE))
            }
            None => CompositeScore::Undefined(UndefinedReason::NoApplicableMetrics),
        }
    }
}

/// Composite scorer for a peer group.
///
/// Holds the weights, the direction policy and the run configuration. Scoring
/// is a pure function of the table: running twice on the same table gives
/// identical results.
#[derive(Debug, Clone)]
pub struct Scorer {
    weights: WeightAssignment,
    policy: DirectionPolicy,
    config: ScoringConfig,
}

impl Scorer {
    /// Create a scorer.
    ///
    /// # Errors
    /// [`ScoringError::UnknownMetric`] when a weight names a metric the policy does not list.
    pub fn new(
        weights: impl Into<WeightAssignment>,
        policy: DirectionPolicy,
        config: ScoringConfig,
    ) -> Result<Self> {
        let weights = weights.into();
        if let Some(unknown) = weights.keys().into_iter().find(|k| !policy.contains(k)) {
            return Err(ScoringError::UnknownMetric(unknown));
        }
        Ok(Self {
            weights,
            policy,
            config,
        })
    }

    /// Run configuration.
    pub const fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Direction policy.
    pub const fn policy(&self) -> &DirectionPolicy {
        &self.policy
    }

    /// Weight assignment.
    pub const fn weights(&self) -> &WeightAssignment {
        &self.weights
    }

    /// Composite scores for the table.
    pub fn score(&self, table: &MetricTable) -> ScoreCard {
        self.run(table).card
    }

    /// Per-metric normalized scores for the table.
    pub fn breakdown(&self, table: &MetricTable) -> Breakdown {
        self.run(table).breakdown
    }

    /// Score the table and collect the breakdown and warnings.
    pub fn run(&self, table: &MetricTable) -> ScoringRun {
        let mut warnings = Vec::new();
        for (context, vector) in self.weights.labelled_vectors() {
            if let Some(sum) = vector.check_sum(&context) {
                warnings.push(ScoringWarning::WeightSum { context, sum });
            }
        }

        let instruments = table.instruments();
        let mut accumulators = vec![Accumulator::default(); instruments.len()];
        let mut rows: Vec<BreakdownRow> = instruments
            .iter()
            .map(|symbol| BreakdownRow {
                symbol: symbol.clone(),
                scores: BTreeMap::new(),
                imputed: BTreeSet::new(),
                total: CompositeScore::Undefined(UndefinedReason::NoApplicableMetrics),
            })
            .collect();
        let mut metrics = Vec::new();

        for key in self.weights.active_keys() {
            let column = table.column(&key);
            let resolved = match resolve(&column, self.config.impute_missing) {
                Resolution::Resolved(resolved) => resolved,
                Resolution::NoSignal => {
                    debug!(metric = %key, "no values in peer group, skipping metric");
                    warnings.push(ScoringWarning::NoSignal { metric: key });
                    continue;
                }
            };

            let direction = self.policy.direction(&key);
            let normalized = self
                .config
                .normalization
                .normalize(resolved.values(), direction);
            debug!(
                metric = %key,
                %direction,
                valid = resolved.valid_count(),
                imputed = resolved.imputed_count(),
                median = resolved.median(),
                "normalized metric"
            );

            for (i, symbol) in instruments.iter().enumerate() {
                let cell = if resolved.is_not_applicable(i) {
                    MetricValue::NotApplicable
                } else {
                    MetricValue::from_option(normalized[i])
                };

                let weight = self.weights.weights_for(symbol).get(&key);
                if weight > 0.0 {
                    accumulators[i].add(&key, cell, weight);
                }

                rows[i].scores.insert(key.clone(), cell);
                if resolved.is_imputed(i) {
                    rows[i].imputed.insert(key.clone());
                }
            }
            metrics.push(key);
        }

        let entries: Vec<ScoredInstrument> = instruments
            .iter()
            .zip(accumulators)
            .map(|(symbol, acc)| ScoredInstrument {
                symbol: symbol.clone(),
                score: acc.finish(),
            })
            .collect();
        for (row, entry) in rows.iter_mut().zip(&entries) {
            row.total = entry.score.clone();
        }

        let card = ScoreCard { entries };
        info!(
            instruments = card.len(),
            scored = card.defined_count(),
            metrics = metrics.len(),
            normalization = %self.config.normalization,
            "scoring run complete"
        );

        ScoringRun {
            card,
            breakdown: Breakdown { metrics, rows },
            warnings,
        }
    }
}
