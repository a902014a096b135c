//! Scoring runs over a screened peer group.

use crate::error::Result;
use chrono::NaiveDate;
use hobart_metrics::direction_policy;
use hobart_scoring::{
    Breakdown, DirectionPolicy, MetricTable, RankedInstrument, ScoreCard, Scorer, ScoringConfig,
    ScoringWarning, WeightAssignment,
};
use serde::Serialize;
use tracing::{info, warn};

/// Result of one scoring run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    /// Date of the fundamentals, when known
    pub as_of: Option<NaiveDate>,
    /// Composite scores in peer-group order
    pub card: ScoreCard,
    /// Per-metric normalized scores
    pub breakdown: Breakdown,
    /// Non-fatal conditions raised during the run
    pub warnings: Vec<ScoringWarning>,
}

impl ScoreReport {
    /// Instruments by descending score, undefined scores last.
    pub fn ranking(&self) -> Vec<RankedInstrument> {
        self.card.ranked()
    }
}

/// A configured scoring run.
///
/// Uses the direction policy of every registered metric unless another one is
/// supplied.
#[derive(Debug, Clone)]
pub struct ScreenRun {
    assignment: WeightAssignment,
    config: ScoringConfig,
    policy: DirectionPolicy,
    as_of: Option<NaiveDate>,
}

impl ScreenRun {
    /// Create a run.
    pub fn new(assignment: impl Into<WeightAssignment>, config: ScoringConfig) -> Self {
        Self {
            assignment: assignment.into(),
            config,
            policy: direction_policy(),
            as_of: None,
        }
    }

    /// Replace the direction policy.
    #[must_use]
    pub fn with_policy(mut self, policy: DirectionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Date to stamp on the report.
    #[must_use]
    pub fn with_as_of(mut self, as_of: Option<NaiveDate>) -> Self {
        self.as_of = as_of;
        self
    }

    /// Score the table.
    ///
    /// # Errors
    /// [`ScreenError::Scoring`](crate::ScreenError::Scoring) when a weight names
    /// a metric the policy does not know.
    pub fn execute(&self, table: &MetricTable) -> Result<ScoreReport> {
        let scorer = Scorer::new(self.assignment.clone(), self.policy.clone(), self.config)?;
        let run = scorer.run(table);
        for warning in &run.warnings {
            warn!(%warning, "scoring warning");
        }
        info!(
            as_of = ?self.as_of,
            instruments = run.card.len(),
            scored = run.card.defined_count(),
            "screen complete"
        );

        Ok(ScoreReport {
            as_of: self.as_of,
            card: run.card,
            breakdown: run.breakdown,
            warnings: run.warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScreenError;
    use hobart_scoring::{CompositeScore, Direction, MetricValue, Normalization, WeightVector};

    fn table() -> MetricTable {
        let mut table = MetricTable::new();
        table.set("X", "ev_to_fcf", MetricValue::Number(10.0));
        table.set("Y", "ev_to_fcf", MetricValue::Number(20.0));
        table.set("Z", "ev_to_fcf", MetricValue::NotApplicable);
        table
    }

    #[test]
    fn test_execute() {
        let weights = WeightVector::new([("ev_to_fcf", 1.0)]).unwrap();
        let as_of = NaiveDate::from_ymd_opt(2025, 3, 31);
        let report = ScreenRun::new(weights, ScoringConfig::default())
            .with_as_of(as_of)
            .execute(&table())
            .unwrap();

        assert_eq!(report.as_of, as_of);
        assert_eq!(report.card.get("X"), Some(&CompositeScore::Defined(100.0)));
        assert_eq!(report.card.get("Y"), Some(&CompositeScore::Defined(0.0)));
        assert!(!report.card.get("Z").unwrap().is_defined());
        assert_eq!(report.ranking()[0].symbol, "X");
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_custom_policy() {
        let weights = WeightVector::new([("ev_to_fcf", 1.0)]).unwrap();
        let policy = DirectionPolicy::new().with("ev_to_fcf", Direction::HigherIsBetter);
        let report = ScreenRun::new(weights, ScoringConfig::default().with_normalization(Normalization::ZScore))
            .with_policy(policy)
            .execute(&table())
            .unwrap();

        let x = report.card.get("X").unwrap().value().unwrap();
        let y = report.card.get("Y").unwrap().value().unwrap();
        assert!(y > x);
    }

    #[test]
    fn test_unknown_metric() {
        let weights = WeightVector::new([("pe_ratio", 1.0)]).unwrap();
        let result = ScreenRun::new(weights, ScoringConfig::default()).execute(&table());
        assert!(matches!(result, Err(ScreenError::Scoring(_))));
    }

    #[test]
    fn test_report_serializes() {
        let weights = WeightVector::new([("ev_to_fcf", 0.5)]).unwrap();
        let report = ScreenRun::new(weights, ScoringConfig::default())
            .execute(&table())
            .unwrap();
        assert_eq!(report.warnings.len(), 1);

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["as_of"].is_null());
        assert_eq!(json["card"].as_array().unwrap().len(), 3);
    }
}
