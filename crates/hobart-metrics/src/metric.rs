//! The calculator interface shared by every metric.

use crate::registry::MetricCategory;
use hobart_data::FundamentalData;
use hobart_scoring::{Direction, MetricValue};
use std::fmt;

/// A metric computed from one company's fundamentals.
///
/// `compute` returns `None` when inputs are missing, which the scorer imputes
/// from the peer group. `is_not_applicable` flags companies for which the
/// metric is economically meaningless; their weight goes to the other metrics.
pub trait Metric: Send + Sync + fmt::Debug {
    /// Stable key used in weight vectors and tables.
    fn key(&self) -> &'static str;

    /// Display name.
    fn name(&self) -> &'static str;

    /// Whether higher or lower values are better.
    fn direction(&self) -> Direction;

    /// Metric category.
    fn category(&self) -> MetricCategory;

    /// Raw metric value, `None` when inputs are unavailable.
    fn compute(&self, data: &FundamentalData) -> Option<f64>;

    /// Whether the metric does not apply to this company.
    fn is_not_applicable(&self, _data: &FundamentalData) -> bool {
        false
    }

    /// Three-state metric value for this company.
    fn evaluate(&self, data: &FundamentalData) -> MetricValue {
        if self.is_not_applicable(data) {
            return MetricValue::NotApplicable;
        }
        MetricValue::from_option(self.compute(data))
    }
}

/// `numerator / revenue × 100`, requiring positive revenue.
pub(crate) fn percent_of_revenue(numerator: Option<f64>, data: &FundamentalData) -> Option<f64> {
    Some(numerator? / data.positive_revenue()? * 100.0)
}
