//! Growth metrics.

use crate::metric::{Metric, percent_of_revenue};
use crate::registry::MetricCategory;
use hobart_data::FundamentalData;
use hobart_scoring::Direction;

/// Compound annual growth rate in percent over an annual series, oldest first.
///
/// Needs at least two points and positive endpoints.
pub fn revenue_cagr(history: &[f64]) -> Option<f64> {
    let (first, last) = (*history.first()?, *history.last()?);
    if history.len() < 2 || first <= 0.0 || last <= 0.0 {
        return None;
    }
    let years = (history.len() - 1) as f64;
    Some(((last / first).powf(1.0 / years) - 1.0) * 100.0)
}

/// Minimum annual points for [`revenue_volatility`] (three growth rates).
pub const MIN_VOLATILITY_HISTORY: usize = 4;

/// Population standard deviation of year-over-year growth, in percentage points.
///
/// Needs at least [`MIN_VOLATILITY_HISTORY`] points, all positive.
pub fn revenue_volatility(history: &[f64]) -> Option<f64> {
    if history.len() < MIN_VOLATILITY_HISTORY || history.iter().any(|r| *r <= 0.0) {
        return None;
    }
    let growth: Vec<f64> = history.windows(2).map(|w| (w[1] - w[0]) / w[0]).collect();
    let n = growth.len() as f64;
    let mean = growth.iter().sum::<f64>() / n;
    let variance = growth.iter().map(|g| (g - mean).powi(2)).sum::<f64>() / n;
    Some(variance.sqrt() * 100.0)
}

/// Revenue CAGR over the reported annual history.
#[derive(Debug, Clone, Copy, Default)]
pub struct RevenueCagr;

impl Metric for RevenueCagr {
    fn key(&self) -> &'static str {
        "revenue_cagr"
    }

    fn name(&self) -> &'static str {
        "Revenue CAGR"
    }

    fn direction(&self) -> Direction {
        Direction::HigherIsBetter
    }

    fn category(&self) -> MetricCategory {
        MetricCategory::Growth
    }

    fn compute(&self, data: &FundamentalData) -> Option<f64> {
        revenue_cagr(&data.revenue_history)
    }
}

/// Revenue growth plus FCF margin, both in percent.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleOf40;

impl Metric for RuleOf40 {
    fn key(&self) -> &'static str {
        "rule_of_40"
    }

    fn name(&self) -> &'static str {
        "Rule of 40"
    }

    fn direction(&self) -> Direction {
        Direction::HigherIsBetter
    }

    fn category(&self) -> MetricCategory {
        MetricCategory::Growth
    }

    fn compute(&self, data: &FundamentalData) -> Option<f64> {
        let growth = revenue_cagr(&data.revenue_history)?;
        let fcf_margin = percent_of_revenue(data.free_cash_flow, data)?;
        Some(growth + fcf_margin)
    }
}

/// Dispersion of annual revenue growth. Steadier is better.
#[derive(Debug, Clone, Copy, Default)]
pub struct RevenueVolatility;

impl Metric for RevenueVolatility {
    fn key(&self) -> &'static str {
        "revenue_volatility"
    }

    fn name(&self) -> &'static str {
        "Revenue Volatility"
    }

    fn direction(&self) -> Direction {
        Direction::LowerIsBetter
    }

    fn category(&self) -> MetricCategory {
        MetricCategory::Growth
    }

    fn compute(&self, data: &FundamentalData) -> Option<f64> {
        revenue_volatility(&data.revenue_history)
    }
}
