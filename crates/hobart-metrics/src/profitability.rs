//! Profitability metrics.

use crate::metric::{Metric, percent_of_revenue};
use crate::registry::MetricCategory;
use hobart_data::FundamentalData;
use hobart_scoring::Direction;

/// Operating income over revenue, in percent.
#[derive(Debug, Clone, Copy, Default)]
pub struct OperatingMargin;

impl Metric for OperatingMargin {
    fn key(&self) -> &'static str {
        "operating_margin"
    }

    fn name(&self) -> &'static str {
        "Operating Margin"
    }

    fn direction(&self) -> Direction {
        Direction::HigherIsBetter
    }

    fn category(&self) -> MetricCategory {
        MetricCategory::Profitability
    }

    fn compute(&self, data: &FundamentalData) -> Option<f64> {
        percent_of_revenue(data.operating_income, data)
    }
}

/// Free cash flow over revenue, in percent.
#[derive(Debug, Clone, Copy, Default)]
pub struct FcfMargin;

impl Metric for FcfMargin {
    fn key(&self) -> &'static str {
        "fcf_margin"
    }

    fn name(&self) -> &'static str {
        "FCF Margin"
    }

    fn direction(&self) -> Direction {
        Direction::HigherIsBetter
    }

    fn category(&self) -> MetricCategory {
        MetricCategory::Profitability
    }

    fn compute(&self, data: &FundamentalData) -> Option<f64> {
        percent_of_revenue(data.free_cash_flow, data)
    }
}

/// Gross profit over revenue, in percent.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrossMargin;

impl Metric for GrossMargin {
    fn key(&self) -> &'static str {
        "gross_margin"
    }

    fn name(&self) -> &'static str {
        "Gross Margin"
    }

    fn direction(&self) -> Direction {
        Direction::HigherIsBetter
    }

    fn category(&self) -> MetricCategory {
        MetricCategory::Profitability
    }

    fn compute(&self, data: &FundamentalData) -> Option<f64> {
        let revenue = data.positive_revenue()?;
        percent_of_revenue(Some(revenue - data.cost_of_revenue?), data)
    }
}

/// Return on invested capital: after-tax operating income over
/// debt plus equity minus cash, in percent.
///
/// Not applicable when invested capital is zero or negative, which happens
/// to cash-rich companies with little equity.
#[derive(Debug, Clone, Copy, Default)]
pub struct Roic;

impl Metric for Roic {
    fn key(&self) -> &'static str {
        "roic"
    }

    fn name(&self) -> &'static str {
        "ROIC"
    }

    fn direction(&self) -> Direction {
        Direction::HigherIsBetter
    }

    fn category(&self) -> MetricCategory {
        MetricCategory::Profitability
    }

    fn compute(&self, data: &FundamentalData) -> Option<f64> {
        let invested = data.invested_capital().filter(|ic| *ic > 0.0)?;
        let nopat = data.operating_income? * (1.0 - data.tax_rate?);
        Some(nopat / invested * 100.0)
    }

    fn is_not_applicable(&self, data: &FundamentalData) -> bool {
        data.invested_capital().is_some_and(|ic| ic <= 0.0)
    }
}

/// Year-over-year change in operating income over the change in revenue, in
/// percent, from the two most recent fiscal years.
///
/// Only meaningful while revenue grows; flat or shrinking revenue is missing.
#[derive(Debug, Clone, Copy, Default)]
pub struct IncrementalMargin;

impl Metric for IncrementalMargin {
    fn key(&self) -> &'static str {
        "incremental_margin"
    }

    fn name(&self) -> &'static str {
        "Incremental Margin"
    }

    fn direction(&self) -> Direction {
        Direction::HigherIsBetter
    }

    fn category(&self) -> MetricCategory {
        MetricCategory::Profitability
    }

    fn compute(&self, data: &FundamentalData) -> Option<f64> {
        let results = data.annual_results();
        let [.., (prior_revenue, prior_income), (revenue, income)] = results.as_slice() else {
            return None;
        };
        let revenue_change = revenue - prior_revenue;
        if revenue_change <= 0.0 {
            return None;
        }
        Some((income - prior_income) / revenue_change * 100.0)
    }
}

/// Years between the two margins compared by [`OperatingMarginTrend`].
pub const MARGIN_TREND_YEARS: usize = 3;

/// Change in annual operating margin over [`MARGIN_TREND_YEARS`] years, in
/// percentage points.
#[derive(Debug, Clone, Copy, Default)]
pub struct OperatingMarginTrend;

impl Metric for OperatingMarginTrend {
    fn key(&self) -> &'static str {
        "operating_margin_trend"
    }

    fn name(&self) -> &'static str {
        "Operating Margin Trend"
    }

    fn direction(&self) -> Direction {
        Direction::HigherIsBetter
    }

    fn category(&self) -> MetricCategory {
        MetricCategory::Profitability
    }

    fn compute(&self, data: &FundamentalData) -> Option<f64> {
        let results = data.annual_results();
        let latest = results.len().checked_sub(1)?;
        let earlier = latest.checked_sub(MARGIN_TREND_YEARS)?;
        let margin = |(revenue, income): (f64, f64)| (revenue > 0.0).then(|| income / revenue * 100.0);
        Some(margin(results[latest])? - margin(results[earlier])?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use hobart_scoring::MetricValue;

    fn company() -> FundamentalData {
        FundamentalData {
            revenue: Some(200.0),
            cost_of_revenue: Some(80.0),
            operating_income: Some(50.0),
            free_cash_flow: Some(30.0),
            tax_rate: Some(0.2),
            total_debt: Some(100.0),
            total_equity: Some(150.0),
            cash: Some(50.0),
            ..FundamentalData::empty("TXN")
        }
    }

    #[test]
    fn test_margins() {
        let data = company();
        assert_relative_eq!(OperatingMargin.compute(&data).unwrap(), 25.0, epsilon = 1e-9);
        assert_relative_eq!(FcfMargin.compute(&data).unwrap(), 15.0, epsilon = 1e-9);
        assert_relative_eq!(GrossMargin.compute(&data).unwrap(), 60.0, epsilon = 1e-9);
    }

    #[test]
    fn test_margins_need_positive_revenue() {
        let data = FundamentalData {
            revenue: Some(0.0),
            ..company()
        };
        assert_eq!(OperatingMargin.evaluate(&data), MetricValue::Missing);
        assert_eq!(GrossMargin.evaluate(&data), MetricValue::Missing);
    }

    #[test]
    fn test_roic() {
        // 50 * 0.8 / (100 + 150 - 50)
        assert_relative_eq!(Roic.compute(&company()).unwrap(), 20.0, epsilon = 1e-9);
    }

    #[test]
    fn test_roic_not_applicable_without_invested_capital() {
        let data = FundamentalData {
            cash: Some(400.0),
            ..company()
        };
        assert_eq!(Roic.evaluate(&data), MetricValue::NotApplicable);

        let unknown = FundamentalData {
            cash: None,
            ..company()
        };
        assert_eq!(Roic.evaluate(&unknown), MetricValue::Missing);
    }

    fn history(revenue: &[f64], income: &[f64]) -> FundamentalData {
        FundamentalData {
            revenue_history: revenue.to_vec(),
            operating_income_history: income.to_vec(),
            ..FundamentalData::empty("MSFT")
        }
    }

    #[test]
    fn test_incremental_margin() {
        // revenue +50, operating income +20
        let data = history(&[400.0, 450.0, 500.0], &[80.0, 90.0, 110.0]);
        assert_relative_eq!(IncrementalMargin.compute(&data).unwrap(), 40.0, epsilon = 1e-9);

        let shrinking = history(&[500.0, 450.0], &[110.0, 90.0]);
        assert_eq!(IncrementalMargin.evaluate(&shrinking), MetricValue::Missing);

        let one_year = history(&[500.0], &[110.0]);
        assert_eq!(IncrementalMargin.compute(&one_year), None);
    }

    #[test]
    fn test_operating_margin_trend() {
        // 10% three years ago, 25% now
        let data = history(&[100.0, 120.0, 150.0, 200.0], &[10.0, 15.0, 30.0, 50.0]);
        assert_relative_eq!(OperatingMarginTrend.compute(&data).unwrap(), 15.0, epsilon = 1e-9);

        let compressing = history(&[50.0, 100.0, 100.0, 100.0, 100.0], &[0.0, 30.0, 25.0, 20.0, 12.0]);
        assert_relative_eq!(OperatingMarginTrend.compute(&compressing).unwrap(), -18.0, epsilon = 1e-9);
    }

    #[test]
    fn test_operating_margin_trend_needs_four_years() {
        let short = history(&[100.0, 120.0, 150.0], &[10.0, 15.0, 30.0]);
        assert_eq!(OperatingMarginTrend.compute(&short), None);

        let misaligned = history(&[100.0, 120.0, 150.0, 200.0], &[15.0, 30.0, 50.0]);
        assert_eq!(OperatingMarginTrend.compute(&misaligned), None);

        let no_revenue = history(&[0.0, 120.0, 150.0, 200.0], &[10.0, 15.0, 30.0, 50.0]);
        assert_eq!(OperatingMarginTrend.compute(&no_revenue), None);
    }
}
