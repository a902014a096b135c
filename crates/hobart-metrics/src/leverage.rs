//! Leverage metrics.

use crate::metric::Metric;
use crate::registry::MetricCategory;
use hobart_data::FundamentalData;
use hobart_scoring::Direction;

/// Debt/EBITDA below which interest coverage is not meaningful.
pub const NEGLIGIBLE_LEVERAGE: f64 = 0.5;

/// Net debt over EBITDA.
///
/// Zero or negative EBITDA leaves the ratio undefined; the value is missing
/// and takes the peer median rather than dropping leverage from the score.
#[derive(Debug, Clone, Copy, Default)]
pub struct NetDebtToEbitda;

impl Metric for NetDebtToEbitda {
    fn key(&self) -> &'static str {
        "net_debt_to_ebitda"
    }

    fn name(&self) -> &'static str {
        "Net Debt/EBITDA"
    }

    fn direction(&self) -> Direction {
        Direction::LowerIsBetter
    }

    fn category(&self) -> MetricCategory {
        MetricCategory::Leverage
    }

    fn compute(&self, data: &FundamentalData) -> Option<f64> {
        let ebitda = data.ebitda.filter(|e| *e > 0.0)?;
        Some(data.net_debt()? / ebitda)
    }
}

/// Net debt over free cash flow. Missing when free cash flow is zero or negative.
#[derive(Debug, Clone, Copy, Default)]
pub struct NetDebtToFcf;

impl Metric for NetDebtToFcf {
    fn key(&self) -> &'static str {
        "net_debt_to_fcf"
    }

    fn name(&self) -> &'static str {
        "Net Debt/FCF"
    }

    fn direction(&self) -> Direction {
        Direction::LowerIsBetter
    }

    fn category(&self) -> MetricCategory {
        MetricCategory::Leverage
    }

    fn compute(&self, data: &FundamentalData) -> Option<f64> {
        let fcf = data.free_cash_flow.filter(|f| *f > 0.0)?;
        Some(data.net_debt()? / fcf)
    }
}

/// EBIT over interest expense.
///
/// Not applicable to companies without meaningful debt: total debt reported as
/// zero, or debt below [`NEGLIGIBLE_LEVERAGE`] times positive EBITDA.
#[derive(Debug, Clone, Copy, Default)]
pub struct InterestCoverage;

impl Metric for InterestCoverage {
    fn key(&self) -> &'static str {
        "interest_coverage"
    }

    fn name(&self) -> &'static str {
        "Interest Coverage"
    }

    fn direction(&self) -> Direction {
        Direction::HigherIsBetter
    }

    fn category(&self) -> MetricCategory {
        MetricCategory::Leverage
    }

    fn compute(&self, data: &FundamentalData) -> Option<f64> {
        let interest = data.interest_expense.filter(|i| *i > 0.0)?;
        Some(data.ebit? / interest)
    }

    fn is_not_applicable(&self, data: &FundamentalData) -> bool {
        match (data.total_debt, data.ebitda) {
            (Some(debt), _) if debt == 0.0 => true,
            (Some(debt), Some(ebitda)) if ebitda > 0.0 => debt / ebitda < NEGLIGIBLE_LEVERAGE,
            _ => false,
        }
    }
}
