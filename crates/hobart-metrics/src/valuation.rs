//! Valuation metrics.

use crate::metric::Metric;
use crate::registry::MetricCategory;
use hobart_data::FundamentalData;
use hobart_scoring::Direction;

/// EV/FCF assigned to companies with zero or negative free cash flow.
pub const CASH_BURN_PENALTY: f64 = 100.0;

/// Enterprise value over free cash flow.
///
/// Cash-burning companies get [`CASH_BURN_PENALTY`] so they are still scored,
/// near the expensive end of the peer group.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvToFcf;

impl Metric for EvToFcf {
    fn key(&self) -> &'static str {
        "ev_to_fcf"
    }

    fn name(&self) -> &'static str {
        "EV/FCF"
    }

    fn direction(&self) -> Direction {
        Direction::LowerIsBetter
    }

    fn category(&self) -> MetricCategory {
        MetricCategory::Valuation
    }

    fn compute(&self, data: &FundamentalData) -> Option<f64> {
        let ev = data.enterprise_value.filter(|ev| *ev != 0.0)?;
        let fcf = data.free_cash_flow?;
        if fcf > 0.0 { Some(ev / fcf) } else { Some(CASH_BURN_PENALTY) }
    }
}

/// Free cash flow over market capitalization, in percent.
///
/// Negative yields are kept so cash-burning companies rank below the peer
/// group instead of being imputed.
#[derive(Debug, Clone, Copy, Default)]
pub struct FcfYield;

impl Metric for FcfYield {
    fn key(&self) -> &'static str {
        "fcf_yield"
    }

    fn name(&self) -> &'static str {
        "FCF Yield"
    }

    fn direction(&self) -> Direction {
        Direction::HigherIsBetter
    }

    fn category(&self) -> MetricCategory {
        MetricCategory::Valuation
    }

    fn compute(&self, data: &FundamentalData) -> Option<f64> {
        let market_cap = data.market_cap.filter(|m| *m > 0.0)?;
        Some(data.free_cash_flow? / market_cap * 100.0)
    }
}
