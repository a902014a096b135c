//! Efficiency and intensity metrics.

use crate::metric::{Metric, percent_of_revenue};
use crate::registry::MetricCategory;
use hobart_data::FundamentalData;
use hobart_scoring::Direction;

/// Capital expenditures over revenue, in percent. Capex sign is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapexIntensity;

impl Metric for CapexIntensity {
    fn key(&self) -> &'static str {
        "capex_intensity"
    }

    fn name(&self) -> &'static str {
        "CapEx Intensity"
    }

    fn direction(&self) -> Direction {
        Direction::LowerIsBetter
    }

    fn category(&self) -> MetricCategory {
        MetricCategory::Efficiency
    }

    fn compute(&self, data: &FundamentalData) -> Option<f64> {
        percent_of_revenue(data.capex.map(f64::abs), data)
    }
}

/// Revenue per unit of capital expenditure. Capex sign is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct RevenuePerCapex;

impl Metric for RevenuePerCapex {
    fn key(&self) -> &'static str {
        "revenue_per_capex"
    }

    fn name(&self) -> &'static str {
        "Revenue/CapEx"
    }

    fn direction(&self) -> Direction {
        Direction::HigherIsBetter
    }

    fn category(&self) -> MetricCategory {
        MetricCategory::Efficiency
    }

    fn compute(&self, data: &FundamentalData) -> Option<f64> {
        let capex = data.capex.map(f64::abs).filter(|c| *c > 0.0)?;
        Some(data.positive_revenue()? / capex)
    }
}

/// Cost of revenue over inventory.
///
/// Not applicable to companies that carry no inventory.
#[derive(Debug, Clone, Copy, Default)]
pub struct InventoryTurnover;

impl Metric for InventoryTurnover {
    fn key(&self) -> &'static str {
        "inventory_turnover"
    }

    fn name(&self) -> &'static str {
        "Inventory Turnover"
    }

    fn direction(&self) -> Direction {
        Direction::HigherIsBetter
    }

    fn category(&self) -> MetricCategory {
        MetricCategory::Efficiency
    }

    fn compute(&self, data: &FundamentalData) -> Option<f64> {
        let inventory = data.inventory.filter(|i| *i > 0.0)?;
        Some(data.cost_of_revenue? / inventory)
    }

    fn is_not_applicable(&self, data: &FundamentalData) -> bool {
        data.inventory == Some(0.0)
    }
}

/// R&D expense over revenue, in percent.
#[derive(Debug, Clone, Copy, Default)]
pub struct RndIntensity;

impl Metric for RndIntensity {
    fn key(&self) -> &'static str {
        "rnd_intensity"
    }

    fn name(&self) -> &'static str {
        "R&D Intensity"
    }

    fn direction(&self) -> Direction {
        Direction::HigherIsBetter
    }

    fn category(&self) -> MetricCategory {
        MetricCategory::Efficiency
    }

    fn compute(&self, data: &FundamentalData) -> Option<f64> {
        percent_of_revenue(data.rnd_expense, data)
    }
}

/// Sales and marketing expense over revenue, in percent.
#[derive(Debug, Clone, Copy, Default)]
pub struct SalesMarketingIntensity;

impl Metric for SalesMarketingIntensity {
    fn key(&self) -> &'static str {
        "sales_marketing_intensity"
    }

    fn name(&self) -> &'static str {
        "Sales & Marketing Intensity"
    }

    fn direction(&self) -> Direction {
        Direction::LowerIsBetter
    }

    fn category(&self) -> MetricCategory {
        MetricCategory::Efficiency
    }

    fn compute(&self, data: &FundamentalData) -> Option<f64> {
        percent_of_revenue(data.sales_marketing_expense, data)
    }
}

/// Revenue per full-time employee, in thousands.
#[derive(Debug, Clone, Copy, Default)]
pub struct RevenuePerEmployee;

impl Metric for RevenuePerEmployee {
    fn key(&self) -> &'static str {
        "revenue_per_employee"
    }

    fn name(&self) -> &'static str {
        "Revenue per Employee ($K)"
    }

    fn direction(&self) -> Direction {
        Direction::HigherIsBetter
    }

    fn category(&self) -> MetricCategory {
        MetricCategory::Efficiency
    }

    fn compute(&self, data: &FundamentalData) -> Option<f64> {
        let employees = data.full_time_employees.filter(|e| *e > 0.0)?;
        Some(data.positive_revenue()? / employees / 1_000.0)
    }
}
