//! Metric Registry
//!
//! Central registry for all available metrics. Allows lookup and
//! instantiation of calculators by key.

use crate::efficiency::{
    CapexIntensity, InventoryTurnover, RevenuePerCapex, RevenuePerEmployee, RndIntensity,
    SalesMarketingIntensity,
};
use crate::growth::{RevenueCagr, RevenueVolatility, RuleOf40};
use crate::leverage::{InterestCoverage, NetDebtToEbitda, NetDebtToFcf};
use crate::metric::Metric;
use crate::profitability::{
    FcfMargin, GrossMargin, IncrementalMargin, OperatingMargin, OperatingMarginTrend, Roic,
};
use crate::valuation::{EvToFcf, FcfYield};
use hobart_scoring::{Direction, DirectionPolicy};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Available metric categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricCategory {
    /// Valuation metrics (EV/FCF, FCF yield)
    Valuation,
    /// Growth metrics (revenue CAGR, rule of 40, revenue volatility)
    Growth,
    /// Profitability metrics (margins, margin trends, ROIC)
    Profitability,
    /// Leverage metrics (net debt ratios, interest coverage)
    Leverage,
    /// Efficiency metrics (capex, inventory, opex intensity)
    Efficiency,
}

impl MetricCategory {
    /// All categories in display order.
    pub const ALL: [Self; 5] = [
        Self::Valuation,
        Self::Growth,
        Self::Profitability,
        Self::Leverage,
        Self::Efficiency,
    ];
}

impl fmt::Display for MetricCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Valuation => "Valuation",
            Self::Growth => "Growth",
            Self::Profitability => "Profitability",
            Self::Leverage => "Leverage",
            Self::Efficiency => "Efficiency",
        };
        f.write_str(name)
    }
}

/// Metric metadata
#[derive(Debug, Clone, Serialize)]
pub struct MetricInfo {
    /// Metric key (unique identifier)
    pub key: &'static str,
    /// Display name
    pub name: &'static str,
    /// Metric category
    pub category: MetricCategory,
    /// Whether higher or lower values are better
    pub direction: Direction,
    /// Brief description of what the metric measures
    pub description: &'static str,
    /// Fundamentals fields the calculator reads
    pub required_fields: &'static [&'static str],
}

/// Get all available metric info
pub fn available_metrics() -> Vec<MetricInfo> {
    vec![
        // Valuation
        MetricInfo {
            key: "ev_to_fcf",
            name: "EV/FCF",
            category: MetricCategory::Valuation,
            direction: Direction::LowerIsBetter,
            description: "Enterprise value to free cash flow, penalized when FCF is not positive",
            required_fields: &["enterprise_value", "free_cash_flow"],
        },
        MetricInfo {
            key: "fcf_yield",
            name: "FCF Yield",
            category: MetricCategory::Valuation,
            direction: Direction::HigherIsBetter,
            description: "Free cash flow to market capitalization (%)",
            required_fields: &["free_cash_flow", "market_cap"],
        },
        // Growth
        MetricInfo {
            key: "revenue_cagr",
            name: "Revenue CAGR",
            category: MetricCategory::Growth,
            direction: Direction::HigherIsBetter,
            description: "Compound annual revenue growth over the reported history (%)",
            required_fields: &["revenue_history"],
        },
        MetricInfo {
            key: "rule_of_40",
            name: "Rule of 40",
            category: MetricCategory::Growth,
            direction: Direction::HigherIsBetter,
            description: "Revenue growth plus FCF margin (%)",
            required_fields: &["revenue_history", "revenue", "free_cash_flow"],
        },
        MetricInfo {
            key: "revenue_volatility",
            name: "Revenue Volatility",
            category: MetricCategory::Growth,
            direction: Direction::LowerIsBetter,
            description: "Standard deviation of year-over-year revenue growth (percentage points)",
            required_fields: &["revenue_history"],
        },
        // Profitability
        MetricInfo {
            key: "operating_margin",
            name: "Operating Margin",
            category: MetricCategory::Profitability,
            direction: Direction::HigherIsBetter,
            description: "Operating income to revenue (%)",
            required_fields: &["operating_income", "revenue"],
        },
        MetricInfo {
            key: "fcf_margin",
            name: "FCF Margin",
            category: MetricCategory::Profitability,
            direction: Direction::HigherIsBetter,
            description: "Free cash flow to revenue (%)",
            required_fields: &["free_cash_flow", "revenue"],
        },
        MetricInfo {
            key: "gross_margin",
            name: "Gross Margin",
            category: MetricCategory::Profitability,
            direction: Direction::HigherIsBetter,
            description: "Gross profit to revenue (%)",
            required_fields: &["revenue", "cost_of_revenue"],
        },
        MetricInfo {
            key: "roic",
            name: "ROIC",
            category: MetricCategory::Profitability,
            direction: Direction::HigherIsBetter,
            description: "After-tax operating income to invested capital (%)",
            required_fields: &["operating_income", "tax_rate", "total_debt", "total_equity", "cash"],
        },
        MetricInfo {
            key: "incremental_margin",
            name: "Incremental Margin",
            category: MetricCategory::Profitability,
            direction: Direction::HigherIsBetter,
            description: "Change in operating income to change in revenue over the last year (%)",
            required_fields: &["revenue_history", "operating_income_history"],
        },
        MetricInfo {
            key: "operating_margin_trend",
            name: "Operating Margin Trend",
            category: MetricCategory::Profitability,
            direction: Direction::HigherIsBetter,
            description: "Three-year change in operating margin (percentage points)",
            required_fields: &["revenue_history", "operating_income_history"],
        },
        // Leverage
        MetricInfo {
            key: "net_debt_to_ebitda",
            name: "Net Debt/EBITDA",
            category: MetricCategory::Leverage,
            direction: Direction::LowerIsBetter,
            description: "Net debt to EBITDA",
            required_fields: &["total_debt", "cash", "ebitda"],
        },
        MetricInfo {
            key: "net_debt_to_fcf",
            name: "Net Debt/FCF",
            category: MetricCategory::Leverage,
            direction: Direction::LowerIsBetter,
            description: "Net debt to free cash flow",
            required_fields: &["total_debt", "cash", "free_cash_flow"],
        },
        MetricInfo {
            key: "interest_coverage",
            name: "Interest Coverage",
            category: MetricCategory::Leverage,
            direction: Direction::HigherIsBetter,
            description: "EBIT to interest expense",
            required_fields: &["ebit", "interest_expense", "total_debt", "ebitda"],
        },
        // Efficiency
        MetricInfo {
            key: "capex_intensity",
            name: "CapEx Intensity",
            category: MetricCategory::Efficiency,
            direction: Direction::LowerIsBetter,
            description: "Capital expenditures to revenue (%)",
            required_fields: &["capex", "revenue"],
        },
        MetricInfo {
            key: "revenue_per_capex",
            name: "Revenue/CapEx",
            category: MetricCategory::Efficiency,
            direction: Direction::HigherIsBetter,
            description: "Revenue per unit of capital expenditure",
            required_fields: &["revenue", "capex"],
        },
        MetricInfo {
            key: "inventory_turnover",
            name: "Inventory Turnover",
            category: MetricCategory::Efficiency,
            direction: Direction::HigherIsBetter,
            description: "Cost of revenue to inventory",
            required_fields: &["cost_of_revenue", "inventory"],
        },
        MetricInfo {
            key: "rnd_intensity",
            name: "R&D Intensity",
            category: MetricCategory::Efficiency,
            direction: Direction::HigherIsBetter,
            description: "Research and development expense to revenue (%)",
            required_fields: &["rnd_expense", "revenue"],
        },
        MetricInfo {
            key: "sales_marketing_intensity",
            name: "Sales & Marketing Intensity",
            category: MetricCategory::Efficiency,
            direction: Direction::LowerIsBetter,
            description: "Sales and marketing expense to revenue (%)",
            required_fields: &["sales_marketing_expense", "revenue"],
        },
        MetricInfo {
            key: "revenue_per_employee",
            name: "Revenue per Employee ($K)",
            category: MetricCategory::Efficiency,
            direction: Direction::HigherIsBetter,
            description: "Revenue per full-time employee, in thousands",
            required_fields: &["revenue", "full_time_employees"],
        },
    ]
}

/// Get metrics by category
pub fn metrics_by_category(category: MetricCategory) -> Vec<MetricInfo> {
    available_metrics()
        .into_iter()
        .filter(|m| m.category == category)
        .collect()
}

/// Get metric info by key
pub fn get_metric_info(key: &str) -> Option<MetricInfo> {
    available_metrics().into_iter().find(|m| m.key == key)
}

/// Get a map of all metrics indexed by key
pub fn metric_map() -> HashMap<&'static str, MetricInfo> {
    available_metrics().into_iter().map(|m| (m.key, m)).collect()
}

/// List all metric keys
pub fn list_metric_keys() -> Vec<&'static str> {
    available_metrics().into_iter().map(|m| m.key).collect()
}

/// Count metrics by category
pub fn count_by_category() -> HashMap<MetricCategory, usize> {
    let mut counts = HashMap::new();
    for metric in available_metrics() {
        *counts.entry(metric.category).or_insert(0) += 1;
    }
    counts
}

/// Instantiate the calculator for a key
pub fn calculator(key: &str) -> Option<Box<dyn Metric>> {
    let metric: Box<dyn Metric> = match key {
        "ev_to_fcf" => Box::new(EvToFcf),
        "fcf_yield" => Box::new(FcfYield),
        "revenue_cagr" => Box::new(RevenueCagr),
        "rule_of_40" => Box::new(RuleOf40),
        "revenue_volatility" => Box::new(RevenueVolatility),
        "operating_margin" => Box::new(OperatingMargin),
        "fcf_margin" => Box::new(FcfMargin),
        "gross_margin" => Box::new(GrossMargin),
        "roic" => Box::new(Roic),
        "incremental_margin" => Box::new(IncrementalMargin),
        "operating_margin_trend" => Box::new(OperatingMarginTrend),
        "net_debt_to_ebitda" => Box::new(NetDebtToEbitda),
        "net_debt_to_fcf" => Box::new(NetDebtToFcf),
        "interest_coverage" => Box::new(InterestCoverage),
        "capex_intensity" => Box::new(CapexIntensity),
        "revenue_per_capex" => Box::new(RevenuePerCapex),
        "inventory_turnover" => Box::new(InventoryTurnover),
        "rnd_intensity" => Box::new(RndIntensity),
        "sales_marketing_intensity" => Box::new(SalesMarketingIntensity),
        "revenue_per_employee" => Box::new(RevenuePerEmployee),
        _ => return None,
    };
    Some(metric)
}

/// Direction policy covering every registered metric
pub fn direction_policy() -> DirectionPolicy {
    available_metrics()
        .into_iter()
        .map(|m| (m.key, m.direction))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_metrics_count() {
        assert_eq!(available_metrics().len(), 20);
    }

    #[test]
    fn test_metrics_by_category() {
        assert_eq!(metrics_by_category(MetricCategory::Valuation).len(), 2);
        assert_eq!(metrics_by_category(MetricCategory::Growth).len(), 3);
        assert_eq!(metrics_by_category(MetricCategory::Profitability).len(), 6);
        assert_eq!(metrics_by_category(MetricCategory::Leverage).len(), 3);
        assert_eq!(metrics_by_category(MetricCategory::Efficiency).len(), 6);

        let total: usize = count_by_category().values().sum();
        assert_eq!(total, 20);
    }

    #[test]
    fn test_get_metric_info() {
        let info = get_metric_info("ev_to_fcf").unwrap();
        assert_eq!(info.name, "EV/FCF");
        assert_eq!(info.direction, Direction::LowerIsBetter);

        assert!(get_metric_info("pe_ratio").is_none());
    }

    #[test]
    fn test_metric_keys_unique() {
        let keys = list_metric_keys();
        assert_eq!(metric_map().len(), keys.len());
    }

    #[test]
    fn test_calculators_match_metadata() {
        for info in available_metrics() {
            let metric = calculator(info.key).unwrap();
            assert_eq!(metric.key(), info.key);
            assert_eq!(metric.name(), info.name);
            assert_eq!(metric.category(), info.category);
            assert_eq!(metric.direction(), info.direction, "{}", info.key);
        }
        assert!(calculator("unknown").is_none());
    }

    #[test]
    fn test_direction_policy() {
        let policy = direction_policy();
        assert_eq!(policy.len(), 20);
        assert!(!policy.higher_is_better("ev_to_fcf"));
        assert!(!policy.higher_is_better("revenue_volatility"));
        assert!(policy.higher_is_better("fcf_yield"));
        assert!(!policy.higher_is_better("capex_intensity"));
        assert!(policy.higher_is_better("roic"));
    }
}
