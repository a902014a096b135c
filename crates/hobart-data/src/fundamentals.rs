//! Raw company fundamentals.

use serde::{Deserialize, Serialize};

/// Company fundamental data for one symbol.
///
/// Every field is optional: providers fill what they have and metric
/// calculators decide what a gap means. Monetary amounts share one currency
/// unit per snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FundamentalData {
    /// Stock symbol
    pub symbol: String,
    /// Market capitalization
    pub market_cap: Option<f64>,
    /// Enterprise value
    pub enterprise_value: Option<f64>,
    /// Revenue (TTM)
    pub revenue: Option<f64>,
    /// Cost of revenue (TTM)
    pub cost_of_revenue: Option<f64>,
    /// Operating income (TTM)
    pub operating_income: Option<f64>,
    /// Earnings before interest and taxes (TTM)
    pub ebit: Option<f64>,
    /// EBITDA (TTM)
    pub ebitda: Option<f64>,
    /// Free cash flow (TTM)
    pub free_cash_flow: Option<f64>,
    /// Total debt
    pub total_debt: Option<f64>,
    /// Cash and equivalents
    pub cash: Option<f64>,
    /// Total shareholder equity
    pub total_equity: Option<f64>,
    /// Interest expense (TTM, positive)
    pub interest_expense: Option<f64>,
    /// Effective tax rate as a fraction
    pub tax_rate: Option<f64>,
    /// Capital expenditures (TTM, sign as reported)
    pub capex: Option<f64>,
    /// Inventory
    pub inventory: Option<f64>,
    /// Research and development expense (TTM)
    pub rnd_expense: Option<f64>,
    /// Sales and marketing expense (TTM)
    pub sales_marketing_expense: Option<f64>,
    /// Full-time employees
    pub full_time_employees: Option<f64>,
    /// Annual revenue, oldest first
    pub revenue_history: Vec<f64>,
    /// Annual operating income, oldest first, for the same fiscal years as
    /// `revenue_history`
    pub operating_income_history: Vec<f64>,
}

impl FundamentalData {
    /// Record with no data, used for symbols whose fetch failed.
    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Default::default()
        }
    }

    /// Whether no field carries data.
    pub fn is_empty(&self) -> bool {
        self == &Self::empty(self.symbol.clone())
    }

    /// Total debt minus cash. `None` if either is unknown.
    pub fn net_debt(&self) -> Option<f64> {
        Some(self.total_debt? - self.cash?)
    }

    /// Total debt plus equity minus cash. `None` if any part is unknown.
    pub fn invested_capital(&self) -> Option<f64> {
        Some(self.total_debt? + self.total_equity? - self.cash?)
    }

    /// Revenue when strictly positive.
    pub fn positive_revenue(&self) -> Option<f64> {
        self.revenue.filter(|r| *r > 0.0)
    }

    /// Annual (revenue, operating income) pairs, oldest first.
    ///
    /// Histories of different lengths are aligned on the most recent year.
    pub fn annual_results(&self) -> Vec<(f64, f64)> {
        let revenue = &self.revenue_history;
        let income = &self.operating_income_history;
        let n = revenue.len().min(income.len());
        revenue[revenue.len() - n..]
            .iter()
            .copied()
            .zip(income[income.len() - n..].iter().copied())
            .collect()
    }
}
