//! Metric table construction from fundamentals.

use crate::metric::Metric;
use hobart_data::FundamentalData;
use hobart_scoring::{MetricTable, MetricValue, Result};
use tracing::debug;

/// Evaluate every calculator for every company.
///
/// Rows keep the order of `rows`, which becomes the peer-group order.
///
/// # Errors
/// [`ScoringError::DuplicateInstrument`](hobart_scoring::ScoringError::DuplicateInstrument)
/// when a symbol appears twice.
pub fn build_table(rows: &[FundamentalData], metrics: &[Box<dyn Metric>]) -> Result<MetricTable> {
    let mut table = MetricTable::new();
    for data in rows {
        let values: Vec<(&str, MetricValue)> =
            metrics.iter().map(|m| (m.key(), m.evaluate(data))).collect();
        let not_applicable = values.iter().filter(|(_, v)| v.is_not_applicable()).count();
        let missing = values.iter().filter(|(_, v)| v.is_missing()).count();
        debug!(symbol = %data.symbol, not_applicable, missing, "computed metrics");
        table.insert_row(data.symbol.clone(), values)?;
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::semiconductor_metrics;
    use hobart_scoring::ScoringError;

    fn fabless() -> FundamentalData {
        FundamentalData {
            enterprise_value: Some(3_000.0),
            free_cash_flow: Some(60.0),
            revenue: Some(120.0),
            inventory: Some(0.0),
            ..FundamentalData::empty("NVDA")
        }
    }

    #[test]
    fn test_build_table() {
        let rows = vec![fabless(), FundamentalData::empty("INTC")];
        let table = build_table(&rows, &semiconductor_metrics()).unwrap();

        assert_eq!(table.instruments(), ["NVDA", "INTC"]);
        assert_eq!(table.get("NVDA", "ev_to_fcf"), MetricValue::Number(50.0));
        assert_eq!(table.get("NVDA", "fcf_margin"), MetricValue::Number(50.0));
        assert_eq!(table.get("NVDA", "inventory_turnover"), MetricValue::NotApplicable);
        assert_eq!(table.get("INTC", "ev_to_fcf"), MetricValue::Missing);
        assert_eq!(table.row("INTC").unwrap().len(), 10);
    }

    #[test]
    fn test_duplicate_symbol() {
        let rows = vec![fabless(), fabless()];
        let err = build_table(&rows, &semiconductor_metrics()).unwrap_err();
        assert_eq!(err, ScoringError::DuplicateInstrument("NVDA".to_string()));
    }
}
