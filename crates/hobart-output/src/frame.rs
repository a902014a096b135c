//! Polars views of scoring results.

use crate::export::ExportError;
use hobart_scoring::{Breakdown, ScoreCard};
use polars::prelude::*;

/// Breakdown as a DataFrame: `symbol`, one column per metric, then `total_score`.
///
/// Not-applicable and unresolved cells are null.
pub fn breakdown_to_dataframe(breakdown: &Breakdown) -> Result<DataFrame, ExportError> {
    let rows = breakdown.rows();
    let symbols: Vec<String> = rows.iter().map(|r| r.symbol.clone()).collect();

    let mut columns: Vec<Column> = Vec::with_capacity(breakdown.metrics().len() + 2);
    columns.push(Series::new("symbol".into(), symbols).into());
    for metric in breakdown.metrics() {
        let values: Vec<Option<f64>> = rows
            .iter()
            .map(|r| r.scores.get(metric).and_then(|v| v.number()))
            .collect();
        columns.push(Series::new(metric.as_str().into(), values).into());
    }
    let totals: Vec<Option<f64>> = rows.iter().map(|r| r.total.value()).collect();
    columns.push(Series::new("total_score".into(), totals).into());

    Ok(DataFrame::new(columns)?)
}

/// Ranking as a DataFrame with `rank`, `symbol` and `score` columns.
pub fn ranking_to_dataframe(card: &ScoreCard) -> Result<DataFrame, ExportError> {
    let ranked = card.ranked();
    let ranks: Vec<u32> = ranked.iter().map(|r| r.rank as u32).collect();
    let symbols: Vec<String> = ranked.iter().map(|r| r.symbol.clone()).collect();
    let scores: Vec<Option<f64>> = ranked.iter().map(|r| r.score.value()).collect();

    Ok(DataFrame::new(vec![
        Series::new("rank".into(), ranks).into(),
        Series::new("symbol".into(), symbols).into(),
        Series::new("score".into(), scores).into(),
    ])?)
}
