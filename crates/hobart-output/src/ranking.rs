//! Plain-text ranking and breakdown tables.

use hobart_scoring::{Breakdown, MetricValue, ScoreCard};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker appended to imputed cells in [`BreakdownTable`].
pub const IMPUTED_MARKER: char = '*';

/// One line of a ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingRow {
    /// 1-based rank, undefined scores last
    pub rank: usize,
    /// Instrument symbol
    pub symbol: String,
    /// Composite score, `None` when undefined
    pub score: Option<f64>,
}

/// Ranking rows sorted by descending score.
pub fn ranking_rows(card: &ScoreCard) -> Vec<RankingRow> {
    card.ranked()
        .into_iter()
        .map(|r| RankingRow {
            rank: r.rank,
            symbol: r.symbol,
            score: r.score.value(),
        })
        .collect()
}

/// Text rendering of a score card's ranking.
#[derive(Debug, Clone, Copy)]
pub struct RankingTable<'a>(pub &'a ScoreCard);

impl fmt::Display for RankingTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>4}  {:<10} {:>8}", "Rank", "Symbol", "Score")?;
        writeln!(f, "{}", "-".repeat(24))?;
        for entry in self.0.ranked() {
            writeln!(
                f,
                "{:>4}  {:<10} {:>8}",
                entry.rank,
                entry.symbol,
                entry.score.to_string()
            )?;
        }
        Ok(())
    }
}

/// Render the ranking as a text table.
pub fn ranking_table(card: &ScoreCard) -> String {
    RankingTable(card).to_string()
}

fn cell_text(value: MetricValue, imputed: bool) -> String {
    match value {
        MetricValue::Number(v) if imputed => format!("{v:.1}{IMPUTED_MARKER}"),
        MetricValue::Number(v) => format!("{v:.1}"),
        MetricValue::NotApplicable => "N/A".to_string(),
        MetricValue::Missing => "-".to_string(),
    }
}

/// Text rendering of per-metric normalized scores, one row per instrument.
///
/// Not-applicable cells show `N/A`, unresolved cells `-`, and imputed cells
/// carry [`IMPUTED_MARKER`].
#[derive(Debug, Clone, Copy)]
pub struct BreakdownTable<'a>(pub &'a Breakdown);

impl fmt::Display for BreakdownTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let breakdown = self.0;
        let symbol_width = breakdown
            .rows()
            .iter()
            .map(|r| r.symbol.len())
            .max()
            .unwrap_or(0)
            .max("Symbol".len());
        let widths: Vec<usize> = breakdown.metrics().iter().map(|m| m.len().max(6)).collect();
        let total_width = symbol_width + widths.iter().map(|w| w + 1).sum::<usize>() + 8;

        write!(f, "{:<symbol_width$}", "Symbol")?;
        for (metric, width) in breakdown.metrics().iter().zip(&widths) {
            write!(f, " {metric:>width$}")?;
        }
        writeln!(f, " {:>7}", "Total")?;
        writeln!(f, "{}", "-".repeat(total_width))?;

        for row in breakdown.rows() {
            write!(f, "{:<symbol_width$}", row.symbol)?;
            for (metric, width) in breakdown.metrics().iter().zip(&widths) {
                let value = row.scores.get(metric).copied().unwrap_or_default();
                let text = cell_text(value, row.imputed.contains(metric));
                write!(f, " {text:>width$}")?;
            }
            writeln!(f, " {:>7}", row.total.to_string())?;
        }

        if breakdown.rows().iter().any(|r| !r.imputed.is_empty()) {
            writeln!(f, "{IMPUTED_MARKER} imputed from peer median")?;
        }
        Ok(())
    }
}

/// Render per-metric normalized scores as a text table. See [`BreakdownTable`].
pub fn breakdown_table(breakdown: &Breakdown) -> String {
    BreakdownTable(breakdown).to_string()
}
