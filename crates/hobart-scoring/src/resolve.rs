//! Missing-data resolution for one metric column.
//!
//! Each cell of a column is either a number, not applicable or missing.
//! Not-applicable cells are left for the aggregator to drop from the
//! instrument's weighted sum. Missing cells are filled with the peer median so
//! the instrument is treated as typical for that metric.

use crate::value::MetricValue;

/// Outcome of resolving a column.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// No instrument in the peer group has a numeric value for the metric
    NoSignal,
    /// The column is ready to be normalized
    Resolved(ResolvedColumn),
}

/// A metric column after imputation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedColumn {
    values: Vec<Option<f64>>,
    not_applicable: Vec<bool>,
    imputed: Vec<bool>,
    median: f64,
    valid_count: usize,
}

impl ResolvedColumn {
    /// Values to feed the normalizer. Not-applicable cells, and missing cells
    /// when imputation is off, are `None`.
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Whether the cell at `index` was not applicable.
    pub fn is_not_applicable(&self, index: usize) -> bool {
        self.not_applicable.get(index).copied().unwrap_or(false)
    }

    /// Whether the cell at `index` was filled with the peer median.
    pub fn is_imputed(&self, index: usize) -> bool {
        self.imputed.get(index).copied().unwrap_or(false)
    }

    /// Peer median of the valid values.
    pub const fn median(&self) -> f64 {
        self.median
    }

    /// Number of numeric cells before imputation.
    pub const fn valid_count(&self) -> usize {
        self.valid_count
    }

    /// Number of cells filled with the median.
    pub fn imputed_count(&self) -> usize {
        self.imputed.iter().filter(|&&i| i).count()
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the column has no cells.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Peer median using the lower-middle element for even counts.
///
/// Returns the element at index `len / 2` of the sorted values, so `[10, 20, 30, 40]`
/// yields 30 and `[10, 20, 30]` yields 20. `None` for an empty slice.
pub fn peer_median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Some(sorted[sorted.len() / 2])
}

/// Resolve one metric column.
///
/// With `impute` set, missing cells take the peer median of the numeric cells;
/// otherwise they stay `None` and the aggregator treats them as unresolvable.
pub fn resolve(column: &[MetricValue], impute: bool) -> Resolution {
    let valid: Vec<f64> = column.iter().filter_map(MetricValue::number).collect();
    let Some(median) = peer_median(&valid) else {
        return Resolution::NoSignal;
    };

    let mut values = Vec::with_capacity(column.len());
    let mut not_applicable = Vec::with_capacity(column.len());
    let mut imputed = Vec::with_capacity(column.len());

    for cell in column {
        let (value, na, filled) = match cell {
            MetricValue::Number(v) => (Some(*v), false, false),
            MetricValue::NotApplicable => (None, true, false),
            MetricValue::Missing if impute => (Some(median), false, true),
            MetricValue::Missing => (None, false, false),
        };
        values.push(value);
        not_applicable.push(na);
        imputed.push(filled);
    }

    Resolution::Resolved(ResolvedColumn {
        values,
        not_applicable,
        imputed,
        median,
        valid_count: valid.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::MetricValue::{Missing, NotApplicable, Number};

    fn resolved(column: &[MetricValue], impute: bool) -> ResolvedColumn {
        match resolve(column, impute) {
            Resolution::Resolved(c) => c,
            Resolution::NoSignal => panic!("expected a resolved column"),
        }
    }

    #[test]
    fn test_peer_median_lower_middle() {
        assert_eq!(peer_median(&[30.0, 10.0, 20.0]), Some(20.0));
        assert_eq!(peer_median(&[40.0, 10.0, 30.0, 20.0]), Some(30.0));
        assert_eq!(peer_median(&[5.0]), Some(5.0));
        assert_eq!(peer_median(&[]), None);
    }

    #[test]
    fn test_missing_imputed_with_median() {
        let column = [Number(10.0), Missing, Number(30.0), Number(20.0)];
        let c = resolved(&column, true);

        assert_eq!(c.median(), 20.0);
        assert_eq!(
            c.values(),
            [Some(10.0), Some(20.0), Some(30.0), Some(20.0)]
        );
        assert!(c.is_imputed(1));
        assert!(!c.is_imputed(0));
        assert_eq!(c.imputed_count(), 1);
        assert_eq!(c.valid_count(), 3);
    }

    #[test]
    fn test_not_applicable_left_untouched() {
        let column = [NotApplicable, Number(4.0), Missing];
        let c = resolved(&column, true);

        assert_eq!(c.values(), [None, Some(4.0), Some(4.0)]);
        assert!(c.is_not_applicable(0));
        assert!(!c.is_imputed(0));
        assert!(!c.is_not_applicable(2));
    }

    #[test]
    fn test_not_applicable_excluded_from_median() {
        let column = [NotApplicable, Number(1.0), Number(100.0), Missing];
        let c = resolved(&column, true);
        // valid = [1, 100] -> index 1 -> 100
        assert_eq!(c.median(), 100.0);
        assert_eq!(c.values()[3], Some(100.0));
    }

    #[test]
    fn test_imputation_disabled() {
        let column = [Number(1.0), Missing];
        let c = resolved(&column, false);
        assert_eq!(c.values(), [Some(1.0), None]);
        assert_eq!(c.imputed_count(), 0);
    }

    #[test]
    fn test_no_signal() {
        assert_eq!(resolve(&[Missing, NotApplicable, Missing], true), Resolution::NoSignal);
        assert_eq!(resolve(&[], true), Resolution::NoSignal);
    }
}
