//! Behavioural properties of the scoring engine.

use approx::assert_relative_eq;
use hobart_scoring::{
    CompositeScore, Direction, DirectionPolicy, MetricTable, MetricValue, ModifierVector,
    Normalization, Resolution, Scorer, ScoringConfig, ScoringError, ScoringWarning,
    UndefinedReason, WeightVector, adjust, resolve,
};
use rstest::rstest;

fn column_table(key: &str, cells: &[(&str, MetricValue)]) -> MetricTable {
    let mut table = MetricTable::new();
    for (symbol, value) in cells {
        table.set(*symbol, key, *value);
    }
    table
}

fn score_of(card: &hobart_scoring::ScoreCard, symbol: &str) -> f64 {
    card.get(symbol).and_then(CompositeScore::value).unwrap()
}

#[rstest]
#[case(Normalization::MinMax)]
#[case(Normalization::ZScore)]
fn test_normalized_scores_stay_within_bounds(#[case] normalization: Normalization) {
    let values = [
        Some(-1.0e9),
        Some(-3.5),
        None,
        Some(0.0),
        Some(7.25),
        Some(42.0),
        Some(1.0e12),
    ];
    for direction in [Direction::HigherIsBetter, Direction::LowerIsBetter] {
        for score in normalization.normalize(&values, direction).into_iter().flatten() {
            assert!((0.0..=100.0).contains(&score), "{score} out of range");
        }
    }
}

#[rstest]
#[case(Direction::HigherIsBetter, 0.0, 100.0)]
#[case(Direction::LowerIsBetter, 100.0, 0.0)]
fn test_direction_orients_minmax(#[case] direction: Direction, #[case] low: f64, #[case] high: f64) {
    let scores = Normalization::MinMax.normalize(&[Some(10.0), Some(20.0)], direction);
    assert_eq!(scores, vec![Some(low), Some(high)]);
}

#[rstest]
#[case(Normalization::MinMax)]
#[case(Normalization::ZScore)]
fn test_equal_values_score_neutral(#[case] normalization: Normalization) {
    let scores = normalization.normalize(&[Some(4.0), None, Some(4.0), Some(4.0)], Direction::LowerIsBetter);
    assert_eq!(scores, vec![Some(50.0), None, Some(50.0), Some(50.0)]);
}

#[test]
fn test_not_applicable_weight_is_redistributed() {
    let mut table = MetricTable::new();
    table.set("A", "m1", MetricValue::NotApplicable);
    table.set("A", "m2", MetricValue::Number(8.0));
    table.set("B", "m1", MetricValue::Number(1.0));
    table.set("B", "m2", MetricValue::Number(2.0));
    table.set("C", "m1", MetricValue::Number(3.0));
    table.set("C", "m2", MetricValue::Number(5.0));

    let policy = DirectionPolicy::new()
        .with("m1", Direction::HigherIsBetter)
        .with("m2", Direction::HigherIsBetter);
    let weights = WeightVector::new([("m1", 0.5), ("m2", 0.5)]).unwrap();
    let scorer = Scorer::new(weights, policy, ScoringConfig::default()).unwrap();
    let run = scorer.run(&table);

    let m2 = run.breakdown.score("A", "m2").number().unwrap();
    assert_relative_eq!(m2, 100.0);
    assert_relative_eq!(score_of(&run.card, "A"), m2);
    assert_eq!(run.breakdown.score("A", "m1"), MetricValue::NotApplicable);
}

#[test]
fn test_missing_value_takes_peer_median() {
    let column = [
        MetricValue::Number(10.0),
        MetricValue::Number(30.0),
        MetricValue::Missing,
        MetricValue::Number(20.0),
    ];
    let Resolution::Resolved(resolved) = resolve(&column, true) else {
        panic!("column has values");
    };
    assert_eq!(resolved.values()[2], Some(20.0));

    // even count uses the lower-middle index
    let even = [
        MetricValue::Number(10.0),
        MetricValue::Number(20.0),
        MetricValue::Number(30.0),
        MetricValue::Number(40.0),
        MetricValue::Missing,
    ];
    let Resolution::Resolved(resolved) = resolve(&even, true) else {
        panic!("column has values");
    };
    assert_eq!(resolved.values()[4], Some(30.0));
}

#[test]
fn test_adjuster_renormalizes() {
    let base = WeightVector::new([("a", 0.5), ("b", 0.5)]).unwrap();
    let modifier = ModifierVector::new([("a", 2.0)]).unwrap();
    let adjusted = adjust(&base, &modifier).unwrap();

    assert_relative_eq!(adjusted.get("a"), 2.0 / 3.0, epsilon = 1e-12);
    assert_relative_eq!(adjusted.get("b"), 1.0 / 3.0, epsilon = 1e-12);
    assert_relative_eq!(adjusted.sum(), 1.0, epsilon = 1e-12);
}

#[test]
fn test_adjuster_rejects_zero_total() {
    let base = WeightVector::new([("a", 0.5), ("b", 0.5)]).unwrap();
    let modifier = ModifierVector::new([("a", 0.0), ("b", 0.0)]).unwrap();
    assert_eq!(
        adjust(&base, &modifier),
        Err(ScoringError::InvalidWeights { total: 0.0 })
    );
}

#[test]
fn test_metric_without_signal_is_skipped() {
    let mut table = MetricTable::new();
    for (symbol, value) in [("A", 1.0), ("B", 2.0), ("C", 3.0)] {
        table.set(symbol, "m1", MetricValue::Number(value));
        table.set(symbol, "m2", MetricValue::Missing);
    }

    let policy = DirectionPolicy::new()
        .with("m1", Direction::HigherIsBetter)
        .with("m2", Direction::LowerIsBetter);
    let weights = WeightVector::new([("m1", 0.6), ("m2", 0.4)]).unwrap();

    for impute in [true, false] {
        let scorer = Scorer::new(
            weights.clone(),
            policy.clone(),
            ScoringConfig::default().with_imputation(impute),
        )
        .unwrap();
        let run = scorer.run(&table);

        assert_eq!(run.card.defined_count(), 3);
        assert_relative_eq!(score_of(&run.card, "A"), 0.0);
        assert_relative_eq!(score_of(&run.card, "B"), 50.0, epsilon = 1e-9);
        assert_relative_eq!(score_of(&run.card, "C"), 100.0);
        assert!(run.warnings.contains(&ScoringWarning::NoSignal {
            metric: "m2".to_string()
        }));
        assert_eq!(run.breakdown.metrics(), ["m1"]);
    }
}

#[rstest]
#[case(Normalization::MinMax)]
#[case(Normalization::ZScore)]
fn test_repeated_runs_are_identical(#[case] normalization: Normalization) {
    let mut table = MetricTable::new();
    let rows = [
        ("NVDA", [Some(45.0), Some(61.0), None]),
        ("AMD", [Some(38.5), Some(4.1), Some(1.2)]),
        ("INTC", [None, Some(-8.0), Some(3.3)]),
        ("MU", [Some(12.0), Some(22.4), Some(0.4)]),
    ];
    for (symbol, values) in rows {
        for (key, value) in ["ev_to_fcf", "operating_margin", "net_debt_to_ebitda"]
            .iter()
            .zip(values)
        {
            table.set(symbol, *key, MetricValue::from_option(value));
        }
    }
    table.set("INTC", "net_debt_to_ebitda", MetricValue::NotApplicable);

    let policy = DirectionPolicy::new()
        .with("ev_to_fcf", Direction::LowerIsBetter)
        .with("operating_margin", Direction::HigherIsBetter)
        .with("net_debt_to_ebitda", Direction::LowerIsBetter);
    let weights = WeightVector::new([
        ("ev_to_fcf", 0.4),
        ("operating_margin", 0.35),
        ("net_debt_to_ebitda", 0.25),
    ])
    .unwrap();
    let scorer = Scorer::new(
        weights,
        policy,
        ScoringConfig::default().with_normalization(normalization),
    )
    .unwrap();

    let first = scorer.run(&table);
    let second = scorer.run(&table);
    assert_eq!(first, second);
    for (a, b) in first.card.iter().zip(second.card.iter()) {
        assert_eq!(
            a.score.value().map(f64::to_bits),
            b.score.value().map(f64::to_bits)
        );
    }
}

#[test]
fn test_single_not_applicable_metric_scenario() {
    let table = column_table(
        "ev_to_fcf",
        &[
            ("X", MetricValue::Number(10.0)),
            ("Y", MetricValue::Number(20.0)),
            ("Z", MetricValue::NotApplicable),
        ],
    );
    let policy = DirectionPolicy::new().with("ev_to_fcf", Direction::LowerIsBetter);
    let weights = WeightVector::new([("ev_to_fcf", 1.0)]).unwrap();
    let scorer = Scorer::new(weights, policy, ScoringConfig::default()).unwrap();
    let card = scorer.score(&table);

    assert_relative_eq!(score_of(&card, "X"), 100.0);
    assert_relative_eq!(score_of(&card, "Y"), 0.0);
    assert_eq!(
        card.get("Z"),
        Some(&CompositeScore::Undefined(UndefinedReason::NoApplicableMetrics))
    );

    let ranked = card.ranked();
    let order: Vec<_> = ranked.iter().map(|r| r.symbol.as_str()).collect();
    assert_eq!(order, ["X", "Y", "Z"]);
}

#[test]
fn test_composite_scores_stay_within_bounds_under_zscore() {
    let mut table = MetricTable::new();
    for (i, symbol) in ["A", "B", "C", "D", "E", "F"].iter().enumerate() {
        let x = i as f64;
        table.set(*symbol, "m1", MetricValue::Number(x.powi(4)));
        table.set(*symbol, "m2", MetricValue::Number(-x * 3.0));
    }
    let policy = DirectionPolicy::new()
        .with("m1", Direction::HigherIsBetter)
        .with("m2", Direction::LowerIsBetter);
    let weights = WeightVector::new([("m1", 0.5), ("m2", 0.5)]).unwrap();
    let scorer = Scorer::new(
        weights,
        policy,
        ScoringConfig::default().with_normalization(Normalization::ZScore),
    )
    .unwrap();

    for entry in scorer.score(&table).iter() {
        let score = entry.score.value().unwrap();
        assert!((0.0..=100.0).contains(&score));
    }
}

#[rstest]
#[case(Normalization::MinMax, 0.0, 100.0)]
#[case(Normalization::ZScore, 50.0 - 50.0 / 3.0, 50.0 + 50.0 / 3.0)]
fn test_extreme_values_score_defined(
    #[case] normalization: Normalization,
    #[case] low: f64,
    #[case] high: f64,
) {
    let table = column_table(
        "m",
        &[
            ("A", MetricValue::Number(-1.0e308)),
            ("B", MetricValue::Number(1.0e308)),
        ],
    );
    let policy = DirectionPolicy::new().with("m", Direction::HigherIsBetter);
    let weights = WeightVector::new([("m", 1.0)]).unwrap();
    let scorer = Scorer::new(
        weights,
        policy,
        ScoringConfig::default().with_normalization(normalization),
    )
    .unwrap();
    let card = scorer.score(&table);

    assert_eq!(card.defined_count(), 2);
    assert_relative_eq!(score_of(&card, "A"), low, epsilon = 1e-9);
    assert_relative_eq!(score_of(&card, "B"), high, epsilon = 1e-9);
}
