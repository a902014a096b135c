//! Integration tests for ranking output and export.

use hobart_output::{
    ExportFormat, Exporter, breakdown_table, breakdown_to_dataframe, ranking_rows, ranking_table,
};
use hobart_scoring::{
    Direction, DirectionPolicy, MetricTable, MetricValue, Scorer, ScoringConfig, ScoringRun,
    WeightVector,
};

fn semis_run() -> ScoringRun {
    let mut table = MetricTable::new();
    let rows = [
        ("NVDA", MetricValue::Number(48.0), MetricValue::Number(0.1)),
        ("INTC", MetricValue::Number(100.0), MetricValue::Number(2.8)),
        ("TXN", MetricValue::Missing, MetricValue::Number(0.9)),
        ("WOLF", MetricValue::NotApplicable, MetricValue::NotApplicable),
    ];
    for (symbol, ev_to_fcf, leverage) in rows {
        table.set(symbol, "ev_to_fcf", ev_to_fcf);
        table.set(symbol, "net_debt_to_ebitda", leverage);
    }

    let policy = DirectionPolicy::new()
        .with("ev_to_fcf", Direction::LowerIsBetter)
        .with("net_debt_to_ebitda", Direction::LowerIsBetter);
    let weights = WeightVector::new([("ev_to_fcf", 0.5), ("net_debt_to_ebitda", 0.5)]).unwrap();
    Scorer::new(weights, policy, ScoringConfig::default())
        .unwrap()
        .run(&table)
}

#[test]
fn test_full_ranking_workflow() {
    let run = semis_run();

    let rows = ranking_rows(&run.card);
    assert_eq!(rows[0].symbol, "NVDA");
    assert_eq!(rows.last().unwrap().symbol, "WOLF");
    assert_eq!(rows.last().unwrap().score, None);

    let text = ranking_table(&run.card);
    assert!(text.contains("NVDA"));
    assert!(text.contains("N/A"));

    let csv = rows.export_to_string(ExportFormat::Csv).unwrap();
    assert_eq!(csv.lines().count(), 5);
    assert!(csv.lines().last().unwrap().starts_with("4,WOLF,"));
}

#[test]
fn test_full_breakdown_workflow() {
    let run = semis_run();

    let text = breakdown_table(&run.breakdown);
    assert!(text.contains("net_debt_to_ebitda"));

    let csv = run.breakdown.export_to_string(ExportFormat::Csv).unwrap();
    let header = csv.lines().next().unwrap();
    assert_eq!(header, "symbol,ev_to_fcf,net_debt_to_ebitda,total_score,imputed");
    let wolf = csv.lines().find(|l| l.starts_with("WOLF")).unwrap();
    assert_eq!(wolf, "WOLF,N/A,N/A,,");
    let txn = csv.lines().find(|l| l.starts_with("TXN")).unwrap();
    assert!(txn.ends_with(",ev_to_fcf"));

    let json = run.breakdown.export_to_string(ExportFormat::Json).unwrap();
    assert!(json.contains("\"N/A\""));

    let df = breakdown_to_dataframe(&run.breakdown).unwrap();
    assert_eq!(df.height(), 4);
}

#[test]
fn test_export_to_file() {
    let run = semis_run();
    let path = std::env::temp_dir().join(format!("hobart-ranking-{}.{}", std::process::id(), ExportFormat::Csv.extension()));

    ranking_rows(&run.card)
        .export_to_file(&path, ExportFormat::Csv)
        .unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert!(content.starts_with("rank,symbol,score"));
}
