use chrono::NaiveDate;
use forecast_capacity::backtest::rolling_origin_backtest;
use forecast_capacity::models::seasonal_naive::SeasonalNaive;
use forecast_capacity::models::ModelSpec;
use forecast_capacity::planning::{sensitivity_sweep, CostWeights};
use forecast_capacity::report::ResultsReport;
use forecast_capacity::split::SplitConfig;
use forecast_capacity::synthetic::weekly_demand;

#[test]
fn full_pipeline_from_series_to_report() {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let series = weekly_demand(start, 240, 200.0, 8.0, 42).unwrap();
    assert_eq!(series.len(), 240);

    // Backtest the baseline
    let model = ModelSpec::SeasonalNaive(SeasonalNaive::new(7).unwrap());
    let split = SplitConfig::new(14, 7, 180).unwrap();
    let summary = rolling_origin_backtest(&series, &split, &model, Some(0.9)).unwrap();

    assert!(!summary.fold_metrics.is_empty());
    assert!(summary.avg_mae >= 0.0);
    assert!(summary.avg_smape >= 0.0);
    // Weekly-profile demand with modest noise backtests far below the
    // worst-case 200% sMAPE
    assert!(summary.avg_smape < 50.0);

    // Translate the latest forecast into capacity across service levels
    let fitted = model.fit(&series).unwrap();
    let weights = CostWeights::new(1.0, 3.0).unwrap();
    let levels = [0.70, 0.80, 0.90, 0.95];
    let sweep = sensitivity_sweep(fitted.as_ref(), 14, 20.0, &levels, &weights).unwrap();

    assert_eq!(sweep.len(), levels.len());
    for pair in sweep.windows(2) {
        assert!(
            pair[1].recommendation.recommended_capacity
                >= pair[0].recommendation.recommended_capacity
        );
    }

    // Append both records and verify the report is append-only
    let dir = tempfile::tempdir().unwrap();
    let report_path = dir.path().join("results.md");
    let report = ResultsReport::new(&report_path).unwrap();

    report.append_backtest(&summary).unwrap();
    let after_backtest = std::fs::read_to_string(&report_path).unwrap();
    assert!(after_backtest.starts_with("# Results"));
    assert!(after_backtest.contains("Rolling-Origin Backtest"));
    assert!(after_backtest.contains("Seasonal Naive"));

    report
        .append_capacity(model.name(), 14, 0.9, &sweep)
        .unwrap();
    let after_capacity = std::fs::read_to_string(&report_path).unwrap();
    assert!(after_capacity.starts_with(&after_backtest));
    assert!(after_capacity.contains("Capacity Recommendation"));
    assert!(after_capacity.contains("p90"));
}

#[test]
fn synthetic_generation_is_seeded_and_non_negative() {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

    let a = weekly_demand(start, 60, 100.0, 15.0, 7).unwrap();
    let b = weekly_demand(start, 60, 100.0, 15.0, 7).unwrap();
    assert_eq!(a.values(), b.values());

    for &value in a.values() {
        assert!(value >= 0.0);
    }

    let c = weekly_demand(start, 60, 100.0, 15.0, 8).unwrap();
    assert_ne!(a.values(), c.values());
}
