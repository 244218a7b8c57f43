use chrono::NaiveDate;
use forecast_capacity::data::{DemandSeries, Frequency};
use forecast_capacity::split::{rolling_folds, SplitConfig};
use forecast_capacity::ForecastError;

fn daily_series(len: usize) -> DemandSeries {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let timestamps = (0..len)
        .map(|i| start + chrono::Duration::days(i as i64))
        .collect();
    let values = (0..len).map(|i| i as f64).collect();
    DemandSeries::new(timestamps, values, Frequency::Daily).unwrap()
}

#[test]
fn folds_are_spaced_exactly_step_apart() {
    let series = daily_series(30);
    let cfg = SplitConfig::new(5, 3, 10).unwrap();

    let folds = rolling_folds(&series, &cfg).unwrap();
    assert_eq!(folds.len(), 6);

    for (i, fold) in folds.iter().enumerate() {
        assert_eq!(fold.index, i);
        assert_eq!(fold.train, 0..10 + i * 3);
        assert_eq!(fold.test, 10 + i * 3..15 + i * 3);
        assert_eq!(fold.cutoff, series.timestamps()[10 + i * 3]);
    }

    for pair in folds.windows(2) {
        assert_eq!(pair[1].train.end - pair[0].train.end, 3);
        assert!(pair[0].cutoff < pair[1].cutoff);
    }
}

#[test]
fn last_fold_test_range_never_exceeds_series_end() {
    for len in 20..40 {
        let series = daily_series(len);
        let cfg = SplitConfig::new(7, 4, 10).unwrap();
        let folds = rolling_folds(&series, &cfg).unwrap();

        assert!(!folds.is_empty());
        let last = folds.last().unwrap();
        assert!(last.test.end <= len);
        // One more step would not have fit
        assert!(last.train.end + 4 + 7 > len);
    }
}

#[test]
fn train_range_ends_strictly_before_cutoff() {
    let series = daily_series(25);
    let cfg = SplitConfig::new(5, 5, 10).unwrap();

    for fold in rolling_folds(&series, &cfg).unwrap() {
        assert_eq!(fold.train.end, fold.test.start);
        assert_eq!(fold.test.end - fold.test.start, 5);
    }
}

#[test]
fn invalid_parameters_are_config_errors() {
    assert!(matches!(
        SplitConfig::new(0, 1, 1),
        Err(ForecastError::ConfigError(_))
    ));
    assert!(matches!(
        SplitConfig::new(1, 0, 1),
        Err(ForecastError::ConfigError(_))
    ));
    assert!(matches!(
        SplitConfig::new(1, 1, 0),
        Err(ForecastError::ConfigError(_))
    ));
}

#[test]
fn series_too_short_is_a_config_error() {
    let series = daily_series(10);
    let cfg = SplitConfig::new(5, 1, 8).unwrap();

    let result = rolling_folds(&series, &cfg);
    assert!(matches!(result, Err(ForecastError::ConfigError(_))));
}

#[test]
fn shortest_possible_series_yields_one_fold() {
    let series = daily_series(13);
    let cfg = SplitConfig::new(5, 7, 8).unwrap();

    let folds = rolling_folds(&series, &cfg).unwrap();
    assert_eq!(folds.len(), 1);
    assert_eq!(folds[0].train, 0..8);
    assert_eq!(folds[0].test, 8..13);
}
