use chrono::NaiveDate;
use forecast_capacity::data::{DemandSeries, Frequency};
use forecast_capacity::ForecastError;
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::NamedTempFile;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn csv_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn loads_a_daily_csv() {
    let file = csv_file("ds,y\n2024-01-01,10\n2024-01-02,12\n2024-01-03,9\n");

    let series = DemandSeries::from_csv(file.path(), "ds", "y", Frequency::Daily).unwrap();

    assert_eq!(series.len(), 3);
    assert_eq!(series.values(), &[10.0, 12.0, 9.0]);
    assert_eq!(series.timestamps()[0], date("2024-01-01"));
}

#[test]
fn unsorted_rows_are_sorted_by_date() {
    let file = csv_file("ds,y\n2024-01-03,9\n2024-01-01,10\n2024-01-02,12\n");

    let series = DemandSeries::from_csv(file.path(), "ds", "y", Frequency::Daily).unwrap();

    assert_eq!(series.values(), &[10.0, 12.0, 9.0]);
}

#[test]
fn gaps_are_forward_filled_on_the_daily_grid() {
    let file = csv_file("ds,y\n2024-01-01,10\n2024-01-02,12\n2024-01-05,9\n");

    let series = DemandSeries::from_csv(file.path(), "ds", "y", Frequency::Daily).unwrap();

    assert_eq!(series.len(), 5);
    assert_eq!(series.values(), &[10.0, 12.0, 12.0, 12.0, 9.0]);
    assert_eq!(series.timestamps()[3], date("2024-01-04"));
}

#[test]
fn duplicate_dates_are_rejected() {
    let file = csv_file("ds,y\n2024-01-01,10\n2024-01-01,12\n");

    let result = DemandSeries::from_csv(file.path(), "ds", "y", Frequency::Daily);
    assert!(matches!(result, Err(ForecastError::DataError(_))));
}

#[test]
fn missing_columns_are_rejected() {
    let file = csv_file("ds,y\n2024-01-01,10\n");

    let result = DemandSeries::from_csv(file.path(), "date", "y", Frequency::Daily);
    assert!(matches!(result, Err(ForecastError::DataError(_))));

    let result = DemandSeries::from_csv(file.path(), "ds", "demand", Frequency::Daily);
    assert!(matches!(result, Err(ForecastError::DataError(_))));
}

#[test]
fn unparseable_dates_and_values_are_rejected() {
    let file = csv_file("ds,y\nJan 1 2024,10\n");
    let result = DemandSeries::from_csv(file.path(), "ds", "y", Frequency::Daily);
    assert!(matches!(result, Err(ForecastError::DataError(_))));

    let file = csv_file("ds,y\n2024-01-01,lots\n");
    let result = DemandSeries::from_csv(file.path(), "ds", "y", Frequency::Daily);
    assert!(matches!(result, Err(ForecastError::DataError(_))));
}

#[test]
fn weekly_series_must_stay_on_the_grid() {
    let file = csv_file("ds,y\n2024-01-01,10\n2024-01-08,12\n2024-01-16,9\n");

    let result = DemandSeries::from_csv(file.path(), "ds", "y", Frequency::Weekly);
    assert!(matches!(result, Err(ForecastError::DataError(_))));
}

#[test]
fn negative_demand_is_rejected() {
    let timestamps = vec![date("2024-01-01"), date("2024-01-02")];
    let result = DemandSeries::new(timestamps, vec![10.0, -1.0], Frequency::Daily);

    assert!(matches!(result, Err(ForecastError::DataError(_))));
}

#[test]
fn gapped_timestamps_are_rejected_by_the_constructor() {
    let timestamps = vec![date("2024-01-01"), date("2024-01-03")];
    let result = DemandSeries::new(timestamps, vec![10.0, 11.0], Frequency::Daily);

    assert!(matches!(result, Err(ForecastError::DataError(_))));
}

#[test]
fn slice_and_future_timestamps() {
    let timestamps = (0..10)
        .map(|i| date("2024-01-01") + chrono::Duration::days(i))
        .collect();
    let values = (0..10).map(|i| i as f64).collect();
    let series = DemandSeries::new(timestamps, values, Frequency::Daily).unwrap();

    let window = series.slice(2..6).unwrap();
    assert_eq!(window.len(), 4);
    assert_eq!(window.values(), &[2.0, 3.0, 4.0, 5.0]);
    assert_eq!(window.timestamps()[0], date("2024-01-03"));

    let future = series.future_timestamps(3);
    assert_eq!(
        future,
        vec![date("2024-01-11"), date("2024-01-12"), date("2024-01-13")]
    );

    assert!(matches!(
        series.slice(4..20),
        Err(ForecastError::DataError(_))
    ));
}

#[test]
fn frequency_aliases_parse() {
    assert_eq!(Frequency::parse("daily").unwrap(), Frequency::Daily);
    assert_eq!(Frequency::parse("d").unwrap(), Frequency::Daily);
    assert_eq!(Frequency::parse("1w").unwrap(), Frequency::Weekly);
    assert!(matches!(
        Frequency::parse("hourly"),
        Err(ForecastError::ConfigError(_))
    ));
}
