use forecast_capacity::config::{load_config, ModelConfig};
use forecast_capacity::ForecastError;
use std::io::Write;
use tempfile::NamedTempFile;

const VALID_CONFIG: &str = "\
data:
  path: data/demand.csv
  date_col: ds
  target_col: y
  freq: daily
backtest:
  horizon: 14
  step: 7
  min_train_size: 180
model:
  name: seasonal_naive
  season_length: 7
planning:
  service_level: 0.9
  units_per_capacity: 20.0
  cost_over: 1.0
  cost_under: 3.0
";

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn a_valid_config_loads_and_builds_its_model() {
    let file = config_file(VALID_CONFIG);
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.backtest.horizon, 14);
    assert!(matches!(
        config.model,
        ModelConfig::SeasonalNaive { season_length: 7 }
    ));

    let model = config.model.build().unwrap();
    assert!(model.name().contains("Seasonal Naive"));
}

#[test]
fn omitted_sweep_levels_get_the_default_set() {
    let file = config_file(VALID_CONFIG);
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.planning.service_levels, vec![0.70, 0.80, 0.90, 0.95]);
}

#[test]
fn ridge_model_section_parses() {
    let contents = VALID_CONFIG.replace(
        "model:\n  name: seasonal_naive\n  season_length: 7",
        "model:\n  name: ridge_lag\n  lag_count: 14\n  alpha: 1.0",
    );
    let file = config_file(&contents);
    let config = load_config(file.path()).unwrap();

    let model = config.model.build().unwrap();
    assert!(model.name().contains("Ridge Lag Regression"));
}

#[test]
fn zero_horizon_fails_before_any_model_runs() {
    let contents = VALID_CONFIG.replace("horizon: 14", "horizon: 0");
    let file = config_file(&contents);

    let result = load_config(file.path());
    assert!(matches!(result, Err(ForecastError::ConfigError(_))));
}

#[test]
fn zero_units_per_capacity_fails_before_any_model_runs() {
    let contents = VALID_CONFIG.replace("units_per_capacity: 20.0", "units_per_capacity: 0.0");
    let file = config_file(&contents);

    let result = load_config(file.path());
    assert!(matches!(result, Err(ForecastError::ConfigError(_))));
}

#[test]
fn out_of_range_service_level_is_rejected() {
    let contents = VALID_CONFIG.replace("service_level: 0.9", "service_level: 1.5");
    let file = config_file(&contents);

    let result = load_config(file.path());
    assert!(matches!(result, Err(ForecastError::ConfigError(_))));
}

#[test]
fn sweep_levels_must_be_strictly_increasing() {
    let contents = format!("{}  service_levels: [0.9, 0.8]\n", VALID_CONFIG);
    let file = config_file(&contents);

    let result = load_config(file.path());
    assert!(matches!(result, Err(ForecastError::ConfigError(_))));
}

#[test]
fn unknown_model_name_is_rejected() {
    let contents = VALID_CONFIG.replace("name: seasonal_naive", "name: arima");
    let file = config_file(&contents);

    let result = load_config(file.path());
    assert!(matches!(result, Err(ForecastError::ConfigError(_))));
}

#[test]
fn unsupported_frequency_is_rejected() {
    let contents = VALID_CONFIG.replace("freq: daily", "freq: hourly");
    let file = config_file(&contents);

    let result = load_config(file.path());
    assert!(matches!(result, Err(ForecastError::ConfigError(_))));
}
