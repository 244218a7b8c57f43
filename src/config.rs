//! Run configuration loading and validation

use crate::data::Frequency;
use crate::error::{ForecastError, Result};
use crate::models::ridge::RidgeLagRegression;
use crate::models::seasonal_naive::SeasonalNaive;
use crate::models::ModelSpec;
use crate::planning::CostWeights;
use crate::split::SplitConfig;
use serde::Deserialize;
use std::fs::File;
use std::path::Path;

fn default_service_levels() -> Vec<f64> {
    vec![0.70, 0.80, 0.90, 0.95]
}

/// Where and how to read the demand series
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Path to the CSV file
    pub path: String,
    /// Name of the date column
    pub date_col: String,
    /// Name of the demand column
    pub target_col: String,
    /// Observation frequency, e.g. "daily"
    pub freq: String,
}

/// Backtest section of the config
#[derive(Debug, Clone, Deserialize)]
pub struct BacktestConfig {
    /// Forecast horizon per fold
    pub horizon: usize,
    /// Observations between consecutive cutoffs
    pub step: usize,
    /// Minimum training window for the first fold
    pub min_train_size: usize,
}

/// Model selection section of the config
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum ModelConfig {
    SeasonalNaive { season_length: usize },
    RidgeLag { lag_count: usize, alpha: f64 },
}

/// Planning section of the config
#[derive(Debug, Clone, Deserialize)]
pub struct PlanningConfig {
    /// Primary service level target
    pub service_level: f64,
    /// Demand units handled per capacity unit
    pub units_per_capacity: f64,
    /// Cost per idle capacity unit
    pub cost_over: f64,
    /// Cost per missing capacity unit
    pub cost_under: f64,
    /// Ordered service levels for the sensitivity sweep
    #[serde(default = "default_service_levels")]
    pub service_levels: Vec<f64>,
}

/// Full run configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub data: DataConfig,
    pub backtest: BacktestConfig,
    pub model: ModelConfig,
    pub planning: PlanningConfig,
}

/// Load and validate a YAML run configuration
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let file = File::open(path.as_ref())?;
    let config: AppConfig = serde_yaml::from_reader(file)?;
    config.validate()?;
    Ok(config)
}

impl AppConfig {
    /// Check every parameter range before any model runs
    pub fn validate(&self) -> Result<()> {
        Frequency::parse(&self.data.freq)?;
        self.split_config()?;
        self.model.build()?;

        let p = &self.planning;
        check_level(p.service_level)?;
        if !p.units_per_capacity.is_finite() || p.units_per_capacity <= 0.0 {
            return Err(ForecastError::ConfigError(format!(
                "Units per capacity must be positive, got {}",
                p.units_per_capacity
            )));
        }
        CostWeights::new(p.cost_over, p.cost_under)?;

        if p.service_levels.is_empty() {
            return Err(ForecastError::ConfigError(
                "Service level sweep must not be empty".to_string(),
            ));
        }
        for &level in &p.service_levels {
            check_level(level)?;
        }
        for pair in p.service_levels.windows(2) {
            if pair[0] >= pair[1] {
                return Err(ForecastError::ConfigError(
                    "Service level sweep must be strictly increasing".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Observation frequency of the configured series
    pub fn frequency(&self) -> Result<Frequency> {
        Frequency::parse(&self.data.freq)
    }

    /// Split parameters of the configured backtest
    pub fn split_config(&self) -> Result<SplitConfig> {
        SplitConfig::new(
            self.backtest.horizon,
            self.backtest.step,
            self.backtest.min_train_size,
        )
    }

    /// Cost weights of the configured planning section
    pub fn cost_weights(&self) -> Result<CostWeights> {
        CostWeights::new(self.planning.cost_over, self.planning.cost_under)
    }
}

impl ModelConfig {
    /// Build the configured model variant
    pub fn build(&self) -> Result<ModelSpec> {
        match *self {
            ModelConfig::SeasonalNaive { season_length } => {
                Ok(ModelSpec::SeasonalNaive(SeasonalNaive::new(season_length)?))
            }
            ModelConfig::RidgeLag { lag_count, alpha } => {
                Ok(ModelSpec::RidgeLag(RidgeLagRegression::new(lag_count, alpha)?))
            }
        }
    }
}

fn check_level(level: f64) -> Result<()> {
    if !level.is_finite() || level <= 0.0 || level >= 1.0 {
        return Err(ForecastError::ConfigError(format!(
            "Service level must be strictly between 0 and 1, got {}",
            level
        )));
    }
    Ok(())
}
