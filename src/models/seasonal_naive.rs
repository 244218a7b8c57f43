//! Seasonal naive baseline model

use crate::data::DemandSeries;
use crate::error::{ForecastError, Result};
use crate::models::{
    validate_horizon, validate_level, FittedForecaster, ForecastResult, Forecaster,
};
use statrs::statistics::{Data, OrderStatistics};

/// Seasonal naive model
///
/// Forecasts by repeating the last observed season: step `k` (1-indexed)
/// forecasts the training value at `len - season_length + ((k-1) mod
/// season_length)`.
#[derive(Debug, Clone)]
pub struct SeasonalNaive {
    /// Name of the model
    name: String,
    /// Length of one season in observations
    season_length: usize,
}

/// Fitted seasonal naive model
#[derive(Debug, Clone)]
pub struct FittedSeasonalNaive {
    /// Name of the model
    name: String,
    /// Length of one season in observations
    season_length: usize,
    /// Last observed season, in chronological order
    last_season: Vec<f64>,
    /// In-sample seasonal errors `y[t] - y[t - season_length]`
    residuals: Vec<f64>,
}

impl SeasonalNaive {
    /// Create a new seasonal naive model
    pub fn new(season_length: usize) -> Result<Self> {
        if season_length == 0 {
            return Err(ForecastError::ConfigError(
                "Season length must be positive".to_string(),
            ));
        }

        Ok(Self {
            name: format!("Seasonal Naive (season_length={})", season_length),
            season_length,
        })
    }
}

impl Forecaster for SeasonalNaive {
    type Fitted = FittedSeasonalNaive;

    fn fit(&self, train: &DemandSeries) -> Result<FittedSeasonalNaive> {
        let values = train.values();
        if values.len() < self.season_length {
            return Err(ForecastError::InsufficientDataError(format!(
                "Seasonal naive needs at least {} observations, got {}",
                self.season_length,
                values.len()
            )));
        }

        let last_season = values[values.len() - self.season_length..].to_vec();

        let residuals: Vec<f64> = (self.season_length..values.len())
            .map(|t| values[t] - values[t - self.season_length])
            .collect();

        Ok(FittedSeasonalNaive {
            name: self.name.clone(),
            season_length: self.season_length,
            last_season,
            residuals,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl FittedForecaster for FittedSeasonalNaive {
    fn forecast(&self, horizon: usize) -> Result<ForecastResult> {
        validate_horizon(horizon)?;

        let values: Vec<f64> = (0..horizon)
            .map(|k| self.last_season[k % self.season_length])
            .collect();

        ForecastResult::new(values, horizon)
    }

    fn forecast_quantile(&self, horizon: usize, level: f64) -> Result<ForecastResult> {
        validate_level(level)?;
        let base = self.forecast(horizon)?;

        // Empty residual history: the quantile collapses to the point forecast
        if self.residuals.is_empty() {
            let values = base.values().to_vec();
            return base.with_quantile(level, values);
        }

        let mut residuals = Data::new(self.residuals.clone());
        let shift = residuals.quantile(level);

        let values: Vec<f64> = base.values().iter().map(|v| v + shift).collect();
        base.with_quantile(level, values)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
