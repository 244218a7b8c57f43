//! Forecasting models for demand series

use crate::data::DemandSeries;
use crate::error::{ForecastError, Result};
use serde::Serialize;
use std::fmt::Debug;

/// Quantile forecast at a single service level
#[derive(Debug, Clone, Serialize)]
pub struct QuantileForecast {
    /// Service level the quantile was taken at
    pub level: f64,
    /// Quantile demand per horizon step
    pub values: Vec<f64>,
}

/// Forecast result containing predicted values
#[derive(Debug, Clone, Serialize)]
pub struct ForecastResult {
    /// Point forecast per horizon step
    values: Vec<f64>,
    /// Number of periods forecasted
    horizon: usize,
    /// Quantile estimate per step (optional)
    quantile: Option<QuantileForecast>,
}

impl ForecastResult {
    /// Create a new forecast result
    pub fn new(values: Vec<f64>, horizon: usize) -> Result<Self> {
        if values.len() != horizon {
            return Err(ForecastError::DataError(format!(
                "Values length ({}) doesn't match horizon ({})",
                values.len(),
                horizon
            )));
        }

        Ok(Self {
            values,
            horizon,
            quantile: None,
        })
    }

    /// Attach a quantile estimate to the forecast
    pub fn with_quantile(self, level: f64, values: Vec<f64>) -> Result<Self> {
        if values.len() != self.horizon {
            return Err(ForecastError::DataError(format!(
                "Quantile length ({}) doesn't match horizon ({})",
                values.len(),
                self.horizon
            )));
        }

        Ok(Self {
            quantile: Some(QuantileForecast { level, values }),
            ..self
        })
    }

    /// Get the point forecast values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get the number of periods forecasted
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Get the quantile estimate, if available
    pub fn quantile(&self) -> Option<&QuantileForecast> {
        self.quantile.as_ref()
    }

    /// Serialize the forecast to JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| ForecastError::DataError(format!("Could not serialize forecast: {}", e)))
    }
}

/// Forecast model that can be fit on a demand series
pub trait Forecaster: Debug + Clone {
    /// The type of fitted model produced
    type Fitted: FittedForecaster;

    /// Fit the model on a training series
    fn fit(&self, train: &DemandSeries) -> Result<Self::Fitted>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

/// Fitted forecast model
pub trait FittedForecaster: Debug {
    /// Generate a point forecast for the given horizon
    fn forecast(&self, horizon: usize) -> Result<ForecastResult>;

    /// Generate a point forecast with a quantile estimate at the given
    /// service level
    ///
    /// The default implementation reports the point forecast as the quantile,
    /// for models without a predictive distribution.
    fn forecast_quantile(&self, horizon: usize, level: f64) -> Result<ForecastResult> {
        validate_level(level)?;
        let base = self.forecast(horizon)?;
        let values = base.values().to_vec();
        base.with_quantile(level, values)
    }

    /// Name of the model
    fn name(&self) -> &str;
}

/// Check that a service level is a valid quantile
pub(crate) fn validate_level(level: f64) -> Result<()> {
    if !level.is_finite() || level <= 0.0 || level >= 1.0 {
        return Err(ForecastError::ConfigError(format!(
            "Service level must be strictly between 0 and 1, got {}",
            level
        )));
    }
    Ok(())
}

/// Check that a forecast horizon is positive
pub(crate) fn validate_horizon(horizon: usize) -> Result<()> {
    if horizon == 0 {
        return Err(ForecastError::ConfigError(
            "Horizon must be positive".to_string(),
        ));
    }
    Ok(())
}

/// Closed set of forecast model variants, selected by configuration
#[derive(Debug, Clone)]
pub enum ModelSpec {
    SeasonalNaive(seasonal_naive::SeasonalNaive),
    RidgeLag(ridge::RidgeLagRegression),
}

impl ModelSpec {
    /// Fit a fresh model instance on the given training series
    pub fn fit(&self, train: &DemandSeries) -> Result<Box<dyn FittedForecaster>> {
        match self {
            ModelSpec::SeasonalNaive(model) => {
                model.fit(train).map(|m| Box::new(m) as Box<dyn FittedForecaster>)
            }
            ModelSpec::RidgeLag(model) => {
                model.fit(train).map(|m| Box::new(m) as Box<dyn FittedForecaster>)
            }
        }
    }

    /// Get the name of the underlying model
    pub fn name(&self) -> &str {
        match self {
            ModelSpec::SeasonalNaive(model) => model.name(),
            ModelSpec::RidgeLag(model) => model.name(),
        }
    }
}

pub mod ridge;
pub mod seasonal_naive;
