//! # Forecast Capacity
//!
//! A Rust library for demand time series forecasting and capacity planning.
//!
//! ## Features
//!
//! - Demand series handling (CSV loading, frequency grid, forward-fill)
//! - Forecasting models (Seasonal Naive, Ridge Lag Regression)
//! - Rolling-origin backtesting with MAE and sMAPE metrics
//! - Forecast-to-capacity translation under a service-level target
//! - Asymmetric over/under-capacity cost evaluation
//! - Service-level sensitivity sweeps
//!
//! ## Quick Start
//!
//! ```no_run
//! use forecast_capacity::backtest::rolling_origin_backtest;
//! use forecast_capacity::data::{DemandSeries, Frequency};
//! use forecast_capacity::models::seasonal_naive::SeasonalNaive;
//! use forecast_capacity::models::ModelSpec;
//! use forecast_capacity::planning::{sensitivity_sweep, CostWeights};
//! use forecast_capacity::split::SplitConfig;
//!
//! # fn main() -> forecast_capacity::Result<()> {
//! // Load data
//! let series = DemandSeries::from_csv("demand.csv", "ds", "y", Frequency::Daily)?;
//!
//! // Backtest a baseline model
//! let model = ModelSpec::SeasonalNaive(SeasonalNaive::new(7)?);
//! let split = SplitConfig::new(14, 7, 180)?;
//! let summary = rolling_origin_backtest(&series, &split, &model, Some(0.9))?;
//! println!("avg MAE {:.3}, avg sMAPE {:.3}%", summary.avg_mae, summary.avg_smape);
//!
//! // Translate the latest forecast into capacity across service levels
//! let fitted = model.fit(&series)?;
//! let weights = CostWeights::new(1.0, 3.0)?;
//! let sweep = sensitivity_sweep(fitted.as_ref(), 14, 20.0, &[0.7, 0.8, 0.9, 0.95], &weights)?;
//! for record in &sweep {
//!     println!(
//!         "p{:.0}: capacity {}",
//!         record.recommendation.service_level * 100.0,
//!         record.recommendation.recommended_capacity
//!     );
//! }
//! # Ok(())
//! # }
//! ```

pub mod backtest;
pub mod config;
pub mod data;
pub mod error;
pub mod metrics;
pub mod models;
pub mod planning;
pub mod report;
pub mod split;
pub mod synthetic;

// Re-export commonly used types
pub use crate::backtest::{rolling_origin_backtest, BacktestSummary, FoldForecast, FoldMetric};
pub use crate::config::{load_config, AppConfig};
pub use crate::data::{DemandSeries, Frequency};
pub use crate::error::{ForecastError, Result};
pub use crate::models::{FittedForecaster, ForecastResult, Forecaster, ModelSpec};
pub use crate::planning::{
    evaluate_capacity_cost, recommend_capacity, sensitivity_sweep, CapacityRecommendation,
    CostRecord, CostWeights,
};
pub use crate::split::{rolling_folds, Fold, SplitConfig};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
