//! Rolling-origin backtesting engine

use crate::data::DemandSeries;
use crate::error::Result;
use crate::metrics::{mean_absolute_error, symmetric_mape};
use crate::models::{ForecastResult, ModelSpec};
use crate::split::{rolling_folds, SplitConfig};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

/// Accuracy metrics for one backtest fold
#[derive(Debug, Clone, Serialize)]
pub struct FoldMetric {
    /// Fold index, starting at 0
    pub fold: usize,
    /// Timestamp of the first test observation
    pub cutoff: NaiveDate,
    /// Mean absolute error over the fold horizon
    pub mae: f64,
    /// Symmetric MAPE over the fold horizon, in percent
    pub smape: f64,
}

/// Forecast produced for one backtest fold
#[derive(Debug, Clone, Serialize)]
pub struct FoldForecast {
    /// Fold index, starting at 0
    pub fold: usize,
    /// Timestamps of the forecast horizon
    pub timestamps: Vec<NaiveDate>,
    /// The forecast itself
    pub forecast: ForecastResult,
}

/// Full result of a rolling-origin backtest
#[derive(Debug, Clone, Serialize)]
pub struct BacktestSummary {
    /// Name of the backtested model
    pub model_name: String,
    /// Forecast horizon per fold
    pub horizon: usize,
    /// Observations between consecutive cutoffs
    pub step: usize,
    /// Per-fold accuracy metrics, in cutoff order
    pub fold_metrics: Vec<FoldMetric>,
    /// Per-fold forecasts, in cutoff order
    pub forecasts: Vec<FoldForecast>,
    /// Mean MAE across folds
    pub avg_mae: f64,
    /// Mean sMAPE across folds, in percent
    pub avg_smape: f64,
}

impl BacktestSummary {
    /// The forecast of the most recent fold, used for capacity translation
    pub fn latest_forecast(&self) -> Option<&FoldForecast> {
        self.forecasts.last()
    }
}

/// Run a rolling-origin backtest of a model over a demand series
///
/// Each fold fits a fresh model instance on the training window and scores
/// its forecast against the test window. A fold that fails to fit aborts the
/// whole backtest: aggregate metrics over a partial fold set would be
/// misleading.
pub fn rolling_origin_backtest(
    series: &DemandSeries,
    cfg: &SplitConfig,
    model: &ModelSpec,
    quantile_level: Option<f64>,
) -> Result<BacktestSummary> {
    let folds = rolling_folds(series, cfg)?;

    let mut fold_metrics = Vec::with_capacity(folds.len());
    let mut forecasts = Vec::with_capacity(folds.len());

    for fold in &folds {
        let train = series.slice(fold.train.clone())?;
        let fitted = model.fit(&train)?;

        let forecast = match quantile_level {
            Some(level) => fitted.forecast_quantile(cfg.horizon, level)?,
            None => fitted.forecast(cfg.horizon)?,
        };

        let actual = &series.values()[fold.test.clone()];
        let mae = mean_absolute_error(actual, forecast.values())?;
        let smape = symmetric_mape(actual, forecast.values())?;

        debug!(fold = fold.index, cutoff = %fold.cutoff, mae, smape, "scored fold");

        fold_metrics.push(FoldMetric {
            fold: fold.index,
            cutoff: fold.cutoff,
            mae,
            smape,
        });
        forecasts.push(FoldForecast {
            fold: fold.index,
            timestamps: series.timestamps()[fold.test.clone()].to_vec(),
            forecast,
        });
    }

    let count = fold_metrics.len() as f64;
    let avg_mae = fold_metrics.iter().map(|m| m.mae).sum::<f64>() / count;
    let avg_smape = fold_metrics.iter().map(|m| m.smape).sum::<f64>() / count;

    info!(
        model = model.name(),
        folds = fold_metrics.len(),
        avg_mae,
        avg_smape,
        "backtest complete"
    );

    Ok(BacktestSummary {
        model_name: model.name().to_string(),
        horizon: cfg.horizon,
        step: cfg.step,
        fold_metrics,
        forecasts,
        avg_mae,
        avg_smape,
    })
}
