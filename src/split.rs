//! Rolling-origin train/test fold generation

use crate::data::DemandSeries;
use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use std::ops::Range;

/// Parameters for rolling-origin fold generation
#[derive(Debug, Clone, Copy)]
pub struct SplitConfig {
    /// Forecast horizon per fold
    pub horizon: usize,
    /// Number of observations between consecutive cutoffs
    pub step: usize,
    /// Minimum training window for the first fold
    pub min_train_size: usize,
}

impl SplitConfig {
    /// Create a validated split configuration
    pub fn new(horizon: usize, step: usize, min_train_size: usize) -> Result<Self> {
        if horizon == 0 {
            return Err(ForecastError::ConfigError(
                "Horizon must be positive".to_string(),
            ));
        }
        if step == 0 {
            return Err(ForecastError::ConfigError(
                "Step must be positive".to_string(),
            ));
        }
        if min_train_size < 1 {
            return Err(ForecastError::ConfigError(
                "Minimum train size must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            horizon,
            step,
            min_train_size,
        })
    }
}

/// One rolling-origin train/test fold
///
/// The train range ends strictly before the cutoff position and the test
/// range starts at it.
#[derive(Debug, Clone)]
pub struct Fold {
    /// Fold index, starting at 0
    pub index: usize,
    /// Timestamp of the first test observation
    pub cutoff: NaiveDate,
    /// Training window indices
    pub train: Range<usize>,
    /// Test window indices, `horizon` long
    pub test: Range<usize>,
}

/// Generate rolling-origin folds over a series
///
/// Fold `i` has its cutoff at position `min_train_size + i*step`; folds whose
/// test window would run past the end of the series are not produced.
pub fn rolling_folds(series: &DemandSeries, cfg: &SplitConfig) -> Result<Vec<Fold>> {
    let total = series.len();
    if cfg.min_train_size + cfg.horizon > total {
        return Err(ForecastError::ConfigError(format!(
            "Series too short for backtest: need at least {} observations \
             (min_train_size={} + horizon={}), got {}",
            cfg.min_train_size + cfg.horizon,
            cfg.min_train_size,
            cfg.horizon,
            total
        )));
    }

    let mut folds = Vec::new();
    let mut cutoff = cfg.min_train_size;
    let mut index = 0;

    while cutoff + cfg.horizon <= total {
        folds.push(Fold {
            index,
            cutoff: series.timestamps()[cutoff],
            train: 0..cutoff,
            test: cutoff..cutoff + cfg.horizon,
        });
        cutoff += cfg.step;
        index += 1;
    }

    Ok(folds)
}
