//! Ridge regression over lag features

use crate::data::DemandSeries;
use crate::error::{ForecastError, Result};
use crate::models::{
    validate_horizon, validate_level, FittedForecaster, ForecastResult, Forecaster,
};
use statrs::statistics::{Data, OrderStatistics};

/// Pivot threshold below which the normal equations are treated as singular
const SINGULAR_EPS: f64 = 1e-12;

/// Damping added to the diagonal when the undamped solve is singular
const FALLBACK_DAMPING: f64 = 1e-8;

/// Ridge regression forecaster over lag features
///
/// Each training row predicts `y[t]` from the `lag_count` most recent values
/// `[y[t-1], ..., y[t-lag_count]]`. The weights solve the regularized normal
/// equations in closed form. Multi-step forecasts are recursive: each
/// prediction becomes a lag feature for the next step.
#[derive(Debug, Clone)]
pub struct RidgeLagRegression {
    /// Name of the model
    name: String,
    /// Number of lag features per row
    lag_count: usize,
    /// L2 regularization strength
    alpha: f64,
}

/// Fitted ridge lag regression model
#[derive(Debug, Clone)]
pub struct FittedRidgeLag {
    /// Name of the model
    name: String,
    /// Number of lag features per row
    lag_count: usize,
    /// Fitted weights, index `j` multiplying `y[t-1-j]`
    weights: Vec<f64>,
    /// Training history for recursive prediction
    history: Vec<f64>,
    /// In-sample residuals `y[t] - prediction`
    residuals: Vec<f64>,
}

impl RidgeLagRegression {
    /// Create a new ridge lag regression model
    pub fn new(lag_count: usize, alpha: f64) -> Result<Self> {
        if lag_count == 0 {
            return Err(ForecastError::ConfigError(
                "Lag count must be positive".to_string(),
            ));
        }
        if !alpha.is_finite() || alpha < 0.0 {
            return Err(ForecastError::ConfigError(format!(
                "Alpha must be non-negative, got {}",
                alpha
            )));
        }

        Ok(Self {
            name: format!("Ridge Lag Regression (lags={}, alpha={})", lag_count, alpha),
            lag_count,
            alpha,
        })
    }
}

impl Forecaster for RidgeLagRegression {
    type Fitted = FittedRidgeLag;

    fn fit(&self, train: &DemandSeries) -> Result<FittedRidgeLag> {
        let values = train.values();
        let k = self.lag_count;

        // Rows without full lag history are dropped
        let rows = values.len().saturating_sub(k);
        if rows < k + 1 {
            return Err(ForecastError::InsufficientDataError(format!(
                "Ridge lag regression needs at least {} usable rows, got {}",
                k + 1,
                rows
            )));
        }

        // Accumulate the normal equations X'X and X'y directly; the system is
        // only k x k regardless of training length
        let mut xtx = vec![vec![0.0; k]; k];
        let mut xty = vec![0.0; k];
        for t in k..values.len() {
            for i in 0..k {
                let xi = values[t - 1 - i];
                xty[i] += xi * values[t];
                for j in 0..k {
                    xtx[i][j] += xi * values[t - 1 - j];
                }
            }
        }

        let weights = solve_ridge(&xtx, &xty, self.alpha)?;

        let residuals: Vec<f64> = (k..values.len())
            .map(|t| {
                let pred: f64 = (0..k).map(|j| weights[j] * values[t - 1 - j]).sum();
                values[t] - pred
            })
            .collect();

        Ok(FittedRidgeLag {
            name: self.name.clone(),
            lag_count: k,
            weights,
            history: values.to_vec(),
            residuals,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl FittedForecaster for FittedRidgeLag {
    fn forecast(&self, horizon: usize) -> Result<ForecastResult> {
        validate_horizon(horizon)?;

        let k = self.lag_count;
        let mut history = self.history[self.history.len() - k..].to_vec();
        let mut values = Vec::with_capacity(horizon);

        for _ in 0..horizon {
            let pred: f64 = (0..k)
                .map(|j| self.weights[j] * history[history.len() - 1 - j])
                .sum();
            history.push(pred);
            values.push(pred);
        }

        ForecastResult::new(values, horizon)
    }

    fn forecast_quantile(&self, horizon: usize, level: f64) -> Result<ForecastResult> {
        validate_level(level)?;
        let base = self.forecast(horizon)?;

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

/// Solve `(X'X + alpha*I) w = X'y`
///
/// A singular system is retried with extra diagonal damping, approximating
/// the pseudo-inverse solution; a system that stays degenerate is a
/// `NumericalError`.
fn solve_ridge(xtx: &[Vec<f64>], xty: &[f64], alpha: f64) -> Result<Vec<f64>> {
    if let Some(weights) = solve_damped(xtx, xty, alpha) {
        return Ok(weights);
    }

    let scale = 1.0 + trace(xtx) / xtx.len() as f64;
    solve_damped(xtx, xty, alpha + FALLBACK_DAMPING * scale).ok_or_else(|| {
        ForecastError::NumericalError(
            "Normal equations are degenerate even after damping".to_string(),
        )
    })
}

fn trace(m: &[Vec<f64>]) -> f64 {
    (0..m.len()).map(|i| m[i][i]).sum()
}

/// Gaussian elimination with partial pivoting on the damped system
///
/// Returns `None` when a pivot collapses or the solution is non-finite.
fn solve_damped(xtx: &[Vec<f64>], xty: &[f64], damping: f64) -> Option<Vec<f64>> {
    let n = xty.len();
    let mut a: Vec<Vec<f64>> = xtx.iter().cloned().collect();
    let mut b = xty.to_vec();
    for i in 0..n {
        a[i][i] += damping;
    }

    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&r1, &r2| a[r1][col].abs().total_cmp(&a[r2][col].abs()))
            .expect("column range is never empty");
        if a[pivot_row][col].abs() < SINGULAR_EPS {
            return None;
        }
        a.swap(col, pivot_row);
        b.swap(col, pivot_row);

        for row in col + 1..n {
            let factor = a[row][col] / a[col][col];
            for j in col..n {
                a[row][j] -= factor * a[col][j];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut weights = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|j| a[row][j] * weights[j]).sum();
        weights[row] = (b[row] - tail) / a[row][row];
    }

    if weights.iter().all(|w| w.is_finite()) {
        Some(weights)
    } else {
        None
    }
}
