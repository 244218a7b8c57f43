//! Accuracy metrics for forecast evaluation

use crate::error::{ForecastError, Result};

/// Mean absolute error between actual and forecast values
pub fn mean_absolute_error(actual: &[f64], forecast: &[f64]) -> Result<f64> {
    check_lengths(actual, forecast)?;

    let sum: f64 = actual
        .iter()
        .zip(forecast.iter())
        .map(|(a, f)| (a - f).abs())
        .sum();

    Ok(sum / actual.len() as f64)
}

/// Symmetric mean absolute percentage error, in percent
///
/// A step where actual and forecast are both zero contributes 0; any other
/// step with a degenerate denominator is dropped from the mean.
pub fn symmetric_mape(actual: &[f64], forecast: &[f64]) -> Result<f64> {
    check_lengths(actual, forecast)?;

    let mut terms = Vec::with_capacity(actual.len());
    for (&a, &f) in actual.iter().zip(forecast.iter()) {
        let denom = a.abs() + f.abs();
        if denom == 0.0 {
            if a == 0.0 && f == 0.0 {
                terms.push(0.0);
            }
        } else if denom.is_finite() {
            terms.push(200.0 * (a - f).abs() / denom);
        }
    }

    if terms.is_empty() {
        return Err(ForecastError::DataError(
            "No valid steps to compute sMAPE over".to_string(),
        ));
    }

    Ok(terms.iter().sum::<f64>() / terms.len() as f64)
}

fn check_lengths(actual: &[f64], forecast: &[f64]) -> Result<()> {
    if actual.len() != forecast.len() || actual.is_empty() {
        return Err(ForecastError::DataError(
            "Actual and forecast values must have the same non-zero length".to_string(),
        ));
    }
    Ok(())
}
