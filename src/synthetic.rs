//! Synthetic demand series generation for demos and tests

use crate::data::{DemandSeries, Frequency};
use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// Generate a daily demand series with a weekly profile and Gaussian noise
///
/// Weekday demand follows `base` scaled by a fixed weekly shape (quiet
/// weekends, midweek peak); noise is seeded for reproducibility and values
/// are clamped at zero.
pub fn weekly_demand(
    start: NaiveDate,
    days: usize,
    base: f64,
    noise_std: f64,
    seed: u64,
) -> Result<DemandSeries> {
    if days == 0 {
        return Err(ForecastError::ConfigError(
            "Days must be positive".to_string(),
        ));
    }
    if !base.is_finite() || base < 0.0 {
        return Err(ForecastError::ConfigError(format!(
            "Base demand must be non-negative, got {}",
            base
        )));
    }

    // Mon..Sun multipliers
    const WEEKLY_SHAPE: [f64; 7] = [1.0, 1.05, 1.1, 1.05, 1.0, 0.6, 0.5];

    let noise = Normal::new(0.0, noise_std.max(0.0)).map_err(|e| {
        ForecastError::ConfigError(format!("Invalid noise parameter: {}", e))
    })?;
    let mut rng = StdRng::seed_from_u64(seed);

    let mut timestamps = Vec::with_capacity(days);
    let mut values = Vec::with_capacity(days);
    let mut current = start;
    for day in 0..days {
        let shape = WEEKLY_SHAPE[day % 7];
        let value = (base * shape + noise.sample(&mut rng)).max(0.0);
        timestamps.push(current);
        values.push(value);
        current = Frequency::Daily.advance(current);
    }

    DemandSeries::new(timestamps, values, Frequency::Daily)
}
