//! Demand series handling for forecasting

use crate::error::{ForecastError, Result};
use chrono::{Duration, NaiveDate};
use std::ops::Range;
use std::path::Path;
use tracing::debug;

/// Observation frequency of a demand series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Daily,
    Weekly,
}

impl Frequency {
    /// Parse a frequency from a config string
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "daily" | "d" | "1d" => Ok(Frequency::Daily),
            "weekly" | "w" | "1w" => Ok(Frequency::Weekly),
            _ => Err(ForecastError::ConfigError(format!(
                "Unsupported frequency: {}",
                s
            ))),
        }
    }

    fn step(&self) -> Duration {
        match self {
            Frequency::Daily => Duration::days(1),
            Frequency::Weekly => Duration::weeks(1),
        }
    }

    /// Advance a date by one frequency step
    pub fn advance(&self, date: NaiveDate) -> NaiveDate {
        date + self.step()
    }
}

/// Univariate demand series with a fixed observation frequency
///
/// Invariants: timestamps are strictly increasing with no gaps on the
/// frequency grid, and values are non-negative finite quantities.
#[derive(Debug, Clone)]
pub struct DemandSeries {
    /// Observation timestamps
    timestamps: Vec<NaiveDate>,
    /// Observed demand per timestamp
    values: Vec<f64>,
    /// Observation frequency
    freq: Frequency,
}

impl DemandSeries {
    /// Create a new demand series, validating the series invariants
    pub fn new(timestamps: Vec<NaiveDate>, values: Vec<f64>, freq: Frequency) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(ForecastError::DataError(format!(
                "Timestamps length ({}) doesn't match values length ({})",
                timestamps.len(),
                values.len()
            )));
        }
        if timestamps.is_empty() {
            return Err(ForecastError::DataError("Empty demand series".to_string()));
        }
        for pair in timestamps.windows(2) {
            if freq.advance(pair[0]) != pair[1] {
                return Err(ForecastError::DataError(format!(
                    "Timestamps are not consecutive on the frequency grid: {} -> {}",
                    pair[0], pair[1]
                )));
            }
        }
        for &value in &values {
            if !value.is_finite() || value < 0.0 {
                return Err(ForecastError::DataError(format!(
                    "Demand values must be non-negative and finite, got {}",
                    value
                )));
            }
        }

        Ok(Self {
            timestamps,
            values,
            freq,
        })
    }

    /// Load a demand series from a CSV file with the given date and target
    /// columns
    ///
    /// Rows are sorted by date, duplicate dates are rejected, and gaps on the
    /// frequency grid are forward-filled with the last observed value.
    pub fn from_csv<P: AsRef<Path>>(
        path: P,
        date_col: &str,
        target_col: &str,
        freq: Frequency,
    ) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path.as_ref())?;
        let headers = reader.headers()?.clone();

        let date_idx = headers.iter().position(|h| h == date_col).ok_or_else(|| {
            ForecastError::DataError(format!("Missing date column '{}'", date_col))
        })?;
        let target_idx = headers
            .iter()
            .position(|h| h == target_col)
            .ok_or_else(|| {
                ForecastError::DataError(format!("Missing target column '{}'", target_col))
            })?;

        let mut records: Vec<(NaiveDate, f64)> = Vec::new();
        for row in reader.records() {
            let row = row?;
            let date_field = row.get(date_idx).unwrap_or("");
            let date = NaiveDate::parse_from_str(date_field.trim(), "%Y-%m-%d").map_err(|_| {
                ForecastError::DataError(format!("Could not parse date '{}'", date_field))
            })?;
            let value_field = row.get(target_idx).unwrap_or("");
            let value: f64 = value_field.trim().parse().map_err(|_| {
                ForecastError::DataError(format!("Could not parse value '{}'", value_field))
            })?;
            records.push((date, value));
        }

        if records.is_empty() {
            return Err(ForecastError::DataError(
                "CSV contains no data rows".to_string(),
            ));
        }

        records.sort_by_key(|(date, _)| *date);
        for pair in records.windows(2) {
            if pair[0].0 == pair[1].0 {
                return Err(ForecastError::DataError(format!(
                    "Duplicate timestamp in series: {}",
                    pair[0].0
                )));
            }
        }

        // Reindex onto the full frequency grid, forward-filling gaps
        let mut timestamps = Vec::with_capacity(records.len());
        let mut values = Vec::with_capacity(records.len());
        let mut expected = records[0].0;
        let mut last_value = records[0].1;
        let mut filled = 0usize;

        for (date, value) in records {
            while expected < date {
                timestamps.push(expected);
                values.push(last_value);
                expected = freq.advance(expected);
                filled += 1;
            }
            if expected != date {
                return Err(ForecastError::DataError(format!(
                    "Timestamp {} is not aligned to the frequency grid",
                    date
                )));
            }
            timestamps.push(date);
            values.push(value);
            last_value = value;
            expected = freq.advance(expected);
        }

        debug!(
            rows = timestamps.len(),
            filled, "loaded demand series from csv"
        );

        Self::new(timestamps, values, freq)
    }

    /// Get the observation timestamps
    pub fn timestamps(&self) -> &[NaiveDate] {
        &self.timestamps
    }

    /// Get the observed demand values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get the observation frequency
    pub fn freq(&self) -> Frequency {
        self.freq
    }

    /// Get the length of the series
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the series is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get a sub-series covering the given index range
    pub fn slice(&self, range: Range<usize>) -> Result<Self> {
        if range.start >= range.end || range.end > self.len() {
            return Err(ForecastError::DataError(format!(
                "Slice range {}..{} out of bounds for series of length {}",
                range.start,
                range.end,
                self.len()
            )));
        }

        Ok(Self {
            timestamps: self.timestamps[range.clone()].to_vec(),
            values: self.values[range].to_vec(),
            freq: self.freq,
        })
    }

    /// Timestamps for the `horizon` steps immediately after the series end
    pub fn future_timestamps(&self, horizon: usize) -> Vec<NaiveDate> {
        let mut current = *self.timestamps.last().expect("series is never empty");
        let mut timestamps = Vec::with_capacity(horizon);
        for _ in 0..horizon {
            current = self.freq.advance(current);
            timestamps.push(current);
        }
        timestamps
    }
}
