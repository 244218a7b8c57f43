//! Error types for the forecast_capacity crate

use thiserror::Error;

/// Custom error types for the forecast_capacity crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Error from invalid or out-of-range parameters, detected before any
    /// computation starts
    #[error("Config error: {0}")]
    ConfigError(String),

    /// Error from not enough history for a fold or a model fit
    #[error("Insufficient data: {0}")]
    InsufficientDataError(String),

    /// Error from a degenerate numerical system
    #[error("Numerical error: {0}")]
    NumericalError(String),

    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from CSV parsing
    #[error("CSV error: {0}")]
    CsvError(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<csv::Error> for ForecastError {
    fn from(err: csv::Error) -> Self {
        ForecastError::CsvError(err.to_string())
    }
}

impl From<serde_yaml::Error> for ForecastError {
    fn from(err: serde_yaml::Error) -> Self {
        ForecastError::ConfigError(err.to_string())
    }
}
