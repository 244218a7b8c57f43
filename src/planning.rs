//! Capacity translation, cost evaluation and service-level sensitivity

use crate::error::{ForecastError, Result};
use crate::models::{validate_horizon, validate_level, FittedForecaster};
use serde::Serialize;
use tracing::debug;

/// Asymmetric unit cost weights for capacity mismatch
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CostWeights {
    /// Cost per idle capacity unit
    pub cost_over: f64,
    /// Cost per missing capacity unit
    pub cost_under: f64,
}

impl CostWeights {
    /// Create validated cost weights
    pub fn new(cost_over: f64, cost_under: f64) -> Result<Self> {
        if !cost_over.is_finite() || cost_over < 0.0 {
            return Err(ForecastError::ConfigError(format!(
                "Over-capacity cost must be non-negative, got {}",
                cost_over
            )));
        }
        if !cost_under.is_finite() || cost_under < 0.0 {
            return Err(ForecastError::ConfigError(format!(
                "Under-capacity cost must be non-negative, got {}",
                cost_under
            )));
        }

        Ok(Self {
            cost_over,
            cost_under,
        })
    }
}

/// Discrete capacity recommendation at a service level
#[derive(Debug, Clone, Serialize)]
pub struct CapacityRecommendation {
    /// Service level the demand estimate was taken at
    pub service_level: f64,
    /// Demand estimate at that service level
    pub demand_estimate: f64,
    /// Demand units handled per capacity unit
    pub units_per_capacity: f64,
    /// Recommended capacity units
    pub recommended_capacity: u32,
}

/// Over/under-capacity cost of a recommendation against a reference demand
#[derive(Debug, Clone, Serialize)]
pub struct CostRecord {
    /// Recommended capacity units
    pub recommended_capacity: u32,
    /// Reference demand, realized or forecast
    pub demand: f64,
    /// Cost of idle capacity
    pub over_capacity_cost: f64,
    /// Cost of unmet demand
    pub under_capacity_cost: f64,
    /// Total mismatch cost
    pub total_cost: f64,
}

/// One entry of a service-level sensitivity sweep
#[derive(Debug, Clone, Serialize)]
pub struct SensitivityRecord {
    pub recommendation: CapacityRecommendation,
    pub cost: CostRecord,
}

/// Translate a scalar demand estimate into a discrete capacity count
///
/// Rounding is always upward and the recommendation is at least one unit:
/// under-provisioning is assumed strictly worse than over-provisioning.
pub fn recommend_capacity(
    demand_estimate: f64,
    service_level: f64,
    units_per_capacity: f64,
) -> Result<CapacityRecommendation> {
    validate_level(service_level)?;
    validate_units_per_capacity(units_per_capacity)?;
    if !demand_estimate.is_finite() {
        return Err(ForecastError::NumericalError(format!(
            "Demand estimate is not finite: {}",
            demand_estimate
        )));
    }

    let raw = (demand_estimate / units_per_capacity).ceil();
    let recommended_capacity = if raw < 1.0 { 1 } else { raw as u32 };

    Ok(CapacityRecommendation {
        service_level,
        demand_estimate,
        units_per_capacity,
        recommended_capacity,
    })
}

/// Score a capacity recommendation against a reference demand
///
/// Idle and missing capacity are costed per capacity-unit equivalent with the
/// asymmetric weights; exactly one of the two costs is non-zero.
pub fn evaluate_capacity_cost(
    recommended_capacity: u32,
    demand: f64,
    units_per_capacity: f64,
    weights: &CostWeights,
) -> Result<CostRecord> {
    validate_units_per_capacity(units_per_capacity)?;
    if !demand.is_finite() {
        return Err(ForecastError::NumericalError(format!(
            "Reference demand is not finite: {}",
            demand
        )));
    }

    let capacity_used = recommended_capacity as f64 * units_per_capacity;

    let (over_capacity_cost, under_capacity_cost) = if capacity_used >= demand {
        (
            (capacity_used - demand) / units_per_capacity * weights.cost_over,
            0.0,
        )
    } else {
        (
            0.0,
            (demand - capacity_used) / units_per_capacity * weights.cost_under,
        )
    };

    Ok(CostRecord {
        recommended_capacity,
        demand,
        over_capacity_cost,
        under_capacity_cost,
        total_cost: over_capacity_cost + under_capacity_cost,
    })
}

/// Recommend capacity from a fitted model's quantile forecast
///
/// The demand estimate at a service level is the peak of the quantile
/// forecast over the horizon: a single capacity level has to cover every
/// step.
pub fn recommend_from_forecast(
    model: &dyn FittedForecaster,
    horizon: usize,
    service_level: f64,
    units_per_capacity: f64,
) -> Result<CapacityRecommendation> {
    validate_horizon(horizon)?;

    let forecast = model.forecast_quantile(horizon, service_level)?;
    let quantile = forecast.quantile().ok_or_else(|| {
        ForecastError::DataError(format!(
            "Model '{}' returned no quantile estimate",
            model.name()
        ))
    })?;
    let demand_estimate = peak(&quantile.values);

    recommend_capacity(demand_estimate, service_level, units_per_capacity)
}

/// Sweep capacity recommendations and costs across service levels
///
/// Levels are processed independently and results preserve input order. The
/// cost reference is the peak of the point forecast, so the sweep shows the
/// cost of conservatism as the service level rises. Capacity is non-
/// decreasing across levels whenever the model's quantile function is.
pub fn sensitivity_sweep(
    model: &dyn FittedForecaster,
    horizon: usize,
    units_per_capacity: f64,
    service_levels: &[f64],
    weights: &CostWeights,
) -> Result<Vec<SensitivityRecord>> {
    validate_horizon(horizon)?;
    validate_units_per_capacity(units_per_capacity)?;

    let reference = peak(model.forecast(horizon)?.values());

    let mut records = Vec::with_capacity(service_levels.len());
    for &level in service_levels {
        let recommendation =
            recommend_from_forecast(model, horizon, level, units_per_capacity)?;
        let cost = evaluate_capacity_cost(
            recommendation.recommended_capacity,
            reference,
            units_per_capacity,
            weights,
        )?;

        debug!(
            level,
            capacity = recommendation.recommended_capacity,
            total_cost = cost.total_cost,
            "sensitivity sweep point"
        );

        records.push(SensitivityRecord {
            recommendation,
            cost,
        });
    }

    Ok(records)
}

fn peak(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

fn validate_units_per_capacity(units_per_capacity: f64) -> Result<()> {
    if !units_per_capacity.is_finite() || units_per_capacity <= 0.0 {
        return Err(ForecastError::ConfigError(format!(
            "Units per capacity must be positive, got {}",
            units_per_capacity
        )));
    }
    Ok(())
}
