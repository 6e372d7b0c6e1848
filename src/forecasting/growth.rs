//! Compound growth primitives.
//!
//! This module provides the CAGR, compound projection, and time-to-target
//! calculations underpinning all salary projections.

use crate::error::{EngineError, EngineResult};

/// Calculates the compound annual growth rate between two values.
///
/// Formula: `(ending_value / starting_value)^(1/years) - 1`.
///
/// # Errors
///
/// Returns [`EngineError::CalculationError`] if either value or the year
/// count is not positive.
///
/// # Example
///
/// ```
/// use equity_engine::forecasting::cagr;
///
/// let rate = cagr(80_000.0, 100_000.0, 5.0).unwrap();
/// assert!((rate - 0.04564).abs() < 0.001);
/// ```
pub fn cagr(starting_value: f64, ending_value: f64, years: f64) -> EngineResult<f64> {
    if starting_value <= 0.0 || ending_value <= 0.0 || years <= 0.0 {
        return Err(EngineError::CalculationError {
            message: format!(
                "CAGR requires positive inputs, got start={}, end={}, years={}",
                starting_value, ending_value, years
            ),
        });
    }

    Ok((ending_value / starting_value).powf(1.0 / years) - 1.0)
}

/// Projects a future value under compound growth.
///
/// Formula: `initial_value * (1 + growth_rate)^years`. Fractional years are
/// accepted so the function composes with [`time_to_target`].
///
/// # Errors
///
/// Returns [`EngineError::CalculationError`] if the initial value is not
/// positive or the year count is negative.
pub fn project_compound(initial_value: f64, growth_rate: f64, years: f64) -> EngineResult<f64> {
    if initial_value <= 0.0 || years < 0.0 {
        return Err(EngineError::CalculationError {
            message: format!(
                "compound projection requires positive initial value and non-negative years, \
                 got initial={}, years={}",
                initial_value, years
            ),
        });
    }

    Ok(initial_value * (1.0 + growth_rate).powf(years))
}

/// Calculates the years needed to grow from a current to a target value.
///
/// Formula: `ln(target / current) / ln(1 + growth_rate)`. The result can be
/// fractional.
///
/// # Errors
///
/// Returns [`EngineError::CalculationError`] if the current value is not
/// positive, the target does not exceed the current value, or the growth
/// rate is not positive.
pub fn time_to_target(
    current_value: f64,
    target_value: f64,
    annual_growth_rate: f64,
) -> EngineResult<f64> {
    if current_value <= 0.0 || target_value <= current_value || annual_growth_rate <= 0.0 {
        return Err(EngineError::CalculationError {
            message: format!(
                "time to target requires 0 < current < target and a positive rate, \
                 got current={}, target={}, rate={}",
                current_value, target_value, annual_growth_rate
            ),
        });
    }

    Ok((target_value / current_value).ln() / (1.0 + annual_growth_rate).ln())
}
