//! Population-level median progression.

use std::collections::BTreeMap;

use crate::error::EngineResult;
use crate::models::{median, EmployeeRecord};

use super::growth::project_compound;

/// Projects the median salary per level forward under market-rate growth.
///
/// Medians are assumed to grow one percentage point above the given
/// inflation rate, slightly below individual growth rates. Each returned
/// path starts with the current median (length `years + 1`).
///
/// # Errors
///
/// Propagates [`crate::error::EngineError::CalculationError`] if a level
/// median is not positive.
pub fn project_median_progression(
    population: &[EmployeeRecord],
    years: u32,
    market_inflation_rate: f64,
) -> EngineResult<BTreeMap<u8, Vec<f64>>> {
    let mut by_level: BTreeMap<u8, Vec<f64>> = BTreeMap::new();
    for employee in population {
        by_level.entry(employee.level).or_default().push(employee.salary);
    }

    let median_growth_rate = market_inflation_rate + 0.01;
    let mut progression = BTreeMap::new();

    for (level, salaries) in by_level {
        let current_median = median(&salaries);
        let mut path = Vec::with_capacity(years as usize + 1);
        path.push(current_median);
        for year in 1..=years {
            path.push(project_compound(
                current_median,
                median_growth_rate,
                f64::from(year),
            )?);
        }
        progression.insert(level, path);
    }

    Ok(progression)
}
