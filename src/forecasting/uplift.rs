//! Uplift matrix salary increases.
//!
//! The uplift matrix maps a performance rating and a level category to an
//! additive annual salary-increase rate: a baseline component, a
//! performance component, and a level-category component, summed and
//! applied as one year of compound growth.

use crate::error::{EngineError, EngineResult};
use crate::models::PerformanceRating;

/// Level category used by the uplift matrix.
///
/// Levels 1–3 form the core track and 4–6 the senior track; within each
/// track the categories cycle competent, advanced, expert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelCategory {
    /// Levels 1 and 4.
    Competent,
    /// Levels 2 and 5.
    Advanced,
    /// Levels 3 and 6.
    Expert,
}

/// Maps a level to its uplift category.
///
/// # Errors
///
/// Returns [`EngineError::LevelNotMapped`] for levels outside 1–6.
pub fn level_category(level: u8) -> EngineResult<LevelCategory> {
    match level {
        1 | 4 => Ok(LevelCategory::Competent),
        2 | 5 => Ok(LevelCategory::Advanced),
        3 | 6 => Ok(LevelCategory::Expert),
        other => Err(EngineError::LevelNotMapped { level: other }),
    }
}

/// One row of the uplift matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
struct UpliftRow {
    baseline: f64,
    performance: f64,
    competent: f64,
    advanced: f64,
    expert: f64,
}

impl UpliftRow {
    fn category_component(&self, category: LevelCategory) -> f64 {
        match category {
            LevelCategory::Competent => self.competent,
            LevelCategory::Advanced => self.advanced,
            LevelCategory::Expert => self.expert,
        }
    }
}

fn uplift_row(rating: PerformanceRating) -> UpliftRow {
    match rating {
        PerformanceRating::NotMet => UpliftRow {
            baseline: 0.0125,
            performance: 0.0,
            competent: 0.0,
            advanced: 0.0075,
            expert: 0.01,
        },
        PerformanceRating::PartiallyMet => UpliftRow {
            baseline: 0.0125,
            performance: 0.0,
            competent: 0.0,
            advanced: 0.0075,
            expert: 0.01,
        },
        PerformanceRating::Achieving => UpliftRow {
            baseline: 0.0125,
            performance: 0.0125,
            competent: 0.005,
            advanced: 0.0075,
            expert: 0.01,
        },
        PerformanceRating::HighPerforming => UpliftRow {
            baseline: 0.0125,
            performance: 0.0225,
            competent: 0.005,
            advanced: 0.0075,
            expert: 0.01,
        },
        PerformanceRating::Exceeding => UpliftRow {
            baseline: 0.0125,
            performance: 0.030,
            competent: 0.005,
            advanced: 0.0075,
            expert: 0.01,
        },
    }
}

/// Total uplift rate for a level and rating.
///
/// # Errors
///
/// Returns [`EngineError::LevelNotMapped`] for levels outside 1–6.
pub fn uplift_rate(level: u8, rating: PerformanceRating) -> EngineResult<f64> {
    let category = level_category(level)?;
    let row = uplift_row(rating);
    Ok(row.baseline + row.performance + row.category_component(category))
}

/// Applies one year of uplift to a salary.
///
/// # Errors
///
/// Returns [`EngineError::CalculationError`] for a non-positive salary and
/// [`EngineError::LevelNotMapped`] for levels outside 1–6.
///
/// # Example
///
/// ```
/// use equity_engine::forecasting::uplift_increase;
/// use equity_engine::models::PerformanceRating;
///
/// // Level 5 High Performing: 1.25% + 2.25% + 0.75% = 4.25%
/// let new_salary = uplift_increase(80_000.0, 5, PerformanceRating::HighPerforming).unwrap();
/// assert!((new_salary - 83_400.0).abs() < 0.01);
/// ```
pub fn uplift_increase(
    current_salary: f64,
    level: u8,
    rating: PerformanceRating,
) -> EngineResult<f64> {
    if current_salary <= 0.0 {
        return Err(EngineError::CalculationError {
            message: format!("uplift requires a positive salary, got {}", current_salary),
        });
    }

    let rate = uplift_rate(level, rating)?;
    Ok(current_salary * (1.0 + rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_categories_cycle_per_track() {
        assert_eq!(level_category(1).unwrap(), LevelCategory::Competent);
        assert_eq!(level_category(2).unwrap(), LevelCategory::Advanced);
        assert_eq!(level_category(3).unwrap(), LevelCategory::Expert);
        assert_eq!(level_category(4).unwrap(), LevelCategory::Competent);
        assert_eq!(level_category(5).unwrap(), LevelCategory::Advanced);
        assert_eq!(level_category(6).unwrap(), LevelCategory::Expert);
    }

    #[test]
    fn test_level_category_rejects_unmapped_levels() {
        for level in [0u8, 7, 10] {
            match level_category(level) {
                Err(EngineError::LevelNotMapped { level: l }) => assert_eq!(l, level),
                other => panic!("Expected LevelNotMapped, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_uplift_level_5_high_performing() {
        let new_salary =
            uplift_increase(80_000.0, 5, PerformanceRating::HighPerforming).unwrap();
        assert!((new_salary - 83_400.0).abs() < 0.01, "got {}", new_salary);
    }

    #[test]
    fn test_uplift_rate_not_met_has_no_performance_component() {
        // Level 1 Not met: 1.25% baseline only (competent component is zero).
        let rate = uplift_rate(1, PerformanceRating::NotMet).unwrap();
        assert!((rate - 0.0125).abs() < 1e-12);
    }

    #[test]
    fn test_uplift_rate_exceeding_expert() {
        // Level 6 Exceeding: 1.25% + 3.0% + 1.0% = 5.25%
        let rate = uplift_rate(6, PerformanceRating::Exceeding).unwrap();
        assert!((rate - 0.0525).abs() < 1e-12);
    }

    #[test]
    fn test_uplift_monotone_in_rating_at_fixed_level() {
        let mut previous = 0.0;
        for rating in PerformanceRating::ALL {
            let rate = uplift_rate(3, rating).unwrap();
            assert!(rate >= previous, "rate decreased at {:?}", rating);
            previous = rate;
        }
    }

    #[test]
    fn test_uplift_increase_rejects_non_positive_salary() {
        assert!(uplift_increase(0.0, 3, PerformanceRating::Achieving).is_err());
        assert!(uplift_increase(-5.0, 3, PerformanceRating::Achieving).is_err());
    }

    #[test]
    fn test_uplift_increase_rejects_unmapped_level() {
        assert!(uplift_increase(80_000.0, 9, PerformanceRating::Achieving).is_err());
    }
}
