//! Performance scenario path generation.
//!
//! Each current rating maps to three fixed five-year rating paths, one per
//! scenario. The tables reflect observed review-cycle progression patterns:
//! low ratings recover over several cycles, high ratings stay sticky.

use crate::models::{PerformanceRating, Scenario};

use PerformanceRating::{Achieving, Exceeding, HighPerforming, NotMet, PartiallyMet};

/// Number of years in a base scenario path.
pub const SCENARIO_PATH_YEARS: usize = 5;

/// The three base rating paths for one current rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScenarioPaths {
    /// Cautious progression path.
    pub conservative: [PerformanceRating; SCENARIO_PATH_YEARS],
    /// Most likely progression path.
    pub realistic: [PerformanceRating; SCENARIO_PATH_YEARS],
    /// Favourable progression path.
    pub optimistic: [PerformanceRating; SCENARIO_PATH_YEARS],
}

impl ScenarioPaths {
    /// The path for a named scenario.
    pub fn for_scenario(&self, scenario: Scenario) -> [PerformanceRating; SCENARIO_PATH_YEARS] {
        match scenario {
            Scenario::Conservative => self.conservative,
            Scenario::Realistic => self.realistic,
            Scenario::Optimistic => self.optimistic,
        }
    }
}

/// Generates the scenario rating paths for a current rating.
///
/// # Example
///
/// ```
/// use equity_engine::forecasting::performance_scenarios;
/// use equity_engine::models::PerformanceRating;
///
/// let paths = performance_scenarios(PerformanceRating::Achieving);
/// assert_eq!(paths.realistic.len(), 5);
/// assert!(paths.optimistic[4] >= paths.conservative[4]);
/// ```
pub fn performance_scenarios(current_rating: PerformanceRating) -> ScenarioPaths {
    match current_rating {
        NotMet => ScenarioPaths {
            conservative: [NotMet, NotMet, PartiallyMet, PartiallyMet, Achieving],
            realistic: [NotMet, PartiallyMet, Achieving, Achieving, HighPerforming],
            optimistic: [
                PartiallyMet,
                Achieving,
                HighPerforming,
                HighPerforming,
                Exceeding,
            ],
        },
        PartiallyMet => ScenarioPaths {
            conservative: [PartiallyMet, PartiallyMet, Achieving, Achieving, Achieving],
            realistic: [
                PartiallyMet,
                Achieving,
                Achieving,
                HighPerforming,
                HighPerforming,
            ],
            optimistic: [
                Achieving,
                HighPerforming,
                HighPerforming,
                Exceeding,
                Exceeding,
            ],
        },
        Achieving => ScenarioPaths {
            conservative: [
                Achieving,
                Achieving,
                Achieving,
                HighPerforming,
                HighPerforming,
            ],
            realistic: [
                Achieving,
                Achieving,
                HighPerforming,
                HighPerforming,
                Exceeding,
            ],
            optimistic: [
                Achieving,
                HighPerforming,
                HighPerforming,
                Exceeding,
                Exceeding,
            ],
        },
        HighPerforming => ScenarioPaths {
            conservative: [
                HighPerforming,
                HighPerforming,
                HighPerforming,
                HighPerforming,
                Exceeding,
            ],
            realistic: [
                HighPerforming,
                HighPerforming,
                Exceeding,
                Exceeding,
                Exceeding,
            ],
            optimistic: [HighPerforming, Exceeding, Exceeding, Exceeding, Exceeding],
        },
        Exceeding => ScenarioPaths {
            conservative: [
                Exceeding,
                Exceeding,
                HighPerforming,
                HighPerforming,
                Exceeding,
            ],
            realistic: [Exceeding, Exceeding, Exceeding, Exceeding, Exceeding],
            optimistic: [Exceeding, Exceeding, Exceeding, Exceeding, Exceeding],
        },
    }
}
