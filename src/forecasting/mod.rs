//! Core mathematical utilities for salary progression modelling.
//!
//! This module contains the pure numeric primitives the rest of the engine
//! is built on: compound growth rates and projections, uplift-matrix salary
//! increases, confidence intervals, performance scenario paths, market
//! adjustment cycles, and population median progression.

mod growth;
mod market;
mod population;
mod scenarios;
mod statistics;
mod uplift;

pub use growth::{cagr, project_compound, time_to_target};
pub use market::{
    apply_market_adjustments, DEFAULT_ADJUSTMENT_YEARS, MARKET_BOOST_MAX, MARKET_BOOST_MIN,
};
pub use population::project_median_progression;
pub use scenarios::{performance_scenarios, ScenarioPaths, SCENARIO_PATH_YEARS};
pub use statistics::confidence_interval;
pub use uplift::{level_category, uplift_increase, uplift_rate, LevelCategory};
