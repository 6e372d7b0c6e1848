//! Configuration types for the equity engine.
//!
//! This module contains the flat [`EngineConfig`] structure that is
//! deserialized from a YAML configuration file. Every field has a
//! documented default so partial files and fully-programmatic
//! construction both work.

use serde::Deserialize;

fn default_confidence_interval() -> f64 {
    0.95
}

fn default_market_inflation_rate() -> f64 {
    0.025
}

fn default_progression_analysis_years() -> u32 {
    5
}

fn default_convergence_threshold_years() -> u32 {
    5
}

fn default_acceptable_gap_percent() -> f64 {
    5.0
}

fn default_intervention_budget_constraint() -> f64 {
    0.005
}

fn default_max_budget_percent() -> f64 {
    0.006
}

fn default_target_gender_gap_percent() -> f64 {
    0.0
}

fn default_max_direct_reports() -> usize {
    6
}

fn default_high_performer_threshold() -> f64 {
    4.0
}

fn default_inequality_budget_percent() -> f64 {
    0.5
}

fn default_market_adjustment_years() -> Vec<usize> {
    vec![3, 6, 9]
}

/// Engine configuration options.
///
/// All options are recognised by name in `engine.yaml`; unset options take
/// the documented defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EngineConfig {
    /// Confidence level for projection intervals (default 0.95).
    #[serde(default = "default_confidence_interval")]
    pub confidence_interval: f64,
    /// Assumed annual market inflation rate (default 0.025).
    #[serde(default = "default_market_inflation_rate")]
    pub market_inflation_rate: f64,
    /// Default projection horizon in years (default 5).
    #[serde(default = "default_progression_analysis_years")]
    pub progression_analysis_years: u32,
    /// Years within which convergence is considered on track (default 5).
    #[serde(default = "default_convergence_threshold_years")]
    pub convergence_threshold_years: u32,
    /// Gap to the median treated as converged, in percent (default 5.0).
    #[serde(default = "default_acceptable_gap_percent")]
    pub acceptable_gap_percent: f64,
    /// Budget cap for remediation strategies, as a fraction of payroll
    /// (default 0.005).
    #[serde(default = "default_intervention_budget_constraint")]
    pub intervention_budget_constraint: f64,
    /// Hard upper bound on intervention spend, as a fraction of payroll
    /// (default 0.006).
    #[serde(default = "default_max_budget_percent")]
    pub max_budget_percent: f64,
    /// Target gender pay gap in percent (default 0.0, full parity).
    #[serde(default = "default_target_gender_gap_percent")]
    pub target_gender_gap_percent: f64,
    /// Direct-reports cap per manager (default 6).
    #[serde(default = "default_max_direct_reports")]
    pub max_direct_reports: usize,
    /// Numeric rating at or above which an employee counts as a high
    /// performer (default 4.0).
    #[serde(default = "default_high_performer_threshold")]
    pub high_performer_threshold: f64,
    /// Per-manager intervention budget, in percent of team payroll
    /// (default 0.5).
    #[serde(default = "default_inequality_budget_percent")]
    pub inequality_budget_percent: f64,
    /// Year indices that receive market adjustments (default [3, 6, 9]).
    #[serde(default = "default_market_adjustment_years")]
    pub market_adjustment_years: Vec<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            confidence_interval: default_confidence_interval(),
            market_inflation_rate: default_market_inflation_rate(),
            progression_analysis_years: default_progression_analysis_years(),
            convergence_threshold_years: default_convergence_threshold_years(),
            acceptable_gap_percent: default_acceptable_gap_percent(),
            intervention_budget_constraint: default_intervention_budget_constraint(),
            max_budget_percent: default_max_budget_percent(),
            target_gender_gap_percent: default_target_gender_gap_percent(),
            max_direct_reports: default_max_direct_reports(),
            high_performer_threshold: default_high_performer_threshold(),
            inequality_budget_percent: default_inequality_budget_percent(),
            market_adjustment_years: default_market_adjustment_years(),
        }
    }
}

impl EngineConfig {
    /// Per-manager budget fraction, converted from percent.
    pub fn manager_budget_fraction(&self) -> f64 {
        self.inequality_budget_percent / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = EngineConfig::default();
        assert_eq!(config.confidence_interval, 0.95);
        assert_eq!(config.market_inflation_rate, 0.025);
        assert_eq!(config.progression_analysis_years, 5);
        assert_eq!(config.convergence_threshold_years, 5);
        assert_eq!(config.acceptable_gap_percent, 5.0);
        assert_eq!(config.intervention_budget_constraint, 0.005);
        assert_eq!(config.max_budget_percent, 0.006);
        assert_eq!(config.target_gender_gap_percent, 0.0);
        assert_eq!(config.max_direct_reports, 6);
        assert_eq!(config.high_performer_threshold, 4.0);
        assert_eq!(config.inequality_budget_percent, 0.5);
        assert_eq!(config.market_adjustment_years, vec![3, 6, 9]);
    }

    #[test]
    fn test_partial_yaml_takes_defaults() {
        let yaml = "confidence_interval: 0.9\nmax_direct_reports: 8\n";
        let config: EngineConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.confidence_interval, 0.9);
        assert_eq!(config.max_direct_reports, 8);
        assert_eq!(config.market_inflation_rate, 0.025);
        assert_eq!(config.high_performer_threshold, 4.0);
    }

    #[test]
    fn test_empty_yaml_is_all_defaults() {
        let config: EngineConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_manager_budget_fraction_converts_percent() {
        let config = EngineConfig::default();
        assert!((config.manager_budget_fraction() - 0.005).abs() < 1e-12);
    }
}
