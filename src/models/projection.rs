//! Projection result models.
//!
//! This module contains the [`ScenarioProjection`] type and the analysis
//! records produced alongside it by the progression simulator.

use serde::Serialize;
use std::collections::BTreeMap;

use super::{PerformanceRating, Quartile};

/// A named projection scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// Cautious performance assumptions.
    Conservative,
    /// Most likely performance assumptions.
    Realistic,
    /// Favourable performance assumptions.
    Optimistic,
}

impl Scenario {
    /// The three canonical scenarios, always produced together by default.
    pub const CANONICAL: [Scenario; 3] = [
        Scenario::Conservative,
        Scenario::Realistic,
        Scenario::Optimistic,
    ];

    /// Returns the scenario name as used in result mappings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::Conservative => "conservative",
            Scenario::Realistic => "realistic",
            Scenario::Optimistic => "optimistic",
        }
    }
}

/// Multi-year salary projection for one employee under one scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioProjection {
    /// Yearly salaries, starting with the current salary (length years + 1).
    pub salary_progression: Vec<f64>,
    /// Yearly performance ratings driving the salary path (length years).
    pub performance_path: Vec<PerformanceRating>,
    /// Salary at the end of the projection horizon.
    pub final_salary: f64,
    /// Total increase over the horizon.
    pub total_increase: f64,
    /// Compound annual growth rate over the horizon.
    pub cagr: f64,
    /// Number of years projected.
    pub years_projected: u32,
}

/// Position relative to the level median, current and projected.
///
/// The projected comparison assumes the median itself stays constant over
/// the horizon, a deliberately conservative simplification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MedianComparison {
    /// Whether the employee is currently above or below the level median.
    pub current_status: MedianStatus,
    /// Signed gap between current salary and the level median.
    pub current_gap_amount: f64,
    /// Signed gap as a percentage of the level median.
    pub current_gap_percent: f64,
    /// Status under the realistic projection at the horizon.
    pub projected_status: MedianStatus,
    /// Signed gap between the realistic final salary and the level median.
    pub projected_gap_amount: f64,
    /// Projected gap as a percentage of the level median.
    pub projected_gap_percent: f64,
}

/// Above/below-median status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MedianStatus {
    /// Salary at or above the comparison median.
    AboveMedian,
    /// Salary below the comparison median.
    BelowMedian,
}

/// Position within the level's salary range, current and projected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketPosition {
    /// Current percentile within the level range, 0–100.
    pub current_percentile: f64,
    /// Projected percentile at the horizon (range assumed constant).
    pub projected_percentile: f64,
    /// Current quartile within the level range.
    pub current_quartile: Quartile,
    /// Projected quartile at the horizon.
    pub projected_quartile: Quartile,
}

/// Risk factors identified for an employee's salary progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    /// At least one "Not met" year in the realistic performance path.
    PerformanceConsistency,
    /// Currently below the level median.
    BelowMedianSalary,
    /// Realistic CAGR below 2.5% per year.
    LowGrowthTrajectory,
    /// Current market percentile below 25.
    LowMarketPosition,
    /// More than 5 years tenure while still at level 3 or below.
    CareerProgressionStagnation,
}

/// Primary action recommended for an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryAction {
    /// No immediate action; track through regular cycles.
    MonitorProgress,
    /// Review salary against the level median.
    SalaryAdjustmentReview,
    /// Structured performance improvement plan.
    PerformanceImprovementPlan,
    /// Career path and promotion discussion.
    CareerDevelopmentDiscussion,
    /// Plan to accelerate salary growth.
    GrowthAccelerationPlan,
    /// Retain and recognise a strong performer.
    RecognitionAndRetention,
}

/// Secondary supporting actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SecondaryAction {
    /// Benchmark salary against market data.
    MarketSalaryBenchmarking,
    /// Targeted skill development.
    SkillDevelopment,
    /// Pair with a mentor.
    MentoringAssignment,
    /// Assess readiness for promotion.
    LevelPromotionAssessment,
    /// Broaden the current role.
    RoleExpansion,
    /// Clarify performance expectations.
    PerformanceExpectationsClarification,
    /// Stretch assignments for growth.
    StretchAssignments,
    /// Leadership development track.
    LeadershipDevelopment,
}

/// When the recommended action should happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionTimeline {
    /// Act before the next review cycle.
    Immediate,
    /// Act at the next review cycle.
    NextReviewCycle,
}

/// Actionable recommendation derived from projection analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// The single most important action.
    pub primary_action: PrimaryAction,
    /// Supporting actions, in the order they were triggered.
    pub secondary_actions: Vec<SecondaryAction>,
    /// When to act.
    pub timeline: ActionTimeline,
    /// Human-readable rationale for the primary action.
    pub rationale: String,
}

/// Snapshot of the employee state the projection started from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentState {
    /// Job-grade level.
    pub level: u8,
    /// Current salary.
    pub salary: f64,
    /// Current performance rating.
    pub performance_rating: PerformanceRating,
    /// Tenure in years used for path adaptation.
    pub years_at_company: f64,
}

/// Complete progression report for one employee.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressionReport {
    /// The employee the report is for.
    pub employee_id: String,
    /// State the projection started from.
    pub current_state: CurrentState,
    /// Per-scenario projections, keyed by scenario.
    pub projections: BTreeMap<Scenario, ScenarioProjection>,
    /// Confidence interval over all projected salaries across scenarios.
    pub confidence_interval_final: (f64, f64),
    /// Position relative to the level median.
    pub median_comparison: MedianComparison,
    /// Position within the level salary range.
    pub market_position: MarketPosition,
    /// Risk factors present, in scale order.
    pub risk_factors: Vec<RiskFactor>,
    /// Recommended actions.
    pub recommendation: Recommendation,
}

/// Summary row produced when analysing several employees at once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressionSummary {
    /// The employee the summary is for.
    pub employee_id: String,
    /// Current salary.
    pub current_salary: f64,
    /// Final salary under the realistic scenario.
    pub projected_salary_realistic: f64,
    /// CAGR under the realistic scenario.
    pub cagr_realistic: f64,
    /// Current median status.
    pub median_status: MedianStatus,
    /// Primary recommended action.
    pub key_recommendation: PrimaryAction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_names() {
        assert_eq!(Scenario::Conservative.as_str(), "conservative");
        assert_eq!(Scenario::Realistic.as_str(), "realistic");
        assert_eq!(Scenario::Optimistic.as_str(), "optimistic");
    }

    #[test]
    fn test_scenario_serialization_is_snake_case() {
        assert_eq!(
            serde_json::to_string(&Scenario::Conservative).unwrap(),
            "\"conservative\""
        );
        assert_eq!(
            serde_json::to_string(&RiskFactor::BelowMedianSalary).unwrap(),
            "\"below_median_salary\""
        );
        assert_eq!(
            serde_json::to_string(&PrimaryAction::RecognitionAndRetention).unwrap(),
            "\"recognition_and_retention\""
        );
    }

    #[test]
    fn test_canonical_scenarios_are_three() {
        assert_eq!(Scenario::CANONICAL.len(), 3);
    }
}
