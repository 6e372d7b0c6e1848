//! Convergence analysis result models.

use serde::Serialize;

use super::{Gender, PerformanceRating};

/// Qualitative feasibility tier for a convergence or intervention approach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Feasibility {
    /// Unlikely within an acceptable horizon.
    Low,
    /// Achievable with sustained effort.
    Medium,
    /// Comfortably achievable.
    High,
}

/// Named convergence strategy a timeline was computed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConvergenceStrategy {
    /// Realistic performance progression, no direct intervention.
    NaturalProgression,
    /// Optimistic performance progression.
    PerformanceAcceleration,
    /// Direct salary intervention.
    DirectIntervention,
}

/// Timeline for one convergence scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvergenceScenario {
    /// Years until the projected salary first reaches the level median.
    pub years_to_median: f64,
    /// Strategy the timeline was computed under.
    pub strategy: ConvergenceStrategy,
    /// Projected salary at the convergence year.
    pub projected_salary_at_convergence: f64,
    /// Growth rate required or implied by the scenario.
    pub required_growth_rate: f64,
    /// Feasibility tier for this scenario.
    pub feasibility: Feasibility,
    /// One-off adjustment applied up front, for intervention scenarios.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub immediate_adjustment_amount: Option<f64>,
    /// Direct cost of the intervention, for intervention scenarios.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intervention_cost: Option<f64>,
}

/// Recommended convergence action from the decision table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConvergenceAction {
    /// Gap or timeline severe enough for direct intervention now.
    ImmediateIntervention,
    /// Invest in accelerating performance.
    PerformanceAcceleration,
    /// Natural progression will close the gap soon enough.
    MonitorNaturalProgression,
    /// A measured intervention is warranted.
    ModerateIntervention,
}

/// Feasibility assessment across the three convergence scenarios.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvergenceFeasibility {
    /// Feasibility of natural convergence.
    pub natural: Feasibility,
    /// Feasibility of accelerated convergence.
    pub accelerated: Feasibility,
    /// Direct intervention is always the most certain approach.
    pub intervention_certainty: Feasibility,
    /// Strategy with the shortest years-to-median.
    pub recommended_approach: ConvergenceStrategy,
}

/// Convergence analysis result for one employee.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConvergenceResult {
    /// Employee is already at or above the level median.
    AboveMedian {
        /// The employee analysed.
        employee_id: String,
        /// Signed gap above the median as a percentage of the median.
        current_gap_percent: f64,
        /// Why no action is required.
        rationale: String,
    },
    /// Employee is below the level median.
    BelowMedian {
        /// The employee analysed.
        employee_id: String,
        /// Gap to the median in currency units.
        current_gap_amount: f64,
        /// Gap as a percentage of the median.
        current_gap_percent: f64,
        /// Natural convergence timeline.
        natural: ConvergenceScenario,
        /// Accelerated convergence timeline.
        accelerated: ConvergenceScenario,
        /// Intervention convergence timeline.
        intervention: ConvergenceScenario,
        /// Action from the decision table.
        recommended_action: ConvergenceAction,
        /// Cross-scenario feasibility assessment.
        convergence_feasibility: ConvergenceFeasibility,
    },
}

impl ConvergenceResult {
    /// Returns true if the employee was already at or above the median.
    pub fn is_above_median(&self) -> bool {
        matches!(self, ConvergenceResult::AboveMedian { .. })
    }
}

/// One below-median employee with gap details.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BelowMedianEmployee {
    /// The employee identifier.
    pub employee_id: String,
    /// Job-grade level.
    pub level: u8,
    /// Current salary.
    pub salary: f64,
    /// Gender category.
    pub gender: Gender,
    /// Current performance rating.
    pub performance_rating: PerformanceRating,
    /// Median salary for the level.
    pub level_median: f64,
    /// Gap to the median in currency units.
    pub gap_amount: f64,
    /// Gap as a percentage of the median.
    pub gap_percent: f64,
    /// Tenure in years.
    pub tenure_years: f64,
}

/// Summary statistics over a set of below-median employees.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BelowMedianStatistics {
    /// Number of below-median employees.
    pub count: usize,
    /// Mean gap amount.
    pub average_gap_amount: f64,
    /// Median gap amount.
    pub median_gap_amount: f64,
    /// Mean gap percentage.
    pub average_gap_percent: f64,
    /// Median gap percentage.
    pub median_gap_percent: f64,
    /// Sum of all gap amounts.
    pub total_gap_amount: f64,
    /// Largest individual gap amount.
    pub max_gap_amount: f64,
    /// Smallest individual gap amount.
    pub min_gap_amount: f64,
}

/// Per-gender below-median pattern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenderPattern {
    /// Number of below-median employees of this gender.
    pub count: usize,
    /// Mean gap percentage for this gender.
    pub average_gap_percent: f64,
    /// Median gap percentage for this gender.
    pub median_gap_percent: f64,
}

/// Gender breakdown of below-median employees.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenderAnalysis {
    /// Pattern for male employees.
    pub male: GenderPattern,
    /// Pattern for female employees.
    pub female: GenderPattern,
    /// Female minus male average gap percent, when both groups are present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender_disparity: Option<f64>,
    /// Whether the absolute disparity exceeds 5 percentage points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disparity_significant: Option<bool>,
}

/// Result of a population-wide below-median scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BelowMedianAnalysis {
    /// Total employees scanned.
    pub total_employees: usize,
    /// Number of qualifying below-median employees.
    pub below_median_count: usize,
    /// Qualifying employees as a percentage of the population.
    pub below_median_percent: f64,
    /// The qualifying employees, in population order.
    pub employees: Vec<BelowMedianEmployee>,
    /// Summary statistics over the qualifying employees.
    pub summary_statistics: BelowMedianStatistics,
    /// Gender breakdown, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender_analysis: Option<GenderAnalysis>,
}

/// Convergence counts for one projected year under one strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearConvergence {
    /// Year index, starting at 1.
    pub year: u32,
    /// Employees still below the acceptable-gap threshold.
    pub remaining_below_median: usize,
    /// Employees converged by this year.
    pub converged: usize,
    /// Converged employees as a fraction of the initial below-median set.
    pub convergence_rate_year: f64,
}

/// Projection of convergence counts for one strategy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendProjection {
    /// Year-by-year convergence counts.
    pub timeline: Vec<YearConvergence>,
    /// Employees still below median at the horizon.
    pub final_below_median_count: usize,
    /// Percentage of the initial below-median set converged by the horizon.
    pub convergence_rate: f64,
}

/// Distribution of gap sizes across the below-median population.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapDistribution {
    /// Employees below median at all.
    pub total_below_median: usize,
    /// Gaps of at most 5%.
    pub small_gaps: usize,
    /// Gaps over 5% and at most 15%.
    pub medium_gaps: usize,
    /// Gaps over 15% and at most 25%.
    pub large_gaps: usize,
    /// Gaps over 25%.
    pub severe_gaps: usize,
    /// Mean gap percentage.
    pub average_gap_percent: f64,
    /// Median gap percentage.
    pub median_gap_percent: f64,
}

/// Peak convergence speed for one strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConvergenceVelocity {
    /// Highest single-year convergence rate, as a percentage.
    pub peak_velocity_percent_per_year: f64,
    /// Year the peak occurred in.
    pub peak_year: u32,
    /// Convergence rate at the horizon.
    pub final_convergence_rate: f64,
}

/// Effectiveness of intervention relative to natural progression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterventionImpact {
    /// Convergence rate under natural progression.
    pub natural_convergence_rate: f64,
    /// Convergence rate under direct intervention.
    pub intervention_convergence_rate: f64,
    /// Absolute improvement in percentage points.
    pub absolute_improvement: f64,
    /// Improvement relative to the natural rate, as a percentage.
    pub relative_improvement_percent: f64,
    /// Qualitative effectiveness tier.
    pub intervention_effectiveness: EffectivenessTier,
}

/// Qualitative effectiveness tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectivenessTier {
    /// Relative improvement above 50%.
    High,
    /// Relative improvement above 20%.
    Medium,
    /// Relative improvement of 20% or less.
    Low,
}

/// Population-level convergence trend analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulationTrends {
    /// Number of years projected.
    pub projection_years: u32,
    /// Below-median scan the projection started from (zero gap threshold).
    pub current_state: BelowMedianAnalysis,
    /// Projection under natural 5% annual growth.
    pub natural: TrendProjection,
    /// Projection under accelerated 8% annual growth.
    pub accelerated: TrendProjection,
    /// Projection under intervention 12% annual growth.
    pub intervention: TrendProjection,
    /// Gap-size distribution across the below-median population.
    pub gap_distribution: GapDistribution,
    /// Peak convergence speed per strategy.
    pub convergence_velocity: Vec<(ConvergenceStrategy, ConvergenceVelocity)>,
    /// Intervention effectiveness relative to natural progression.
    pub intervention_impact: InterventionImpact,
    /// Rule-based strategic recommendations.
    pub strategic_recommendations: Vec<String>,
}
