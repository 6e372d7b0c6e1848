//! Manager allocation and policy summary models.

use serde::Serialize;

use super::{EmployeeRecord, Gender, PerformanceRating};

/// A manager and the team reporting to them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManagerTeam {
    /// Identifier of the manager.
    pub manager_id: String,
    /// Number of direct reports.
    pub team_size: usize,
    /// Direct reports, in population order.
    pub team: Vec<EmployeeRecord>,
    /// Sum of team salaries.
    pub team_payroll: f64,
    /// Intervention budget, team payroll times the configured percent.
    pub intervention_budget: f64,
    /// The configured budget fraction.
    pub budget_percent: f64,
    /// Whether the team is within the direct-reports cap.
    pub compliant_team_size: bool,
    /// How many reports over the cap, zero if compliant.
    pub over_limit_by: usize,
    /// The manager's own level, when the manager appears in the population.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_level: Option<u8>,
}

/// Priority tier for a candidate intervention, 1 is highest.
pub type PriorityTier = u8;

/// One candidate intervention for a team member.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateIntervention {
    /// The employee the candidate targets.
    pub employee_id: String,
    /// Priority tier, 1 (below-median high performer) to 4 (standard).
    pub priority: PriorityTier,
    /// Why the priority was assigned.
    pub priority_reason: String,
    /// Below the (level, gender) median.
    pub is_below_median: bool,
    /// Rating at or above the high-performer threshold.
    pub is_high_performer: bool,
    /// Current salary.
    pub current_salary: f64,
    /// Job-grade level.
    pub level: u8,
    /// Gender category.
    pub gender: Gender,
    /// Current performance rating.
    pub performance_rating: PerformanceRating,
    /// Median salary the candidate is compared against.
    pub target_salary: f64,
    /// Gap to the target salary, zero if at or above.
    pub gap_to_median: f64,
    /// Adjustment the allocator will try to fund.
    pub recommended_adjustment: f64,
    /// Share of the gap the adjustment closes, as a percentage.
    pub gap_closure_percent: f64,
    /// Adjustment as a percentage of current salary.
    pub salary_increase_percent: f64,
    /// Combined impact score used for within-priority ordering.
    pub intervention_impact: f64,
    /// The manager budget available when the candidate was scored.
    pub available_budget: f64,
}

/// Funded interventions for one manager.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManagerAllocation {
    /// Identifier of the manager.
    pub manager_id: String,
    /// The manager's full intervention budget.
    pub total_budget: f64,
    /// Budget actually allocated.
    pub allocated_budget: f64,
    /// Budget left unallocated.
    pub remaining_budget: f64,
    /// Allocated over total budget, zero when the budget is zero.
    pub budget_utilization: f64,
    /// Candidates actually funded, in selection order.
    pub selected_interventions: Vec<CandidateIntervention>,
    /// Number of funded candidates.
    pub employees_affected: usize,
    /// Mean funded adjustment.
    pub average_adjustment: f64,
}

/// Policy compliance roll-up across managers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyCompliance {
    /// Number of managers.
    pub total_managers: usize,
    /// Managers within the direct-reports cap.
    pub compliant_managers: usize,
    /// Managers over the cap.
    pub over_limit_managers: usize,
    /// Compliant managers as a percentage.
    pub compliance_rate: f64,
    /// The configured direct-reports cap.
    pub max_direct_reports_policy: usize,
    /// The configured budget percentage.
    pub budget_percent_policy: f64,
}

/// Budget roll-up across managers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetAnalysis {
    /// Sum of all manager budgets.
    pub total_available_budget: f64,
    /// Sum of all allocated budgets.
    pub total_allocated_budget: f64,
    /// Budget left unallocated.
    pub total_remaining_budget: f64,
    /// Allocated over available, as a percentage.
    pub budget_utilization_percent: f64,
}

/// Distribution of funded interventions across priority tiers.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PriorityDistribution {
    /// Below-median high performers funded.
    pub priority_1_below_median_high_performers: usize,
    /// Below-median employees funded.
    pub priority_2_below_median: usize,
    /// High performers funded.
    pub priority_3_high_performers: usize,
    /// Standard employees funded.
    pub priority_4_standard: usize,
}

/// Employee impact roll-up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InterventionImpactSummary {
    /// Employees funded across all managers.
    pub total_employees_affected: usize,
    /// Employees in the population.
    pub total_population: usize,
    /// Funded employees as a percentage of the population.
    pub intervention_rate: f64,
    /// Funded interventions by priority tier.
    pub priority_distribution: PriorityDistribution,
}

/// Category of a policy recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyRecommendationKind {
    /// Team sizes need restructuring.
    OrganizationalStructure,
    /// Budget methodology needs adjusting.
    BudgetOptimization,
    /// High-priority employees left unaddressed.
    InterventionPrioritization,
}

/// Priority label for a policy recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationPriority {
    /// Act in the current cycle.
    High,
    /// Act in an upcoming cycle.
    Medium,
}

/// A rule-based policy recommendation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyRecommendation {
    /// Recommendation category.
    pub kind: PolicyRecommendationKind,
    /// Priority of acting on it.
    pub priority: RecommendationPriority,
    /// What to do.
    pub recommendation: String,
    /// Why to do it.
    pub rationale: String,
}

/// Comprehensive policy compliance and impact summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicySummary {
    /// Compliance roll-up.
    pub policy_compliance: PolicyCompliance,
    /// Budget roll-up.
    pub budget_analysis: BudgetAnalysis,
    /// Employee impact roll-up.
    pub intervention_impact: InterventionImpactSummary,
    /// Rule-based recommendations.
    pub recommendations: Vec<PolicyRecommendation>,
}
