//! Intervention strategy result models.

use serde::Serialize;

use super::Feasibility;

/// Named remediation strategy variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// One-off adjustments implemented within a quarter.
    ImmediateAdjustment,
    /// Adjustments spread over three years.
    #[serde(rename = "gradual_3_year")]
    Gradual3Year,
    /// Adjustments spread over five years.
    #[serde(rename = "gradual_5_year")]
    Gradual5Year,
    /// No direct spend; rely on market drift.
    NaturalConvergence,
    /// Concentrate spend on the largest gaps.
    TargetedIntervention,
}

impl StrategyKind {
    /// All remediation strategy variants, in generation order.
    pub const ALL: [StrategyKind; 5] = [
        StrategyKind::ImmediateAdjustment,
        StrategyKind::Gradual3Year,
        StrategyKind::Gradual5Year,
        StrategyKind::NaturalConvergence,
        StrategyKind::TargetedIntervention,
    ];

    /// Returns the strategy name as used in result mappings.
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::ImmediateAdjustment => "immediate_adjustment",
            StrategyKind::Gradual3Year => "gradual_3_year",
            StrategyKind::Gradual5Year => "gradual_5_year",
            StrategyKind::NaturalConvergence => "natural_convergence",
            StrategyKind::TargetedIntervention => "targeted_intervention",
        }
    }
}

/// Implementation complexity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImplementationComplexity {
    /// Nothing to implement.
    None,
    /// Straightforward payroll changes.
    Low,
    /// Multi-step rollout.
    Medium,
    /// Organisation-wide programme.
    High,
}

/// How much legal exposure the strategy removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LegalRiskReduction {
    /// Little change to legal exposure.
    Low,
    /// Moderate reduction in exposure.
    Medium,
    /// Substantial reduction in exposure.
    High,
}

/// One modelled remediation strategy.
///
/// A strategy with no qualifying employees is reported with
/// `applicable == false` and a reason instead of an error, because "no
/// strategy needed" is an expected business outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterventionStrategy {
    /// Which variant this is.
    pub kind: StrategyKind,
    /// Whether the strategy applies to the current population.
    pub applicable: bool,
    /// Why the strategy does not apply, when it does not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Years to implement.
    pub timeline_years: f64,
    /// Total direct cost.
    pub total_cost: f64,
    /// Direct cost per year, for multi-year strategies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_cost: Option<f64>,
    /// Cost as a fraction of total payroll.
    pub cost_as_percent_payroll: f64,
    /// Number of employees receiving adjustments.
    pub affected_employees: usize,
    /// Mean adjustment per affected employee.
    pub average_adjustment: f64,
    /// Gender pay gap expected after the strategy completes.
    pub projected_final_gap: f64,
    /// Percentage points of gap closed.
    pub gap_reduction_percent: f64,
    /// Fraction of the budget cap consumed.
    pub budget_utilization: f64,
    /// Feasibility tier.
    pub feasibility: Feasibility,
    /// Implementation complexity tier.
    pub implementation_complexity: ImplementationComplexity,
    /// Legal risk reduction tier.
    pub legal_risk_reduction: LegalRiskReduction,
    /// Human-readable description.
    pub description: String,
}

impl InterventionStrategy {
    /// Builds a non-applicable strategy record with the given reason.
    pub fn not_applicable(kind: StrategyKind, reason: &str) -> Self {
        InterventionStrategy {
            kind,
            applicable: false,
            reason: Some(reason.to_string()),
            timeline_years: 0.0,
            total_cost: 0.0,
            annual_cost: None,
            cost_as_percent_payroll: 0.0,
            affected_employees: 0,
            average_adjustment: 0.0,
            projected_final_gap: 0.0,
            gap_reduction_percent: 0.0,
            budget_utilization: 0.0,
            feasibility: Feasibility::Low,
            implementation_complexity: ImplementationComplexity::None,
            legal_risk_reduction: LegalRiskReduction::Low,
            description: String::new(),
        }
    }
}

/// Four-factor score breakdown for one strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StrategyScores {
    /// Combined weighted score, 0–1.
    pub overall_score: f64,
    /// Achieved gap reduction relative to the maximum possible.
    pub effectiveness_score: f64,
    /// Budget headroom, timeline, and complexity combined.
    pub feasibility_score: f64,
    /// Budget, implementation, and legal risk combined (higher = riskier).
    pub risk_score: f64,
    /// Benefit per unit cost, normalised against payroll.
    pub cost_efficiency_score: f64,
}

/// Scored strategy with its details.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredStrategy {
    /// The score breakdown.
    pub scores: StrategyScores,
    /// The strategy the scores describe.
    pub strategy: InterventionStrategy,
}

/// Confidence tier for a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    /// Overall score above 0.8.
    High,
    /// Overall score above 0.6.
    Medium,
    /// Overall score of 0.6 or less.
    Low,
}

/// Evaluation of all applicable strategies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyEvaluation {
    /// Scored strategies, ranked best first.
    pub ranking: Vec<ScoredStrategy>,
}

impl StrategyEvaluation {
    /// The best-scoring strategy, if any strategy was applicable.
    pub fn top(&self) -> Option<&ScoredStrategy> {
        self.ranking.first()
    }
}

/// Selected strategy with its confidence label.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RecommendedStrategy {
    /// A strategy was selected.
    Selected {
        /// The chosen strategy with its scores.
        choice: ScoredStrategy,
        /// Confidence in the selection.
        confidence_level: ConfidenceLevel,
    },
    /// No strategy was applicable.
    NoViableStrategy {
        /// Why nothing was applicable.
        reason: String,
    },
}

/// Population metrics computed at simulator construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaselineMetrics {
    /// Total employees in the snapshot.
    pub total_employees: usize,
    /// Male employee count.
    pub male_employees: usize,
    /// Female employee count.
    pub female_employees: usize,
    /// Sum of all salaries.
    pub total_payroll: f64,
    /// Median salary across the population.
    pub overall_median_salary: f64,
    /// Median male salary.
    pub male_median_salary: f64,
    /// Median female salary.
    pub female_median_salary: f64,
    /// Gender pay gap as a percentage of the male median.
    pub gender_pay_gap_percent: f64,
    /// Gender pay gap in currency units.
    pub gender_pay_gap_amount: f64,
}

/// A female employee paid below the male median for her level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnderpaidEmployee {
    /// The employee identifier.
    pub employee_id: String,
    /// Job-grade level.
    pub level: u8,
    /// Current salary.
    pub current_salary: f64,
    /// Male median salary at the same level.
    pub male_level_median: f64,
    /// Gap to the male median in currency units.
    pub gap_amount: f64,
    /// Gap as a percentage of the male median.
    pub gap_percent: f64,
}

/// One phase in an implementation plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImplementationPhase {
    /// Phase number, starting at 1.
    pub phase: u32,
    /// Month the phase completes in.
    pub timeline_months: u32,
    /// What happens in the phase.
    pub activity: String,
}

/// Return-on-investment estimate for a strategy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoiAnalysis {
    /// Total direct cost.
    pub total_investment: f64,
    /// Estimated annual benefits from retention and productivity.
    pub annual_benefits: f64,
    /// Years to recover the investment; infinite when benefits are zero.
    pub payback_years: f64,
    /// Three-year return relative to the investment.
    pub roi_3_year: f64,
    /// Retention component of the annual benefits.
    pub retention_benefit: f64,
    /// Productivity component of the annual benefits.
    pub productivity_benefit: f64,
}

/// Implementation risk flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImplementationRisk {
    /// More than 80% of the budget cap consumed.
    HighBudgetUtilization,
    /// More than 30% of the population affected.
    LargeEmployeeImpact,
    /// Timeline shorter than six months.
    AggressiveTimeline,
    /// High implementation complexity.
    ImplementationComplexity,
}

/// Overall risk level label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Three or more risk flags.
    High,
    /// One or two risk flags.
    Medium,
    /// No risk flags.
    Low,
}

/// Implementation risk assessment for a strategy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    /// Flags raised for the strategy.
    pub risk_factors: Vec<ImplementationRisk>,
    /// Overall risk level from the flag count.
    pub overall_risk_level: RiskLevel,
    /// Suggested mitigations, one per flag.
    pub mitigation_strategies: Vec<String>,
}

/// Complete gender-gap remediation analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemediationAnalysis {
    /// Baseline metrics the analysis started from.
    pub current_state: BaselineMetrics,
    /// Female employees below the male median for their level.
    pub affected_female_employees: usize,
    /// Target gap percentage.
    pub target_gap_percent: f64,
    /// Maximum timeline in years.
    pub max_timeline_years: u32,
    /// Budget cap as a fraction of payroll.
    pub budget_constraint_percent: f64,
    /// Budget cap in currency units.
    pub budget_constraint_amount: f64,
    /// All modelled strategies, applicable or not.
    pub strategies: Vec<InterventionStrategy>,
    /// Scored ranking of applicable strategies.
    pub evaluation: StrategyEvaluation,
    /// The selected strategy or the no-viable-strategy outcome.
    pub recommended: RecommendedStrategy,
    /// Implementation phases for the selected strategy.
    pub implementation_plan: Vec<ImplementationPhase>,
    /// Return-on-investment estimate for the selected strategy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roi_analysis: Option<RoiAnalysis>,
    /// Implementation risk assessment for the selected strategy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_assessment: Option<RiskAssessment>,
}

/// Named equity intervention approach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EquityApproachKind {
    /// Address every equity dimension at once.
    ComprehensiveEquity,
    /// Concentrate on high-impact adjustments.
    TargetedAdjustment,
    /// Spread improvements over a longer horizon.
    GradualRemediation,
    /// Tie adjustments to development programmes.
    PerformanceBased,
}

impl EquityApproachKind {
    /// All equity approaches, in generation order.
    pub const ALL: [EquityApproachKind; 4] = [
        EquityApproachKind::ComprehensiveEquity,
        EquityApproachKind::TargetedAdjustment,
        EquityApproachKind::GradualRemediation,
        EquityApproachKind::PerformanceBased,
    ];
}

/// One modelled equity intervention approach.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquityApproach {
    /// Which approach this is.
    pub kind: EquityApproachKind,
    /// Human-readable description.
    pub description: String,
    /// Total direct investment.
    pub total_investment: f64,
    /// Number of employees affected.
    pub affected_employees: usize,
    /// Years to implement.
    pub timeline_years: u32,
    /// Expected gender-gap reduction in percentage points.
    pub gender_gap_reduction: f64,
    /// Expected overall equity score after completion, 0–100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_equity_score: Option<f64>,
    /// Implementation phases, where the approach defines them.
    pub implementation_phases: Vec<String>,
}

/// Result of modelling equity intervention approaches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquityInterventionAnalysis {
    /// The approach family the caller asked to model.
    pub intervention_type: EquityApproachKind,
    /// Baseline metrics the analysis started from.
    pub baseline_metrics: BaselineMetrics,
    /// All modelled approaches.
    pub approaches: Vec<EquityApproach>,
    /// Selected approach.
    pub optimal_approach: EquityApproach,
    /// Selection score of the optimal approach.
    pub selection_score: f64,
    /// Scores of the alternatives, keyed by approach.
    pub alternatives: Vec<(EquityApproachKind, f64)>,
    /// Budget cap as a fraction of payroll.
    pub budget_constraint_percent: f64,
    /// Budget cap in currency units.
    pub budget_constraint_amount: f64,
    /// Target years to achieve equity.
    pub timeline_years: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_kind_names() {
        assert_eq!(StrategyKind::ImmediateAdjustment.as_str(), "immediate_adjustment");
        assert_eq!(StrategyKind::Gradual3Year.as_str(), "gradual_3_year");
        assert_eq!(StrategyKind::Gradual5Year.as_str(), "gradual_5_year");
    }

    #[test]
    fn test_not_applicable_strategy_carries_reason() {
        let strategy = InterventionStrategy::not_applicable(
            StrategyKind::TargetedIntervention,
            "No underpaid female employees identified",
        );
        assert!(!strategy.applicable);
        assert_eq!(
            strategy.reason.as_deref(),
            Some("No underpaid female employees identified")
        );
        assert_eq!(strategy.total_cost, 0.0);
    }

    #[test]
    fn test_recommended_strategy_serializes_outcome_tag() {
        let recommended = RecommendedStrategy::NoViableStrategy {
            reason: "No applicable strategies found".to_string(),
        };
        let json = serde_json::to_value(&recommended).unwrap();
        assert_eq!(json["outcome"], "no_viable_strategy");
    }
}
