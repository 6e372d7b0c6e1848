//! Intervention strategy simulation.
//!
//! The [`InterventionStrategySimulator`] models competing remediation
//! strategies for the gender pay gap against a payroll-percentage budget
//! cap, scores them on effectiveness, feasibility, risk, and cost
//! efficiency, and selects an optimal strategy.

mod equity;
mod scoring;

pub use equity::{
    EquityAnalysis, GenderByLevelEquity, GenderEquity, LevelEquity, PayGapSignificance,
    PriorityIntervention, PriorityInterventionKind, TenureBracketEquity,
};
pub use scoring::{evaluate_strategies, score_strategy, select_recommended};

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::models::{
    median, BaselineMetrics, EmployeeRecord, Feasibility, Gender, ImplementationComplexity,
    ImplementationPhase, ImplementationRisk, InterventionStrategy, LegalRiskReduction,
    RecommendedStrategy, RemediationAnalysis, RiskAssessment, RiskLevel, RoiAnalysis,
    StrategyKind, UnderpaidEmployee,
};

use std::collections::BTreeMap;

/// Months an immediate adjustment takes, expressed in years.
const IMMEDIATE_TIMELINE_YEARS: f64 = 0.25;

/// Assumed natural gap reduction per year, in percentage points.
const NATURAL_ANNUAL_GAP_REDUCTION: f64 = 0.5;

/// Share of each gap closed by the targeted strategy.
const TARGETED_GAP_CLOSURE: f64 = 0.75;

/// Simulates management intervention strategies for salary equity.
#[derive(Debug, Clone)]
pub struct InterventionStrategySimulator {
    population: Vec<EmployeeRecord>,
    baseline: BaselineMetrics,
    config: EngineConfig,
    as_of: NaiveDate,
}

impl InterventionStrategySimulator {
    /// Creates a simulator over a population snapshot, computing baseline
    /// gender-gap metrics up front.
    ///
    /// `as_of` is the reference date used to derive tenure from hire
    /// dates, supplied by the caller so runs are reproducible.
    pub fn new(population: &[EmployeeRecord], config: EngineConfig, as_of: NaiveDate) -> Self {
        let baseline = calculate_baseline_metrics(population);

        info!(
            employees = population.len(),
            gender_pay_gap_percent = baseline.gender_pay_gap_percent,
            total_payroll = baseline.total_payroll,
            "initialized intervention strategy simulator"
        );

        InterventionStrategySimulator {
            population: population.to_vec(),
            baseline,
            config,
            as_of,
        }
    }

    /// Baseline metrics computed at construction.
    pub fn baseline(&self) -> &BaselineMetrics {
        &self.baseline
    }

    /// Models gender pay gap remediation strategies under a budget cap.
    ///
    /// Five strategy variants are generated independently, scored, and
    /// ranked; the best applicable strategy becomes the recommendation. A
    /// population with no qualifying employees yields non-applicable
    /// strategy records and a no-viable-strategy outcome rather than an
    /// error.
    pub fn model_gender_gap_remediation(
        &self,
        target_gap_percent: f64,
        max_years: u32,
        budget_constraint: f64,
    ) -> EngineResult<RemediationAnalysis> {
        info!(
            current_gap = self.baseline.gender_pay_gap_percent,
            target_gap_percent,
            budget_constraint,
            "modeling gender gap remediation"
        );

        let underpaid = self.identify_underpaid_female_employees();

        let strategies = vec![
            self.immediate_adjustment_strategy(&underpaid, target_gap_percent, budget_constraint),
            self.gradual_strategy(&underpaid, target_gap_percent, 3, budget_constraint),
            self.gradual_strategy(&underpaid, target_gap_percent, 5, budget_constraint),
            self.natural_convergence_strategy(target_gap_percent, max_years),
            self.targeted_intervention_strategy(&underpaid, budget_constraint),
        ];

        let evaluation = evaluate_strategies(
            &strategies,
            self.baseline.gender_pay_gap_percent,
            budget_constraint,
            self.baseline.total_payroll,
        );
        let recommended = select_recommended(&evaluation);

        let (implementation_plan, roi_analysis, risk_assessment) = match &recommended {
            RecommendedStrategy::Selected { choice, .. } => (
                self.implementation_plan(&choice.strategy),
                Some(self.roi_analysis(&choice.strategy)),
                Some(self.assess_implementation_risks(&choice.strategy)),
            ),
            RecommendedStrategy::NoViableStrategy { .. } => (Vec::new(), None, None),
        };

        Ok(RemediationAnalysis {
            current_state: self.baseline.clone(),
            affected_female_employees: underpaid.len(),
            target_gap_percent,
            max_timeline_years: max_years,
            budget_constraint_percent: budget_constraint,
            budget_constraint_amount: self.baseline.total_payroll * budget_constraint,
            strategies,
            evaluation,
            recommended,
            implementation_plan,
            roi_analysis,
            risk_assessment,
        })
    }

    /// Identifies female employees earning below the male median for their
    /// level, sorted by gap amount, largest first.
    ///
    /// Levels without employees of both genders are skipped: there is no
    /// same-level male benchmark to compare against.
    pub fn identify_underpaid_female_employees(&self) -> Vec<UnderpaidEmployee> {
        let mut underpaid = Vec::new();

        let mut levels: Vec<u8> = self.population.iter().map(|e| e.level).collect();
        levels.sort_unstable();
        levels.dedup();

        for level in levels {
            let male_salaries: Vec<f64> = self
                .population
                .iter()
                .filter(|e| e.level == level && e.gender == Gender::Male)
                .map(|e| e.salary)
                .collect();
            let females: Vec<&EmployeeRecord> = self
                .population
                .iter()
                .filter(|e| e.level == level && e.gender == Gender::Female)
                .collect();

            if male_salaries.is_empty() || females.is_empty() {
                debug!(level, "skipping level - insufficient gender data");
                continue;
            }

            let male_median = median(&male_salaries);

            for employee in females {
                if employee.salary < male_median {
                    let gap_amount = male_median - employee.salary;
                    underpaid.push(UnderpaidEmployee {
                        employee_id: employee.employee_id.clone(),
                        level,
                        current_salary: employee.salary,
                        male_level_median: male_median,
                        gap_amount,
                        gap_percent: (gap_amount / male_median) * 100.0,
                    });
                }
            }
        }

        underpaid.sort_by(|a, b| b.gap_amount.total_cmp(&a.gap_amount));

        debug!(count = underpaid.len(), "identified underpaid female employees");
        underpaid
    }

    /// Immediate salary adjustments scaled to the target gap and clamped
    /// to the budget cap.
    fn immediate_adjustment_strategy(
        &self,
        underpaid: &[UnderpaidEmployee],
        target_gap_percent: f64,
        budget_constraint: f64,
    ) -> InterventionStrategy {
        if underpaid.is_empty() {
            return InterventionStrategy::not_applicable(
                StrategyKind::ImmediateAdjustment,
                "No underpaid female employees identified",
            );
        }

        let current_gap = self.baseline.gender_pay_gap_percent;
        let total_adjustment_needed: f64 = underpaid.iter().map(|e| e.gap_amount).sum();

        let target_adjustment_factor = if current_gap > 0.0 {
            ((current_gap - target_gap_percent) / current_gap).max(0.0)
        } else {
            0.0
        };

        let mut total_cost = total_adjustment_needed * target_adjustment_factor;
        let budget_limit = self.baseline.total_payroll * budget_constraint;

        let actual_gap_reduction = if total_cost > budget_limit {
            let scale = budget_limit / total_cost;
            total_cost = budget_limit;
            current_gap * target_adjustment_factor * scale
        } else {
            current_gap * target_adjustment_factor
        };

        InterventionStrategy {
            kind: StrategyKind::ImmediateAdjustment,
            applicable: true,
            reason: None,
            timeline_years: IMMEDIATE_TIMELINE_YEARS,
            total_cost,
            annual_cost: None,
            cost_as_percent_payroll: total_cost / self.baseline.total_payroll,
            affected_employees: underpaid.len(),
            average_adjustment: total_cost / underpaid.len() as f64,
            projected_final_gap: current_gap - actual_gap_reduction,
            gap_reduction_percent: actual_gap_reduction,
            budget_utilization: if budget_limit > 0.0 {
                total_cost / budget_limit
            } else {
                0.0
            },
            feasibility: if total_cost <= budget_limit {
                Feasibility::High
            } else {
                Feasibility::Medium
            },
            implementation_complexity: ImplementationComplexity::Low,
            legal_risk_reduction: LegalRiskReduction::High,
            description: "Immediate salary adjustments to reduce gender pay gap".to_string(),
        }
    }

    /// The immediate-adjustment cost spread evenly across several years,
    /// re-clamped to an annual budget slice.
    fn gradual_strategy(
        &self,
        underpaid: &[UnderpaidEmployee],
        target_gap_percent: f64,
        years: u32,
        budget_constraint: f64,
    ) -> InterventionStrategy {
        let kind = if years == 3 {
            StrategyKind::Gradual3Year
        } else {
            StrategyKind::Gradual5Year
        };

        if underpaid.is_empty() {
            return InterventionStrategy::not_applicable(
                kind,
                "No underpaid female employees identified",
            );
        }

        let immediate =
            self.immediate_adjustment_strategy(underpaid, target_gap_percent, budget_constraint);

        let total_cost = immediate.total_cost;
        let annual_cost = total_cost / f64::from(years);
        let annual_budget_limit =
            self.baseline.total_payroll * budget_constraint / f64::from(years);

        let feasible_annual_cost = annual_cost.min(annual_budget_limit);
        let actual_total_cost = feasible_annual_cost * f64::from(years);
        let scale = if total_cost > 0.0 {
            actual_total_cost / total_cost
        } else {
            1.0
        };

        let budget_cap = self.baseline.total_payroll * budget_constraint;

        InterventionStrategy {
            kind,
            applicable: true,
            reason: None,
            timeline_years: f64::from(years),
            total_cost: actual_total_cost,
            annual_cost: Some(feasible_annual_cost),
            cost_as_percent_payroll: actual_total_cost / self.baseline.total_payroll,
            affected_employees: immediate.affected_employees,
            average_adjustment: if immediate.affected_employees > 0 {
                actual_total_cost / immediate.affected_employees as f64
            } else {
                0.0
            },
            projected_final_gap: self.baseline.gender_pay_gap_percent
                - immediate.gap_reduction_percent * scale,
            gap_reduction_percent: immediate.gap_reduction_percent * scale,
            budget_utilization: if budget_cap > 0.0 {
                actual_total_cost / budget_cap
            } else {
                0.0
            },
            feasibility: if (feasible_annual_cost - annual_cost).abs() < f64::EPSILON {
                Feasibility::High
            } else {
                Feasibility::Medium
            },
            implementation_complexity: ImplementationComplexity::Medium,
            legal_risk_reduction: LegalRiskReduction::Medium,
            description: format!("Gradual salary adjustments over {} years", years),
        }
    }

    /// Natural convergence with zero direct cost and a fixed annual gap
    /// reduction assumption.
    fn natural_convergence_strategy(
        &self,
        target_gap_percent: f64,
        max_years: u32,
    ) -> InterventionStrategy {
        let current_gap = self.baseline.gender_pay_gap_percent;
        let years_to_target =
            ((current_gap - target_gap_percent) / NATURAL_ANNUAL_GAP_REDUCTION).max(1.0);
        let timeline_years = years_to_target.min(f64::from(max_years));

        InterventionStrategy {
            kind: StrategyKind::NaturalConvergence,
            applicable: true,
            reason: None,
            timeline_years,
            total_cost: 0.0,
            annual_cost: None,
            cost_as_percent_payroll: 0.0,
            affected_employees: 0,
            average_adjustment: 0.0,
            projected_final_gap: (current_gap - NATURAL_ANNUAL_GAP_REDUCTION * timeline_years)
                .max(target_gap_percent),
            gap_reduction_percent: (current_gap - target_gap_percent)
                .min(NATURAL_ANNUAL_GAP_REDUCTION * timeline_years),
            budget_utilization: 0.0,
            feasibility: Feasibility::High,
            implementation_complexity: ImplementationComplexity::None,
            legal_risk_reduction: LegalRiskReduction::Low,
            description: "Allow natural market forces and progression to reduce gap".to_string(),
        }
    }

    /// Targeted adjustments for the top half of gaps, closing 75% of each.
    fn targeted_intervention_strategy(
        &self,
        underpaid: &[UnderpaidEmployee],
        budget_constraint: f64,
    ) -> InterventionStrategy {
        if underpaid.is_empty() {
            return InterventionStrategy::not_applicable(
                StrategyKind::TargetedIntervention,
                "No underpaid female employees identified",
            );
        }

        // Underpaid employees arrive sorted by gap, so the first half holds
        // the largest gaps.
        let high_impact = &underpaid[..underpaid.len() / 2];

        let mut total_cost: f64 = high_impact
            .iter()
            .map(|e| e.gap_amount * TARGETED_GAP_CLOSURE)
            .sum();
        let budget_limit = self.baseline.total_payroll * budget_constraint;

        let scale = if total_cost > budget_limit {
            let scale = budget_limit / total_cost;
            total_cost = budget_limit;
            scale
        } else {
            1.0
        };

        let gap_represented: f64 = high_impact.iter().map(|e| e.gap_amount).sum();
        let all_gaps: f64 = underpaid.iter().map(|e| e.gap_amount).sum();
        let gap_impact_ratio = if all_gaps > 0.0 {
            gap_represented / all_gaps
        } else {
            0.0
        };

        let estimated_gap_reduction = self.baseline.gender_pay_gap_percent
            * gap_impact_ratio
            * TARGETED_GAP_CLOSURE
            * scale;

        InterventionStrategy {
            kind: StrategyKind::TargetedIntervention,
            applicable: true,
            reason: None,
            timeline_years: 1.0,
            total_cost,
            annual_cost: None,
            cost_as_percent_payroll: total_cost / self.baseline.total_payroll,
            affected_employees: high_impact.len(),
            average_adjustment: if high_impact.is_empty() {
                0.0
            } else {
                total_cost / high_impact.len() as f64
            },
            projected_final_gap: self.baseline.gender_pay_gap_percent - estimated_gap_reduction,
            gap_reduction_percent: estimated_gap_reduction,
            budget_utilization: if budget_limit > 0.0 {
                total_cost / budget_limit
            } else {
                0.0
            },
            feasibility: Feasibility::High,
            implementation_complexity: ImplementationComplexity::Medium,
            legal_risk_reduction: LegalRiskReduction::High,
            description: "Target highest-impact salary adjustments for maximum gap reduction"
                .to_string(),
        }
    }

    /// Phase list for implementing the selected strategy.
    fn implementation_plan(&self, strategy: &InterventionStrategy) -> Vec<ImplementationPhase> {
        match strategy.kind {
            StrategyKind::ImmediateAdjustment => vec![
                ImplementationPhase {
                    phase: 1,
                    timeline_months: 1,
                    activity: "Legal and HR review of adjustments".to_string(),
                },
                ImplementationPhase {
                    phase: 2,
                    timeline_months: 2,
                    activity: "Employee communication and adjustment implementation".to_string(),
                },
                ImplementationPhase {
                    phase: 3,
                    timeline_months: 3,
                    activity: "Monitor impact and address any issues".to_string(),
                },
            ],
            StrategyKind::Gradual3Year | StrategyKind::Gradual5Year => {
                let years = strategy.timeline_years as u32;
                (1..=years)
                    .map(|year| ImplementationPhase {
                        phase: year,
                        timeline_months: year * 12,
                        activity: format!(
                            "Year {}: Implement {:.0}% of salary adjustments",
                            year,
                            100.0 / f64::from(years)
                        ),
                    })
                    .collect()
            }
            StrategyKind::NaturalConvergence => vec![
                ImplementationPhase {
                    phase: 1,
                    timeline_months: 12,
                    activity: "Monitor natural progression and market trends".to_string(),
                },
                ImplementationPhase {
                    phase: 2,
                    timeline_months: 24,
                    activity: "Evaluate progress and adjust if needed".to_string(),
                },
            ],
            StrategyKind::TargetedIntervention => vec![
                ImplementationPhase {
                    phase: 1,
                    timeline_months: 3,
                    activity: "Strategy planning and approval".to_string(),
                },
                ImplementationPhase {
                    phase: 2,
                    timeline_months: 12,
                    activity: "Implementation and monitoring".to_string(),
                },
            ],
        }
    }

    /// Return-on-investment estimate from retention and productivity
    /// heuristics.
    fn roi_analysis(&self, strategy: &InterventionStrategy) -> RoiAnalysis {
        let total_cost = strategy.total_cost;
        let affected = strategy.affected_employees as f64;

        let retention_improvement =
            if strategy.legal_risk_reduction == LegalRiskReduction::High {
                0.10
            } else {
                0.05
            };
        let productivity_gain = if strategy.affected_employees > 0 { 0.05 } else { 0.0 };

        let average_salary = if self.baseline.total_employees > 0 {
            self.baseline.total_payroll / self.baseline.total_employees as f64
        } else {
            0.0
        };

        // Replacement cost is assumed to run 1.5x salary.
        let retention_benefit = affected * average_salary * retention_improvement * 1.5;
        let productivity_benefit = affected * average_salary * productivity_gain;
        let annual_benefits = retention_benefit + productivity_benefit;

        RoiAnalysis {
            total_investment: total_cost,
            annual_benefits,
            payback_years: if annual_benefits > 0.0 {
                total_cost / annual_benefits
            } else {
                f64::INFINITY
            },
            roi_3_year: if total_cost > 0.0 {
                (annual_benefits * 3.0 - total_cost) / total_cost
            } else {
                0.0
            },
            retention_benefit,
            productivity_benefit,
        }
    }

    /// Flags implementation risks and pairs each with a mitigation.
    fn assess_implementation_risks(&self, strategy: &InterventionStrategy) -> RiskAssessment {
        let mut risk_factors = Vec::new();

        if strategy.budget_utilization > 0.8 {
            risk_factors.push(ImplementationRisk::HighBudgetUtilization);
        }
        if strategy.affected_employees as f64 > self.baseline.total_employees as f64 * 0.3 {
            risk_factors.push(ImplementationRisk::LargeEmployeeImpact);
        }
        if strategy.timeline_years < 0.5 {
            risk_factors.push(ImplementationRisk::AggressiveTimeline);
        }
        if strategy.implementation_complexity == ImplementationComplexity::High {
            risk_factors.push(ImplementationRisk::ImplementationComplexity);
        }

        let overall_risk_level = if risk_factors.len() >= 3 {
            RiskLevel::High
        } else if !risk_factors.is_empty() {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        };

        let mitigation_strategies = risk_factors
            .iter()
            .map(|risk| {
                match risk {
                    ImplementationRisk::HighBudgetUtilization => {
                        "Consider phased implementation to spread costs"
                    }
                    ImplementationRisk::LargeEmployeeImpact => {
                        "Implement comprehensive change management and communication plan"
                    }
                    ImplementationRisk::AggressiveTimeline => {
                        "Build buffer time and have contingency plans"
                    }
                    ImplementationRisk::ImplementationComplexity => {
                        "Engage external consultants and establish project management office"
                    }
                }
                .to_string()
            })
            .collect();

        RiskAssessment {
            risk_factors,
            overall_risk_level,
            mitigation_strategies,
        }
    }
}

/// Computes baseline population metrics for comparison.
///
/// A population missing either gender reports a zero gap with both medians
/// set to the overall median.
pub fn calculate_baseline_metrics(population: &[EmployeeRecord]) -> BaselineMetrics {
    let male_salaries: Vec<f64> = population
        .iter()
        .filter(|e| e.gender == Gender::Male)
        .map(|e| e.salary)
        .collect();
    let female_salaries: Vec<f64> = population
        .iter()
        .filter(|e| e.gender == Gender::Female)
        .map(|e| e.salary)
        .collect();
    let all_salaries: Vec<f64> = population.iter().map(|e| e.salary).collect();

    let overall_median = median(&all_salaries);

    let (male_median, female_median, gap_percent) =
        if male_salaries.is_empty() || female_salaries.is_empty() {
            (overall_median, overall_median, 0.0)
        } else {
            let male_median = median(&male_salaries);
            let female_median = median(&female_salaries);
            let gap = ((male_median - female_median) / male_median) * 100.0;
            (male_median, female_median, gap)
        };

    BaselineMetrics {
        total_employees: population.len(),
        male_employees: male_salaries.len(),
        female_employees: female_salaries.len(),
        total_payroll: all_salaries.iter().sum(),
        overall_median_salary: overall_median,
        male_median_salary: male_median,
        female_median_salary: female_median,
        gender_pay_gap_percent: gap_percent,
        gender_pay_gap_amount: male_median - female_median,
    }
}

/// Groups salaries by level for equity analysis.
pub(crate) fn salaries_by_level(population: &[EmployeeRecord]) -> BTreeMap<u8, Vec<f64>> {
    let mut by_level: BTreeMap<u8, Vec<f64>> = BTreeMap::new();
    for employee in population {
        by_level.entry(employee.level).or_default().push(employee.salary);
    }
    by_level
}
