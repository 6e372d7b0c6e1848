//! Policy-constrained budget allocation.
//!
//! The [`PolicyBudgetAllocator`] applies manager-level organisational
//! constraints: a direct-reports cap per manager, a per-manager budget cap
//! as a percentage of team payroll, and priority to below-median high
//! performers. Budget allocation is a greedy heuristic ordered by priority
//! tier then impact score; it does not guarantee maximum total impact for
//! a given budget.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::models::{
    mean, BudgetAnalysis, CandidateIntervention, EmployeeRecord, InterventionImpactSummary,
    ManagerAllocation, ManagerTeam, PolicyCompliance, PolicyRecommendation,
    PolicyRecommendationKind, PolicySummary, PopulationBenchmark, PriorityDistribution,
    RecommendationPriority,
};

/// Remaining budget below this floor stops a manager's allocation walk.
pub const MIN_MEANINGFUL_ADJUSTMENT: f64 = 100.0;

/// Reports per synthesized junior-level manager.
const SYNTHETIC_JUNIOR_TEAM_SIZE: usize = 6;

/// Reports per synthesized mid-level manager.
const SYNTHETIC_MID_TEAM_SIZE: usize = 8;

/// Allocates intervention budgets across managers under policy constraints.
#[derive(Debug, Clone)]
pub struct PolicyBudgetAllocator {
    population: Vec<EmployeeRecord>,
    benchmark: PopulationBenchmark,
    config: EngineConfig,
}

impl PolicyBudgetAllocator {
    /// Creates an allocator over a population snapshot.
    pub fn new(population: &[EmployeeRecord], config: EngineConfig) -> Self {
        let benchmark = PopulationBenchmark::from_population(population);

        info!(
            employees = population.len(),
            max_direct_reports = config.max_direct_reports,
            budget_percent = config.inequality_budget_percent,
            "initialized policy budget allocator"
        );

        PolicyBudgetAllocator {
            population: population.to_vec(),
            benchmark,
            config,
        }
    }

    /// Groups employees into manager teams with compliance analysis.
    ///
    /// When no record carries a manager reference, a synthetic hierarchy
    /// is generated: roughly six reports per junior-level manager, eight
    /// per mid-level manager, and none for senior levels.
    pub fn identify_managers_and_teams(&self) -> BTreeMap<String, ManagerTeam> {
        let assignments = self.manager_assignments();
        let mut grouped: BTreeMap<String, Vec<EmployeeRecord>> = BTreeMap::new();

        for (employee, manager_id) in self.population.iter().zip(&assignments) {
            if let Some(manager_id) = manager_id {
                grouped
                    .entry(manager_id.clone())
                    .or_default()
                    .push(employee.clone());
            }
        }

        let budget_fraction = self.config.manager_budget_fraction();
        let mut managers = BTreeMap::new();

        for (manager_id, team) in grouped {
            let team_size = team.len();
            let team_payroll: f64 = team.iter().map(|e| e.salary).sum();
            let intervention_budget = team_payroll * budget_fraction;
            let compliant = team_size <= self.config.max_direct_reports;

            let manager_level = self
                .population
                .iter()
                .find(|e| e.employee_id == manager_id)
                .map(|e| e.level);

            managers.insert(
                manager_id.clone(),
                ManagerTeam {
                    manager_id,
                    team_size,
                    team,
                    team_payroll,
                    intervention_budget,
                    budget_percent: budget_fraction,
                    compliant_team_size: compliant,
                    over_limit_by: team_size.saturating_sub(self.config.max_direct_reports),
                    manager_level,
                },
            );
        }

        let compliant_count = managers.values().filter(|m| m.compliant_team_size).count();
        info!(
            managers = managers.len(),
            compliant = compliant_count,
            "identified managers and teams"
        );

        managers
    }

    /// Prioritizes intervention candidates within each manager's team.
    ///
    /// Priority order: below-median high performers, below-median
    /// employees, high performers, then everyone else. Within a priority
    /// tier candidates sort by descending intervention impact.
    pub fn prioritize_interventions(
        &self,
        manager_teams: &BTreeMap<String, ManagerTeam>,
    ) -> BTreeMap<String, Vec<CandidateIntervention>> {
        let mut all_interventions = BTreeMap::new();

        for (manager_id, team_info) in manager_teams {
            let mut interventions: Vec<CandidateIntervention> = team_info
                .team
                .iter()
                .map(|employee| self.score_candidate(employee, team_info.intervention_budget))
                .collect();

            interventions.sort_by(|a, b| {
                a.priority
                    .cmp(&b.priority)
                    .then(b.intervention_impact.total_cmp(&a.intervention_impact))
            });

            all_interventions.insert(manager_id.clone(), interventions);
        }

        all_interventions
    }

    /// Greedily allocates each manager's budget to the prioritized
    /// candidates.
    ///
    /// A candidate is funded when its recommended adjustment is positive
    /// and affordable from the remaining budget; the walk stops once the
    /// remaining budget falls below [`MIN_MEANINGFUL_ADJUSTMENT`]. This is
    /// a heuristic, not a globally optimal knapsack solution.
    pub fn optimize_budget_allocation(
        &self,
        manager_interventions: &BTreeMap<String, Vec<CandidateIntervention>>,
    ) -> BTreeMap<String, ManagerAllocation> {
        let mut allocations = BTreeMap::new();
        let mut total_cost = 0.0;
        let mut total_affected = 0usize;

        for (manager_id, interventions) in manager_interventions {
            let manager_budget = interventions
                .first()
                .map(|i| i.available_budget)
                .unwrap_or(0.0);

            let mut selected = Vec::new();
            let mut remaining_budget = manager_budget;

            for intervention in interventions {
                let cost = intervention.recommended_adjustment;

                if cost > 0.0 && cost <= remaining_budget {
                    remaining_budget -= cost;
                    total_cost += cost;
                    total_affected += 1;

                    debug!(
                        manager_id = %manager_id,
                        employee_id = %intervention.employee_id,
                        cost,
                        remaining_budget,
                        "selected intervention"
                    );
                    selected.push(intervention.clone());
                }

                if remaining_budget <= MIN_MEANINGFUL_ADJUSTMENT {
                    break;
                }
            }

            let allocated = manager_budget - remaining_budget;
            let adjustments: Vec<f64> =
                selected.iter().map(|i| i.recommended_adjustment).collect();

            allocations.insert(
                manager_id.clone(),
                ManagerAllocation {
                    manager_id: manager_id.clone(),
                    total_budget: manager_budget,
                    allocated_budget: allocated,
                    remaining_budget,
                    budget_utilization: if manager_budget > 0.0 {
                        allocated / manager_budget
                    } else {
                        0.0
                    },
                    employees_affected: selected.len(),
                    average_adjustment: if adjustments.is_empty() {
                        0.0
                    } else {
                        mean(&adjustments)
                    },
                    selected_interventions: selected,
                },
            );
        }

        info!(
            total_affected,
            total_cost, "budget optimization complete"
        );

        allocations
    }

    /// Aggregates compliance, budget utilization, and priority
    /// distribution into a policy summary with rule-based recommendations.
    pub fn generate_policy_summary(
        &self,
        manager_teams: &BTreeMap<String, ManagerTeam>,
        manager_interventions: &BTreeMap<String, Vec<CandidateIntervention>>,
        allocations: &BTreeMap<String, ManagerAllocation>,
    ) -> PolicySummary {
        let total_managers = manager_teams.len();
        let compliant_managers = manager_teams
            .values()
            .filter(|m| m.compliant_team_size)
            .count();
        let compliance_rate = if total_managers > 0 {
            compliant_managers as f64 / total_managers as f64 * 100.0
        } else {
            0.0
        };

        let total_budget: f64 = manager_teams.values().map(|m| m.intervention_budget).sum();
        let total_allocated: f64 = allocations.values().map(|a| a.allocated_budget).sum();

        let total_affected: usize = allocations.values().map(|a| a.employees_affected).sum();
        let total_population = self.population.len();

        let mut distribution = PriorityDistribution::default();
        for allocation in allocations.values() {
            for intervention in &allocation.selected_interventions {
                match intervention.priority {
                    1 => distribution.priority_1_below_median_high_performers += 1,
                    2 => distribution.priority_2_below_median += 1,
                    3 => distribution.priority_3_high_performers += 1,
                    _ => distribution.priority_4_standard += 1,
                }
            }
        }

        let recommendations = self.policy_recommendations(
            total_managers,
            compliant_managers,
            manager_interventions,
            allocations,
        );

        PolicySummary {
            policy_compliance: PolicyCompliance {
                total_managers,
                compliant_managers,
                over_limit_managers: total_managers - compliant_managers,
                compliance_rate,
                max_direct_reports_policy: self.config.max_direct_reports,
                budget_percent_policy: self.config.inequality_budget_percent,
            },
            budget_analysis: BudgetAnalysis {
                total_available_budget: total_budget,
                total_allocated_budget: total_allocated,
                total_remaining_budget: total_budget - total_allocated,
                budget_utilization_percent: if total_budget > 0.0 {
                    total_allocated / total_budget * 100.0
                } else {
                    0.0
                },
            },
            intervention_impact: InterventionImpactSummary {
                total_employees_affected: total_affected,
                total_population,
                intervention_rate: if total_population > 0 {
                    total_affected as f64 / total_population as f64 * 100.0
                } else {
                    0.0
                },
                priority_distribution: distribution,
            },
            recommendations,
        }
    }

    /// Manager identifier for each employee, synthesizing a hierarchy when
    /// the population carries no manager references at all.
    fn manager_assignments(&self) -> Vec<Option<String>> {
        let has_managers = self.population.iter().any(|e| e.manager_id.is_some());

        if has_managers {
            return self.population.iter().map(|e| e.manager_id.clone()).collect();
        }

        info!("no manager references found, generating synthetic hierarchy");

        let mut junior_seen = 0usize;
        let mut mid_seen = 0usize;

        self.population
            .iter()
            .map(|employee| {
                if employee.level <= 2 {
                    let group = junior_seen / SYNTHETIC_JUNIOR_TEAM_SIZE;
                    junior_seen += 1;
                    Some(format!("mgr_junior_{:03}", group))
                } else if employee.level <= 4 {
                    let group = mid_seen / SYNTHETIC_MID_TEAM_SIZE;
                    mid_seen += 1;
                    Some(format!("mgr_mid_{:03}", group))
                } else {
                    // Senior levels report to the executive tier, which is
                    // outside the allocation policy.
                    None
                }
            })
            .collect()
    }

    fn score_candidate(
        &self,
        employee: &EmployeeRecord,
        available_budget: f64,
    ) -> CandidateIntervention {
        let target_salary = self
            .benchmark
            .level_gender_median(employee.level, employee.gender)
            .unwrap_or(employee.salary);

        let is_below_median = employee.salary < target_salary;
        let is_high_performer = employee.performance_rating.numeric_score()
            >= self.config.high_performer_threshold;

        let recommended_adjustment = if is_below_median {
            (target_salary - employee.salary)
                .min(available_budget * 0.10)
                .min(employee.salary * 0.15)
        } else {
            (employee.salary * 0.05).min(available_budget * 0.05)
        };

        let gap_to_median = (target_salary - employee.salary).max(0.0);
        let gap_closure_percent = if gap_to_median > 0.0 {
            recommended_adjustment / gap_to_median * 100.0
        } else {
            0.0
        };
        let salary_increase_percent = if employee.salary > 0.0 {
            recommended_adjustment / employee.salary * 100.0
        } else {
            0.0
        };

        let performance_weight = employee.performance_rating.numeric_score() / 5.0;
        let gap_weight = (gap_to_median / employee.salary).min(0.5);
        let intervention_impact =
            (gap_closure_percent * gap_weight + salary_increase_percent) * performance_weight;

        let (priority, priority_reason) = if is_below_median && is_high_performer {
            (1, "Below-median high performer")
        } else if is_below_median {
            (2, "Below-median employee")
        } else if is_high_performer {
            (3, "High performer (above median)")
        } else {
            (4, "Standard employee")
        };

        CandidateIntervention {
            employee_id: employee.employee_id.clone(),
            priority,
            priority_reason: priority_reason.to_string(),
            is_below_median,
            is_high_performer,
            current_salary: employee.salary,
            level: employee.level,
            gender: employee.gender,
            performance_rating: employee.performance_rating,
            target_salary,
            gap_to_median,
            recommended_adjustment,
            gap_closure_percent,
            salary_increase_percent,
            intervention_impact,
            available_budget,
        }
    }

    fn policy_recommendations(
        &self,
        total_managers: usize,
        compliant_managers: usize,
        manager_interventions: &BTreeMap<String, Vec<CandidateIntervention>>,
        allocations: &BTreeMap<String, ManagerAllocation>,
    ) -> Vec<PolicyRecommendation> {
        let mut recommendations = Vec::new();

        let compliance_rate = if total_managers > 0 {
            compliant_managers as f64 / total_managers as f64 * 100.0
        } else {
            100.0
        };

        if compliance_rate < 80.0 {
            recommendations.push(PolicyRecommendation {
                kind: PolicyRecommendationKind::OrganizationalStructure,
                priority: RecommendationPriority::High,
                recommendation: format!(
                    "Restructure {} teams exceeding {} direct reports limit",
                    total_managers - compliant_managers,
                    self.config.max_direct_reports
                ),
                rationale: format!(
                    "Policy compliance requires maximum {} direct reports per manager",
                    self.config.max_direct_reports
                ),
            });
        }

        let utilizations: Vec<f64> = allocations
            .values()
            .map(|a| a.budget_utilization)
            .collect();
        let average_utilization = if utilizations.is_empty() {
            0.0
        } else {
            mean(&utilizations)
        };

        if average_utilization < 0.5 {
            recommendations.push(PolicyRecommendation {
                kind: PolicyRecommendationKind::BudgetOptimization,
                priority: RecommendationPriority::Medium,
                recommendation: "Consider increasing intervention scope or adjusting budget \
                                 allocation methodology"
                    .to_string(),
                rationale: format!(
                    "Current budget utilization is {:.1}%, suggesting underutilization of \
                     available resources",
                    average_utilization * 100.0
                ),
            });
        }

        // High-priority candidates left unfunded by the greedy walk.
        let mut unaddressed = 0usize;
        for (manager_id, interventions) in manager_interventions {
            let funded: Vec<&str> = allocations
                .get(manager_id)
                .map(|a| {
                    a.selected_interventions
                        .iter()
                        .map(|i| i.employee_id.as_str())
                        .collect()
                })
                .unwrap_or_default();

            unaddressed += interventions
                .iter()
                .filter(|i| i.priority <= 2 && !funded.contains(&i.employee_id.as_str()))
                .count();
        }

        if unaddressed > 0 {
            recommendations.push(PolicyRecommendation {
                kind: PolicyRecommendationKind::InterventionPrioritization,
                priority: RecommendationPriority::High,
                recommendation: format!(
                    "Address {} high-priority below-median employees in future cycles",
                    unaddressed
                ),
                rationale: "Below-median employees should be prioritized for equity interventions"
                    .to_string(),
            });
        }

        recommendations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, PerformanceRating};

    fn employee(
        id: &str,
        level: u8,
        salary: f64,
        rating: PerformanceRating,
        gender: Gender,
        manager_id: Option<&str>,
    ) -> EmployeeRecord {
        EmployeeRecord {
            employee_id: id.to_string(),
            level,
            salary,
            performance_rating: rating,
            gender,
            hire_date: None,
            tenure_years: Some(3.0),
            manager_id: manager_id.map(str::to_string),
        }
    }

    /// Two managed teams mirroring the policy sample data.
    fn managed_population() -> Vec<EmployeeRecord> {
        vec![
            employee("1", 2, 55_000.0, PerformanceRating::HighPerforming, Gender::Female, Some("1001")),
            employee("2", 2, 62_000.0, PerformanceRating::Achieving, Gender::Male, Some("1001")),
            employee("3", 2, 58_000.0, PerformanceRating::Exceeding, Gender::Female, Some("1001")),
            employee("4", 3, 78_000.0, PerformanceRating::Achieving, Gender::Male, Some("1002")),
            employee("5", 3, 72_000.0, PerformanceRating::HighPerforming, Gender::Female, Some("1002")),
        ]
    }

    fn allocator(population: &[EmployeeRecord]) -> PolicyBudgetAllocator {
        PolicyBudgetAllocator::new(population, EngineConfig::default())
    }

    #[test]
    fn test_teams_grouped_by_manager_reference() {
        let teams = allocator(&managed_population()).identify_managers_and_teams();

        assert_eq!(teams.len(), 2);
        let first = &teams["1001"];
        assert_eq!(first.team_size, 3);
        assert_eq!(first.team_payroll, 175_000.0);
        assert!((first.intervention_budget - 875.0).abs() < 1e-9);
        assert!(first.compliant_team_size);
        assert_eq!(first.over_limit_by, 0);
    }

    #[test]
    fn test_oversized_team_flagged_non_compliant() {
        let mut population = Vec::new();
        for i in 0..8 {
            population.push(employee(
                &format!("e{}", i),
                2,
                50_000.0,
                PerformanceRating::Achieving,
                Gender::Male,
                Some("boss"),
            ));
        }
        let teams = allocator(&population).identify_managers_and_teams();

        let team = &teams["boss"];
        assert!(!team.compliant_team_size);
        assert_eq!(team.over_limit_by, 2);
    }

    #[test]
    fn test_synthetic_hierarchy_when_no_managers() {
        let mut population = Vec::new();
        for i in 0..14 {
            population.push(employee(
                &format!("e{:02}", i),
                2,
                50_000.0,
                PerformanceRating::Achieving,
                Gender::Male,
                None,
            ));
        }
        // Senior employees stay outside the synthetic hierarchy.
        population.push(employee("exec", 6, 150_000.0, PerformanceRating::Exceeding, Gender::Female, None));

        let teams = allocator(&population).identify_managers_and_teams();

        // 14 junior employees in groups of 6 make 3 teams.
        assert_eq!(teams.len(), 3);
        let sizes: Vec<usize> = teams.values().map(|t| t.team_size).collect();
        assert_eq!(sizes.iter().sum::<usize>(), 14);
        assert!(teams.values().all(|t| t.team_size <= 6));
    }

    #[test]
    fn test_priority_ordering_within_team() {
        let alloc = allocator(&managed_population());
        let teams = alloc.identify_managers_and_teams();
        let prioritized = alloc.prioritize_interventions(&teams);

        for interventions in prioritized.values() {
            for window in interventions.windows(2) {
                assert!(window[0].priority <= window[1].priority);
                if window[0].priority == window[1].priority {
                    assert!(
                        window[0].intervention_impact >= window[1].intervention_impact
                    );
                }
            }
        }
    }

    #[test]
    fn test_below_median_high_performer_is_priority_one() {
        let alloc = allocator(&managed_population());
        let teams = alloc.identify_managers_and_teams();
        let prioritized = alloc.prioritize_interventions(&teams);

        // Employee 1: female level 2 at 55k, below the female level-2
        // median (56.5k), High Performing.
        let team = &prioritized["1001"];
        let candidate = team.iter().find(|c| c.employee_id == "1").unwrap();
        assert!(candidate.is_below_median);
        assert!(candidate.is_high_performer);
        assert_eq!(candidate.priority, 1);
    }

    #[test]
    fn test_recommended_adjustment_capped_by_three_rules() {
        let alloc = allocator(&managed_population());
        let teams = alloc.identify_managers_and_teams();
        let prioritized = alloc.prioritize_interventions(&teams);

        for interventions in prioritized.values() {
            for candidate in interventions {
                if candidate.is_below_median {
                    assert!(candidate.recommended_adjustment <= candidate.gap_to_median + 1e-9);
                    assert!(
                        candidate.recommended_adjustment
                            <= candidate.available_budget * 0.10 + 1e-9
                    );
                    assert!(
                        candidate.recommended_adjustment
                            <= candidate.current_salary * 0.15 + 1e-9
                    );
                } else {
                    assert!(
                        candidate.recommended_adjustment
                            <= candidate.current_salary * 0.05 + 1e-9
                    );
                    assert!(
                        candidate.recommended_adjustment
                            <= candidate.available_budget * 0.05 + 1e-9
                    );
                }
            }
        }
    }

    #[test]
    fn test_allocation_respects_manager_budget() {
        let alloc = allocator(&managed_population());
        let teams = alloc.identify_managers_and_teams();
        let prioritized = alloc.prioritize_interventions(&teams);
        let allocations = alloc.optimize_budget_allocation(&prioritized);

        for (manager_id, allocation) in &allocations {
            let spent: f64 = allocation
                .selected_interventions
                .iter()
                .map(|i| i.recommended_adjustment)
                .sum();
            assert!(
                spent <= teams[manager_id].intervention_budget + 1e-9,
                "manager {} overspent",
                manager_id
            );
            assert!((allocation.allocated_budget - spent).abs() < 1e-9);
            assert!(allocation.budget_utilization <= 1.0 + 1e-9);
        }
    }

    #[test]
    fn test_allocation_stops_below_meaningful_floor() {
        let alloc = allocator(&managed_population());
        let teams = alloc.identify_managers_and_teams();
        let prioritized = alloc.prioritize_interventions(&teams);
        let allocations = alloc.optimize_budget_allocation(&prioritized);

        for allocation in allocations.values() {
            // Either every candidate was considered or the walk stopped
            // with the remaining budget at or below the floor.
            if allocation.employees_affected < prioritized[&allocation.manager_id].len() {
                let any_affordable_skipped = prioritized[&allocation.manager_id]
                    .iter()
                    .filter(|c| {
                        !allocation
                            .selected_interventions
                            .iter()
                            .any(|s| s.employee_id == c.employee_id)
                    })
                    .any(|c| {
                        c.recommended_adjustment > 0.0
                            && c.recommended_adjustment <= allocation.remaining_budget
                    });
                if any_affordable_skipped {
                    assert!(allocation.remaining_budget <= MIN_MEANINGFUL_ADJUSTMENT);
                }
            }
        }
    }

    #[test]
    fn test_policy_summary_aggregates() {
        let alloc = allocator(&managed_population());
        let teams = alloc.identify_managers_and_teams();
        let prioritized = alloc.prioritize_interventions(&teams);
        let allocations = alloc.optimize_budget_allocation(&prioritized);
        let summary = alloc.generate_policy_summary(&teams, &prioritized, &allocations);

        assert_eq!(summary.policy_compliance.total_managers, 2);
        assert_eq!(summary.policy_compliance.compliance_rate, 100.0);
        assert!(summary.budget_analysis.total_available_budget > 0.0);
        assert!(
            summary.budget_analysis.total_allocated_budget
                <= summary.budget_analysis.total_available_budget
        );
        assert_eq!(summary.intervention_impact.total_population, 5);
    }

    #[test]
    fn test_policy_summary_flags_non_compliance() {
        let mut population = Vec::new();
        for i in 0..9 {
            population.push(employee(
                &format!("e{}", i),
                2,
                50_000.0,
                PerformanceRating::Achieving,
                Gender::Male,
                Some("boss"),
            ));
        }
        let alloc = allocator(&population);
        let teams = alloc.identify_managers_and_teams();
        let prioritized = alloc.prioritize_interventions(&teams);
        let allocations = alloc.optimize_budget_allocation(&prioritized);
        let summary = alloc.generate_policy_summary(&teams, &prioritized, &allocations);

        assert!(summary.policy_compliance.compliance_rate < 80.0);
        assert!(summary
            .recommendations
            .iter()
            .any(|r| r.kind == PolicyRecommendationKind::OrganizationalStructure));
    }

    #[test]
    fn test_unfunded_high_priority_candidates_flagged() {
        // A tiny budget funds one below-median employee, then the floor
        // stops the walk and leaves the rest unaddressed.
        let mut config = EngineConfig::default();
        config.inequality_budget_percent = 0.01;

        let population: Vec<EmployeeRecord> = [40, 45, 50, 55, 60, 65]
            .iter()
            .enumerate()
            .map(|(i, thousands)| {
                employee(
                    &format!("e{}", i),
                    2,
                    f64::from(*thousands) * 1_000.0,
                    PerformanceRating::Achieving,
                    Gender::Male,
                    Some("boss"),
                )
            })
            .collect();
        let alloc = PolicyBudgetAllocator::new(&population, config);
        let teams = alloc.identify_managers_and_teams();
        let prioritized = alloc.prioritize_interventions(&teams);
        let allocations = alloc.optimize_budget_allocation(&prioritized);
        let summary = alloc.generate_policy_summary(&teams, &prioritized, &allocations);

        assert!(summary
            .recommendations
            .iter()
            .any(|r| r.kind == PolicyRecommendationKind::InterventionPrioritization));
    }
}
