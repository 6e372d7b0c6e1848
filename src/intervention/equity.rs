//! Population equity analysis and equity intervention approaches.

use serde::Serialize;
use tracing::info;

use crate::models::{
    mean, median, sample_std, EquityApproach, EquityApproachKind, EquityInterventionAnalysis,
    Gender,
};

use super::{salaries_by_level, InterventionStrategySimulator};

/// Qualitative significance label for a pay gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PayGapSignificance {
    /// Too few employees of either gender to judge.
    InsufficientData,
    /// Gap above 15% with solid samples on both sides.
    HighlySignificant,
    /// Gap above 10%.
    Significant,
    /// Gap above 5%.
    ModeratelySignificant,
    /// Gap of 5% or less.
    NotSignificant,
}

/// Gender dimension of the equity analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenderEquity {
    /// Median male salary.
    pub male_median: f64,
    /// Median female salary.
    pub female_median: f64,
    /// Pay gap as a percentage of the male median.
    pub pay_gap_percent: f64,
    /// Male employee count.
    pub male_count: usize,
    /// Female employee count.
    pub female_count: usize,
    /// Significance label for the gap.
    pub statistical_significance: PayGapSignificance,
}

/// Per-level dimension of the equity analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelEquity {
    /// Job-grade level.
    pub level: u8,
    /// Employee count at the level.
    pub count: usize,
    /// Median salary at the level.
    pub median_salary: f64,
    /// Sample standard deviation of salaries at the level.
    pub salary_std: f64,
    /// Standard deviation over mean, zero for a zero mean.
    pub coefficient_of_variation: f64,
}

/// Gender split within one level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenderByLevelEquity {
    /// Job-grade level.
    pub level: u8,
    /// Male employee count at the level.
    pub male_count: usize,
    /// Female employee count at the level.
    pub female_count: usize,
    /// Median male salary, zero when no males at the level.
    pub male_median: f64,
    /// Median female salary, zero when no females at the level.
    pub female_median: f64,
    /// Gap as a percentage of the male median; zero when either gender is
    /// absent.
    pub gap_percent: f64,
}

/// One tenure bracket of the equity analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TenureBracketEquity {
    /// Bracket label.
    pub bracket: String,
    /// Employee count in the bracket.
    pub count: usize,
    /// Median salary in the bracket.
    pub median_salary: f64,
    /// Mean salary in the bracket.
    pub mean_salary: f64,
}

/// Category of a priority intervention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityInterventionKind {
    /// Population-wide gender gap remediation.
    GenderGapRemediation,
    /// Adjustment focused on one level's gender gap.
    LevelSpecificAdjustment,
}

/// A priority intervention flagged by the equity analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriorityIntervention {
    /// Intervention category.
    pub kind: PriorityInterventionKind,
    /// "high" or "medium".
    pub priority: String,
    /// Human-readable description.
    pub description: String,
    /// Rough cost as a fraction of payroll.
    pub estimated_cost_percent: f64,
}

/// Salary equity analysis across demographic dimensions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquityAnalysis {
    /// Gender dimension.
    pub gender: GenderEquity,
    /// Per-level dimension.
    pub level: Vec<LevelEquity>,
    /// Gender split per level.
    pub gender_by_level: Vec<GenderByLevelEquity>,
    /// Tenure brackets.
    pub tenure: Vec<TenureBracketEquity>,
    /// Combined equity score, 0–1, higher is better.
    pub overall_equity_score: f64,
    /// Interventions worth prioritising, highest priority first.
    pub priority_interventions: Vec<PriorityIntervention>,
}

impl InterventionStrategySimulator {
    /// Analyzes salary equity across gender, level, gender-by-level, and
    /// tenure dimensions, with an overall score and priority interventions.
    pub fn analyze_population_salary_equity(&self) -> EquityAnalysis {
        info!("analyzing population salary equity");

        let gender = self.analyze_gender_equity();
        let level = self.analyze_level_equity();
        let gender_by_level = self.analyze_gender_by_level_equity();
        let tenure = self.analyze_tenure_equity();

        let overall_equity_score = overall_equity_score(&gender, &level);
        let priority_interventions = priority_interventions(&gender, &gender_by_level);

        EquityAnalysis {
            gender,
            level,
            gender_by_level,
            tenure,
            overall_equity_score,
            priority_interventions,
        }
    }

    /// Models equity intervention approaches under a budget cap and
    /// selects the best by a simplified weighted score.
    ///
    /// `intervention_type` labels the approach family the caller is
    /// interested in; all four approaches are modelled and ranked
    /// regardless so the result doubles as a comparison.
    pub fn model_equity_intervention(
        &self,
        intervention_type: EquityApproachKind,
        budget_constraint: f64,
        years_to_achieve: u32,
    ) -> EquityInterventionAnalysis {
        let total_payroll = self.baseline.total_payroll;
        let max_budget = total_payroll * budget_constraint;
        let gender_gap = self.baseline.gender_pay_gap_percent;
        let population_size = self.population.len();

        info!(
            max_budget,
            budget_constraint, "modeling equity intervention approaches"
        );

        let approaches = vec![
            EquityApproach {
                kind: EquityApproachKind::ComprehensiveEquity,
                description: "Address all equity gaps simultaneously across gender, level, and \
                              performance dimensions"
                    .to_string(),
                total_investment: max_budget * 0.8,
                affected_employees: population_size / 3,
                timeline_years: years_to_achieve,
                gender_gap_reduction: (gender_gap * 0.8).min(80.0),
                overall_equity_score: Some(85.0),
                implementation_phases: vec![
                    "Phase 1: Immediate high-priority adjustments (6 months)".to_string(),
                    "Phase 2: Performance-based interventions (18 months)".to_string(),
                    "Phase 3: Long-term equity maintenance (remaining time)".to_string(),
                ],
            },
            EquityApproach {
                kind: EquityApproachKind::TargetedAdjustment,
                description: "Focus on specific high-impact salary adjustments".to_string(),
                total_investment: max_budget * 0.6,
                affected_employees: population_size / 5,
                timeline_years: years_to_achieve.saturating_sub(2).max(2),
                gender_gap_reduction: (gender_gap * 0.6).min(60.0),
                overall_equity_score: None,
                implementation_phases: Vec::new(),
            },
            EquityApproach {
                kind: EquityApproachKind::GradualRemediation,
                description: "Spread equity improvements over extended timeline".to_string(),
                total_investment: max_budget,
                affected_employees: population_size / 2,
                timeline_years: years_to_achieve + 2,
                gender_gap_reduction: (gender_gap * 0.9).min(90.0),
                overall_equity_score: None,
                implementation_phases: Vec::new(),
            },
            EquityApproach {
                kind: EquityApproachKind::PerformanceBased,
                description: "Link equity improvements to performance development programs"
                    .to_string(),
                total_investment: max_budget * 0.7,
                affected_employees: population_size / 4,
                timeline_years: years_to_achieve,
                gender_gap_reduction: 0.0,
                overall_equity_score: None,
                implementation_phases: Vec::new(),
            },
        ];

        let mut scores: Vec<(EquityApproachKind, f64)> = approaches
            .iter()
            .map(|approach| (approach.kind, approach_score(approach, max_budget)))
            .collect();

        // First maximal entry wins ties, preserving generation order.
        let (optimal_kind, selection_score) = scores
            .iter()
            .copied()
            .fold(None::<(EquityApproachKind, f64)>, |best, candidate| {
                match best {
                    Some((_, best_score)) if candidate.1 <= best_score => best,
                    _ => Some(candidate),
                }
            })
            .unwrap_or((EquityApproachKind::ComprehensiveEquity, 0.0));

        let optimal_approach = approaches
            .iter()
            .find(|a| a.kind == optimal_kind)
            .cloned()
            .unwrap_or_else(|| approaches[0].clone());

        scores.retain(|(kind, _)| *kind != optimal_kind);

        info!(
            approach = ?optimal_kind,
            investment = optimal_approach.total_investment,
            "selected optimal equity approach"
        );

        EquityInterventionAnalysis {
            intervention_type,
            baseline_metrics: self.baseline.clone(),
            approaches,
            optimal_approach,
            selection_score,
            alternatives: scores,
            budget_constraint_percent: budget_constraint,
            budget_constraint_amount: max_budget,
            timeline_years: years_to_achieve,
        }
    }

    fn analyze_gender_equity(&self) -> GenderEquity {
        let male_count = self.baseline.male_employees;
        let female_count = self.baseline.female_employees;
        let gap_percent = self.baseline.gender_pay_gap_percent;

        let statistical_significance = if male_count < 5 || female_count < 5 {
            PayGapSignificance::InsufficientData
        } else if gap_percent.abs() > 15.0 && male_count > 10 && female_count > 10 {
            PayGapSignificance::HighlySignificant
        } else if gap_percent.abs() > 10.0 {
            PayGapSignificance::Significant
        } else if gap_percent.abs() > 5.0 {
            PayGapSignificance::ModeratelySignificant
        } else {
            PayGapSignificance::NotSignificant
        };

        GenderEquity {
            male_median: self.baseline.male_median_salary,
            female_median: self.baseline.female_median_salary,
            pay_gap_percent: gap_percent,
            male_count,
            female_count,
            statistical_significance,
        }
    }

    fn analyze_level_equity(&self) -> Vec<LevelEquity> {
        salaries_by_level(&self.population)
            .into_iter()
            .map(|(level, salaries)| {
                let level_mean = mean(&salaries);
                let std = sample_std(&salaries);
                LevelEquity {
                    level,
                    count: salaries.len(),
                    median_salary: median(&salaries),
                    salary_std: std,
                    coefficient_of_variation: if level_mean > 0.0 { std / level_mean } else { 0.0 },
                }
            })
            .collect()
    }

    fn analyze_gender_by_level_equity(&self) -> Vec<GenderByLevelEquity> {
        salaries_by_level(&self.population)
            .keys()
            .map(|&level| {
                let male: Vec<f64> = self
                    .population
                    .iter()
                    .filter(|e| e.level == level && e.gender == Gender::Male)
                    .map(|e| e.salary)
                    .collect();
                let female: Vec<f64> = self
                    .population
                    .iter()
                    .filter(|e| e.level == level && e.gender == Gender::Female)
                    .map(|e| e.salary)
                    .collect();

                let male_median = if male.is_empty() { 0.0 } else { median(&male) };
                let female_median = if female.is_empty() { 0.0 } else { median(&female) };
                let gap_percent = if !male.is_empty() && !female.is_empty() && male_median > 0.0 {
                    ((male_median - female_median) / male_median) * 100.0
                } else {
                    0.0
                };

                GenderByLevelEquity {
                    level,
                    male_count: male.len(),
                    female_count: female.len(),
                    male_median,
                    female_median,
                    gap_percent,
                }
            })
            .collect()
    }

    fn analyze_tenure_equity(&self) -> Vec<TenureBracketEquity> {
        let brackets = [
            ("0-2 years", 0.0, 2.0),
            ("2-5 years", 2.0, 5.0),
            ("5+ years", 5.0, f64::INFINITY),
        ];

        brackets
            .iter()
            .filter_map(|(label, low, high)| {
                let salaries: Vec<f64> = self
                    .population
                    .iter()
                    .filter(|e| {
                        let tenure = e.tenure_years_at(self.as_of);
                        tenure >= *low && tenure < *high
                    })
                    .map(|e| e.salary)
                    .collect();

                if salaries.is_empty() {
                    None
                } else {
                    Some(TenureBracketEquity {
                        bracket: label.to_string(),
                        count: salaries.len(),
                        median_salary: median(&salaries),
                        mean_salary: mean(&salaries),
                    })
                }
            })
            .collect()
    }
}

/// Impact 40% + equity score 30% + budget-feasibility bonus 30%.
fn approach_score(approach: &EquityApproach, max_budget: f64) -> f64 {
    let mut score = 0.0;
    if approach.gender_gap_reduction > 0.0 {
        score += approach.gender_gap_reduction.min(100.0) / 100.0 * 40.0;
    }
    if let Some(equity_score) = approach.overall_equity_score {
        score += equity_score / 100.0 * 30.0;
    }
    if approach.total_investment <= max_budget {
        score += 30.0;
    }
    score
}

/// Gender score and level-variation score averaged.
fn overall_equity_score(gender: &GenderEquity, levels: &[LevelEquity]) -> f64 {
    let mut scores = Vec::new();

    // A 30% gap scores zero.
    scores.push((1.0 - gender.pay_gap_percent.abs() / 30.0).max(0.0));

    if !levels.is_empty() {
        let cvs: Vec<f64> = levels.iter().map(|l| l.coefficient_of_variation).collect();
        scores.push((1.0 - mean(&cvs)).max(0.0));
    }

    if scores.is_empty() {
        0.5
    } else {
        mean(&scores)
    }
}

fn priority_interventions(
    gender: &GenderEquity,
    gender_by_level: &[GenderByLevelEquity],
) -> Vec<PriorityIntervention> {
    let mut interventions = Vec::new();

    let gap = gender.pay_gap_percent.abs();
    if gap > 10.0 {
        interventions.push(PriorityIntervention {
            kind: PriorityInterventionKind::GenderGapRemediation,
            priority: if gap > 20.0 { "high" } else { "medium" }.to_string(),
            description: format!("Address {:.1}% gender pay gap", gap),
            estimated_cost_percent: (gap * 0.0003).min(0.008),
        });
    }

    for level in gender_by_level {
        if level.gap_percent.abs() > 15.0 {
            interventions.push(PriorityIntervention {
                kind: PriorityInterventionKind::LevelSpecificAdjustment,
                priority: "medium".to_string(),
                description: format!(
                    "Address Level {} gender gap ({:.1}%)",
                    level.level, level.gap_percent
                ),
                estimated_cost_percent: 0.001,
            });
        }
    }

    interventions.sort_by_key(|i| if i.priority == "high" { 0 } else { 1 });
    interventions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::models::{EmployeeRecord, PerformanceRating};
    use chrono::NaiveDate;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn employee(id: &str, level: u8, salary: f64, gender: Gender, tenure: f64) -> EmployeeRecord {
        EmployeeRecord {
            employee_id: id.to_string(),
            level,
            salary,
            performance_rating: PerformanceRating::Achieving,
            gender,
            hire_date: None,
            tenure_years: Some(tenure),
            manager_id: None,
        }
    }

    fn wide_gap_population() -> Vec<EmployeeRecord> {
        let mut population = Vec::new();
        for i in 0..12 {
            population.push(employee(
                &format!("m{}", i),
                (i % 3 + 1) as u8,
                60_000.0 + 1_000.0 * i as f64,
                Gender::Male,
                1.0 + i as f64 * 0.5,
            ));
            population.push(employee(
                &format!("f{}", i),
                (i % 3 + 1) as u8,
                45_000.0 + 1_000.0 * i as f64,
                Gender::Female,
                1.0 + i as f64 * 0.5,
            ));
        }
        population
    }

    fn simulator() -> InterventionStrategySimulator {
        InterventionStrategySimulator::new(&wide_gap_population(), EngineConfig::default(), as_of())
    }

    #[test]
    fn test_equity_analysis_covers_all_dimensions() {
        let analysis = simulator().analyze_population_salary_equity();

        assert!(analysis.gender.pay_gap_percent > 10.0);
        assert_eq!(analysis.level.len(), 3);
        assert_eq!(analysis.gender_by_level.len(), 3);
        assert!(!analysis.tenure.is_empty());
        assert!(analysis.overall_equity_score > 0.0 && analysis.overall_equity_score < 1.0);
    }

    #[test]
    fn test_significant_gap_detected() {
        let analysis = simulator().analyze_population_salary_equity();
        assert_eq!(
            analysis.gender.statistical_significance,
            PayGapSignificance::HighlySignificant
        );
        assert!(analysis
            .priority_interventions
            .iter()
            .any(|i| i.kind == PriorityInterventionKind::GenderGapRemediation));
    }

    #[test]
    fn test_small_sample_reports_insufficient_data() {
        let population = vec![
            employee("m1", 2, 55_000.0, Gender::Male, 2.0),
            employee("f1", 2, 45_000.0, Gender::Female, 2.0),
        ];
        let simulator =
            InterventionStrategySimulator::new(&population, EngineConfig::default(), as_of());
        let analysis = simulator.analyze_population_salary_equity();
        assert_eq!(
            analysis.gender.statistical_significance,
            PayGapSignificance::InsufficientData
        );
    }

    #[test]
    fn test_tenure_brackets_partition_population() {
        let analysis = simulator().analyze_population_salary_equity();
        let total: usize = analysis.tenure.iter().map(|b| b.count).sum();
        assert_eq!(total, 24);
    }

    #[test]
    fn test_equity_intervention_models_four_approaches() {
        let analysis = simulator().model_equity_intervention(EquityApproachKind::ComprehensiveEquity, 0.005, 5);

        assert_eq!(analysis.approaches.len(), 4);
        let kinds: Vec<EquityApproachKind> =
            analysis.approaches.iter().map(|a| a.kind).collect();
        assert_eq!(kinds, EquityApproachKind::ALL.to_vec());
        assert_eq!(analysis.alternatives.len(), 3);
    }

    #[test]
    fn test_equity_intervention_respects_budget() {
        let analysis = simulator().model_equity_intervention(EquityApproachKind::ComprehensiveEquity, 0.005, 5);
        for approach in &analysis.approaches {
            assert!(approach.total_investment <= analysis.budget_constraint_amount + 1e-9);
        }
    }

    #[test]
    fn test_comprehensive_wins_with_wide_gap() {
        // With a wide gap, the comprehensive approach's combined impact and
        // equity score beats the alternatives.
        let analysis = simulator().model_equity_intervention(EquityApproachKind::ComprehensiveEquity, 0.005, 5);
        assert_eq!(
            analysis.optimal_approach.kind,
            EquityApproachKind::ComprehensiveEquity
        );
        assert!(analysis.selection_score > 0.0);
    }

    #[test]
    fn test_approach_score_components() {
        let approach = EquityApproach {
            kind: EquityApproachKind::TargetedAdjustment,
            description: String::new(),
            total_investment: 40_000.0,
            affected_employees: 5,
            timeline_years: 3,
            gender_gap_reduction: 10.0,
            overall_equity_score: None,
            implementation_phases: Vec::new(),
        };
        // 10/100*40 = 4 points of impact plus the 30-point budget bonus.
        assert!((approach_score(&approach, 50_000.0) - 34.0).abs() < 1e-9);
        // Over budget loses the bonus.
        assert!((approach_score(&approach, 30_000.0) - 4.0).abs() < 1e-9);
    }
}
