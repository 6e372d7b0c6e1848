//! Median convergence analysis.
//!
//! The [`ConvergenceAnalyzer`] identifies employees below the median for
//! their level, computes convergence timelines under natural, accelerated,
//! and intervention scenarios, and projects population-level convergence
//! trends.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    mean, median, BelowMedianAnalysis, BelowMedianEmployee, BelowMedianStatistics, ConvergenceAction,
    ConvergenceFeasibility, ConvergenceResult, ConvergenceScenario, ConvergenceStrategy,
    ConvergenceVelocity, EffectivenessTier, EmployeeRecord, Feasibility, GapDistribution, Gender,
    GenderAnalysis, GenderPattern, InterventionImpact, PerformanceRating, PopulationBenchmark,
    PopulationTrends, Scenario, TrendProjection, YearConvergence,
};
use crate::progression::ProgressionSimulator;

/// Projection horizon for natural convergence.
const NATURAL_HORIZON: u32 = 10;

/// Fallback years when the optimistic path never converges; shorter than
/// the natural fallback because of the optimistic assumptions.
const ACCELERATED_FALLBACK_YEARS: f64 = 8.0;

/// Horizon for performance-targeted intervention projections.
const TARGETED_HORIZON: u32 = 8;

/// Share of the gap closed by a default salary intervention.
const INTERVENTION_GAP_CLOSURE: f64 = 0.5;

/// Annual growth assumptions for population trend projections.
const NATURAL_GROWTH: f64 = 0.05;
const ACCELERATED_GROWTH: f64 = 0.08;
const INTERVENTION_GROWTH: f64 = 0.12;

/// Analyzes salary convergence patterns for below-median employees.
#[derive(Debug, Clone)]
pub struct ConvergenceAnalyzer {
    population: Vec<EmployeeRecord>,
    benchmark: PopulationBenchmark,
    simulator: ProgressionSimulator,
    config: EngineConfig,
    as_of: NaiveDate,
}

impl ConvergenceAnalyzer {
    /// Creates an analyzer over a population snapshot.
    pub fn new(population: &[EmployeeRecord], config: EngineConfig, as_of: NaiveDate) -> Self {
        let benchmark = PopulationBenchmark::from_population(population);
        let simulator = ProgressionSimulator::new(population, config.clone(), as_of);

        info!(
            employees = population.len(),
            threshold_years = config.convergence_threshold_years,
            acceptable_gap_percent = config.acceptable_gap_percent,
            "initialized convergence analyzer"
        );

        ConvergenceAnalyzer {
            population: population.to_vec(),
            benchmark,
            simulator,
            config,
            as_of,
        }
    }

    /// The benchmark computed at construction.
    pub fn benchmark(&self) -> &PopulationBenchmark {
        &self.benchmark
    }

    /// Identifies employees below the median salary for their level.
    ///
    /// An employee qualifies when their gap to the level median, as a
    /// percentage of the median, is at least `min_gap_percent`.
    pub fn identify_below_median(
        &self,
        min_gap_percent: f64,
        include_gender_analysis: bool,
    ) -> EngineResult<BelowMedianAnalysis> {
        debug!(min_gap_percent, "identifying below-median employees");

        let mut below_median = Vec::new();

        for employee in &self.population {
            let level_median = self.level_median(employee.level)?;
            let gap_amount = level_median - employee.salary;
            let gap_percent = (gap_amount / level_median) * 100.0;

            if gap_percent >= min_gap_percent {
                below_median.push(BelowMedianEmployee {
                    employee_id: employee.employee_id.clone(),
                    level: employee.level,
                    salary: employee.salary,
                    gender: employee.gender,
                    performance_rating: employee.performance_rating,
                    level_median,
                    gap_amount,
                    gap_percent,
                    tenure_years: employee.tenure_years_at(self.as_of),
                });
            }
        }

        let total_employees = self.population.len();
        let below_median_count = below_median.len();
        let below_median_percent = if total_employees > 0 {
            (below_median_count as f64 / total_employees as f64) * 100.0
        } else {
            0.0
        };

        let summary_statistics = summarize_gaps(&below_median);
        let gender_analysis = include_gender_analysis.then(|| analyze_gender_patterns(&below_median));

        info!(
            below_median_count,
            below_median_percent, "below-median scan complete"
        );

        Ok(BelowMedianAnalysis {
            total_employees,
            below_median_count,
            below_median_percent,
            employees: below_median,
            summary_statistics,
            gender_analysis,
        })
    }

    /// Calculates the convergence timeline for one employee.
    ///
    /// Employees already at or above their level median short-circuit to an
    /// above-median result with no scenario computation. Otherwise natural,
    /// accelerated, and intervention timelines are produced, along with a
    /// recommendation from the gap/timeline decision table.
    pub fn convergence_timeline(
        &self,
        employee: &EmployeeRecord,
        target_performance: Option<PerformanceRating>,
    ) -> EngineResult<ConvergenceResult> {
        employee.validate()?;
        let level_median = self.level_median(employee.level)?;

        debug!(
            employee_id = %employee.employee_id,
            salary = employee.salary,
            level_median,
            "analyzing convergence timeline"
        );

        if employee.salary >= level_median {
            return Ok(ConvergenceResult::AboveMedian {
                employee_id: employee.employee_id.clone(),
                current_gap_percent: ((employee.salary - level_median) / level_median) * 100.0,
                rationale: "Employee already at or above median for their level".to_string(),
            });
        }

        let gap_amount = level_median - employee.salary;
        let gap_percent = (gap_amount / level_median) * 100.0;

        let natural = self.natural_convergence(employee, level_median)?;
        let accelerated = self.accelerated_convergence(employee, level_median)?;
        let intervention =
            self.intervention_convergence(employee, level_median, target_performance)?;

        let recommended_action = recommend_action(gap_percent, natural.years_to_median);
        let convergence_feasibility = assess_feasibility(&natural, &accelerated, &intervention);

        info!(
            employee_id = %employee.employee_id,
            natural_years = natural.years_to_median,
            intervention_years = intervention.years_to_median,
            "convergence analysis complete"
        );

        Ok(ConvergenceResult::BelowMedian {
            employee_id: employee.employee_id.clone(),
            current_gap_amount: gap_amount,
            current_gap_percent: gap_percent,
            natural,
            accelerated,
            intervention,
            recommended_action,
            convergence_feasibility,
        })
    }

    /// Projects population-level convergence trends over the given horizon.
    ///
    /// Each strategy applies a fixed annual growth assumption to every
    /// below-median employee's current salary, counting an employee as
    /// converged once the projected salary reaches the level median less
    /// the acceptable gap.
    pub fn population_trends(&self, years_ahead: u32) -> EngineResult<PopulationTrends> {
        info!(years_ahead, "analyzing population convergence trends");

        let current_state = self.identify_below_median(0.0, true)?;

        let natural = self.project_trend(&current_state.employees, years_ahead, NATURAL_GROWTH);
        let accelerated =
            self.project_trend(&current_state.employees, years_ahead, ACCELERATED_GROWTH);
        let intervention =
            self.project_trend(&current_state.employees, years_ahead, INTERVENTION_GROWTH);

        let gap_distribution = analyze_gap_distribution(&current_state.employees);
        let convergence_velocity = vec![
            (
                ConvergenceStrategy::NaturalProgression,
                measure_velocity(&natural),
            ),
            (
                ConvergenceStrategy::PerformanceAcceleration,
                measure_velocity(&accelerated),
            ),
            (
                ConvergenceStrategy::DirectIntervention,
                measure_velocity(&intervention),
            ),
        ];
        let intervention_impact = compare_intervention_impact(&natural, &intervention);
        let strategic_recommendations = self.strategic_recommendations(
            &natural,
            &gap_distribution,
            &intervention_impact,
        );

        Ok(PopulationTrends {
            projection_years: years_ahead,
            current_state,
            natural,
            accelerated,
            intervention,
            gap_distribution,
            convergence_velocity,
            intervention_impact,
            strategic_recommendations,
        })
    }

    fn level_median(&self, level: u8) -> EngineResult<f64> {
        self.benchmark
            .level_median(level)
            .ok_or_else(|| EngineError::CalculationError {
                message: format!("no employees at level {} in population snapshot", level),
            })
    }

    /// Convergence under the realistic performance path.
    fn natural_convergence(
        &self,
        employee: &EmployeeRecord,
        level_median: f64,
    ) -> EngineResult<ConvergenceScenario> {
        let report = self
            .simulator
            .project(employee, NATURAL_HORIZON, &Scenario::CANONICAL)?;
        let realistic = &report.projections[&Scenario::Realistic];

        let years_to_median = years_until(
            &realistic.salary_progression,
            level_median,
            f64::from(NATURAL_HORIZON),
        );

        Ok(ConvergenceScenario {
            years_to_median,
            strategy: ConvergenceStrategy::NaturalProgression,
            projected_salary_at_convergence: salary_at(
                &realistic.salary_progression,
                years_to_median,
            ),
            required_growth_rate: realistic.cagr,
            feasibility: if years_to_median <= 5.0 {
                Feasibility::High
            } else if years_to_median <= 8.0 {
                Feasibility::Medium
            } else {
                Feasibility::Low
            },
            immediate_adjustment_amount: None,
            intervention_cost: None,
        })
    }

    /// Convergence under the optimistic performance path; feasibility
    /// thresholds are tighter than natural because the assumptions are
    /// already favourable.
    fn accelerated_convergence(
        &self,
        employee: &EmployeeRecord,
        level_median: f64,
    ) -> EngineResult<ConvergenceScenario> {
        let report = self
            .simulator
            .project(employee, NATURAL_HORIZON, &Scenario::CANONICAL)?;
        let optimistic = &report.projections[&Scenario::Optimistic];

        let years_to_median = years_until(
            &optimistic.salary_progression,
            level_median,
            ACCELERATED_FALLBACK_YEARS,
        );

        Ok(ConvergenceScenario {
            years_to_median,
            strategy: ConvergenceStrategy::PerformanceAcceleration,
            projected_salary_at_convergence: salary_at(
                &optimistic.salary_progression,
                years_to_median,
            ),
            required_growth_rate: optimistic.cagr,
            feasibility: if years_to_median <= 3.0 {
                Feasibility::High
            } else if years_to_median <= 6.0 {
                Feasibility::Medium
            } else {
                Feasibility::Low
            },
            immediate_adjustment_amount: None,
            intervention_cost: None,
        })
    }

    /// Convergence under direct salary intervention: either an immediate
    /// 50% gap closure followed by natural progression, or a re-run of the
    /// natural projection with the rating overridden to a target.
    fn intervention_convergence(
        &self,
        employee: &EmployeeRecord,
        level_median: f64,
        target_performance: Option<PerformanceRating>,
    ) -> EngineResult<ConvergenceScenario> {
        let gap_amount = level_median - employee.salary;
        let immediate_adjustment = gap_amount * INTERVENTION_GAP_CLOSURE;

        let (total_years, growth_rate) = match target_performance {
            None => {
                let mut adjusted = employee.clone();
                adjusted.salary += immediate_adjustment;

                let natural = self.natural_convergence(&adjusted, level_median)?;
                // One year for the adjustment itself, then natural
                // progression on the adjusted salary.
                (1.0 + natural.years_to_median, natural.required_growth_rate)
            }
            Some(target) => {
                let mut improved = employee.clone();
                improved.performance_rating = target;

                let report =
                    self.simulator
                        .project(&improved, TARGETED_HORIZON, &[Scenario::Realistic])?;
                let realistic = &report.projections[&Scenario::Realistic];
                let years = years_until(
                    &realistic.salary_progression,
                    level_median,
                    f64::from(TARGETED_HORIZON),
                );
                (years, realistic.cagr)
            }
        };

        Ok(ConvergenceScenario {
            years_to_median: total_years,
            strategy: ConvergenceStrategy::DirectIntervention,
            // A funded intervention lands slightly above the median.
            projected_salary_at_convergence: level_median * 1.02,
            required_growth_rate: growth_rate,
            feasibility: Feasibility::High,
            immediate_adjustment_amount: Some(immediate_adjustment),
            intervention_cost: Some(immediate_adjustment),
        })
    }

    fn project_trend(
        &self,
        below_median: &[BelowMedianEmployee],
        years_ahead: u32,
        growth_rate: f64,
    ) -> TrendProjection {
        let mut timeline = Vec::with_capacity(years_ahead as usize);

        for year in 1..=years_ahead {
            let mut converged = 0usize;
            let mut remaining = 0usize;

            for employee in below_median {
                let projected =
                    employee.salary * (1.0 + growth_rate).powi(year as i32);
                let threshold =
                    employee.level_median * (1.0 - self.config.acceptable_gap_percent / 100.0);
                if projected >= threshold {
                    converged += 1;
                } else {
                    remaining += 1;
                }
            }

            let rate = if below_median.is_empty() {
                0.0
            } else {
                converged as f64 / below_median.len() as f64
            };

            timeline.push(YearConvergence {
                year,
                remaining_below_median: remaining,
                converged,
                convergence_rate_year: rate,
            });
        }

        let final_below_median_count = timeline
            .last()
            .map(|y| y.remaining_below_median)
            .unwrap_or(below_median.len());
        let convergence_rate = convergence_rate(&timeline);

        TrendProjection {
            timeline,
            final_below_median_count,
            convergence_rate,
        }
    }

    fn strategic_recommendations(
        &self,
        natural: &TrendProjection,
        gaps: &GapDistribution,
        impact: &InterventionImpact,
    ) -> Vec<String> {
        let mut recommendations = Vec::new();

        if gaps.severe_gaps > 0 {
            recommendations.push(format!(
                "URGENT: Address {} employees with >25% salary gaps through immediate interventions",
                gaps.severe_gaps
            ));
        }

        let structured = gaps.medium_gaps + gaps.large_gaps;
        if structured > 0 {
            recommendations.push(format!(
                "Implement performance acceleration programs for {} employees with 5-25% gaps",
                structured
            ));
        }

        match impact.intervention_effectiveness {
            EffectivenessTier::High => recommendations.push(
                "High intervention effectiveness detected - prioritize intervention strategies \
                 over natural progression"
                    .to_string(),
            ),
            EffectivenessTier::Low => recommendations.push(
                "Low intervention effectiveness - focus on natural progression and performance \
                 improvement"
                    .to_string(),
            ),
            EffectivenessTier::Medium => {}
        }

        if gaps.total_below_median as f64 > self.population.len() as f64 * 0.3 {
            recommendations.push(
                "Population-wide salary review recommended - high percentage of below-median \
                 employees"
                    .to_string(),
            );
        }

        if natural.convergence_rate < 50.0 {
            recommendations.push(
                "Natural convergence insufficient - intervention required for equitable outcomes"
                    .to_string(),
            );
        }

        if recommendations.is_empty() {
            recommendations.push(
                "Monitor current progression - population shows healthy convergence patterns"
                    .to_string(),
            );
        }

        recommendations
    }
}

/// First year index at which the path reaches the target, or the fallback.
fn years_until(salary_progression: &[f64], target: f64, fallback: f64) -> f64 {
    salary_progression
        .iter()
        .position(|&salary| salary >= target)
        .map(|year| year as f64)
        .unwrap_or(fallback)
}

/// Salary at the convergence year, clamped to the end of the path.
fn salary_at(salary_progression: &[f64], years_to_median: f64) -> f64 {
    if salary_progression.is_empty() {
        return 0.0;
    }
    let index = (years_to_median as usize).min(salary_progression.len() - 1);
    salary_progression[index]
}

/// The gap/timeline decision table for convergence recommendations.
fn recommend_action(gap_percent: f64, natural_years: f64) -> ConvergenceAction {
    if gap_percent > 25.0 || natural_years > 7.0 {
        ConvergenceAction::ImmediateIntervention
    } else if gap_percent > 15.0 || natural_years > 5.0 {
        ConvergenceAction::PerformanceAcceleration
    } else if natural_years <= 3.0 {
        ConvergenceAction::MonitorNaturalProgression
    } else {
        ConvergenceAction::ModerateIntervention
    }
}

fn assess_feasibility(
    natural: &ConvergenceScenario,
    accelerated: &ConvergenceScenario,
    intervention: &ConvergenceScenario,
) -> ConvergenceFeasibility {
    let scenarios = [natural, accelerated, intervention];
    let recommended_approach = scenarios
        .iter()
        .min_by(|a, b| a.years_to_median.total_cmp(&b.years_to_median))
        .map(|s| s.strategy)
        .unwrap_or(ConvergenceStrategy::DirectIntervention);

    ConvergenceFeasibility {
        natural: natural.feasibility,
        accelerated: accelerated.feasibility,
        intervention_certainty: Feasibility::High,
        recommended_approach,
    }
}

fn summarize_gaps(below_median: &[BelowMedianEmployee]) -> BelowMedianStatistics {
    if below_median.is_empty() {
        return BelowMedianStatistics {
            count: 0,
            average_gap_amount: 0.0,
            median_gap_amount: 0.0,
            average_gap_percent: 0.0,
            median_gap_percent: 0.0,
            total_gap_amount: 0.0,
            max_gap_amount: 0.0,
            min_gap_amount: 0.0,
        };
    }

    let gap_amounts: Vec<f64> = below_median.iter().map(|e| e.gap_amount).collect();
    let gap_percents: Vec<f64> = below_median.iter().map(|e| e.gap_percent).collect();

    BelowMedianStatistics {
        count: below_median.len(),
        average_gap_amount: mean(&gap_amounts),
        median_gap_amount: median(&gap_amounts),
        average_gap_percent: mean(&gap_percents),
        median_gap_percent: median(&gap_percents),
        total_gap_amount: gap_amounts.iter().sum(),
        max_gap_amount: gap_amounts.iter().fold(f64::MIN, |a, &b| a.max(b)),
        min_gap_amount: gap_amounts.iter().fold(f64::MAX, |a, &b| a.min(b)),
    }
}

fn gender_pattern(below_median: &[BelowMedianEmployee], gender: Gender) -> GenderPattern {
    let gaps: Vec<f64> = below_median
        .iter()
        .filter(|e| e.gender == gender)
        .map(|e| e.gap_percent)
        .collect();

    if gaps.is_empty() {
        GenderPattern {
            count: 0,
            average_gap_percent: 0.0,
            median_gap_percent: 0.0,
        }
    } else {
        GenderPattern {
            count: gaps.len(),
            average_gap_percent: mean(&gaps),
            median_gap_percent: median(&gaps),
        }
    }
}

fn analyze_gender_patterns(below_median: &[BelowMedianEmployee]) -> GenderAnalysis {
    let male = gender_pattern(below_median, Gender::Male);
    let female = gender_pattern(below_median, Gender::Female);

    let (gender_disparity, disparity_significant) = if male.count > 0 && female.count > 0 {
        let disparity = female.average_gap_percent - male.average_gap_percent;
        (Some(disparity), Some(disparity.abs() > 5.0))
    } else {
        (None, None)
    };

    GenderAnalysis {
        male,
        female,
        gender_disparity,
        disparity_significant,
    }
}

fn convergence_rate(timeline: &[YearConvergence]) -> f64 {
    let Some(first) = timeline.first() else {
        return 0.0;
    };
    let initial = first.remaining_below_median + first.converged;
    if initial == 0 {
        return 100.0;
    }
    let Some(last) = timeline.last() else {
        return 0.0;
    };
    let final_count = last.remaining_below_median;
    (((initial - final_count) as f64 / initial as f64) * 100.0).max(0.0)
}

fn analyze_gap_distribution(below_median: &[BelowMedianEmployee]) -> GapDistribution {
    let gaps: Vec<f64> = below_median
        .iter()
        .map(|e| e.gap_percent)
        .filter(|&g| g > 0.0)
        .collect();

    if gaps.is_empty() {
        return GapDistribution {
            total_below_median: 0,
            small_gaps: 0,
            medium_gaps: 0,
            large_gaps: 0,
            severe_gaps: 0,
            average_gap_percent: 0.0,
            median_gap_percent: 0.0,
        };
    }

    GapDistribution {
        total_below_median: gaps.len(),
        small_gaps: gaps.iter().filter(|&&g| g <= 5.0).count(),
        medium_gaps: gaps.iter().filter(|&&g| g > 5.0 && g <= 15.0).count(),
        large_gaps: gaps.iter().filter(|&&g| g > 15.0 && g <= 25.0).count(),
        severe_gaps: gaps.iter().filter(|&&g| g > 25.0).count(),
        average_gap_percent: mean(&gaps),
        median_gap_percent: median(&gaps),
    }
}

fn measure_velocity(projection: &TrendProjection) -> ConvergenceVelocity {
    let mut peak_rate = 0.0;
    let mut peak_year = if projection.timeline.is_empty() { 0 } else { 1 };

    for year in &projection.timeline {
        if year.convergence_rate_year > peak_rate {
            peak_rate = year.convergence_rate_year;
            peak_year = year.year;
        }
    }

    ConvergenceVelocity {
        peak_velocity_percent_per_year: peak_rate * 100.0,
        peak_year,
        final_convergence_rate: projection.convergence_rate,
    }
}

fn compare_intervention_impact(
    natural: &TrendProjection,
    intervention: &TrendProjection,
) -> InterventionImpact {
    let natural_rate = natural.convergence_rate;
    let intervention_rate = intervention.convergence_rate;
    let improvement = intervention_rate - natural_rate;
    let relative = if natural_rate > 0.0 {
        improvement / natural_rate * 100.0
    } else {
        0.0
    };

    InterventionImpact {
        natural_convergence_rate: natural_rate,
        intervention_convergence_rate: intervention_rate,
        absolute_improvement: improvement,
        relative_improvement_percent: relative,
        intervention_effectiveness: if relative > 50.0 {
            EffectivenessTier::High
        } else if relative > 20.0 {
            EffectivenessTier::Medium
        } else {
            EffectivenessTier::Low
        },
    }
}
