//! Multi-criteria strategy scoring.
//!
//! Each applicable strategy is scored on four 0–1 sub-scores and combined
//! with fixed weights: 30% effectiveness, 25% feasibility, 20% inverted
//! risk, 25% cost efficiency.

use crate::models::{
    ConfidenceLevel, ImplementationComplexity, InterventionStrategy, LegalRiskReduction,
    RecommendedStrategy, ScoredStrategy, StrategyEvaluation, StrategyScores,
};

const EFFECTIVENESS_WEIGHT: f64 = 0.30;
const FEASIBILITY_WEIGHT: f64 = 0.25;
const RISK_WEIGHT: f64 = 0.20;
const COST_EFFICIENCY_WEIGHT: f64 = 0.25;

/// Achieved gap reduction relative to the maximum possible reduction.
fn effectiveness_score(strategy: &InterventionStrategy, max_possible_reduction: f64) -> f64 {
    if max_possible_reduction == 0.0 {
        return 1.0;
    }
    (strategy.gap_reduction_percent / max_possible_reduction).min(1.0)
}

/// Weighted average of budget headroom, timeline length, and complexity.
fn feasibility_score(strategy: &InterventionStrategy, budget_constraint: f64) -> f64 {
    let budget_feasibility = if budget_constraint > 0.0 {
        (1.0 - strategy.cost_as_percent_payroll / budget_constraint).max(0.0)
    } else {
        1.0
    };

    let timeline_feasibility = (1.0 - (strategy.timeline_years - 1.0) * 0.1).max(0.2);

    let complexity_feasibility = match strategy.implementation_complexity {
        ImplementationComplexity::None => 1.0,
        ImplementationComplexity::Low => 0.9,
        ImplementationComplexity::Medium => 0.7,
        ImplementationComplexity::High => 0.5,
    };

    (budget_feasibility + timeline_feasibility + complexity_feasibility) / 3.0
}

/// Combined risk score, 0–1, higher meaning more risky.
fn risk_score(strategy: &InterventionStrategy) -> f64 {
    let legal_risk_offset = match strategy.legal_risk_reduction {
        LegalRiskReduction::Low => 0.8,
        LegalRiskReduction::Medium => 0.5,
        LegalRiskReduction::High => 0.2,
    };

    let budget_risk = strategy.budget_utilization.min(1.0);

    let implementation_risk = match strategy.implementation_complexity {
        ImplementationComplexity::None => 0.1,
        ImplementationComplexity::Low => 0.2,
        ImplementationComplexity::Medium => 0.5,
        ImplementationComplexity::High => 0.8,
    };

    (budget_risk + implementation_risk + (1.0 - legal_risk_offset)) / 3.0
}

/// Benefit per unit cost, normalised against total payroll.
fn cost_efficiency_score(strategy: &InterventionStrategy, total_payroll: f64) -> f64 {
    if strategy.gap_reduction_percent == 0.0 {
        return if strategy.total_cost == 0.0 { 1.0 } else { 0.0 };
    }
    if strategy.total_cost == 0.0 {
        // Zero-cost reduction is perfectly efficient.
        return 1.0;
    }

    let cost_per_gap_point = strategy.total_cost / strategy.gap_reduction_percent;
    (1.0 - cost_per_gap_point / total_payroll).max(0.0)
}

/// Scores one strategy on all four criteria.
pub fn score_strategy(
    strategy: &InterventionStrategy,
    max_possible_reduction: f64,
    budget_constraint: f64,
    total_payroll: f64,
) -> StrategyScores {
    let effectiveness = effectiveness_score(strategy, max_possible_reduction);
    let feasibility = feasibility_score(strategy, budget_constraint);
    let risk = risk_score(strategy);
    let cost_efficiency = cost_efficiency_score(strategy, total_payroll);

    StrategyScores {
        overall_score: effectiveness * EFFECTIVENESS_WEIGHT
            + feasibility * FEASIBILITY_WEIGHT
            + (1.0 - risk) * RISK_WEIGHT
            + cost_efficiency * COST_EFFICIENCY_WEIGHT,
        effectiveness_score: effectiveness,
        feasibility_score: feasibility,
        risk_score: risk,
        cost_efficiency_score: cost_efficiency,
    }
}

/// Scores every applicable strategy and ranks them best first.
pub fn evaluate_strategies(
    strategies: &[InterventionStrategy],
    max_possible_reduction: f64,
    budget_constraint: f64,
    total_payroll: f64,
) -> StrategyEvaluation {
    let mut ranking: Vec<ScoredStrategy> = strategies
        .iter()
        .filter(|s| s.applicable)
        .map(|s| ScoredStrategy {
            scores: score_strategy(s, max_possible_reduction, budget_constraint, total_payroll),
            strategy: s.clone(),
        })
        .collect();

    ranking.sort_by(|a, b| b.scores.overall_score.total_cmp(&a.scores.overall_score));

    StrategyEvaluation { ranking }
}

/// Selects the top-ranked strategy with a confidence label, or reports
/// that nothing was applicable.
pub fn select_recommended(evaluation: &StrategyEvaluation) -> RecommendedStrategy {
    match evaluation.top() {
        Some(top) => RecommendedStrategy::Selected {
            choice: top.clone(),
            confidence_level: if top.scores.overall_score > 0.8 {
                ConfidenceLevel::High
            } else if top.scores.overall_score > 0.6 {
                ConfidenceLevel::Medium
            } else {
                ConfidenceLevel::Low
            },
        },
        None => RecommendedStrategy::NoViableStrategy {
            reason: "No applicable strategies found".to_string(),
        },
    }
}
