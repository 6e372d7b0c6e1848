//! Data models for the equity engine.
//!
//! This module contains the employee input records, derived population
//! benchmarks, and the structured result records exposed to report and
//! dashboard collaborators. All result types are composed of primitive
//! values and nested structures so they serialize cleanly to any
//! downstream format.

mod allocation;
mod benchmark;
mod convergence;
mod employee;
mod projection;
mod strategy;

pub use allocation::{
    BudgetAnalysis, CandidateIntervention, InterventionImpactSummary, ManagerAllocation,
    ManagerTeam, PolicyCompliance, PolicyRecommendation, PolicyRecommendationKind, PolicySummary,
    PriorityDistribution, PriorityTier, RecommendationPriority,
};
pub use benchmark::{
    mean, median, quantile_sorted, sample_std, PopulationBenchmark, Quartile, SalaryRange,
};
pub use convergence::{
    BelowMedianAnalysis, BelowMedianEmployee, BelowMedianStatistics, ConvergenceAction,
    ConvergenceFeasibility, ConvergenceResult, ConvergenceScenario, ConvergenceStrategy,
    ConvergenceVelocity, EffectivenessTier, Feasibility, GapDistribution, GenderAnalysis,
    GenderPattern, InterventionImpact, PopulationTrends, TrendProjection, YearConvergence,
};
pub use employee::{EmployeeRecord, Gender, PerformanceRating, DEFAULT_TENURE_YEARS};
pub use projection::{
    ActionTimeline, CurrentState, MarketPosition, MedianComparison, MedianStatus, PrimaryAction,
    ProgressionReport, ProgressionSummary, Recommendation, RiskFactor, Scenario,
    ScenarioProjection, SecondaryAction,
};
pub use strategy::{
    BaselineMetrics, ConfidenceLevel, EquityApproach, EquityApproachKind,
    EquityInterventionAnalysis, ImplementationComplexity, ImplementationPhase, ImplementationRisk,
    InterventionStrategy, LegalRiskReduction, RecommendedStrategy, RemediationAnalysis,
    RiskAssessment, RiskLevel, RoiAnalysis, ScoredStrategy, StrategyEvaluation, StrategyKind,
    StrategyScores, UnderpaidEmployee,
};
