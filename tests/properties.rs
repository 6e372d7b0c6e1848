//! Property tests for the engine's numeric and allocation invariants.

use chrono::NaiveDate;
use proptest::prelude::*;

use equity_engine::config::EngineConfig;
use equity_engine::convergence::ConvergenceAnalyzer;
use equity_engine::forecasting::{cagr, confidence_interval, project_compound, time_to_target};
use equity_engine::models::{ConvergenceResult, EmployeeRecord, Gender, PerformanceRating};
use equity_engine::policy::PolicyBudgetAllocator;

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

fn rating_strategy() -> impl Strategy<Value = PerformanceRating> {
    prop::sample::select(PerformanceRating::ALL.to_vec())
}

fn gender_strategy() -> impl Strategy<Value = Gender> {
    prop::sample::select(vec![Gender::Male, Gender::Female])
}

prop_compose! {
    fn employee_strategy()(
        level in 1u8..=6,
        salary in 25_000.0f64..150_000.0,
        rating in rating_strategy(),
        gender in gender_strategy(),
    ) -> EmployeeRecord {
        EmployeeRecord {
            employee_id: String::new(),
            level,
            salary,
            performance_rating: rating,
            gender,
            hire_date: None,
            tenure_years: Some(3.0),
            manager_id: Some("mgr_001".to_string()),
        }
    }
}

fn team_strategy() -> impl Strategy<Value = Vec<EmployeeRecord>> {
    prop::collection::vec(employee_strategy(), 2..=12).prop_map(|mut team| {
        for (index, employee) in team.iter_mut().enumerate() {
            employee.employee_id = format!("emp_{:03}", index);
        }
        team
    })
}

proptest! {
    #[test]
    fn cagr_of_unchanged_value_is_zero(value in 1.0f64..1_000_000.0, years in 1.0f64..40.0) {
        let rate = cagr(value, value, years).unwrap();
        prop_assert!(rate.abs() < 1e-9);
    }

    #[test]
    fn projection_inverts_time_to_target(
        start in 20_000.0f64..100_000.0,
        uplift in 1_000.0f64..80_000.0,
        rate in 0.005f64..0.25,
    ) {
        let target = start + uplift;
        let years = time_to_target(start, target, rate).unwrap();
        let projected = project_compound(start, rate, years).unwrap();
        prop_assert!((projected - target).abs() / target < 1e-9);
    }

    #[test]
    fn confidence_interval_contains_mean_and_is_symmetric(
        values in prop::collection::vec(10_000.0f64..200_000.0, 2..40),
        confidence in 0.5f64..0.999,
    ) {
        let (lower, upper) = confidence_interval(&values, confidence).unwrap();
        let mean = values.iter().sum::<f64>() / values.len() as f64;

        prop_assert!(lower <= mean && mean <= upper);
        let left = mean - lower;
        let right = upper - mean;
        prop_assert!((left - right).abs() < 1e-6 * left.abs().max(1.0));
    }

    #[test]
    fn single_value_interval_is_degenerate(value in 1.0f64..1_000_000.0) {
        let (lower, upper) = confidence_interval(&[value], 0.95).unwrap();
        prop_assert_eq!(lower, value);
        prop_assert_eq!(upper, value);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Optimistic projections never converge slower than realistic ones.
    #[test]
    fn accelerated_never_slower_than_natural(team in team_strategy()) {
        let analyzer = ConvergenceAnalyzer::new(&team, EngineConfig::default(), as_of());

        for employee in &team {
            let result = analyzer.convergence_timeline(employee, None).unwrap();
            if let ConvergenceResult::BelowMedian { natural, accelerated, .. } = result {
                prop_assert!(
                    accelerated.years_to_median <= natural.years_to_median,
                    "accelerated {} slower than natural {}",
                    accelerated.years_to_median,
                    natural.years_to_median
                );
            }
        }
    }

    /// For every manager, the sum of selected intervention costs never
    /// exceeds the manager budget.
    #[test]
    fn budget_invariant_holds(
        team in team_strategy(),
        budget_percent in 0.05f64..2.0,
    ) {
        let mut config = EngineConfig::default();
        config.inequality_budget_percent = budget_percent;

        let allocator = PolicyBudgetAllocator::new(&team, config);
        let teams = allocator.identify_managers_and_teams();
        let prioritized = allocator.prioritize_interventions(&teams);
        let allocations = allocator.optimize_budget_allocation(&prioritized);

        for (manager_id, allocation) in &allocations {
            let spent: f64 = allocation
                .selected_interventions
                .iter()
                .map(|i| i.recommended_adjustment)
                .sum();
            prop_assert!(
                spent <= teams[manager_id].intervention_budget + 1e-6,
                "manager {} spent {} of {}",
                manager_id,
                spent,
                teams[manager_id].intervention_budget
            );
            prop_assert!(allocation.remaining_budget >= -1e-9);
        }
    }

    /// Scanning the same immutable snapshot twice yields identical results.
    #[test]
    fn below_median_scan_is_idempotent(team in team_strategy()) {
        let analyzer = ConvergenceAnalyzer::new(&team, EngineConfig::default(), as_of());
        let first = analyzer.identify_below_median(5.0, true).unwrap();
        let second = analyzer.identify_below_median(5.0, true).unwrap();
        prop_assert_eq!(first, second);
    }
}
