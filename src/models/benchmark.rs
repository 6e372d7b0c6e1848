//! Population benchmark statistics.
//!
//! This module computes the per-level and per-(level, gender) salary
//! statistics the analyzers compare individual employees against. A
//! benchmark is derived once from a population snapshot and treated as
//! read-only afterwards; if the snapshot changes, compute a new benchmark.

use serde::Serialize;
use std::collections::BTreeMap;

use super::{EmployeeRecord, Gender};

/// Salary range statistics for one level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SalaryRange {
    /// Lowest salary at the level.
    pub min: f64,
    /// Highest salary at the level.
    pub max: f64,
    /// 25th percentile salary.
    pub q25: f64,
    /// Median salary.
    pub median: f64,
    /// 75th percentile salary.
    pub q75: f64,
}

/// Quartile position of a salary within a level's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Quartile {
    /// At or below the 25th percentile.
    BottomQuartile,
    /// Between the 25th percentile and the median.
    SecondQuartile,
    /// Between the median and the 75th percentile.
    ThirdQuartile,
    /// Above the 75th percentile.
    TopQuartile,
}

impl SalaryRange {
    /// Quartile the given salary falls into.
    pub fn quartile_of(&self, salary: f64) -> Quartile {
        if salary <= self.q25 {
            Quartile::BottomQuartile
        } else if salary <= self.median {
            Quartile::SecondQuartile
        } else if salary <= self.q75 {
            Quartile::ThirdQuartile
        } else {
            Quartile::TopQuartile
        }
    }

    /// Percentile position of a salary within the range, clamped to 0–100.
    ///
    /// A degenerate range of zero width maps every salary to the 50th
    /// percentile.
    pub fn percentile_of(&self, salary: f64) -> f64 {
        let span = self.max - self.min;
        if span > 0.0 {
            (((salary - self.min) / span) * 100.0).clamp(0.0, 100.0)
        } else {
            50.0
        }
    }
}

/// Derived salary statistics for a population snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct PopulationBenchmark {
    /// Median salary keyed by level.
    pub medians_by_level: BTreeMap<u8, f64>,
    /// Median salary keyed by (level, gender), present only where the
    /// level has at least one employee of that gender.
    pub medians_by_level_gender: BTreeMap<(u8, Gender), f64>,
    /// Salary range statistics keyed by level.
    pub level_ranges: BTreeMap<u8, SalaryRange>,
    /// Median salary across the whole population.
    pub overall_median: f64,
    /// Mean salary across the whole population.
    pub overall_mean: f64,
    /// Sample standard deviation of salaries across the whole population.
    pub salary_std: f64,
    /// Number of employees in the snapshot.
    pub population_size: usize,
}

impl PopulationBenchmark {
    /// Computes benchmark statistics from a population snapshot.
    pub fn from_population(population: &[EmployeeRecord]) -> Self {
        let mut by_level: BTreeMap<u8, Vec<f64>> = BTreeMap::new();
        let mut by_level_gender: BTreeMap<(u8, Gender), Vec<f64>> = BTreeMap::new();
        let mut all_salaries: Vec<f64> = Vec::with_capacity(population.len());

        for employee in population {
            by_level.entry(employee.level).or_default().push(employee.salary);
            by_level_gender
                .entry((employee.level, employee.gender))
                .or_default()
                .push(employee.salary);
            all_salaries.push(employee.salary);
        }

        let medians_by_level = by_level
            .iter()
            .map(|(level, salaries)| (*level, median(salaries)))
            .collect();

        let medians_by_level_gender = by_level_gender
            .iter()
            .filter(|((_, gender), _)| *gender != Gender::Unknown)
            .map(|(key, salaries)| (*key, median(salaries)))
            .collect();

        let level_ranges = by_level
            .iter()
            .map(|(level, salaries)| {
                let mut sorted = salaries.clone();
                sorted.sort_by(|a, b| a.total_cmp(b));
                (
                    *level,
                    SalaryRange {
                        min: sorted[0],
                        max: sorted[sorted.len() - 1],
                        q25: quantile_sorted(&sorted, 0.25),
                        median: quantile_sorted(&sorted, 0.5),
                        q75: quantile_sorted(&sorted, 0.75),
                    },
                )
            })
            .collect();

        PopulationBenchmark {
            medians_by_level,
            medians_by_level_gender,
            level_ranges,
            overall_median: median(&all_salaries),
            overall_mean: mean(&all_salaries),
            salary_std: sample_std(&all_salaries),
            population_size: population.len(),
        }
    }

    /// Median salary for a level, if any employee holds that level.
    pub fn level_median(&self, level: u8) -> Option<f64> {
        self.medians_by_level.get(&level).copied()
    }

    /// Median salary for a (level, gender) pair, falling back to the
    /// cross-gender level median when the pair is absent.
    pub fn level_gender_median(&self, level: u8, gender: Gender) -> Option<f64> {
        self.medians_by_level_gender
            .get(&(level, gender))
            .copied()
            .or_else(|| self.level_median(level))
    }

    /// Returns true if the benchmark was computed from an empty snapshot.
    pub fn is_empty(&self) -> bool {
        self.population_size == 0
    }
}

/// Arithmetic mean of a slice. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median of a slice. Returns 0.0 for empty input.
pub fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    quantile_sorted(&sorted, 0.5)
}

/// Linearly-interpolated quantile of an already-sorted slice.
///
/// Returns 0.0 for empty input.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }
    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let weight = position - lower as f64;
        sorted[lower] * (1.0 - weight) + sorted[upper] * weight
    }
}

/// Sample standard deviation of a slice. Returns 0.0 for fewer than two values.
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance =
        values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PerformanceRating;

    fn employee(id: &str, level: u8, salary: f64, gender: Gender) -> EmployeeRecord {
        EmployeeRecord {
            employee_id: id.to_string(),
            level,
            salary,
            performance_rating: PerformanceRating::Achieving,
            gender,
            hire_date: None,
            tenure_years: None,
            manager_id: None,
        }
    }

    fn three_level_population() -> Vec<EmployeeRecord> {
        vec![
            employee("e1", 3, 60_000.0, Gender::Female),
            employee("e2", 3, 70_000.0, Gender::Male),
            employee("e3", 3, 80_000.0, Gender::Male),
        ]
    }

    #[test]
    fn test_level_median_of_three_salaries() {
        let benchmark = PopulationBenchmark::from_population(&three_level_population());
        assert_eq!(benchmark.level_median(3), Some(70_000.0));
        assert_eq!(benchmark.level_median(4), None);
    }

    #[test]
    fn test_level_gender_median_falls_back_to_level() {
        let population = vec![
            employee("e1", 2, 50_000.0, Gender::Male),
            employee("e2", 2, 54_000.0, Gender::Male),
        ];
        let benchmark = PopulationBenchmark::from_population(&population);

        // No female employees at level 2, so the level median is used.
        assert_eq!(
            benchmark.level_gender_median(2, Gender::Female),
            Some(52_000.0)
        );
        assert_eq!(
            benchmark.level_gender_median(2, Gender::Male),
            Some(52_000.0)
        );
    }

    #[test]
    fn test_quantiles_interpolate_linearly() {
        let sorted = vec![10.0, 20.0, 30.0, 40.0];
        assert_eq!(quantile_sorted(&sorted, 0.5), 25.0);
        assert_eq!(quantile_sorted(&sorted, 0.25), 17.5);
        assert_eq!(quantile_sorted(&sorted, 0.0), 10.0);
        assert_eq!(quantile_sorted(&sorted, 1.0), 40.0);
    }

    #[test]
    fn test_salary_range_statistics() {
        let benchmark = PopulationBenchmark::from_population(&three_level_population());
        let range = benchmark.level_ranges[&3];
        assert_eq!(range.min, 60_000.0);
        assert_eq!(range.max, 80_000.0);
        assert_eq!(range.median, 70_000.0);
        assert_eq!(range.q25, 65_000.0);
        assert_eq!(range.q75, 75_000.0);
    }

    #[test]
    fn test_quartile_positions() {
        let range = SalaryRange {
            min: 60_000.0,
            max: 80_000.0,
            q25: 65_000.0,
            median: 70_000.0,
            q75: 75_000.0,
        };
        assert_eq!(range.quartile_of(61_000.0), Quartile::BottomQuartile);
        assert_eq!(range.quartile_of(68_000.0), Quartile::SecondQuartile);
        assert_eq!(range.quartile_of(72_000.0), Quartile::ThirdQuartile);
        assert_eq!(range.quartile_of(79_000.0), Quartile::TopQuartile);
    }

    #[test]
    fn test_percentile_of_degenerate_range_is_fiftieth() {
        let range = SalaryRange {
            min: 70_000.0,
            max: 70_000.0,
            q25: 70_000.0,
            median: 70_000.0,
            q75: 70_000.0,
        };
        assert_eq!(range.percentile_of(70_000.0), 50.0);
        assert_eq!(range.percentile_of(90_000.0), 50.0);
    }

    #[test]
    fn test_percentile_clamps_to_bounds() {
        let range = SalaryRange {
            min: 60_000.0,
            max: 80_000.0,
            q25: 65_000.0,
            median: 70_000.0,
            q75: 75_000.0,
        };
        assert_eq!(range.percentile_of(50_000.0), 0.0);
        assert_eq!(range.percentile_of(70_000.0), 50.0);
        assert_eq!(range.percentile_of(95_000.0), 100.0);
    }

    #[test]
    fn test_unknown_gender_excluded_from_gender_medians() {
        let population = vec![
            employee("e1", 1, 30_000.0, Gender::Unknown),
            employee("e2", 1, 32_000.0, Gender::Female),
        ];
        let benchmark = PopulationBenchmark::from_population(&population);
        assert!(!benchmark
            .medians_by_level_gender
            .contains_key(&(1, Gender::Unknown)));
        assert_eq!(
            benchmark.medians_by_level_gender.get(&(1, Gender::Female)),
            Some(&32_000.0)
        );
    }

    #[test]
    fn test_sample_std_matches_hand_calculation() {
        let values = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        // Sample variance of this classic data set is 32/7.
        let expected = (32.0_f64 / 7.0).sqrt();
        assert!((sample_std(&values) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_empty_population_benchmark() {
        let benchmark = PopulationBenchmark::from_population(&[]);
        assert!(benchmark.is_empty());
        assert_eq!(benchmark.overall_median, 0.0);
        assert!(benchmark.medians_by_level.is_empty());
    }
}
