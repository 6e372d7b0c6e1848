//! Employee model and related types.
//!
//! This module defines the [`EmployeeRecord`] struct together with the
//! [`PerformanceRating`] and [`Gender`] enums used throughout the engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{EngineError, EngineResult};

/// Tenure assumed when an employee record carries neither an explicit
/// tenure nor a hire date.
pub const DEFAULT_TENURE_YEARS: f64 = 2.5;

/// Performance rating on the five-step review scale.
///
/// The ordering is meaningful: `NotMet` is the lowest rating and
/// `Exceeding` the highest, so ratings can be compared directly.
///
/// # Example
///
/// ```
/// use equity_engine::models::PerformanceRating;
///
/// assert!(PerformanceRating::Exceeding > PerformanceRating::Achieving);
/// assert_eq!(PerformanceRating::HighPerforming.numeric_score(), 4.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PerformanceRating {
    /// Objectives not met.
    #[serde(rename = "Not met")]
    NotMet,
    /// Objectives partially met.
    #[serde(rename = "Partially met")]
    PartiallyMet,
    /// Achieving expectations.
    #[serde(rename = "Achieving")]
    Achieving,
    /// Consistently above expectations.
    #[serde(rename = "High Performing")]
    HighPerforming,
    /// Exceptional performance.
    #[serde(rename = "Exceeding")]
    Exceeding,
}

impl PerformanceRating {
    /// All ratings in ascending order.
    pub const ALL: [PerformanceRating; 5] = [
        PerformanceRating::NotMet,
        PerformanceRating::PartiallyMet,
        PerformanceRating::Achieving,
        PerformanceRating::HighPerforming,
        PerformanceRating::Exceeding,
    ];

    /// Returns the human-readable rating label.
    pub fn as_str(&self) -> &'static str {
        match self {
            PerformanceRating::NotMet => "Not met",
            PerformanceRating::PartiallyMet => "Partially met",
            PerformanceRating::Achieving => "Achieving",
            PerformanceRating::HighPerforming => "High Performing",
            PerformanceRating::Exceeding => "Exceeding",
        }
    }

    /// Position on the rating scale, 0 for the lowest rating.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Rating at the given scale position, clamped to the scale bounds.
    pub fn from_index_clamped(index: isize) -> PerformanceRating {
        let clamped = index.clamp(0, Self::ALL.len() as isize - 1) as usize;
        Self::ALL[clamped]
    }

    /// Numeric score on a 1.0–5.0 scale, used for high-performer thresholds.
    pub fn numeric_score(&self) -> f64 {
        (self.index() + 1) as f64
    }
}

impl fmt::Display for PerformanceRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PerformanceRating {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Not met" => Ok(PerformanceRating::NotMet),
            "Partially met" => Ok(PerformanceRating::PartiallyMet),
            "Achieving" => Ok(PerformanceRating::Achieving),
            "High Performing" => Ok(PerformanceRating::HighPerforming),
            "Exceeding" => Ok(PerformanceRating::Exceeding),
            other => Err(EngineError::UnknownRating {
                rating: other.to_string(),
            }),
        }
    }
}

/// Gender category used for pay-gap analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
    /// Not recorded or other.
    #[serde(other)]
    Unknown,
}

/// A single employee in the population snapshot.
///
/// Records are immutable inputs owned by the population-generation
/// collaborator; the engine only derives copies for what-if projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Unique identifier for the employee.
    pub employee_id: String,
    /// Job-grade level, 1 (lowest) to 6 (highest).
    pub level: u8,
    /// Current annual salary, currency-agnostic.
    pub salary: f64,
    /// Most recent performance rating.
    pub performance_rating: PerformanceRating,
    /// Gender category.
    pub gender: Gender,
    /// Date the employee was hired, if known.
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
    /// Tenure in years, if supplied directly by the population source.
    #[serde(default)]
    pub tenure_years: Option<f64>,
    /// Identifier of the employee's manager, if any.
    #[serde(default)]
    pub manager_id: Option<String>,
}

impl EmployeeRecord {
    /// Validates the fields the engine depends on.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidEmployee`] if the salary is not
    /// positive or the level is outside the 1–6 range.
    pub fn validate(&self) -> EngineResult<()> {
        if self.salary <= 0.0 {
            return Err(EngineError::InvalidEmployee {
                field: "salary".to_string(),
                message: format!("must be positive, got {}", self.salary),
            });
        }
        if !(1..=6).contains(&self.level) {
            return Err(EngineError::InvalidEmployee {
                field: "level".to_string(),
                message: format!("must be between 1 and 6, got {}", self.level),
            });
        }
        Ok(())
    }

    /// Tenure in years as of the given date.
    ///
    /// Prefers an explicit `tenure_years` field, then derives from
    /// `hire_date`, then falls back to [`DEFAULT_TENURE_YEARS`].
    pub fn tenure_years_at(&self, as_of: NaiveDate) -> f64 {
        if let Some(tenure) = self.tenure_years {
            return tenure;
        }
        match self.hire_date {
            Some(hired) => (as_of - hired).num_days() as f64 / 365.25,
            None => DEFAULT_TENURE_YEARS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_employee() -> EmployeeRecord {
        EmployeeRecord {
            employee_id: "emp_001".to_string(),
            level: 3,
            salary: 72_500.0,
            performance_rating: PerformanceRating::Achieving,
            gender: Gender::Female,
            hire_date: NaiveDate::from_ymd_opt(2021, 3, 15),
            tenure_years: None,
            manager_id: Some("mgr_010".to_string()),
        }
    }

    #[test]
    fn test_rating_ordering_follows_scale() {
        assert!(PerformanceRating::NotMet < PerformanceRating::PartiallyMet);
        assert!(PerformanceRating::PartiallyMet < PerformanceRating::Achieving);
        assert!(PerformanceRating::Achieving < PerformanceRating::HighPerforming);
        assert!(PerformanceRating::HighPerforming < PerformanceRating::Exceeding);
    }

    #[test]
    fn test_rating_numeric_scores() {
        assert_eq!(PerformanceRating::NotMet.numeric_score(), 1.0);
        assert_eq!(PerformanceRating::Achieving.numeric_score(), 3.0);
        assert_eq!(PerformanceRating::Exceeding.numeric_score(), 5.0);
    }

    #[test]
    fn test_rating_from_str_roundtrip() {
        for rating in PerformanceRating::ALL {
            let parsed: PerformanceRating = rating.as_str().parse().unwrap();
            assert_eq!(parsed, rating);
        }
    }

    #[test]
    fn test_rating_from_str_unknown_returns_error() {
        let result = "Stellar".parse::<PerformanceRating>();
        match result {
            Err(EngineError::UnknownRating { rating }) => assert_eq!(rating, "Stellar"),
            other => panic!("Expected UnknownRating, got {:?}", other),
        }
    }

    #[test]
    fn test_rating_from_index_clamped() {
        assert_eq!(
            PerformanceRating::from_index_clamped(-3),
            PerformanceRating::NotMet
        );
        assert_eq!(
            PerformanceRating::from_index_clamped(2),
            PerformanceRating::Achieving
        );
        assert_eq!(
            PerformanceRating::from_index_clamped(12),
            PerformanceRating::Exceeding
        );
    }

    #[test]
    fn test_rating_serde_uses_review_labels() {
        assert_eq!(
            serde_json::to_string(&PerformanceRating::HighPerforming).unwrap(),
            "\"High Performing\""
        );
        let parsed: PerformanceRating = serde_json::from_str("\"Not met\"").unwrap();
        assert_eq!(parsed, PerformanceRating::NotMet);
    }

    #[test]
    fn test_gender_unknown_catch_all() {
        let parsed: Gender = serde_json::from_str("\"Nonbinary\"").unwrap();
        assert_eq!(parsed, Gender::Unknown);
    }

    #[test]
    fn test_deserialize_employee_record() {
        let json = r#"{
            "employee_id": "emp_042",
            "level": 4,
            "salary": 88000.0,
            "performance_rating": "High Performing",
            "gender": "Male",
            "hire_date": "2019-06-01",
            "manager_id": "mgr_003"
        }"#;

        let employee: EmployeeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(employee.employee_id, "emp_042");
        assert_eq!(employee.level, 4);
        assert_eq!(employee.performance_rating, PerformanceRating::HighPerforming);
        assert_eq!(employee.gender, Gender::Male);
        assert_eq!(employee.tenure_years, None);
        assert_eq!(employee.manager_id.as_deref(), Some("mgr_003"));
    }

    #[test]
    fn test_serialize_employee_roundtrip() {
        let employee = create_test_employee();
        let json = serde_json::to_string(&employee).unwrap();
        let deserialized: EmployeeRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(employee, deserialized);
    }

    #[test]
    fn test_validate_accepts_valid_record() {
        assert!(create_test_employee().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_non_positive_salary() {
        let mut employee = create_test_employee();
        employee.salary = 0.0;
        match employee.validate() {
            Err(EngineError::InvalidEmployee { field, .. }) => assert_eq!(field, "salary"),
            other => panic!("Expected InvalidEmployee, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_out_of_range_level() {
        let mut employee = create_test_employee();
        employee.level = 7;
        match employee.validate() {
            Err(EngineError::InvalidEmployee { field, .. }) => assert_eq!(field, "level"),
            other => panic!("Expected InvalidEmployee, got {:?}", other),
        }
    }

    #[test]
    fn test_tenure_prefers_explicit_field() {
        let mut employee = create_test_employee();
        employee.tenure_years = Some(7.2);
        let as_of = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(employee.tenure_years_at(as_of), 7.2);
    }

    #[test]
    fn test_tenure_derives_from_hire_date() {
        let employee = create_test_employee();
        let as_of = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let tenure = employee.tenure_years_at(as_of);
        assert!((tenure - 3.0).abs() < 0.01, "tenure was {}", tenure);
    }

    #[test]
    fn test_tenure_falls_back_to_default() {
        let mut employee = create_test_employee();
        employee.hire_date = None;
        let as_of = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(employee.tenure_years_at(as_of), DEFAULT_TENURE_YEARS);
    }
}
