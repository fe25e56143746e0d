//! Raw employee attributes as collected by the input surface

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use thiserror::Error;

pub const PERCENT_RANGE: RangeInclusive<u32> = 0..=100;
pub const PROJECT_RANGE: RangeInclusive<u32> = 1..=10;
pub const TENURE_RANGE: RangeInclusive<u32> = 1..=10;
pub const MONTHLY_HOURS_RANGE: RangeInclusive<u32> = 50..=400;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
    #[error("unknown {kind} '{value}' (expected one of: {expected})")]
    UnknownCategory {
        kind: &'static str,
        value: String,
        expected: String,
    },
}

/// Department selection; the column name is the one-hot indicator the model was trained with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Department {
    #[serde(rename = "IT", alias = "it")]
    It,
    #[serde(rename = "Research & Development", alias = "research-development")]
    ResearchDevelopment,
    #[serde(alias = "accounting")]
    Accounting,
    #[serde(rename = "Human Resources", alias = "human-resources")]
    HumanResources,
    #[serde(alias = "management")]
    Management,
    #[serde(alias = "marketing")]
    Marketing,
    #[serde(rename = "Product Management", alias = "product-management")]
    ProductManagement,
    #[serde(alias = "sales")]
    Sales,
    #[serde(alias = "support")]
    Support,
    #[serde(alias = "technical")]
    Technical,
}

impl Department {
    /// Every selectable department, in indicator column order
    pub const ALL: [Department; 10] = [
        Department::It,
        Department::ResearchDevelopment,
        Department::Accounting,
        Department::HumanResources,
        Department::Management,
        Department::Marketing,
        Department::ProductManagement,
        Department::Sales,
        Department::Support,
        Department::Technical,
    ];

    pub fn column_name(self) -> &'static str {
        match self {
            Department::It => "IT",
            Department::ResearchDevelopment => "Research & Development",
            Department::Accounting => "Accounting",
            Department::HumanResources => "Human Resources",
            Department::Management => "Management",
            Department::Marketing => "Marketing",
            Department::ProductManagement => "Product Management",
            Department::Sales => "Sales",
            Department::Support => "Support",
            Department::Technical => "Technical",
        }
    }

    /// Shell-friendly spelling accepted on the command line
    pub fn slug(self) -> &'static str {
        match self {
            Department::It => "it",
            Department::ResearchDevelopment => "research-development",
            Department::Accounting => "accounting",
            Department::HumanResources => "human-resources",
            Department::Management => "management",
            Department::Marketing => "marketing",
            Department::ProductManagement => "product-management",
            Department::Sales => "sales",
            Department::Support => "support",
            Department::Technical => "technical",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for Department {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Department::ALL
            .into_iter()
            .find(|d| d.column_name().eq_ignore_ascii_case(s) || d.slug().eq_ignore_ascii_case(s))
            .ok_or_else(|| InputError::UnknownCategory {
                kind: "department",
                value: s.to_string(),
                expected: Department::ALL.map(Department::slug).join(", "),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SalaryLevel {
    #[serde(alias = "high")]
    High,
    #[serde(alias = "medium")]
    Medium,
    #[serde(alias = "low")]
    Low,
}

impl SalaryLevel {
    pub const ALL: [SalaryLevel; 3] = [SalaryLevel::High, SalaryLevel::Medium, SalaryLevel::Low];

    pub fn column_name(self) -> &'static str {
        match self {
            SalaryLevel::High => "High",
            SalaryLevel::Medium => "Medium",
            SalaryLevel::Low => "Low",
        }
    }
}

impl fmt::Display for SalaryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for SalaryLevel {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        SalaryLevel::ALL
            .into_iter()
            .find(|l| l.column_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| InputError::UnknownCategory {
                kind: "salary level",
                value: s.to_string(),
                expected: "high, medium, low".to_string(),
            })
    }
}

/// One employee as entered on the form, before any encoding. Every field is
/// required when deserializing; the form's initial selections live in [`Default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawInputRecord {
    pub satisfaction_level_pct: u32,
    pub last_evaluation_pct: u32,
    pub number_project: u32,
    pub department: Department,
    pub salary: SalaryLevel,
    pub time_spend_company: u32,
    pub average_monthly_hours: u32,
    pub work_accident: bool,
    pub promotion_last_5years: bool,
}

impl Default for RawInputRecord {
    /// The form's initial selections
    fn default() -> Self {
        Self {
            satisfaction_level_pct: 20,
            last_evaluation_pct: 70,
            number_project: 4,
            department: Department::It,
            salary: SalaryLevel::High,
            time_spend_company: 3,
            average_monthly_hours: 160,
            work_accident: false,
            promotion_last_5years: false,
        }
    }
}

fn check_range(
    field: &'static str,
    value: u32,
    range: &RangeInclusive<u32>,
) -> Result<(), InputError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(InputError::OutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

impl RawInputRecord {
    /// Bounds check every numeric field. The encoder assumes this has passed.
    pub fn validate(&self) -> Result<(), InputError> {
        check_range(
            "satisfaction_level_pct",
            self.satisfaction_level_pct,
            &PERCENT_RANGE,
        )?;
        check_range("last_evaluation_pct", self.last_evaluation_pct, &PERCENT_RANGE)?;
        check_range("number_project", self.number_project, &PROJECT_RANGE)?;
        check_range("time_spend_company", self.time_spend_company, &TENURE_RANGE)?;
        check_range(
            "average_monthly_hours",
            self.average_monthly_hours,
            &MONTHLY_HOURS_RANGE,
        )?;
        Ok(())
    }

    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
