use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A mill employee. Quality tests reference the employee who ran them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub firstname: String,
    pub lastname: String,
    pub role: EmployeeRole,
    pub hire_date: NaiveDate,
    pub phone: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeRole {
    Operator,
    Manager,
    QualityTester,
    Admin,
}

impl EmployeeRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Operator => "operator",
            Self::Manager => "manager",
            Self::QualityTester => "quality_tester",
            Self::Admin => "admin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "operator" => Some(Self::Operator),
            "manager" => Some(Self::Manager),
            "quality_tester" => Some(Self::QualityTester),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

/// Input for hiring an employee. New employees start active.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEmployeeInput {
    pub firstname: String,
    pub lastname: String,
    pub role: EmployeeRole,
    pub hire_date: NaiveDate,
    pub phone: Option<String>,
}

/// Input for updating an employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateEmployeeInput {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub role: Option<EmployeeRole>,
    pub hire_date: Option<NaiveDate>,
    pub phone: Option<String>,
    pub active: Option<bool>,
}
