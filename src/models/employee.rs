//! Employee model.
//!
//! Employee records are owned by the HR system; the engine only needs enough
//! of them to label a payslip and to match payroll rows in bulk runs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Represents an employee a payslip is generated for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier, matched against [`crate::models::PayrollInput::employee_id`].
    pub id: String,
    /// The employee's display name.
    pub name: String,
    /// Department the employee belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Job title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    /// The date the employee joined.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_joining: Option<NaiveDate>,
}

impl Employee {
    /// Creates an employee with only an id and a name.
    ///
    /// # Example
    ///
    /// ```
    /// use payslip_engine::models::Employee;
    ///
    /// let employee = Employee::new("EMP001", "Asha Rao");
    /// assert_eq!(employee.id, "EMP001");
    /// assert!(employee.department.is_none());
    /// ```
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            department: None,
            designation: None,
            date_of_joining: None,
        }
    }
}
