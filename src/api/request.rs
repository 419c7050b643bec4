//! Request and response bodies for the Payslip Calculation Engine API.

use serde::{Deserialize, Serialize};

use crate::models::{
    BulkPayslipOutcome, BulkSummary, Employee, PayrollInput, SalaryStructure,
};

/// The template used when a request names none.
pub const DEFAULT_TEMPLATE_ID: &str = "standard";

fn default_template_id() -> String {
    DEFAULT_TEMPLATE_ID.to_string()
}

/// Request body for `POST /payslips/calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatePayslipRequest {
    /// Id of the template to calculate with.
    #[serde(default = "default_template_id")]
    pub template_id: String,
    /// The employee being paid.
    pub employee: Employee,
    /// Attendance and raw amounts for the period.
    pub payroll_input: PayrollInput,
    /// Agreed salary components, overriding the payroll input.
    #[serde(default)]
    pub salary_structure: Option<SalaryStructure>,
}

/// Request body for `POST /payslips/bulk`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkPayslipRequest {
    /// Id of the template to calculate with.
    #[serde(default = "default_template_id")]
    pub template_id: String,
    /// Employees referenced by the payroll rows.
    pub employees: Vec<Employee>,
    /// One row per payslip to calculate.
    pub payroll_inputs: Vec<PayrollInput>,
    /// Salary structures, matched to rows by employee id.
    #[serde(default)]
    pub salary_structures: Vec<SalaryStructure>,
}

/// Response body for `POST /payslips/bulk`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkPayslipResponse {
    /// Outcomes in payroll row order.
    pub outcomes: Vec<BulkPayslipOutcome>,
    /// Aggregate figures for the run.
    pub summary: BulkSummary,
}

/// Response body for `POST /payslips/validate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateResponse {
    /// True when no violations were found.
    pub valid: bool,
    /// One message per violation.
    pub violations: Vec<String>,
}

impl From<Vec<String>> for ValidateResponse {
    fn from(violations: Vec<String>) -> Self {
        Self {
            valid: violations.is_empty(),
            violations,
        }
    }
}
