//! Bulk payslip run models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PayslipResult;

/// The message recorded for payroll rows whose employee is unknown.
pub const EMPLOYEE_NOT_FOUND: &str = "Employee not found";

/// The outcome of one row in a bulk payslip run.
///
/// Outcomes are index-aligned with the payroll rows they came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkPayslipOutcome {
    /// The employee id from the payroll row.
    pub employee_id: String,
    /// The calculated payslip, absent when the row could not be processed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payslip_data: Option<PayslipResult>,
    /// Violations reported by validation.
    #[serde(default)]
    pub validation_errors: Vec<String>,
    /// Why the row could not be processed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// True only for a calculated payslip with no violations.
    pub success: bool,
}

impl BulkPayslipOutcome {
    /// An outcome for a row whose employee id matched no employee.
    pub fn employee_not_found(employee_id: impl Into<String>) -> Self {
        Self {
            employee_id: employee_id.into(),
            payslip_data: None,
            validation_errors: vec![],
            error: Some(EMPLOYEE_NOT_FOUND.to_string()),
            success: false,
        }
    }

    /// An outcome for a calculated payslip and its validation result.
    pub fn calculated(payslip: PayslipResult, validation_errors: Vec<String>) -> Self {
        Self {
            employee_id: payslip.employee_id.clone(),
            success: validation_errors.is_empty(),
            payslip_data: Some(payslip),
            validation_errors,
            error: None,
        }
    }
}

/// Aggregate figures for a bulk run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkSummary {
    /// Number of payroll rows processed.
    pub total: usize,
    /// Rows with a payslip and no violations.
    pub succeeded: usize,
    /// Rows that failed or were flagged.
    pub failed: usize,
    /// Gross salary across successful rows.
    pub total_gross: Decimal,
    /// Net salary across successful rows.
    pub total_net: Decimal,
}

impl BulkSummary {
    /// Summarizes a list of outcomes.
    pub fn from_outcomes(outcomes: &[BulkPayslipOutcome]) -> Self {
        let successful = || {
            outcomes
                .iter()
                .filter(|o| o.success)
                .filter_map(|o| o.payslip_data.as_ref())
        };
        let succeeded = outcomes.iter().filter(|o| o.success).count();

        Self {
            total: outcomes.len(),
            succeeded,
            failed: outcomes.len() - succeeded,
            total_gross: successful()
                .map(|p| p.gross_salary)
                .fold(Decimal::ZERO, Decimal::saturating_add),
            total_net: successful()
                .map(|p| p.net_salary)
                .fold(Decimal::ZERO, Decimal::saturating_add),
        }
    }
}
