//! Bulk payslip runs.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::config::PayslipTemplate;
use crate::models::{BulkPayslipOutcome, Employee, PayrollInput, SalaryStructure};

use super::payslip::calculate_payslip_at;
use super::validation::validate_calculations;

/// Calculates and validates a payslip for every payroll row.
///
/// See [`calculate_bulk_payslips_at`].
pub fn calculate_bulk_payslips(
    employees: &[Employee],
    payroll_inputs: &[PayrollInput],
    salary_structures: &[SalaryStructure],
    template: &PayslipTemplate,
) -> Vec<BulkPayslipOutcome> {
    calculate_bulk_payslips_at(
        employees,
        payroll_inputs,
        salary_structures,
        template,
        Utc::now(),
    )
}

/// Calculates and validates a payslip for every payroll row, stamping each
/// payslip with `generated_at`.
///
/// Outcomes are returned in the same order as `payroll_inputs`. A row whose
/// employee id matches no employee becomes an "Employee not found" outcome;
/// the rest of the batch is unaffected. When ids repeat, the last employee
/// or salary structure with that id wins.
pub fn calculate_bulk_payslips_at(
    employees: &[Employee],
    payroll_inputs: &[PayrollInput],
    salary_structures: &[SalaryStructure],
    template: &PayslipTemplate,
    generated_at: DateTime<Utc>,
) -> Vec<BulkPayslipOutcome> {
    let employees_by_id: HashMap<&str, &Employee> =
        employees.iter().map(|e| (e.id.as_str(), e)).collect();
    let structures_by_id: HashMap<&str, &SalaryStructure> = salary_structures
        .iter()
        .map(|s| (s.employee_id.as_str(), s))
        .collect();

    let outcomes: Vec<BulkPayslipOutcome> = payroll_inputs
        .iter()
        .map(|input| {
            let Some(employee) = employees_by_id.get(input.employee_id.as_str()) else {
                warn!(employee_id = %input.employee_id, "Employee not found for payroll row");
                return BulkPayslipOutcome::employee_not_found(&input.employee_id);
            };

            let structure = structures_by_id.get(input.employee_id.as_str()).copied();
            let payslip = calculate_payslip_at(employee, input, structure, template, generated_at);
            let violations = validate_calculations(&payslip);
            if !violations.is_empty() {
                warn!(
                    employee_id = %input.employee_id,
                    violations = violations.len(),
                    "Payslip failed validation"
                );
            }
            BulkPayslipOutcome::calculated(payslip, violations)
        })
        .collect();

    info!(
        template_id = %template.metadata.id,
        rows = outcomes.len(),
        succeeded = outcomes.iter().filter(|o| o.success).count(),
        "Bulk payslip run completed"
    );

    outcomes
}
