//! Payslip integrity checks.
//!
//! Validation reports problems; it never changes or rejects a payslip.
//! Whether a flagged payslip may be submitted is the caller's decision.

use rust_decimal::Decimal;

use crate::models::PayslipResult;

/// Maximum difference tolerated between a stored total and its recomputation.
pub fn tolerance() -> Decimal {
    Decimal::new(1, 2)
}

/// Checks a payslip for internal consistency.
///
/// Returns one human-readable message per violation:
/// - earnings do not sum to `gross_salary`
/// - deductions do not sum to `total_deductions`
/// - `gross_salary - total_deductions` differs from `net_salary`
/// - `net_salary` is negative
/// - present days exceed total working days
///
/// Sums are compared within [`tolerance`]. An empty list means the payslip is
/// consistent.
///
/// # Example
///
/// ```
/// use payslip_engine::calculation::{calculate_payslip, validate_calculations};
/// use payslip_engine::config::PayslipTemplate;
/// use payslip_engine::models::{Employee, PayrollInput};
/// use rust_decimal::Decimal;
///
/// let template = PayslipTemplate::standard();
/// let employee = Employee::new("EMP001", "Asha Rao");
/// let mut input = PayrollInput::new("EMP001", 22, Decimal::new(22, 0));
/// input.basic_salary = Some(Decimal::new(30000, 0));
///
/// let payslip = calculate_payslip(&employee, &input, None, &template);
/// assert!(validate_calculations(&payslip).is_empty());
/// ```
pub fn validate_calculations(payslip: &PayslipResult) -> Vec<String> {
    let mut violations = Vec::new();

    let earnings_sum = payslip
        .earnings
        .iter()
        .map(|line| line.amount)
        .fold(Decimal::ZERO, Decimal::saturating_add);
    if exceeds_tolerance(earnings_sum, payslip.gross_salary) {
        violations.push(format!(
            "Gross salary mismatch: earnings sum to {} but gross salary is {}",
            earnings_sum, payslip.gross_salary
        ));
    }

    let deductions_sum = payslip
        .deductions
        .iter()
        .map(|line| line.amount)
        .fold(Decimal::ZERO, Decimal::saturating_add);
    if exceeds_tolerance(deductions_sum, payslip.total_deductions) {
        violations.push(format!(
            "Total deductions mismatch: deductions sum to {} but total deductions is {}",
            deductions_sum, payslip.total_deductions
        ));
    }

    let expected_net = payslip.gross_salary.saturating_sub(payslip.total_deductions);
    if exceeds_tolerance(expected_net, payslip.net_salary) {
        violations.push(format!(
            "Net salary mismatch: gross salary minus total deductions is {} but net salary is {}",
            expected_net, payslip.net_salary
        ));
    }

    if payslip.net_salary < Decimal::ZERO {
        violations.push(format!(
            "Net salary cannot be negative ({})",
            payslip.net_salary
        ));
    }

    let attendance = &payslip.attendance;
    if attendance.present_days > Decimal::from(attendance.total_working_days) {
        violations.push(format!(
            "Present days ({}) cannot exceed total working days ({})",
            attendance.present_days, attendance.total_working_days
        ));
    }

    violations
}

fn exceeds_tolerance(computed: Decimal, stored: Decimal) -> bool {
    computed.saturating_sub(stored).abs() > tolerance()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::calculate_payslip;
    use crate::config::PayslipTemplate;
    use crate::models::{Employee, PayrollInput};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_payslip() -> PayslipResult {
        let template = PayslipTemplate::standard();
        let employee = Employee::new("EMP001", "Asha Rao");
        let mut input = PayrollInput::new("EMP001", 22, dec("21"));
        input.lop_days = dec("1");
        input.basic_salary = Some(dec("35000"));
        input.earnings.insert("specialAllowance".to_string(), dec("5000"));
        input.deductions.insert("tds".to_string(), dec("1250"));
        calculate_payslip(&employee, &input, None, &template)
    }

    #[test]
    fn test_consistent_payslip_has_no_violations() {
        assert!(validate_calculations(&sample_payslip()).is_empty());
    }

    #[test]
    fn test_gross_mismatch_flagged() {
        let mut payslip = sample_payslip();
        payslip.gross_salary += dec("5");
        payslip.net_salary += dec("5");

        let violations = validate_calculations(&payslip);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].starts_with("Gross salary mismatch"));
    }

    #[test]
    fn test_difference_within_tolerance_accepted() {
        let mut payslip = sample_payslip();
        payslip.earnings[0].amount += dec("0.01");

        assert!(validate_calculations(&payslip).is_empty());
    }

    #[test]
    fn test_deductions_mismatch_flagged() {
        let mut payslip = sample_payslip();
        payslip.deductions[0].amount += dec("100");

        let violations = validate_calculations(&payslip);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].starts_with("Total deductions mismatch"));
    }

    #[test]
    fn test_net_mismatch_flagged() {
        let mut payslip = sample_payslip();
        payslip.net_salary -= dec("0.02");

        let violations = validate_calculations(&payslip);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].starts_with("Net salary mismatch"));
    }

    #[test]
    fn test_negative_net_flagged() {
        let template = PayslipTemplate::standard();
        let employee = Employee::new("EMP002", "Ravi Kumar");
        let mut input = PayrollInput::new("EMP002", 22, dec("22"));
        input.basic_salary = Some(dec("10000"));
        input.deductions.insert("loanEmi".to_string(), dec("50000"));

        let payslip = calculate_payslip(&employee, &input, None, &template);
        assert!(payslip.net_salary < Decimal::ZERO);

        let violations = validate_calculations(&payslip);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].starts_with("Net salary cannot be negative"));
    }

    #[test]
    fn test_saturated_totals_checked_without_overflow() {
        let mut payslip = sample_payslip();
        payslip.earnings[0].amount = Decimal::MAX;
        payslip.earnings[1].amount = Decimal::MAX;
        payslip.total_deductions = Decimal::MIN;

        let violations = validate_calculations(&payslip);
        assert!(violations.iter().any(|v| v.starts_with("Gross salary mismatch")));
        assert!(violations.iter().any(|v| v.starts_with("Total deductions mismatch")));
    }

    #[test]
    fn test_present_days_above_total_flagged() {
        let mut payslip = sample_payslip();
        payslip.attendance.present_days = dec("23");

        let violations = validate_calculations(&payslip);
        assert_eq!(
            violations,
            vec!["Present days (23) cannot exceed total working days (22)".to_string()]
        );
    }
}
