//! Payslip assembly.
//!
//! Walks the template's earning and deduction fields in order, derives each
//! line from the salary structure, payroll input and attendance, and records
//! an audit step per line.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::json;
use tracing::debug;

use crate::config::{CalculationMode, DeductionField, EarningField, PayslipTemplate, fields};
use crate::models::{
    AttendanceSummary, AuditStep, Employee, PayPeriod, PaymentDetails, PayrollInput, PayslipLine,
    PayslipMetadata, PayslipResult, SalaryStructure,
};

use super::allowances::{calculate_hra, calculate_overtime, percentage_of};
use super::amount_words::amount_in_words;
use super::proration::{calculate_prorated_salary, round_to_paise};
use super::statutory::{calculate_esic, calculate_pf, calculate_professional_tax, slab_amount};

/// The version of the engine, recorded on every payslip.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Calculates a payslip, stamped with the current time.
///
/// See [`calculate_payslip_at`] for the calculation itself.
pub fn calculate_payslip(
    employee: &Employee,
    input: &PayrollInput,
    structure: Option<&SalaryStructure>,
    template: &PayslipTemplate,
) -> PayslipResult {
    calculate_payslip_at(employee, input, structure, template, Utc::now())
}

/// Calculates a fully itemized payslip.
///
/// Earnings, in template order:
/// - `basicSalary` is the structure's basic salary, else the input's, prorated
///   by paid days.
/// - `houseRentAllowance` is the structure's explicit HRA if set, else
///   [`calculate_hra`] for percentage mode, else the raw amount; prorated.
/// - `fixed` fields take the structure's amount, else the input's; prorated.
/// - `percentage` fields take a percentage of full basic salary; prorated.
/// - `variable` fields pass the raw amount through unprorated.
/// - `formula` fields are overtime, from [`calculate_overtime`].
///
/// Deductions, in template order: `providentFund` from earned basic,
/// `esic` and `professionalTax` (or any `slab` field) from gross salary,
/// other `percentage` fields from earned basic, and everything else as the
/// raw input amount.
///
/// Each line is rounded to paise. Missing amounts default to zero and the
/// function never fails; inconsistent or negative results are left for
/// [`super::validate_calculations`] to report.
///
/// # Example
///
/// ```
/// use payslip_engine::calculation::calculate_payslip_at;
/// use payslip_engine::config::PayslipTemplate;
/// use payslip_engine::models::{Employee, PayrollInput};
/// use chrono::Utc;
/// use rust_decimal::Decimal;
///
/// let template = PayslipTemplate::standard();
/// let employee = Employee::new("EMP001", "Asha Rao");
/// let mut input = PayrollInput::new("EMP001", 21, Decimal::new(21, 0));
/// input.basic_salary = Some(Decimal::new(15000, 0));
///
/// let payslip = calculate_payslip_at(&employee, &input, None, &template, Utc::now());
/// assert_eq!(payslip.earning("basicSalary"), Some(Decimal::new(15000, 0)));
/// assert_eq!(payslip.deduction("providentFund"), Some(Decimal::new(1800, 0)));
/// ```
pub fn calculate_payslip_at(
    employee: &Employee,
    input: &PayrollInput,
    structure: Option<&SalaryStructure>,
    template: &PayslipTemplate,
    generated_at: DateTime<Utc>,
) -> PayslipResult {
    let paid_days = input
        .present_days
        .saturating_sub(input.lop_days)
        .max(Decimal::ZERO);
    let absent_days = Decimal::from(input.total_working_days).saturating_sub(input.present_days);

    let basic_salary = structure
        .and_then(|s| s.basic_salary)
        .or(input.basic_salary)
        .unwrap_or(Decimal::ZERO);

    let ctx = LineContext {
        input,
        structure,
        template,
        basic_salary,
        earned_basic: round_to_paise(calculate_prorated_salary(
            basic_salary,
            paid_days,
            input.total_working_days,
        )),
        paid_days,
    };

    let mut trail = AuditTrail::default();

    let earnings: Vec<PayslipLine> = template
        .earnings_fields
        .iter()
        .map(|field| {
            let derived = ctx.derive_earning(field);
            trail.record(&field.key, &derived);
            line(&field.key, &field.label, derived.amount)
        })
        .collect();
    let gross_salary = total_of(&earnings);

    let deductions: Vec<PayslipLine> = template
        .deductions_fields
        .iter()
        .map(|field| {
            let derived = ctx.derive_deduction(field, gross_salary);
            trail.record(&field.key, &derived);
            line(&field.key, &field.label, derived.amount)
        })
        .collect();
    let total_deductions = total_of(&deductions);

    let net_salary = gross_salary.saturating_sub(total_deductions);

    log_ignored_keys(input, template);
    debug!(
        employee_id = %employee.id,
        template_id = %template.metadata.id,
        gross_salary = %gross_salary,
        total_deductions = %total_deductions,
        net_salary = %net_salary,
        "Payslip calculated"
    );

    let pay_period = input
        .pay_period
        .unwrap_or_else(|| PayPeriod::month_containing(generated_at.date_naive()));

    PayslipResult {
        employee_id: employee.id.clone(),
        employee_name: employee.name.clone(),
        earnings,
        deductions,
        gross_salary,
        total_deductions,
        net_salary,
        net_salary_words: amount_in_words(net_salary),
        attendance: AttendanceSummary {
            total_working_days: input.total_working_days,
            present_days: input.present_days,
            lop_days: input.lop_days,
            paid_days,
            absent_days,
            overtime_hours: input.overtime_hours,
        },
        payment: PaymentDetails {
            mode: input.payment_mode.unwrap_or_default(),
            disbursement_date: input.disbursement_date.unwrap_or(pay_period.end_date),
            pay_period,
        },
        metadata: PayslipMetadata {
            template_id: template.metadata.id.clone(),
            template_version: template.metadata.version.clone(),
            engine_version: ENGINE_VERSION.to_string(),
            generated_at,
        },
        audit_trace: trail.steps,
    }
}

/// Everything a single line derivation needs.
struct LineContext<'a> {
    input: &'a PayrollInput,
    structure: Option<&'a SalaryStructure>,
    template: &'a PayslipTemplate,
    /// Full-period basic salary.
    basic_salary: Decimal,
    /// Basic salary after proration, rounded.
    earned_basic: Decimal,
    paid_days: Decimal,
}

/// A derived line amount with the detail needed for its audit step.
struct DerivedLine {
    amount: Decimal,
    rule_id: &'static str,
    rule_name: &'static str,
    input: serde_json::Value,
    reasoning: String,
}

impl LineContext<'_> {
    fn derive_earning(&self, field: &EarningField) -> DerivedLine {
        if field.key == fields::BASIC_SALARY {
            return self.prorated(self.basic_salary, "basic_salary");
        }

        if field.key == fields::HOUSE_RENT_ALLOWANCE {
            if let Some(explicit) = self.structure.and_then(|s| s.house_rent_allowance) {
                return self.prorated(explicit, "salary_structure");
            }
            if field.calculation_mode == CalculationMode::Percentage {
                return self.prorated(
                    calculate_hra(self.basic_salary, self.template),
                    "percentage_of_basic",
                );
            }
        }

        match field.calculation_mode {
            CalculationMode::Fixed => {
                let (raw, source) = self.raw_earning(&field.key);
                self.prorated(raw, source)
            }
            CalculationMode::Percentage => {
                let percentage = field.percentage.unwrap_or(Decimal::ZERO);
                let full = percentage_of(self.basic_salary, percentage, field.max_amount);
                self.prorated(full, "percentage_of_basic")
            }
            CalculationMode::Variable => {
                let (raw, source) = self.raw_earning(&field.key);
                let amount = round_to_paise(raw);
                DerivedLine {
                    amount,
                    rule_id: "pass_through",
                    rule_name: "Variable Pay",
                    input: json!({ "amount": raw.to_string(), "source": source }),
                    reasoning: format!("Variable amount ₹{} paid without proration", amount),
                }
            }
            CalculationMode::Formula => {
                let hours = self.input.overtime_hours;
                let days = self.input.total_working_days;
                let amount = round_to_paise(calculate_overtime(hours, self.basic_salary, days));
                DerivedLine {
                    amount,
                    rule_id: "overtime",
                    rule_name: "Overtime",
                    input: json!({
                        "overtime_hours": hours.to_string(),
                        "basic_salary": self.basic_salary.to_string(),
                        "total_working_days": days
                    }),
                    reasoning: format!(
                        "{} hours at double the hourly rate of ₹{} / ({} days × 8 hours) = ₹{}",
                        hours.normalize(),
                        self.basic_salary.normalize(),
                        days,
                        amount
                    ),
                }
            }
            CalculationMode::Slab => DerivedLine {
                amount: Decimal::ZERO,
                rule_id: "unsupported",
                rule_name: "Unsupported Mode",
                input: json!({ "calculation_mode": "slab" }),
                reasoning: "Slab mode applies to deductions only".to_string(),
            },
        }
    }

    fn derive_deduction(&self, field: &DeductionField, gross_salary: Decimal) -> DerivedLine {
        let key = field.key.as_str();

        if key == fields::PROVIDENT_FUND {
            let amount = round_to_paise(calculate_pf(self.earned_basic, self.template));
            return DerivedLine {
                amount,
                rule_id: "provident_fund",
                rule_name: "Provident Fund",
                input: json!({ "earned_basic": self.earned_basic.to_string() }),
                reasoning: format!(
                    "PF on earned basic ₹{} capped at the configured ceiling = ₹{}",
                    self.earned_basic, amount
                ),
            };
        }

        if key == fields::ESIC {
            let amount = round_to_paise(calculate_esic(gross_salary, self.template));
            let reasoning = if amount.is_zero() && gross_salary > Decimal::ZERO {
                format!("Gross ₹{} is above the ESIC ceiling", gross_salary)
            } else {
                format!("ESIC on gross ₹{} = ₹{}", gross_salary, amount)
            };
            return DerivedLine {
                amount,
                rule_id: "esic",
                rule_name: "ESIC",
                input: json!({ "gross_salary": gross_salary.to_string() }),
                reasoning,
            };
        }

        if key == fields::PROFESSIONAL_TAX || field.calculation_mode == CalculationMode::Slab {
            let amount = if key == fields::PROFESSIONAL_TAX {
                calculate_professional_tax(gross_salary, self.template)
            } else {
                slab_amount(&field.slabs, gross_salary)
            };
            return DerivedLine {
                amount: round_to_paise(amount),
                rule_id: "salary_slab",
                rule_name: "Salary Slab",
                input: json!({ "gross_salary": gross_salary.to_string() }),
                reasoning: format!("Slab for gross ₹{} = ₹{}", gross_salary, amount),
            };
        }

        if field.calculation_mode == CalculationMode::Percentage {
            let percentage = field.percentage.unwrap_or(Decimal::ZERO);
            let amount = round_to_paise(percentage_of(
                self.earned_basic,
                percentage,
                field.max_amount,
            ));
            return DerivedLine {
                amount,
                rule_id: "percentage_of_basic",
                rule_name: "Percentage of Basic",
                input: json!({
                    "earned_basic": self.earned_basic.to_string(),
                    "percentage": percentage.to_string()
                }),
                reasoning: format!(
                    "{}% of earned basic ₹{} = ₹{}",
                    percentage.normalize(),
                    self.earned_basic,
                    amount
                ),
            };
        }

        let raw = self.input.deduction(key).unwrap_or(Decimal::ZERO);
        let amount = round_to_paise(raw);
        DerivedLine {
            amount,
            rule_id: "pass_through",
            rule_name: "Entered Deduction",
            input: json!({ "amount": raw.to_string(), "source": "payroll_input" }),
            reasoning: format!("Entered amount ₹{} deducted as-is", amount),
        }
    }

    /// Salary structure first, then payroll input, else zero.
    fn raw_earning(&self, key: &str) -> (Decimal, &'static str) {
        if let Some(amount) = self.structure.and_then(|s| s.component(key)) {
            return (amount, "salary_structure");
        }
        match self.input.earning(key) {
            Some(amount) => (amount, "payroll_input"),
            None => (Decimal::ZERO, "default"),
        }
    }

    fn prorated(&self, full_amount: Decimal, source: &str) -> DerivedLine {
        let total = self.input.total_working_days;
        let amount = round_to_paise(calculate_prorated_salary(full_amount, self.paid_days, total));
        DerivedLine {
            amount,
            rule_id: "proration",
            rule_name: "Proration",
            input: json!({
                "full_amount": full_amount.to_string(),
                "source": source,
                "paid_days": self.paid_days.to_string(),
                "total_working_days": total
            }),
            reasoning: format!(
                "₹{} × {} / {} days = ₹{}",
                full_amount.normalize(),
                self.paid_days.normalize(),
                total,
                amount
            ),
        }
    }
}

#[derive(Default)]
struct AuditTrail {
    steps: Vec<AuditStep>,
}

impl AuditTrail {
    fn record(&mut self, field_key: &str, derived: &DerivedLine) {
        self.steps.push(AuditStep {
            step_number: self.steps.len() as u32 + 1,
            rule_id: derived.rule_id.to_string(),
            rule_name: derived.rule_name.to_string(),
            field_key: field_key.to_string(),
            input: derived.input.clone(),
            output: json!({ "amount": derived.amount.to_string() }),
            reasoning: derived.reasoning.clone(),
        });
    }
}

/// Sums line amounts, saturating at the `Decimal` range.
fn total_of(lines: &[PayslipLine]) -> Decimal {
    lines
        .iter()
        .map(|l| l.amount)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

fn line(key: &str, label: &str, amount: Decimal) -> PayslipLine {
    PayslipLine {
        key: key.to_string(),
        label: label.to_string(),
        amount,
    }
}

fn log_ignored_keys(input: &PayrollInput, template: &PayslipTemplate) {
    for key in input.earnings.keys() {
        if template.earning_field(key).is_none() {
            debug!(employee_id = %input.employee_id, key = %key, "Ignoring earning not in template");
        }
    }
    for key in input.deductions.keys() {
        if template.deduction_field(key).is_none() {
            debug!(employee_id = %input.employee_id, key = %key, "Ignoring deduction not in template");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TemplateMetadata;
    use crate::models::PaymentMode;
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn generated_at() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-03-28T09:30:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn employee() -> Employee {
        Employee::new("EMP001", "Asha Rao")
    }

    fn input(total: u32, present: &str, lop: &str, basic: &str) -> PayrollInput {
        let mut input = PayrollInput::new("EMP001", total, dec(present));
        input.lop_days = dec(lop);
        input.basic_salary = Some(dec(basic));
        input
    }

    fn calculate(input: &PayrollInput, structure: Option<&SalaryStructure>) -> PayslipResult {
        calculate_payslip_at(
            &employee(),
            input,
            structure,
            &PayslipTemplate::standard(),
            generated_at(),
        )
    }

    #[test]
    fn test_full_attendance_no_proration_loss() {
        let payslip = calculate(&input(21, "21", "0", "15000"), None);

        assert_eq!(payslip.earning("basicSalary"), Some(dec("15000")));
        assert_eq!(payslip.earning("houseRentAllowance"), Some(dec("6000")));
        assert_eq!(payslip.deduction("providentFund"), Some(dec("1800")));
        assert_eq!(payslip.attendance.paid_days, dec("21"));
        assert_eq!(payslip.attendance.absent_days, Decimal::ZERO);
    }

    #[test]
    fn test_lop_prorates_basic() {
        let payslip = calculate(&input(22, "21", "1", "35000"), None);

        assert_eq!(payslip.attendance.paid_days, dec("20"));
        assert_eq!(payslip.attendance.absent_days, dec("1"));
        assert_eq!(payslip.earning("basicSalary"), Some(dec("31818.18")));
        // 14000 x 20 / 22
        assert_eq!(payslip.earning("houseRentAllowance"), Some(dec("12727.27")));
        assert_eq!(payslip.deduction("providentFund"), Some(dec("1800")));
    }

    #[test]
    fn test_totals_and_words() {
        let mut input = input(22, "22", "0", "20000");
        input.earnings.insert("specialAllowance".to_string(), dec("2000"));
        input.deductions.insert("tds".to_string(), dec("500"));

        let payslip = calculate(&input, None);

        // 20000 + 8000 HRA + 2000 special
        assert_eq!(payslip.gross_salary, dec("30000"));
        // PF 1800 + ESIC 0 (above ceiling) + PT 250 + TDS 500
        assert_eq!(payslip.deduction("esic"), Some(Decimal::ZERO));
        assert_eq!(payslip.deduction("professionalTax"), Some(dec("250")));
        assert_eq!(payslip.total_deductions, dec("2550"));
        assert_eq!(payslip.net_salary, dec("27450"));
        assert_eq!(
            payslip.net_salary_words,
            "Twenty Seven Thousand Four Hundred Fifty Rupees Only"
        );
    }

    #[test]
    fn test_esic_applies_below_ceiling() {
        let payslip = calculate(&input(22, "22", "0", "12000"), None);

        // gross = 12000 + 4800 HRA = 16800
        assert_eq!(payslip.gross_salary, dec("16800"));
        assert_eq!(payslip.deduction("esic"), Some(dec("126")));
        assert_eq!(payslip.deduction("professionalTax"), Some(dec("200")));
        assert_eq!(payslip.deduction("providentFund"), Some(dec("1440")));
    }

    #[test]
    fn test_lines_follow_template_order() {
        let template = PayslipTemplate::standard();
        let payslip = calculate(&input(22, "22", "0", "20000"), None);

        let earning_keys: Vec<&str> = payslip.earnings.iter().map(|l| l.key.as_str()).collect();
        let template_keys: Vec<&str> =
            template.earnings_fields.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(earning_keys, template_keys);
        assert_eq!(payslip.deductions.len(), template.deductions_fields.len());
        assert_eq!(payslip.deductions[0].label, "Provident Fund");
    }

    #[test]
    fn test_variable_fields_not_prorated() {
        let mut input = input(20, "10", "0", "20000");
        input.earnings.insert("performanceBonus".to_string(), dec("5000"));
        input.earnings.insert("conveyanceAllowance".to_string(), dec("1600"));

        let payslip = calculate(&input, None);

        assert_eq!(payslip.earning("performanceBonus"), Some(dec("5000")));
        assert_eq!(payslip.earning("conveyanceAllowance"), Some(dec("800")));
        assert_eq!(payslip.earning("basicSalary"), Some(dec("10000")));
    }

    #[test]
    fn test_salary_structure_takes_precedence() {
        let mut input = input(22, "22", "0", "20000");
        input.earnings.insert("specialAllowance".to_string(), dec("1000"));
        input.earnings.insert("medicalAllowance".to_string(), dec("1250"));

        let structure = SalaryStructure {
            employee_id: "EMP001".to_string(),
            basic_salary: Some(dec("30000")),
            house_rent_allowance: Some(dec("9000")),
            components: HashMap::from([("specialAllowance".to_string(), dec("4000"))]),
        };

        let payslip = calculate(&input, Some(&structure));

        assert_eq!(payslip.earning("basicSalary"), Some(dec("30000")));
        assert_eq!(payslip.earning("houseRentAllowance"), Some(dec("9000")));
        assert_eq!(payslip.earning("specialAllowance"), Some(dec("4000")));
        assert_eq!(payslip.earning("medicalAllowance"), Some(dec("1250")));
    }

    #[test]
    fn test_structure_without_basic_falls_back_to_input() {
        let structure = SalaryStructure {
            employee_id: "EMP001".to_string(),
            ..SalaryStructure::default()
        };

        let payslip = calculate(&input(22, "22", "0", "18000"), Some(&structure));
        assert_eq!(payslip.earning("basicSalary"), Some(dec("18000")));
    }

    #[test]
    fn test_missing_basic_defaults_to_zero() {
        let input = PayrollInput::new("EMP001", 22, dec("22"));
        let payslip = calculate(&input, None);

        assert_eq!(payslip.gross_salary, Decimal::ZERO);
        assert_eq!(payslip.net_salary, Decimal::ZERO);
        assert_eq!(payslip.net_salary_words, "Zero Rupees Only");
    }

    #[test]
    fn test_overtime_uses_full_basic() {
        let mut input = input(22, "20", "0", "35200");
        input.overtime_hours = dec("4");

        let payslip = calculate(&input, None);
        // 35200 / 176 = 200 per hour; 4 hours x 200 x 2
        assert_eq!(payslip.earning("overtimeAllowance"), Some(dec("1600")));
    }

    #[test]
    fn test_lop_above_present_clamps_paid_days() {
        let payslip = calculate(&input(22, "2", "5", "30000"), None);

        assert_eq!(payslip.attendance.paid_days, Decimal::ZERO);
        assert_eq!(payslip.earning("basicSalary"), Some(Decimal::ZERO));
    }

    #[test]
    fn test_zero_working_days_yields_zero_prorated_lines() {
        let payslip = calculate(&input(0, "0", "0", "30000"), None);

        assert_eq!(payslip.earning("basicSalary"), Some(Decimal::ZERO));
        assert_eq!(payslip.earning("overtimeAllowance"), Some(Decimal::ZERO));
    }

    #[test]
    fn test_unknown_input_keys_ignored() {
        let mut input = input(22, "22", "0", "20000");
        input.earnings.insert("stockOptions".to_string(), dec("99999"));
        input.deductions.insert("gymMembership".to_string(), dec("500"));

        let payslip = calculate(&input, None);
        assert!(payslip.earning("stockOptions").is_none());
        assert!(payslip.deduction("gymMembership").is_none());
        assert_eq!(payslip.gross_salary, dec("28000"));
    }

    #[test]
    fn test_extreme_basic_salary_does_not_overflow() {
        let payslip = calculate(&input(22, "22", "0", "7000000000000000000000000000"), None);

        let basic = payslip.earning("basicSalary").unwrap();
        assert!((basic - dec("7000000000000000000000000000")).abs() < dec("1"));
        assert_eq!(payslip.deduction("providentFund"), Some(dec("1800")));
        assert_eq!(payslip.deduction("esic"), Some(Decimal::ZERO));
        assert!(payslip.net_salary > Decimal::ZERO);
    }

    #[test]
    fn test_gross_saturates_at_decimal_max() {
        let mut input = input(22, "22", "0", "1");
        input.basic_salary = Some(Decimal::MAX);
        input.earnings.insert("performanceBonus".to_string(), Decimal::MAX);

        let payslip = calculate(&input, None);

        assert_eq!(payslip.gross_salary, Decimal::MAX);
        assert_eq!(payslip.net_salary, Decimal::MAX - dec("2050"));
    }

    #[test]
    fn test_idempotent_for_identical_inputs() {
        let mut input = input(22, "21", "1", "35000");
        input.overtime_hours = dec("3.5");
        input.earnings.insert("incentive".to_string(), dec("2500"));

        assert_eq!(calculate(&input, None), calculate(&input, None));
    }

    #[test]
    fn test_payment_defaults() {
        let payslip = calculate(&input(22, "22", "0", "20000"), None);

        assert_eq!(payslip.payment.mode, PaymentMode::BankTransfer);
        assert_eq!(
            payslip.payment.pay_period.start_date,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        assert_eq!(
            payslip.payment.disbursement_date,
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()
        );
    }

    #[test]
    fn test_payment_from_input() {
        let mut input = input(22, "22", "0", "20000");
        let period = PayPeriod::month_containing(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        input.pay_period = Some(period);
        input.payment_mode = Some(PaymentMode::Cheque);
        input.disbursement_date = NaiveDate::from_ymd_opt(2024, 2, 2);

        let payslip = calculate(&input, None);
        assert_eq!(payslip.payment.mode, PaymentMode::Cheque);
        assert_eq!(payslip.payment.pay_period, period);
        assert_eq!(
            payslip.payment.disbursement_date,
            NaiveDate::from_ymd_opt(2024, 2, 2).unwrap()
        );
    }

    #[test]
    fn test_metadata_records_template_provenance() {
        let payslip = calculate(&input(22, "22", "0", "20000"), None);

        assert_eq!(payslip.metadata.template_id, "standard");
        assert_eq!(payslip.metadata.template_version, "1.0");
        assert_eq!(payslip.metadata.engine_version, ENGINE_VERSION);
        assert_eq!(payslip.metadata.generated_at, generated_at());
    }

    #[test]
    fn test_audit_trace_has_step_per_line() {
        let payslip = calculate(&input(22, "21", "1", "35000"), None);
        let template = PayslipTemplate::standard();

        assert_eq!(
            payslip.audit_trace.len(),
            template.earnings_fields.len() + template.deductions_fields.len()
        );
        let first = &payslip.audit_trace[0];
        assert_eq!(first.step_number, 1);
        assert_eq!(first.field_key, "basicSalary");
        assert_eq!(first.rule_id, "proration");
        assert_eq!(first.output["amount"], "31818.18");

        let pf = payslip
            .audit_trace
            .iter()
            .find(|s| s.field_key == "providentFund")
            .unwrap();
        assert_eq!(pf.rule_id, "provident_fund");
    }

    #[test]
    fn test_custom_template_generic_fields() {
        let template = PayslipTemplate {
            metadata: TemplateMetadata {
                id: "consultant".to_string(),
                name: "Consultant".to_string(),
                version: "2".to_string(),
                description: None,
            },
            earnings_fields: vec![
                EarningField {
                    key: "basicSalary".to_string(),
                    label: "Retainer".to_string(),
                    calculation_mode: CalculationMode::Fixed,
                    percentage_of: None,
                    percentage: None,
                    max_amount: None,
                },
                EarningField {
                    key: "researchAllowance".to_string(),
                    label: "Research Allowance".to_string(),
                    calculation_mode: CalculationMode::Percentage,
                    percentage_of: Some("basicSalary".to_string()),
                    percentage: Some(dec("10")),
                    max_amount: Some(dec("3000")),
                },
            ],
            deductions_fields: vec![
                DeductionField {
                    key: "welfareFund".to_string(),
                    label: "Welfare Fund".to_string(),
                    calculation_mode: CalculationMode::Percentage,
                    percentage: Some(dec("1")),
                    max_amount: None,
                    slabs: vec![],
                },
                DeductionField {
                    key: "labourCess".to_string(),
                    label: "Labour Cess".to_string(),
                    calculation_mode: CalculationMode::Slab,
                    percentage: None,
                    max_amount: None,
                    slabs: vec![crate::config::SalarySlab {
                        min: Decimal::ZERO,
                        max: None,
                        amount: dec("25"),
                    }],
                },
            ],
        };

        let input = input(20, "10", "0", "50000");
        let payslip = calculate_payslip_at(&employee(), &input, None, &template, generated_at());

        assert_eq!(payslip.earning("basicSalary"), Some(dec("25000")));
        // 10% of 50000 capped at 3000, then halved by proration
        assert_eq!(payslip.earning("researchAllowance"), Some(dec("1500")));
        assert_eq!(payslip.deduction("welfareFund"), Some(dec("250")));
        assert_eq!(payslip.deduction("labourCess"), Some(dec("25")));
        assert_eq!(payslip.net_salary, dec("26225"));
        assert_eq!(payslip.metadata.template_id, "consultant");
    }
}
