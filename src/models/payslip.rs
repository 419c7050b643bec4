//! Payslip result models.
//!
//! This module contains the [`PayslipResult`] type and its parts. A result is
//! built once per calculation and never changed afterwards.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{PayPeriod, PaymentMode};

/// One earning or deduction line on a payslip.
///
/// # Example
///
/// ```
/// use payslip_engine::models::PayslipLine;
/// use rust_decimal::Decimal;
///
/// let line = PayslipLine {
///     key: "basicSalary".to_string(),
///     label: "Basic Salary".to_string(),
///     amount: Decimal::new(3181818, 2),
/// };
/// assert_eq!(line.amount.to_string(), "31818.18");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipLine {
    /// The template field key.
    pub key: String,
    /// The label printed on the payslip.
    pub label: String,
    /// The amount, rounded to paise.
    pub amount: Decimal,
}

/// Attendance figures as applied to the payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    /// Working days in the period.
    pub total_working_days: u32,
    /// Days present.
    pub present_days: Decimal,
    /// Loss-of-pay days.
    pub lop_days: Decimal,
    /// `max(0, present_days - lop_days)`.
    pub paid_days: Decimal,
    /// `total_working_days - present_days`.
    pub absent_days: Decimal,
    /// Overtime hours worked.
    pub overtime_hours: Decimal,
}

/// How and when the net salary is paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    /// Payment mode.
    pub mode: PaymentMode,
    /// Disbursement date.
    pub disbursement_date: NaiveDate,
    /// The period the payslip covers.
    pub pay_period: PayPeriod,
}

/// Provenance of a payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipMetadata {
    /// Id of the template the payslip was calculated with.
    pub template_id: String,
    /// Version of that template.
    pub template_version: String,
    /// Version of the engine that performed the calculation.
    pub engine_version: String,
    /// When the payslip was generated.
    pub generated_at: DateTime<Utc>,
}

/// A single step in the audit trace recording how a line was derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The identifier of the rule that was applied (e.g., "proration").
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The template field the step produced.
    pub field_key: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the calculation.
    pub reasoning: String,
}

/// The complete, itemized result of a payslip calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipResult {
    /// The employee the payslip is for.
    pub employee_id: String,
    /// The employee's display name.
    pub employee_name: String,
    /// Earning lines in template order.
    pub earnings: Vec<PayslipLine>,
    /// Deduction lines in template order.
    pub deductions: Vec<PayslipLine>,
    /// Sum of all earnings.
    pub gross_salary: Decimal,
    /// Sum of all deductions.
    pub total_deductions: Decimal,
    /// `gross_salary - total_deductions`. May be negative.
    pub net_salary: Decimal,
    /// The rounded net salary in words.
    pub net_salary_words: String,
    /// Attendance as applied.
    pub attendance: AttendanceSummary,
    /// Payment details.
    pub payment: PaymentDetails,
    /// Template and engine provenance.
    pub metadata: PayslipMetadata,
    /// How each line was derived.
    pub audit_trace: Vec<AuditStep>,
}

impl PayslipResult {
    /// Returns the amount of the earning line with the given key.
    pub fn earning(&self, key: &str) -> Option<Decimal> {
        find_amount(&self.earnings, key)
    }

    /// Returns the amount of the deduction line with the given key.
    pub fn deduction(&self, key: &str) -> Option<Decimal> {
        find_amount(&self.deductions, key)
    }
}

fn find_amount(lines: &[PayslipLine], key: &str) -> Option<Decimal> {
    lines.iter().find(|line| line.key == key).map(|line| line.amount)
}
