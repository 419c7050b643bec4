//! Per-period payroll input and salary structure models.
//!
//! These are the raw figures collected for one employee and one pay period.
//! Values are typed decimals; any string parsing happens before they get here.

use std::collections::HashMap;

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// How the net salary is disbursed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMode {
    /// Direct credit to the employee's bank account.
    #[default]
    BankTransfer,
    /// Paper cheque.
    Cheque,
    /// Cash in hand.
    Cash,
}

/// The date range a payslip covers.
///
/// # Example
///
/// ```
/// use payslip_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::month_containing(NaiveDate::from_ymd_opt(2024, 2, 14).unwrap());
/// assert_eq!(period.start_date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
/// assert_eq!(period.end_date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The first day of the period (inclusive).
    pub start_date: NaiveDate,
    /// The last day of the period (inclusive).
    pub end_date: NaiveDate,
}

impl PayPeriod {
    /// Returns the calendar month that contains `date`.
    pub fn month_containing(date: NaiveDate) -> Self {
        let start_date = date.with_day(1).unwrap_or(date);
        let end_date = start_date
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(date);
        Self {
            start_date,
            end_date,
        }
    }
}

/// Raw attendance and compensation figures for one employee and one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollInput {
    /// The employee this row belongs to.
    pub employee_id: String,
    /// Working days in the period. Expected to be greater than zero.
    pub total_working_days: u32,
    /// Days present, between zero and `total_working_days`.
    pub present_days: Decimal,
    /// Loss-of-pay days, between zero and `present_days`.
    #[serde(default)]
    pub lop_days: Decimal,
    /// Overtime hours worked in the period.
    #[serde(default)]
    pub overtime_hours: Decimal,
    /// Full-period basic salary, used when no salary structure supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic_salary: Option<Decimal>,
    /// Raw earning amounts keyed by template field.
    #[serde(default)]
    pub earnings: HashMap<String, Decimal>,
    /// Raw deduction amounts keyed by template field.
    #[serde(default)]
    pub deductions: HashMap<String, Decimal>,
    /// How the salary is paid; bank transfer when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_mode: Option<PaymentMode>,
    /// The date the salary is paid out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disbursement_date: Option<NaiveDate>,
    /// The period covered; the month of generation when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pay_period: Option<PayPeriod>,
}

impl PayrollInput {
    /// Creates an input with the given attendance and no compensation figures.
    pub fn new(employee_id: impl Into<String>, total_working_days: u32, present_days: Decimal) -> Self {
        Self {
            employee_id: employee_id.into(),
            total_working_days,
            present_days,
            lop_days: Decimal::ZERO,
            overtime_hours: Decimal::ZERO,
            basic_salary: None,
            earnings: HashMap::new(),
            deductions: HashMap::new(),
            payment_mode: None,
            disbursement_date: None,
            pay_period: None,
        }
    }

    /// Returns the raw earning amount for `key`, if one was supplied.
    pub fn earning(&self, key: &str) -> Option<Decimal> {
        self.earnings.get(key).copied()
    }

    /// Returns the raw deduction amount for `key`, if one was supplied.
    pub fn deduction(&self, key: &str) -> Option<Decimal> {
        self.deductions.get(key).copied()
    }

    /// Checks the attendance ranges.
    ///
    /// The engine never calls this: it computes whatever it is given and
    /// leaves flagging to [`crate::calculation::validate_calculations`].
    /// Import layers use it to reject rows before they are stored.
    ///
    /// # Example
    ///
    /// ```
    /// use payslip_engine::models::PayrollInput;
    /// use rust_decimal::Decimal;
    ///
    /// let input = PayrollInput::new("EMP001", 22, Decimal::new(23, 0));
    /// assert!(input.check_attendance().is_err());
    /// ```
    pub fn check_attendance(&self) -> EngineResult<()> {
        let invalid = |message: &str| EngineError::InvalidAttendance {
            employee_id: self.employee_id.clone(),
            message: message.to_string(),
        };

        if self.total_working_days == 0 {
            return Err(invalid("total working days must be greater than zero"));
        }
        if self.present_days.is_sign_negative() && !self.present_days.is_zero() {
            return Err(invalid("present days cannot be negative"));
        }
        if self.present_days > Decimal::from(self.total_working_days) {
            return Err(invalid("present days exceed total working days"));
        }
        if self.lop_days.is_sign_negative() && !self.lop_days.is_zero() {
            return Err(invalid("LOP days cannot be negative"));
        }
        if self.lop_days > self.present_days {
            return Err(invalid("LOP days exceed present days"));
        }
        if self.overtime_hours.is_sign_negative() && !self.overtime_hours.is_zero() {
            return Err(invalid("overtime hours cannot be negative"));
        }
        Ok(())
    }
}

/// An employee's configured salary components.
///
/// Values here take precedence over the raw amounts on a [`PayrollInput`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalaryStructure {
    /// The employee this structure belongs to.
    pub employee_id: String,
    /// Full-period basic salary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic_salary: Option<Decimal>,
    /// Explicit full-period HRA, overriding the template's percentage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_rent_allowance: Option<Decimal>,
    /// Other full-period earning amounts keyed by template field.
    #[serde(default)]
    pub components: HashMap<String, Decimal>,
}

impl SalaryStructure {
    /// Returns the configured amount for an earning field.
    ///
    /// `basicSalary` and `houseRentAllowance` resolve to their dedicated
    /// fields; every other key is looked up in `components`.
    pub fn component(&self, key: &str) -> Option<Decimal> {
        match key {
            crate::config::fields::BASIC_SALARY => self.basic_salary,
            crate::config::fields::HOUSE_RENT_ALLOWANCE => self.house_rent_allowance,
            _ => self.components.get(key).copied(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_deserialize_minimal_input_defaults() {
        let json = r#"{
            "employee_id": "EMP001",
            "total_working_days": 22,
            "present_days": "21"
        }"#;

        let input: PayrollInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.total_working_days, 22);
        assert_eq!(input.present_days, dec("21"));
        assert_eq!(input.lop_days, Decimal::ZERO);
        assert_eq!(input.overtime_hours, Decimal::ZERO);
        assert!(input.earnings.is_empty());
        assert!(input.payment_mode.is_none());
    }

    #[test]
    fn test_deserialize_input_with_numbers_and_maps() {
        let json = r#"{
            "employee_id": "EMP001",
            "total_working_days": 22,
            "present_days": 20.5,
            "lop_days": 1,
            "basic_salary": 35000,
            "earnings": {"performanceBonus": "5000"},
            "deductions": {"tds": 1200},
            "payment_mode": "cheque",
            "pay_period": {"start_date": "2024-03-01", "end_date": "2024-03-31"}
        }"#;

        let input: PayrollInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.present_days, dec("20.5"));
        assert_eq!(input.basic_salary, Some(dec("35000")));
        assert_eq!(input.earning("performanceBonus"), Some(dec("5000")));
        assert_eq!(input.deduction("tds"), Some(dec("1200")));
        assert_eq!(input.deduction("nps"), None);
        assert_eq!(input.payment_mode, Some(PaymentMode::Cheque));
        assert_eq!(input.pay_period.unwrap().end_date, date(2024, 3, 31));
    }

    #[test]
    fn test_check_attendance_accepts_valid_input() {
        let mut input = PayrollInput::new("EMP001", 22, dec("21"));
        input.lop_days = dec("1");
        assert!(input.check_attendance().is_ok());
    }

    #[test]
    fn test_check_attendance_rejects_zero_working_days() {
        let input = PayrollInput::new("EMP001", 0, Decimal::ZERO);
        let err = input.check_attendance().unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn test_check_attendance_rejects_lop_above_present() {
        let mut input = PayrollInput::new("EMP001", 22, dec("10"));
        input.lop_days = dec("11");

        match input.check_attendance() {
            Err(EngineError::InvalidAttendance {
                employee_id,
                message,
            }) => {
                assert_eq!(employee_id, "EMP001");
                assert_eq!(message, "LOP days exceed present days");
            }
            other => panic!("Expected InvalidAttendance, got {:?}", other),
        }
    }

    #[test]
    fn test_check_attendance_rejects_negative_overtime() {
        let mut input = PayrollInput::new("EMP001", 22, dec("22"));
        input.overtime_hours = dec("-2");
        assert!(input.check_attendance().is_err());
    }

    #[test]
    fn test_month_containing_handles_year_end() {
        let period = PayPeriod::month_containing(date(2024, 12, 15));
        assert_eq!(period.start_date, date(2024, 12, 1));
        assert_eq!(period.end_date, date(2024, 12, 31));
    }

    #[test]
    fn test_payment_mode_defaults_to_bank_transfer() {
        assert_eq!(PaymentMode::default(), PaymentMode::BankTransfer);
        let json = serde_json::to_string(&PaymentMode::BankTransfer).unwrap();
        assert_eq!(json, "\"bank_transfer\"");
    }

    #[test]
    fn test_salary_structure_component_lookup() {
        let structure = SalaryStructure {
            employee_id: "EMP001".to_string(),
            basic_salary: Some(dec("30000")),
            house_rent_allowance: None,
            components: HashMap::from([("specialAllowance".to_string(), dec("4000"))]),
        };

        assert_eq!(structure.component("basicSalary"), Some(dec("30000")));
        assert_eq!(structure.component("houseRentAllowance"), None);
        assert_eq!(structure.component("specialAllowance"), Some(dec("4000")));
        assert_eq!(structure.component("shiftAllowance"), None);
    }
}
