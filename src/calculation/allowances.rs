//! Derived earnings: house rent allowance, percentage-of-basic fields and
//! overtime.

use rust_decimal::Decimal;

use crate::config::{CalculationMode, PayslipTemplate, fields};

use super::proration::mul_div;

/// Default HRA, as a percentage of basic salary.
pub fn default_hra_percentage() -> Decimal {
    Decimal::new(40, 0)
}

/// Hours in a standard working day, used to derive the hourly rate.
pub const STANDARD_WORKDAY_HOURS: u32 = 8;

/// Overtime is paid at double the hourly rate.
pub fn overtime_multiplier() -> Decimal {
    Decimal::new(2, 0)
}

/// Calculates house rent allowance from basic salary.
///
/// Only `percentage` mode HRA is derived here: `basic_salary × percentage / 100`,
/// capped at the field's `max_amount` when one is set. For any other mode, or
/// a template without an HRA field, returns zero and the amount is expected
/// to come from the salary structure or payroll input.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::calculate_hra;
/// use payslip_engine::config::PayslipTemplate;
/// use rust_decimal::Decimal;
///
/// let template = PayslipTemplate::standard();
/// assert_eq!(calculate_hra(Decimal::new(20000, 0), &template), Decimal::new(8000, 0));
/// ```
pub fn calculate_hra(basic_salary: Decimal, template: &PayslipTemplate) -> Decimal {
    match template.earning_field(fields::HOUSE_RENT_ALLOWANCE) {
        Some(field) if field.calculation_mode == CalculationMode::Percentage => {
            let percentage = field.percentage.unwrap_or_else(default_hra_percentage);
            percentage_of(basic_salary, percentage, field.max_amount)
        }
        _ => Decimal::ZERO,
    }
}

/// Returns `base × percentage / 100`, capped at `max_amount` when given.
pub fn percentage_of(base: Decimal, percentage: Decimal, max_amount: Option<Decimal>) -> Decimal {
    let amount = mul_div(base, percentage, Decimal::ONE_HUNDRED);
    match max_amount {
        Some(cap) => amount.min(cap),
        None => amount,
    }
}

/// Calculates overtime pay.
///
/// The hourly rate is `basic_salary / (total_working_days × 8)` and overtime
/// is paid at twice that rate. Returns zero for non-positive hours and when
/// there are no working days. Products beyond the `Decimal` range saturate.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::calculate_overtime;
/// use rust_decimal::Decimal;
///
/// // 17600 / (22 × 8) = 100 per hour, 5 hours at double time
/// let pay = calculate_overtime(Decimal::new(5, 0), Decimal::new(17600, 0), 22);
/// assert_eq!(pay, Decimal::new(1000, 0));
/// ```
pub fn calculate_overtime(
    overtime_hours: Decimal,
    basic_salary: Decimal,
    total_working_days: u32,
) -> Decimal {
    if overtime_hours <= Decimal::ZERO || total_working_days == 0 {
        return Decimal::ZERO;
    }

    let period_hours = Decimal::from(total_working_days) * Decimal::from(STANDARD_WORKDAY_HOURS);
    let hourly_rate = basic_salary / period_hours;
    overtime_hours
        .saturating_mul(hourly_rate)
        .saturating_mul(overtime_multiplier())
}
