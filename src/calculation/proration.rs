//! Attendance-based proration.

use rust_decimal::{Decimal, RoundingStrategy};

/// Scales a full-period amount by the share of working days paid for.
///
/// Returns `full_amount × paid_days / total_working_days`, or zero when there
/// are no working days.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::calculate_prorated_salary;
/// use rust_decimal::Decimal;
///
/// let prorated = calculate_prorated_salary(Decimal::new(22000, 0), Decimal::new(11, 0), 22);
/// assert_eq!(prorated, Decimal::new(11000, 0));
/// ```
pub fn calculate_prorated_salary(
    full_amount: Decimal,
    paid_days: Decimal,
    total_working_days: u32,
) -> Decimal {
    if total_working_days == 0 {
        return Decimal::ZERO;
    }
    mul_div(full_amount, paid_days, Decimal::from(total_working_days))
}

/// Returns `amount × numerator / denominator`.
///
/// When the product leaves the `Decimal` range the division happens first and
/// the result saturates, so very large amounts never overflow. `denominator`
/// must be non-zero.
pub fn mul_div(amount: Decimal, numerator: Decimal, denominator: Decimal) -> Decimal {
    match amount.checked_mul(numerator) {
        Some(product) => product / denominator,
        None => (amount / denominator).saturating_mul(numerator),
    }
}

/// Rounds a currency amount to paise, midpoint away from zero.
pub fn round_to_paise(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
