//! Rupee amounts in words, using the Indian numbering system.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

const ONES: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
    "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

const CRORE: u128 = 10_000_000;
const LAKH: u128 = 100_000;
const THOUSAND: u128 = 1_000;

/// Converts a whole rupee amount into words.
///
/// The amount is split into crores, lakhs, thousands and the final hundreds,
/// each rendered with the shared three-digit converter, and suffixed with
/// "Rupees Only". Crore counts of a thousand or more are themselves written
/// in the Indian system.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::number_to_words;
///
/// assert_eq!(number_to_words(0), "Zero Rupees Only");
/// assert_eq!(number_to_words(100000), "One Lakh Rupees Only");
/// assert_eq!(
///     number_to_words(1234567),
///     "Twelve Lakh Thirty Four Thousand Five Hundred Sixty Seven Rupees Only"
/// );
/// ```
pub fn number_to_words(amount: u64) -> String {
    rupees_only(u128::from(amount))
}

/// Renders a decimal amount in words after rounding it to whole rupees.
///
/// Rounding is half away from zero. Negative amounts are prefixed with
/// "Minus"; there is no paise component.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::amount_in_words;
/// use rust_decimal::Decimal;
///
/// assert_eq!(amount_in_words(Decimal::new(150050, 2)), "One Thousand Five Hundred One Rupees Only");
/// assert_eq!(amount_in_words(Decimal::new(-250, 0)), "Minus Two Hundred Fifty Rupees Only");
/// ```
pub fn amount_in_words(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    // An integral Decimal always fits in u128
    let magnitude = rounded.abs().to_u128().unwrap_or_default();

    if rounded.is_sign_negative() && magnitude > 0 {
        format!("Minus {}", rupees_only(magnitude))
    } else {
        rupees_only(magnitude)
    }
}

fn rupees_only(amount: u128) -> String {
    if amount == 0 {
        return "Zero Rupees Only".to_string();
    }
    format!("{} Rupees Only", indian_words(amount))
}

fn indian_words(amount: u128) -> String {
    let crores = amount / CRORE;
    let lakhs = (amount % CRORE) / LAKH;
    let thousands = (amount % LAKH) / THOUSAND;
    let rest = amount % THOUSAND;

    let mut parts = Vec::with_capacity(4);
    if crores > 0 {
        parts.push(format!("{} Crore", indian_words(crores)));
    }
    if lakhs > 0 {
        parts.push(format!("{} Lakh", three_digit_words(lakhs)));
    }
    if thousands > 0 {
        parts.push(format!("{} Thousand", three_digit_words(thousands)));
    }
    if rest > 0 {
        parts.push(three_digit_words(rest));
    }
    parts.join(" ")
}

/// Words for 1..=999.
fn three_digit_words(n: u128) -> String {
    let hundreds = (n / 100) as usize;
    let remainder = (n % 100) as usize;

    let mut parts = Vec::with_capacity(3);
    if hundreds > 0 {
        parts.push(format!("{} Hundred", ONES[hundreds]));
    }
    if remainder >= 20 {
        parts.push(TENS[remainder / 10].to_string());
        if remainder % 10 > 0 {
            parts.push(ONES[remainder % 10].to_string());
        }
    } else if remainder > 0 {
        parts.push(ONES[remainder].to_string());
    }
    parts.join(" ")
}
