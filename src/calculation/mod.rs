//! Payslip calculation.
//!
//! This module contains the statutory deductions (provident fund, ESIC and
//! professional tax), derived earnings (HRA, percentage-of-basic fields and
//! overtime), attendance proration, amount-in-words rendering, payslip
//! assembly, validation and bulk runs.

mod allowances;
mod amount_words;
mod bulk;
mod payslip;
mod proration;
mod statutory;
mod validation;

pub use allowances::{
    STANDARD_WORKDAY_HOURS, calculate_hra, calculate_overtime, default_hra_percentage,
    overtime_multiplier, percentage_of,
};
pub use amount_words::{amount_in_words, number_to_words};
pub use bulk::{calculate_bulk_payslips, calculate_bulk_payslips_at};
pub use payslip::{ENGINE_VERSION, calculate_payslip, calculate_payslip_at};
pub use proration::{calculate_prorated_salary, mul_div, round_to_paise};
pub use statutory::{
    calculate_esic, calculate_pf, calculate_professional_tax, default_esic_percentage,
    default_esic_threshold, default_pf_cap, default_pf_percentage, slab_amount,
};
pub use validation::{tolerance, validate_calculations};
