//! Statutory deduction calculations.
//!
//! Provident fund, ESIC and professional tax. Percentages, caps and slabs
//! come from the template's `providentFund`, `esic` and `professionalTax`
//! fields, with the statutory defaults used for anything the template leaves
//! out.

use rust_decimal::Decimal;

use crate::config::{PayslipTemplate, SalarySlab, fields};

use super::proration::mul_div;

/// Default employee PF contribution, as a percentage of basic salary.
pub fn default_pf_percentage() -> Decimal {
    Decimal::new(12, 0)
}

/// Default monthly PF ceiling.
pub fn default_pf_cap() -> Decimal {
    Decimal::new(1800, 0)
}

/// Default employee ESIC contribution, as a percentage of gross salary.
pub fn default_esic_percentage() -> Decimal {
    Decimal::new(75, 2)
}

/// Default gross salary above which ESIC does not apply.
pub fn default_esic_threshold() -> Decimal {
    Decimal::new(21000, 0)
}

/// Calculates the employee provident fund contribution.
///
/// Returns `min(basic_salary × percentage / 100, max_amount)`.
///
/// `basic_salary` is expected to be non-negative; negative values are not
/// rejected and yield a negative contribution.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::calculate_pf;
/// use payslip_engine::config::PayslipTemplate;
/// use rust_decimal::Decimal;
///
/// let template = PayslipTemplate::standard();
/// assert_eq!(calculate_pf(Decimal::new(10000, 0), &template), Decimal::new(1200, 0));
/// assert_eq!(calculate_pf(Decimal::new(50000, 0), &template), Decimal::new(1800, 0));
/// ```
pub fn calculate_pf(basic_salary: Decimal, template: &PayslipTemplate) -> Decimal {
    let field = template.deduction_field(fields::PROVIDENT_FUND);
    let percentage = field
        .and_then(|f| f.percentage)
        .unwrap_or_else(default_pf_percentage);
    let cap = field
        .and_then(|f| f.max_amount)
        .unwrap_or_else(default_pf_cap);

    mul_div(basic_salary, percentage, Decimal::ONE_HUNDRED).min(cap)
}

/// Calculates the employee ESIC contribution.
///
/// ESIC applies only while `gross_salary` is at or below the `esic` field's
/// `max_amount`; above it the contribution is zero.
///
/// `gross_salary` is expected to be non-negative.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::calculate_esic;
/// use payslip_engine::config::PayslipTemplate;
/// use rust_decimal::Decimal;
///
/// let template = PayslipTemplate::standard();
/// assert_eq!(calculate_esic(Decimal::new(20000, 0), &template), Decimal::new(150, 0));
/// assert_eq!(calculate_esic(Decimal::new(21001, 0), &template), Decimal::ZERO);
/// ```
pub fn calculate_esic(gross_salary: Decimal, template: &PayslipTemplate) -> Decimal {
    let field = template.deduction_field(fields::ESIC);
    let threshold = field
        .and_then(|f| f.max_amount)
        .unwrap_or_else(default_esic_threshold);

    if gross_salary > threshold {
        return Decimal::ZERO;
    }

    let percentage = field
        .and_then(|f| f.percentage)
        .unwrap_or_else(default_esic_percentage);
    mul_div(gross_salary, percentage, Decimal::ONE_HUNDRED)
}

/// Looks up professional tax from the `professionalTax` slabs.
///
/// Slabs are evaluated in configured order and the first one containing
/// `gross_salary` wins. Returns zero when no slab matches or the template has
/// no professional tax field.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::calculate_professional_tax;
/// use payslip_engine::config::PayslipTemplate;
/// use rust_decimal::Decimal;
///
/// let template = PayslipTemplate::standard();
/// assert_eq!(calculate_professional_tax(Decimal::new(12000, 0), &template), Decimal::new(150, 0));
/// ```
pub fn calculate_professional_tax(gross_salary: Decimal, template: &PayslipTemplate) -> Decimal {
    template
        .deduction_field(fields::PROFESSIONAL_TAX)
        .map(|field| slab_amount(&field.slabs, gross_salary))
        .unwrap_or(Decimal::ZERO)
}

/// Returns the amount of the first slab containing `gross_salary`, or zero.
pub fn slab_amount(slabs: &[SalarySlab], gross_salary: Decimal) -> Decimal {
    slabs
        .iter()
        .find(|slab| slab.contains(gross_salary))
        .map(|slab| slab.amount)
        .unwrap_or(Decimal::ZERO)
}
