//! Payslip template types.
//!
//! A template describes which earning and deduction fields a payslip has and
//! how each one is calculated. Templates are deserialized from YAML files (see
//! [`super::TemplateLoader`]) or built in code, and are never mutated by the
//! engine.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::fields;

/// How the amount of a template field is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMode {
    /// A full-period amount supplied by the salary structure or payroll
    /// input, prorated by paid days.
    Fixed,
    /// A percentage of basic salary.
    Percentage,
    /// Derived from attendance by a built-in formula (overtime).
    Formula,
    /// A one-off amount passed through without proration.
    Variable,
    /// Looked up from an ordered list of salary slabs (deductions only).
    Slab,
}

/// Identifying information about a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateMetadata {
    /// Unique template id (e.g., "standard", "executive").
    pub id: String,
    /// The human-readable template name.
    pub name: String,
    /// The template version, recorded on every payslip it produces.
    pub version: String,
    /// Optional free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An earning field definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningField {
    /// Field key, unique within the earnings section.
    pub key: String,
    /// Label printed on the payslip.
    pub label: String,
    /// How the amount is derived.
    pub calculation_mode: CalculationMode,
    /// The field a percentage is taken of. Only `basicSalary` is supported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage_of: Option<String>,
    /// The percentage applied in `percentage` mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<Decimal>,
    /// Upper bound on the full-period amount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_amount: Option<Decimal>,
}

/// A deduction field definition.
///
/// For the `esic` field `max_amount` is the gross-salary ceiling above which
/// the contribution does not apply; for every other field it caps the amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionField {
    /// Field key, unique within the deductions section.
    pub key: String,
    /// Label printed on the payslip.
    pub label: String,
    /// How the amount is derived.
    pub calculation_mode: CalculationMode,
    /// The percentage applied in `percentage` mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<Decimal>,
    /// Cap (or applicability ceiling for ESIC).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_amount: Option<Decimal>,
    /// Ordered salary slabs; the first matching slab wins.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slabs: Vec<SalarySlab>,
}

/// A gross-salary band with a flat deduction amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalarySlab {
    /// Inclusive lower bound.
    pub min: Decimal,
    /// Inclusive upper bound; `None` means unbounded.
    #[serde(default)]
    pub max: Option<Decimal>,
    /// The amount deducted when the slab matches.
    pub amount: Decimal,
}

impl SalarySlab {
    /// Returns true if `gross` falls within this slab (both bounds inclusive).
    ///
    /// # Example
    ///
    /// ```
    /// use payslip_engine::config::SalarySlab;
    /// use rust_decimal::Decimal;
    ///
    /// let slab = SalarySlab {
    ///     min: Decimal::new(10000, 0),
    ///     max: Some(Decimal::new(15000, 0)),
    ///     amount: Decimal::new(150, 0),
    /// };
    /// assert!(slab.contains(Decimal::new(12000, 0)));
    /// assert!(slab.contains(Decimal::new(15000, 0)));
    /// assert!(!slab.contains(Decimal::new(15001, 0)));
    /// ```
    pub fn contains(&self, gross: Decimal) -> bool {
        gross >= self.min && self.max.is_none_or(|max| gross <= max)
    }
}

/// A complete payslip template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipTemplate {
    /// Template identification and version.
    pub metadata: TemplateMetadata,
    /// Earning fields in payslip order.
    pub earnings_fields: Vec<EarningField>,
    /// Deduction fields in payslip order.
    pub deductions_fields: Vec<DeductionField>,
}

impl PayslipTemplate {
    /// Returns the earning field with the given key, if the template has one.
    pub fn earning_field(&self, key: &str) -> Option<&EarningField> {
        self.earnings_fields.iter().find(|f| f.key == key)
    }

    /// Returns the deduction field with the given key, if the template has one.
    pub fn deduction_field(&self, key: &str) -> Option<&DeductionField> {
        self.deductions_fields.iter().find(|f| f.key == key)
    }

    /// Checks the structural invariants of the template.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidTemplate`] if:
    /// - the template id is empty
    /// - a key appears twice within the earnings or deductions section
    /// - an earning field uses `slab` mode
    /// - more than one earning field uses `formula` mode
    /// - a percentage references anything other than `basicSalary`
    /// - a percentage or cap is negative
    /// - a `slab` deduction has no slabs, or a slab has `max < min`
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |message: String| EngineError::InvalidTemplate {
            template_id: self.metadata.id.clone(),
            message,
        };

        if self.metadata.id.trim().is_empty() {
            return Err(invalid("template id must not be empty".to_string()));
        }

        let mut seen = HashSet::new();
        for field in &self.earnings_fields {
            if !seen.insert(field.key.as_str()) {
                return Err(invalid(format!("duplicate earnings key '{}'", field.key)));
            }
            if field.calculation_mode == CalculationMode::Slab {
                return Err(invalid(format!(
                    "earnings field '{}' cannot use slab mode",
                    field.key
                )));
            }
            if let Some(base) = &field.percentage_of {
                if base != fields::BASIC_SALARY {
                    return Err(invalid(format!(
                        "earnings field '{}' takes a percentage of '{}', only '{}' is supported",
                        field.key,
                        base,
                        fields::BASIC_SALARY
                    )));
                }
            }
            check_non_negative(&field.key, "percentage", field.percentage).map_err(&invalid)?;
            check_non_negative(&field.key, "max_amount", field.max_amount).map_err(&invalid)?;
        }

        let formula_fields = self
            .earnings_fields
            .iter()
            .filter(|f| f.calculation_mode == CalculationMode::Formula)
            .count();
        if formula_fields > 1 {
            return Err(invalid(format!(
                "only one formula earnings field is supported, found {}",
                formula_fields
            )));
        }

        let mut seen = HashSet::new();
        for field in &self.deductions_fields {
            if !seen.insert(field.key.as_str()) {
                return Err(invalid(format!("duplicate deductions key '{}'", field.key)));
            }
            check_non_negative(&field.key, "percentage", field.percentage).map_err(&invalid)?;
            check_non_negative(&field.key, "max_amount", field.max_amount).map_err(&invalid)?;
            if field.calculation_mode == CalculationMode::Slab && field.slabs.is_empty() {
                return Err(invalid(format!(
                    "deductions field '{}' uses slab mode but defines no slabs",
                    field.key
                )));
            }
            for slab in &field.slabs {
                if slab.max.is_some_and(|max| max < slab.min) {
                    return Err(invalid(format!(
                        "deductions field '{}' has a slab with max below min ({})",
                        field.key, slab.min
                    )));
                }
            }
        }

        Ok(())
    }

    /// The standard template used for regular full-time staff.
    ///
    /// # Example
    ///
    /// ```
    /// use payslip_engine::config::PayslipTemplate;
    ///
    /// let template = PayslipTemplate::standard();
    /// assert_eq!(template.metadata.id, "standard");
    /// assert!(template.validate().is_ok());
    /// ```
    pub fn standard() -> Self {
        Self {
            metadata: TemplateMetadata {
                id: "standard".to_string(),
                name: "Standard Payslip".to_string(),
                version: "1.0".to_string(),
                description: Some("Default template for full-time employees".to_string()),
            },
            earnings_fields: vec![
                earning(fields::BASIC_SALARY, "Basic Salary", CalculationMode::Fixed),
                EarningField {
                    percentage_of: Some(fields::BASIC_SALARY.to_string()),
                    percentage: Some(Decimal::new(40, 0)),
                    ..earning(
                        fields::HOUSE_RENT_ALLOWANCE,
                        "House Rent Allowance",
                        CalculationMode::Percentage,
                    )
                },
                earning("conveyanceAllowance", "Conveyance Allowance", CalculationMode::Fixed),
                earning("medicalAllowance", "Medical Allowance", CalculationMode::Fixed),
                earning("specialAllowance", "Special Allowance", CalculationMode::Fixed),
                earning("leaveTravelAllowance", "Leave Travel Allowance", CalculationMode::Fixed),
                earning("shiftAllowance", "Shift Allowance", CalculationMode::Fixed),
                earning("internetAllowance", "Internet Allowance", CalculationMode::Fixed),
                earning("performanceBonus", "Performance Bonus", CalculationMode::Variable),
                earning("arrears", "Arrears", CalculationMode::Variable),
                earning("incentive", "Incentive", CalculationMode::Variable),
                earning(fields::OVERTIME_ALLOWANCE, "Overtime Allowance", CalculationMode::Formula),
            ],
            deductions_fields: vec![
                DeductionField {
                    percentage: Some(Decimal::new(12, 0)),
                    max_amount: Some(Decimal::new(1800, 0)),
                    ..deduction(fields::PROVIDENT_FUND, "Provident Fund", CalculationMode::Percentage)
                },
                deduction("voluntaryProvidentFund", "Voluntary PF", CalculationMode::Variable),
                DeductionField {
                    percentage: Some(Decimal::new(75, 2)),
                    max_amount: Some(Decimal::new(21000, 0)),
                    ..deduction(fields::ESIC, "ESIC", CalculationMode::Percentage)
                },
                DeductionField {
                    slabs: vec![
                        slab(0, Some(10000), 0),
                        slab(10000, Some(15000), 150),
                        slab(15000, Some(20000), 200),
                        slab(20000, None, 250),
                    ],
                    ..deduction(fields::PROFESSIONAL_TAX, "Professional Tax", CalculationMode::Slab)
                },
                deduction("tds", "TDS", CalculationMode::Variable),
                deduction("medicalPremium", "Medical Insurance Premium", CalculationMode::Variable),
                deduction("nps", "NPS Contribution", CalculationMode::Variable),
                deduction("loanEmi", "Loan EMI", CalculationMode::Variable),
                deduction("advances", "Salary Advance", CalculationMode::Variable),
                deduction("canteenCharges", "Canteen Charges", CalculationMode::Variable),
                deduction("otherDeductions", "Other Deductions", CalculationMode::Variable),
            ],
        }
    }
}

fn check_non_negative(key: &str, what: &str, value: Option<Decimal>) -> Result<(), String> {
    match value {
        Some(v) if v.is_sign_negative() && !v.is_zero() => {
            Err(format!("field '{}' has a negative {} ({})", key, what, v))
        }
        _ => Ok(()),
    }
}

fn earning(key: &str, label: &str, calculation_mode: CalculationMode) -> EarningField {
    EarningField {
        key: key.to_string(),
        label: label.to_string(),
        calculation_mode,
        percentage_of: None,
        percentage: None,
        max_amount: None,
    }
}

fn deduction(key: &str, label: &str, calculation_mode: CalculationMode) -> DeductionField {
    DeductionField {
        key: key.to_string(),
        label: label.to_string(),
        calculation_mode,
        percentage: None,
        max_amount: None,
        slabs: vec![],
    }
}

fn slab(min: i64, max: Option<i64>, amount: i64) -> SalarySlab {
    SalarySlab {
        min: Decimal::from(min),
        max: max.map(Decimal::from),
        amount: Decimal::from(amount),
    }
}
