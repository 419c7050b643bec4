//! Well-known field keys.
//!
//! Templates may define any number of fields, but a handful of keys carry
//! statutory or structural meaning for the engine.

/// Basic salary earning; the base for proration and percentage derivations.
pub const BASIC_SALARY: &str = "basicSalary";

/// House rent allowance earning.
pub const HOUSE_RENT_ALLOWANCE: &str = "houseRentAllowance";

/// Overtime allowance earning.
pub const OVERTIME_ALLOWANCE: &str = "overtimeAllowance";

/// Employee provident fund deduction.
pub const PROVIDENT_FUND: &str = "providentFund";

/// Employees' State Insurance contribution.
pub const ESIC: &str = "esic";

/// State professional tax deduction.
pub const PROFESSIONAL_TAX: &str = "professionalTax";
