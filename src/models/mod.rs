//! Core data models for the Payslip Calculation Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod bulk;
mod employee;
mod payroll_input;
mod payslip;

pub use bulk::{BulkPayslipOutcome, BulkSummary, EMPLOYEE_NOT_FOUND};
pub use employee::Employee;
pub use payroll_input::{PayPeriod, PaymentMode, PayrollInput, SalaryStructure};
pub use payslip::{
    AttendanceSummary, AuditStep, PaymentDetails, PayslipLine, PayslipMetadata, PayslipResult,
};
