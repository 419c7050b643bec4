//! Payslip Calculation Engine for Indian payroll
//!
//! This crate turns template-driven salary definitions, attendance and raw
//! payroll figures into itemized payslips: prorated earnings, statutory
//! deductions (provident fund, ESIC, professional tax), net pay in words,
//! integrity checks and bulk runs.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
