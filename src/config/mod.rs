//! Payslip template configuration.
//!
//! Templates define the earning and deduction fields of a payslip, their
//! calculation modes, percentages, caps and salary slabs. They are loaded
//! from YAML files and handed to the engine explicitly.
//!
//! # Example
//!
//! ```no_run
//! use payslip_engine::config::TemplateLoader;
//!
//! let loader = TemplateLoader::load("./config/templates").unwrap();
//! println!("Loaded templates: {:?}", loader.template_ids());
//! ```

pub mod fields;
mod loader;
mod types;

pub use loader::TemplateLoader;
pub use types::{
    CalculationMode, DeductionField, EarningField, PayslipTemplate, SalarySlab, TemplateMetadata,
};
