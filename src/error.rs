//! Error types for the Payslip Calculation Engine.
//!
//! The calculation functions themselves never fail: arithmetic anomalies are
//! reported through [`crate::calculation::validate_calculations`]. The errors
//! in this module cover the hard failure modes around the engine, such as
//! loading templates and checking raw input at the boundary.

use thiserror::Error;

/// The main error type for the Payslip Calculation Engine.
///
/// # Example
///
/// ```
/// use payslip_engine::error::EngineError;
///
/// let error = EngineError::TemplateNotFound {
///     id: "contractor".to_string(),
/// };
/// assert_eq!(error.to_string(), "Payslip template not found: contractor");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file or directory was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No template with the requested id has been loaded.
    #[error("Payslip template not found: {id}")]
    TemplateNotFound {
        /// The template id that was requested.
        id: String,
    },

    /// A template violates one of its structural invariants.
    #[error("Invalid payslip template '{template_id}': {message}")]
    InvalidTemplate {
        /// The id of the offending template.
        template_id: String,
        /// A description of the violated invariant.
        message: String,
    },

    /// Attendance figures on a payroll input are out of range.
    #[error("Invalid attendance for employee '{employee_id}': {message}")]
    InvalidAttendance {
        /// The employee the payroll input belongs to.
        employee_id: String,
        /// A description of what made the attendance invalid.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
