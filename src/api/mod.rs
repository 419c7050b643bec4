//! HTTP API module for the Payslip Calculation Engine.
//!
//! This module exposes payslip calculation, bulk runs, validation and
//! template lookup as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    BulkPayslipRequest, BulkPayslipResponse, CalculatePayslipRequest, DEFAULT_TEMPLATE_ID,
    ValidateResponse,
};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
