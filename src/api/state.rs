//! Application state for the Payslip Calculation Engine API.

use std::sync::Arc;

use crate::config::TemplateLoader;

/// Shared application state.
///
/// Holds the loaded payslip templates, shared read-only across handlers.
#[derive(Clone)]
pub struct AppState {
    templates: Arc<TemplateLoader>,
}

impl AppState {
    /// Creates a new application state with the given template loader.
    pub fn new(templates: TemplateLoader) -> Self {
        Self {
            templates: Arc::new(templates),
        }
    }

    /// Returns a reference to the template loader.
    pub fn templates(&self) -> &TemplateLoader {
        &self.templates
    }
}
