//! Template loading functionality.
//!
//! This module provides the [`TemplateLoader`] type for loading payslip
//! templates from YAML files.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::PayslipTemplate;

/// Loads and provides access to payslip templates.
///
/// # Directory Structure
///
/// Every `*.yaml` file in the directory holds one template:
/// ```text
/// config/templates/
/// ├── standard.yaml
/// ├── executive.yaml
/// └── intern.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use payslip_engine::config::TemplateLoader;
///
/// let loader = TemplateLoader::load("./config/templates")?;
/// let template = loader.get_template("standard")?;
/// println!("Template: {} v{}", template.metadata.name, template.metadata.version);
/// # Ok::<(), payslip_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TemplateLoader {
    templates: HashMap<String, PayslipTemplate>,
}

impl TemplateLoader {
    /// Loads all templates from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `TemplateLoader` on success, or an error if:
    /// - The directory does not exist or contains no `*.yaml` files
    /// - Any file contains invalid YAML or misses a required field
    /// - Any template fails [`PayslipTemplate::validate`]
    /// - Two files declare the same template id
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let dir = path.as_ref();
        let dir_str = dir.display().to_string();

        if !dir.is_dir() {
            return Err(EngineError::ConfigNotFound { path: dir_str });
        }

        let entries = fs::read_dir(dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut templates = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let template = Self::load_yaml::<PayslipTemplate>(&path)?;
                debug!(
                    template_id = %template.metadata.id,
                    path = %path.display(),
                    "Loaded payslip template"
                );
                templates.push(template);
            }
        }

        if templates.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no template files found)", dir_str),
            });
        }

        Self::from_templates(templates)
    }

    /// Builds a loader from templates that are already in memory.
    ///
    /// Each template is validated and indexed by its id.
    ///
    /// # Example
    ///
    /// ```
    /// use payslip_engine::config::{PayslipTemplate, TemplateLoader};
    ///
    /// let loader = TemplateLoader::from_templates(vec![PayslipTemplate::standard()])?;
    /// assert!(loader.get_template("standard").is_ok());
    /// # Ok::<(), payslip_engine::error::EngineError>(())
    /// ```
    pub fn from_templates(templates: Vec<PayslipTemplate>) -> EngineResult<Self> {
        let mut by_id = HashMap::with_capacity(templates.len());

        for template in templates {
            template.validate()?;
            let id = template.metadata.id.clone();
            if by_id.insert(id.clone(), template).is_some() {
                return Err(EngineError::InvalidTemplate {
                    template_id: id,
                    message: "template id is declared more than once".to_string(),
                });
            }
        }

        Ok(Self { templates: by_id })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Gets a template by its id.
    ///
    /// Returns `TemplateNotFound` if no loaded template has that id.
    pub fn get_template(&self, id: &str) -> EngineResult<&PayslipTemplate> {
        self.templates
            .get(id)
            .ok_or_else(|| EngineError::TemplateNotFound { id: id.to_string() })
    }

    /// Returns the ids of all loaded templates, sorted.
    pub fn template_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.templates.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}
