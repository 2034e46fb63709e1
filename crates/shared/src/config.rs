//! Variable sources for execution-configuration documents.
//!
//! Each source is a JSON file owned by the orchestration platform; this crate
//! only knows where the `{name, value}` records live inside each document:
//! - hop config and environment config: top-level `variables`
//! - pipeline run config: top-level `configurationVariables`
//! - project config: nested `config.variables`
//!
//! Loaders keep the failure classes distinct: an unreadable file, malformed
//! JSON, and a document missing the expected key are three different errors.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{HopXmlError, Result};

/// A single `{name, value}` record from any variable source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub value: String,
}

impl Variable {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Load hop-level variables (top-level `variables` key).
pub fn load_hop_variables(path: &Path) -> Result<Vec<Variable>> {
    variables_at(path, &["variables"])
}

/// Load pipeline run-configuration variables (`configurationVariables` key).
pub fn load_pipeline_variables(path: &Path) -> Result<Vec<Variable>> {
    variables_at(path, &["configurationVariables"])
}

/// Load project-level variables (nested under `config.variables`).
pub fn load_project_variables(path: &Path) -> Result<Vec<Variable>> {
    variables_at(path, &["config", "variables"])
}

/// Load environment-level variables (top-level `variables` key).
pub fn load_environment_variables(path: &Path) -> Result<Vec<Variable>> {
    variables_at(path, &["variables"])
}

/// Read a JSON document and extract the variable list under `keys`.
fn variables_at(path: &Path, keys: &[&str]) -> Result<Vec<Variable>> {
    let content = std::fs::read_to_string(path).map_err(|e| HopXmlError::io(path, e))?;
    let doc: Value = serde_json::from_str(&content).map_err(|e| HopXmlError::json(path, e))?;

    let mut node = &doc;
    for key in keys {
        node = node.get(key).ok_or_else(|| {
            HopXmlError::schema(format!(
                "{}: missing key `{}`",
                path.display(),
                keys.join(".")
            ))
        })?;
    }

    let variables: Vec<Variable> = serde_json::from_value(node.clone()).map_err(|e| {
        HopXmlError::schema(format!(
            "{}: `{}` is not a list of name/value records: {e}",
            path.display(),
            keys.join(".")
        ))
    })?;

    debug!(path = %path.display(), count = variables.len(), "loaded variables");
    Ok(variables)
}
