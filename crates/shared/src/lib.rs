//! Shared error model and variable-source loading for hopxml.
//!
//! This crate is the foundation depended on by the builder crate. It provides:
//! - [`HopXmlError`] — the unified error type
//! - [`Variable`] and the four variable-source loaders

pub mod config;
pub mod error;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    Variable, load_environment_variables, load_hop_variables, load_pipeline_variables,
    load_project_variables,
};
pub use error::{HopXmlError, Result};
