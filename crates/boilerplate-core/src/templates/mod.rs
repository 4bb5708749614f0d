//! Template lookup, parsing, and layout
//!
//! This module provides:
//! - The template store resolving logical file names to `*.template` files
//! - The `{{.Field}}` substitution engine
//! - The static layout table describing the generated tree
//! - Version parsing for the `Version` template variable

pub mod engine;
pub mod layout;
pub mod store;
pub mod version;

use thiserror::Error;

pub use engine::{render, TemplateVars};
pub use layout::LayoutEntry;
pub use store::{TemplateStore, TEMPLATE_EXTENSION};
pub use version::parse_version;

/// Rendering failures; every variant counts as a template syntax error for
/// the generator
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("unclosed '{{{{' at byte {offset}")]
    Unclosed { offset: usize },

    #[error("empty action at byte {offset}")]
    EmptyAction { offset: usize },

    #[error("unsupported action '{action}' at byte {offset}")]
    UnsupportedAction { offset: usize, action: String },

    #[error("undefined variable '{0}'")]
    UndefinedVariable(String),
}
