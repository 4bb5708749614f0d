//! Error taxonomy for provisioning a new project
//!
//! Every variant is recoverable: the generator records it in the
//! [`ProvisioningResult`](crate::generator::ProvisioningResult) and moves on.

use crate::runtime::command::CommandError;
use crate::templates::TemplateError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("no template for '{file}' (looked for {})", .path.display())]
    TemplateNotFound { file: String, path: PathBuf },

    #[error("failed to read template for '{file}': {source}")]
    TemplateRead {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("template for '{file}' could not be rendered: {source}")]
    TemplateSyntax {
        file: String,
        #[source]
        source: TemplateError,
    },

    #[error("failed to write {}: {source}", .path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create directory {}: {source}", .path.display())]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch '{dependency}': {source}")]
    DependencyFetch {
        dependency: String,
        #[source]
        source: CommandError,
    },

    #[error("{0}")]
    InputValidation(String),
}
