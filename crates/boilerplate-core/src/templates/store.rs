//! Template store backed by a directory of `*.template` files

use crate::error::ProvisionError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Suffix appended to a logical file name to find its template
pub const TEMPLATE_EXTENSION: &str = "template";

/// Resolves logical output file names to raw template text
#[derive(Debug, Clone)]
pub struct TemplateStore {
    dir: PathBuf,
}

impl TemplateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the template backing `file_name` (`main.go` -> `main.go.template`)
    pub fn template_path(&self, file_name: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{}", file_name, TEMPLATE_EXTENSION))
    }

    /// Read the template for `file_name`
    ///
    /// A missing file is reported as `TemplateNotFound`, any other I/O
    /// failure as `TemplateRead`.
    pub async fn resolve(&self, file_name: &str) -> Result<String, ProvisionError> {
        let path = self.template_path(file_name);
        match fs::read_to_string(&path).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(ProvisionError::TemplateNotFound {
                file: file_name.to_string(),
                path,
            }),
            Err(e) => Err(ProvisionError::TemplateRead {
                file: file_name.to_string(),
                source: e,
            }),
        }
    }

    /// Whether the template directory exists at all
    pub fn exists(&self) -> bool {
        self.dir.is_dir()
    }
}
