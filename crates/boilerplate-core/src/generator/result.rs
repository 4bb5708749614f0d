//! Outcome of one generation run

use crate::error::ProvisionError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Everything that happened while generating, handed back to the wizard once
#[derive(Debug, Default)]
pub struct ProvisioningResult {
    /// Project root directory
    pub root: PathBuf,

    /// Files written, in generation order
    pub written: Vec<PathBuf>,

    /// Non-fatal notices (descriptor init failure, placeholder substitutions)
    pub warnings: Vec<String>,

    /// Per-file (or per-directory) failures
    pub file_errors: Vec<(PathBuf, ProvisionError)>,

    /// Per-dependency fetch failures
    pub dependency_errors: Vec<(String, ProvisionError)>,

    /// True when no file failed; dependency failures do not count
    pub overall_succeeded: bool,
}

impl ProvisioningResult {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            ..Self::default()
        }
    }

    pub(crate) fn finish(&mut self) {
        self.overall_succeeded = self.file_errors.is_empty();
    }

    /// Number of problems worth reporting (errors only, not warnings)
    pub fn problem_count(&self) -> usize {
        self.file_errors.len() + self.dependency_errors.len()
    }

    /// Every regular file now under the project root, including ones written
    /// by the toolchain (e.g. `go.mod`), relative to the root and sorted
    pub fn tree_files(&self) -> Vec<PathBuf> {
        list_files(&self.root)
    }
}

pub(crate) fn list_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.path().strip_prefix(root).ok().map(Path::to_path_buf))
        .collect();
    files.sort();
    files
}
