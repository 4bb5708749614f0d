//! Static layout table: which files go in which directory

use std::path::{Path, PathBuf};

/// One directory of the generated tree and the files it must contain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutEntry {
    /// Directory relative to the project root (empty for the root itself)
    pub directory: PathBuf,

    /// Logical file names, each resolved through the template store
    pub files: Vec<String>,
}

impl LayoutEntry {
    pub fn new(directory: impl Into<PathBuf>, files: &[&str]) -> Self {
        Self {
            directory: directory.into(),
            files: files.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// Directory rewritten under `root`
    pub fn rooted_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.directory)
    }

    /// Target paths of every file in this entry, rewritten under `root`
    pub fn rooted_files(&self, root: &Path) -> Vec<PathBuf> {
        let dir = self.rooted_dir(root);
        self.files.iter().map(|f| dir.join(f)).collect()
    }
}

/// Total number of files a layout table declares
pub fn file_count(layout: &[LayoutEntry]) -> usize {
    layout.iter().map(|entry| entry.files.len()).sum()
}
