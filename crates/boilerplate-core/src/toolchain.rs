//! Toolchain configuration trait for CLI binaries
//!
//! This trait defines the interface each binary implements to describe the
//! kind of project it scaffolds: which commands initialize and populate it,
//! which dependencies it pulls in, and which files make up its layout.

use crate::runtime::command::CommandSpec;
use crate::templates::LayoutEntry;
use std::path::Path;

/// Configuration trait for the project flavour a binary generates
///
/// Each binary implements this trait to define:
/// - Identity (name, display name)
/// - Template directory lookup
/// - Descriptor initialization and dependency-fetch commands
/// - The dependency list and static layout table
/// - Post-generation instructions
pub trait Toolchain: Clone + Send + Sync + 'static {
    /// Internal name (used for env vars and the template subdirectory)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Environment variable name for overriding the template directory
    fn template_dir_env(&self) -> &'static str;

    /// Subdirectory of `templates/` holding this toolchain's templates
    fn template_subdir(&self) -> &'static str;

    /// Command whose success proves the toolchain is installed
    fn version_command(&self) -> CommandSpec;

    /// File the initializer creates; initialization is skipped when present
    fn descriptor_file(&self) -> &'static str;

    /// Command initializing the project descriptor, run inside the project root
    fn init_command(&self, project_name: &str) -> CommandSpec;

    /// Command fetching one dependency, run inside the project root
    fn fetch_command(&self, dependency: &str) -> CommandSpec;

    /// Dependencies fetched into every new project
    fn dependencies(&self) -> Vec<String>;

    /// Directories and files every new project contains
    fn layout(&self) -> Vec<LayoutEntry>;

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, dir: &Path) -> Vec<String>;
}
