//! Project generation from the layout table
//!
//! Generation is best-effort: every failure lands in the returned
//! [`ProvisioningResult`] and the run continues with the next dependency,
//! directory, or file. A partially generated tree is a valid outcome, and
//! running again over it is safe (directories are created idempotently, files
//! are overwritten deterministically).

mod result;

pub use result::ProvisioningResult;

use crate::error::ProvisionError;
use crate::templates::layout::file_count;
use crate::templates::{engine, LayoutEntry, TemplateStore, TemplateVars};
use crate::toolchain::Toolchain;
use rand::seq::SliceRandom;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

/// Written in place of a file whose template is missing or broken
pub const DEFAULT_CONTENT: &str = "// default content\n";

/// Name and version of the project being created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSpec {
    pub name: String,
    pub version: String,
}

impl ProjectSpec {
    /// Build a spec, rejecting names that cannot be a directory and module name
    pub fn new(name: &str, version: &str) -> Result<Self, ProvisionError> {
        let name = name.trim();
        validate_project_name(name)?;
        Ok(Self {
            name: name.to_string(),
            version: version.to_string(),
        })
    }
}

/// Names are non-empty and use only ASCII letters, digits, `-` and `_`
pub fn validate_project_name(name: &str) -> Result<(), ProvisionError> {
    if name.is_empty() {
        return Err(ProvisionError::InputValidation(
            "project name cannot be empty".to_string(),
        ));
    }

    if let Some(bad) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(ProvisionError::InputValidation(format!(
            "'{}' is not allowed in a project name, use '-' or '_' as separator",
            bad
        )));
    }

    if name.starts_with('-') {
        return Err(ProvisionError::InputValidation(
            "project name cannot start with '-'".to_string(),
        ));
    }

    Ok(())
}

/// Where and how to generate
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Directory the project root is created in
    pub parent_dir: PathBuf,

    /// Skip descriptor initialization and dependency fetching
    pub skip_dependencies: bool,

    /// Limit for each external command
    pub command_timeout: Duration,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            parent_dir: PathBuf::from("."),
            skip_dependencies: false,
            command_timeout: Duration::from_secs(120),
        }
    }
}

/// Materializes a project from a toolchain's layout and a template store
#[derive(Debug, Clone)]
pub struct Generator<T: Toolchain> {
    toolchain: T,
    store: TemplateStore,
    options: GenerateOptions,
}

impl<T: Toolchain> Generator<T> {
    pub fn new(toolchain: T, store: TemplateStore, options: GenerateOptions) -> Self {
        Self {
            toolchain,
            store,
            options,
        }
    }

    /// Root directory a project with this name is generated into
    pub fn project_root(&self, spec: &ProjectSpec) -> PathBuf {
        self.options.parent_dir.join(&spec.name)
    }

    /// Generate the project; never fails, see [`ProvisioningResult`]
    pub async fn generate(&self, spec: &ProjectSpec) -> ProvisioningResult {
        let root = self.project_root(spec);
        let mut result = ProvisioningResult::new(root.clone());

        if let Err(source) = fs::create_dir_all(&root).await {
            result.file_errors.push((
                root.clone(),
                ProvisionError::DirectoryCreate {
                    path: root.clone(),
                    source,
                },
            ));
            result.finish();
            return result;
        }

        if !self.options.skip_dependencies {
            self.init_descriptor(spec, &root, &mut result).await;
            self.fetch_dependencies(&root, &mut result).await;
        }

        let layout = self.toolchain.layout();
        result.written.reserve(file_count(&layout));

        let vars = TemplateVars::from(spec);
        for entry in &layout {
            self.generate_entry(entry, &root, &vars, &mut result).await;
        }

        result.finish();
        result
    }

    async fn init_descriptor(&self, spec: &ProjectSpec, root: &Path, result: &mut ProvisioningResult) {
        let descriptor = root.join(self.toolchain.descriptor_file());
        if descriptor.exists() {
            return;
        }

        let command = self.toolchain.init_command(&spec.name);
        if let Err(e) = command.run_in(root, self.options.command_timeout).await {
            result
                .warnings
                .push(format!("project initialization failed: {}", e));
        }
    }

    async fn fetch_dependencies(&self, root: &Path, result: &mut ProvisioningResult) {
        for dependency in shuffled(self.toolchain.dependencies()) {
            let command = self.toolchain.fetch_command(&dependency);
            if let Err(source) = command.run_in(root, self.options.command_timeout).await {
                result.dependency_errors.push((
                    dependency.clone(),
                    ProvisionError::DependencyFetch {
                        dependency,
                        source,
                    },
                ));
            }
        }
    }

    async fn generate_entry(
        &self,
        entry: &LayoutEntry,
        root: &Path,
        vars: &TemplateVars,
        result: &mut ProvisioningResult,
    ) {
        let dir = entry.rooted_dir(root);
        if let Err(source) = fs::create_dir_all(&dir).await {
            result.file_errors.push((
                dir.clone(),
                ProvisionError::DirectoryCreate { path: dir, source },
            ));
            return;
        }

        for (file, target) in entry.files.iter().zip(entry.rooted_files(root)) {
            let content = self.render_file(file, &target, vars, result).await;

            match fs::write(&target, content).await {
                Ok(()) => result.written.push(target),
                Err(source) => result.file_errors.push((
                    target.clone(),
                    ProvisionError::FileWrite {
                        path: target,
                        source,
                    },
                )),
            }
        }
    }

    /// Rendered content for one file, falling back to [`DEFAULT_CONTENT`]
    async fn render_file(
        &self,
        file: &str,
        target: &Path,
        vars: &TemplateVars,
        result: &mut ProvisioningResult,
    ) -> String {
        let template = match self.store.resolve(file).await {
            Ok(template) => template,
            Err(e @ ProvisionError::TemplateNotFound { .. }) => {
                result
                    .warnings
                    .push(format!("{}; wrote placeholder to {}", e, target.display()));
                return DEFAULT_CONTENT.to_string();
            }
            Err(e) => {
                result.file_errors.push((target.to_path_buf(), e));
                return DEFAULT_CONTENT.to_string();
            }
        };

        match engine::render(&template, vars) {
            Ok(rendered) => rendered,
            Err(source) => {
                result.file_errors.push((
                    target.to_path_buf(),
                    ProvisionError::TemplateSyntax {
                        file: file.to_string(),
                        source,
                    },
                ));
                DEFAULT_CONTENT.to_string()
            }
        }
    }
}

/// Dependency order carries no meaning; shuffling only varies log order
fn shuffled(mut dependencies: Vec<String>) -> Vec<String> {
    dependencies.shuffle(&mut rand::thread_rng());
    dependencies
}
