//! Boilerplate Core - interactive project wizard and template-driven generator
//!
//! This library drives a small terminal wizard (pick an action, name a
//! project) and materializes the new project from `*.template` files with
//! `{{.ProjectName}}` / `{{.Version}}` substitution, fetching dependencies
//! through the project's own toolchain.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - template store and engine, layout table,
//!   external command runner, toolchain detection
//! - **Layer 2: Orchestration** - the [`Toolchain`] trait, the [`Generator`],
//!   and the terminal-free wizard state machine and scheduler
//! - **Layer 3: Terminal Interface** - raw key input, screen redraws and the
//!   cliclack summary (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the terminal front end
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use boilerplate_core::{GenerateOptions, Generator, ProjectSpec, TemplateStore};
//!
//! let generator = Generator::new(MyToolchain, TemplateStore::new("templates/go-service"),
//!     GenerateOptions::default());
//! let result = generator.generate(&ProjectSpec::new("demo-app", "1.0.0")?).await;
//! assert!(result.overall_succeeded);
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod runtime;
pub mod templates;
pub mod toolchain;
pub mod wizard;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{resolve_template_dir, WizardSettings};
pub use error::ProvisionError;
pub use generator::{GenerateOptions, Generator, ProjectSpec, ProvisioningResult};
pub use runtime::{check_toolchain, CommandSpec, RuntimeInfo};
pub use templates::{LayoutEntry, TemplateStore};
pub use toolchain::Toolchain;

#[cfg(feature = "tui")]
pub use tui::run;
