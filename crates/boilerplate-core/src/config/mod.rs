//! Wizard settings and template directory discovery

pub mod settings;

pub use settings::{resolve_template_dir, SettingsError, WizardSettings};
