//! Terminal front end for the wizard
//!
//! This module is optional and only available when the `tui` feature is enabled.

#[cfg(feature = "tui")]
mod app;
#[cfg(feature = "tui")]
mod summary;
#[cfg(feature = "tui")]
mod terminal;

#[cfg(feature = "tui")]
pub use app::{run, WizardOptions};
#[cfg(feature = "tui")]
pub use summary::report;
#[cfg(feature = "tui")]
pub use terminal::restore_terminal;
