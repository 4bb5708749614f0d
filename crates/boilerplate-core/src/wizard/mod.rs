//! The wizard: state machine, rendering, and scheduling
//!
//! Nothing here touches the terminal. Keys arrive as [`KeyInput`] events and
//! screens leave as strings, so the whole flow runs in tests.

pub mod event;
pub mod render;
pub mod scheduler;
pub mod state;
pub mod theme;

pub use event::{Effect, Event, KeyInput};
pub use render::{render, render_waiting};
pub use scheduler::{await_provisioning, run_event_loop, BackgroundOutcome, Scheduler};
pub use state::{Screen, WizardState};
pub use theme::Theme;
