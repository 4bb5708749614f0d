//! Messages into the wizard and effects out of it

use crate::generator::{ProjectSpec, ProvisioningResult};

/// Keyboard input, already decoded from the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Up,
    Down,
    Confirm,
    Backspace,
    Char(char),
    /// Esc / Ctrl+C, honored on every screen
    Quit,
}

/// Everything the event loop can deliver, processed strictly in arrival order
#[derive(Debug)]
pub enum Event {
    Input(KeyInput),
    /// One second of a countdown; ticks from a superseded countdown are ignored
    CountdownTick { generation: u64 },
    AnimationFrame,
    SpinnerTick,
    ProvisioningComplete(ProvisioningResult),
}

/// Work the scheduler performs on behalf of the state machine
///
/// Timers are one-shot: each firing re-arms by returning another effect, so
/// stopping is simply not asking again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ScheduleCountdown { generation: u64 },
    ScheduleFrame,
    ScheduleSpinner,
    StartProvisioning(ProjectSpec),
}
