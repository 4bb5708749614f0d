//! Event loop, timers, and the provisioning task
//!
//! The loop is the only writer of [`WizardState`]. Timers and the
//! provisioning task talk to it exclusively through the event channel.

use super::event::{Effect, Event, KeyInput};
use super::state::WizardState;
use crate::config::WizardSettings;
use crate::generator::{Generator, ProjectSpec, ProvisioningResult};
use crate::toolchain::Toolchain;
use anyhow::Result;
use std::time::Duration;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};

/// Executes the effects the state machine asks for
pub struct Scheduler<T: Toolchain> {
    tx: UnboundedSender<Event>,
    generator: Generator<T>,
    countdown_interval: Duration,
    frame_interval: Duration,
    spinner_interval: Duration,
    provisioning: Option<JoinHandle<()>>,
}

impl<T: Toolchain> Scheduler<T> {
    pub fn new(tx: UnboundedSender<Event>, generator: Generator<T>, settings: &WizardSettings) -> Self {
        Self {
            tx,
            generator,
            countdown_interval: settings.countdown_interval(),
            frame_interval: settings.frame_interval(),
            spinner_interval: settings.spinner_interval(),
            provisioning: None,
        }
    }

    pub fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ScheduleCountdown { generation } => self.after(
                    self.countdown_interval,
                    Event::CountdownTick { generation },
                ),
                Effect::ScheduleFrame => self.after(self.frame_interval, Event::AnimationFrame),
                Effect::ScheduleSpinner => self.after(self.spinner_interval, Event::SpinnerTick),
                Effect::StartProvisioning(spec) => self.start_provisioning(spec),
            }
        }
    }

    /// One-shot timer; a send after the loop has gone is silently dropped
    fn after(&self, delay: Duration, event: Event) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            sleep(delay).await;
            let _ = tx.send(event);
        });
    }

    fn start_provisioning(&mut self, spec: ProjectSpec) {
        // Confirming a name is only possible once per session
        if self.provisioning.is_some() {
            return;
        }

        let tx = self.tx.clone();
        let generator = self.generator.clone();
        self.provisioning = Some(tokio::spawn(async move {
            let result = generator.generate(&spec).await;
            let _ = tx.send(Event::ProvisioningComplete(result));
        }));
    }

    /// Whether a provisioning task was started and has not finished yet
    pub fn provisioning_in_flight(&self) -> bool {
        self.provisioning
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

/// Run the wizard until it reaches a terminal screen
///
/// `draw` is called with the state after the initial setup and after every
/// event.
pub async fn run_event_loop<T, F>(
    state: &mut WizardState,
    scheduler: &mut Scheduler<T>,
    rx: &mut UnboundedReceiver<Event>,
    mut draw: F,
) -> Result<()>
where
    T: Toolchain,
    F: FnMut(&WizardState) -> Result<()>,
{
    scheduler.apply(state.start());
    draw(state)?;

    while !state.is_finished() {
        let Some(event) = rx.recv().await else {
            break;
        };
        let effects = state.update(event);
        scheduler.apply(effects);
        draw(state)?;
    }

    Ok(())
}

/// How waiting for a task that outlived the wizard ended
#[derive(Debug)]
pub enum BackgroundOutcome {
    Finished(ProvisioningResult),
    /// The user pressed quit again while waiting
    Abandoned,
    TimedOut,
}

/// After the loop ends, wait up to `grace` for an in-flight task's result
///
/// Another quit key abandons the task early. An abandoned or timed-out task
/// is not killed here; it goes away with the runtime.
pub async fn await_provisioning(
    rx: &mut UnboundedReceiver<Event>,
    grace: Duration,
) -> BackgroundOutcome {
    let wait = async {
        while let Some(event) = rx.recv().await {
            match event {
                Event::ProvisioningComplete(result) => return BackgroundOutcome::Finished(result),
                Event::Input(KeyInput::Quit) => return BackgroundOutcome::Abandoned,
                _ => {}
            }
        }
        // Every sender is gone, nothing can report back
        BackgroundOutcome::Abandoned
    };
    timeout(grace, wait)
        .await
        .unwrap_or(BackgroundOutcome::TimedOut)
}
