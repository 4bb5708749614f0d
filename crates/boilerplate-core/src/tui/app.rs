//! Wires the wizard to a real terminal

use super::summary;
use super::terminal::{CrosstermKeys, InputReader, RawModeGuard, Screen};
use crate::config::WizardSettings;
use crate::generator::{GenerateOptions, Generator};
use crate::templates::TemplateStore;
use crate::toolchain::Toolchain;
use crate::wizard::{
    await_provisioning, render, render_waiting, run_event_loop, BackgroundOutcome, Event,
    Scheduler, Theme, WizardState,
};
use anyhow::Result;
use console::Term;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::time::interval;

/// Everything the interactive run needs besides the toolchain
#[derive(Debug, Clone)]
pub struct WizardOptions {
    /// Version written into generated projects
    pub version: String,
    pub settings: WizardSettings,
    pub generate: GenerateOptions,
}

/// Run the wizard in the current terminal, then report what was generated
pub async fn run<T: Toolchain>(toolchain: &T, store: TemplateStore, options: WizardOptions) -> Result<()> {
    let term = Term::stdout();
    if !term.is_term() {
        anyhow::bail!(
            "The wizard needs an interactive terminal. Use the `generate` command instead."
        );
    }

    let theme = Theme::default();
    let (tx, mut rx) = mpsc::unbounded_channel();

    let generator = Generator::new(toolchain.clone(), store, options.generate.clone());
    let mut scheduler = Scheduler::new(tx.clone(), generator, &options.settings);
    let mut state = WizardState::new(&options.settings, options.version.clone());

    let background = {
        // Dropped in reverse order: the reader is joined before raw mode ends
        let _raw_mode = RawModeGuard::enable(&term)?;
        let _reader = InputReader::spawn(CrosstermKeys, tx);
        let mut screen = Screen::new(term);

        run_event_loop(&mut state, &mut scheduler, &mut rx, |state| {
            screen.draw(&render(state, &theme))
        })
        .await?;

        match (state.result().is_some(), state.project()) {
            (false, Some(project)) if state.provisioning_started() => Some(
                wait_for_background(&mut rx, &mut screen, &theme, &options.settings, &project.name)
                    .await?,
            ),
            _ => None,
        }
    };

    let result = match background {
        Some(BackgroundOutcome::Finished(result)) => Some(result),
        Some(BackgroundOutcome::Abandoned) => {
            cliclack::log::info("Stopped waiting for the generator")?;
            None
        }
        Some(BackgroundOutcome::TimedOut) => {
            cliclack::log::info(format!(
                "Gave up waiting after {} seconds",
                options.settings.shutdown_grace_secs
            ))?;
            None
        }
        None => state.take_result(),
    };

    summary::report(toolchain, state.project(), result.as_ref())
}

/// Keep the terminal live until the task reports back, the grace period
/// runs out, or the user quits again
async fn wait_for_background(
    rx: &mut UnboundedReceiver<Event>,
    screen: &mut Screen,
    theme: &Theme,
    settings: &WizardSettings,
    project_name: &str,
) -> Result<BackgroundOutcome> {
    let wait = await_provisioning(rx, settings.shutdown_grace());
    tokio::pin!(wait);

    let mut ticker = interval(settings.spinner_interval());
    let mut frame = 0usize;
    loop {
        tokio::select! {
            outcome = &mut wait => return Ok(outcome),
            _ = ticker.tick() => {
                screen.draw(&render_waiting(project_name, frame, theme))?;
                frame = frame.wrapping_add(1);
            }
        }
    }
}
