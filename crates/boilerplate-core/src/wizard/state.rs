//! Wizard state and its transition function

use super::event::{Effect, Event, KeyInput};
use crate::config::WizardSettings;
use crate::generator::{ProjectSpec, ProvisioningResult};

/// Menu entries; only the first one does anything beyond showing text
pub const ACTIONS: [&str; 4] = [
    "Create boilerplate",
    "Add modular package",
    "Read something",
    "See friends",
];

const LAST_ACTION: usize = ACTIONS.len() - 1;

/// Frames of the provisioning spinner
pub const SPINNER_FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    NamingProject,
    Provisioning,
    Done,
    Quitting,
}

/// UI state owned by the event loop
///
/// Only [`WizardState::update`] (and [`WizardState::start`]) mutate it.
/// While `screen == Provisioning`, `provisioning_started` is set and
/// `progress` never decreases.
#[derive(Debug)]
pub struct WizardState {
    pub(crate) screen: Screen,
    pub(crate) selected_action: usize,
    pub(crate) project_name_input: String,
    pub(crate) countdown_ticks: u32,
    pub(crate) animation_frame: u32,
    pub(crate) progress: f64,
    pub(crate) provisioning_started: bool,
    pub(crate) provisioning_done: bool,
    pub(crate) animation_finished: bool,
    pub(crate) spinner_frame: usize,
    pub(crate) countdown_generation: u64,
    pub(crate) input_error: Option<String>,
    pub(crate) inspected_action: Option<usize>,
    pub(crate) project: Option<ProjectSpec>,
    pub(crate) result: Option<ProvisioningResult>,

    version: String,
    frames_to_complete: u32,
    exit_countdown: u32,
    name_char_limit: usize,
}

impl WizardState {
    /// `version` is used for every project created in this session
    pub fn new(settings: &WizardSettings, version: impl Into<String>) -> Self {
        Self {
            screen: Screen::Menu,
            selected_action: 0,
            project_name_input: String::new(),
            countdown_ticks: settings.idle_countdown_secs.max(1),
            animation_frame: 0,
            progress: 0.0,
            provisioning_started: false,
            provisioning_done: false,
            animation_finished: false,
            spinner_frame: 0,
            countdown_generation: 0,
            input_error: None,
            inspected_action: None,
            project: None,
            result: None,
            version: version.into(),
            frames_to_complete: settings.frames_to_complete.max(1),
            exit_countdown: settings.exit_countdown_secs,
            name_char_limit: settings.name_char_limit,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn selected_action(&self) -> usize {
        self.selected_action
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn countdown_ticks(&self) -> u32 {
        self.countdown_ticks
    }

    pub fn provisioning_started(&self) -> bool {
        self.provisioning_started
    }

    pub fn provisioning_done(&self) -> bool {
        self.provisioning_done
    }

    pub fn project(&self) -> Option<&ProjectSpec> {
        self.project.as_ref()
    }

    pub fn result(&self) -> Option<&ProvisioningResult> {
        self.result.as_ref()
    }

    /// Hand the provisioning result to the caller once the loop is over
    pub fn take_result(&mut self) -> Option<ProvisioningResult> {
        self.result.take()
    }

    /// True once the event loop has nothing left to show
    pub fn is_finished(&self) -> bool {
        match self.screen {
            Screen::Quitting => true,
            Screen::Done => self.countdown_ticks == 0,
            _ => false,
        }
    }

    /// Effects to run before the first event: the idle countdown
    pub fn start(&mut self) -> Vec<Effect> {
        vec![self.restart_countdown(self.countdown_ticks)]
    }

    /// The transition function
    pub fn update(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::Input(key) => self.on_key(key),
            Event::CountdownTick { generation } => self.on_countdown(generation),
            Event::AnimationFrame => self.on_frame(),
            Event::SpinnerTick => self.on_spinner(),
            Event::ProvisioningComplete(result) => self.on_complete(result),
        }
    }

    fn on_key(&mut self, key: KeyInput) -> Vec<Effect> {
        if key == KeyInput::Quit {
            if self.screen != Screen::Quitting {
                self.quit();
            }
            return Vec::new();
        }

        match self.screen {
            Screen::Menu => self.on_menu_key(key),
            Screen::NamingProject => self.on_naming_key(key),
            Screen::Provisioning | Screen::Done | Screen::Quitting => Vec::new(),
        }
    }

    fn on_menu_key(&mut self, key: KeyInput) -> Vec<Effect> {
        match key {
            KeyInput::Up | KeyInput::Char('k') => self.select(-1),
            KeyInput::Down | KeyInput::Char('j') => self.select(1),
            KeyInput::Char('q') => self.quit(),
            KeyInput::Confirm if self.selected_action == 0 => {
                self.inspected_action = None;
                self.screen = Screen::NamingProject;
                // Leaving the menu retires its countdown
                self.countdown_generation += 1;
            }
            KeyInput::Confirm => self.inspected_action = Some(self.selected_action),
            _ => {}
        }
        Vec::new()
    }

    fn select(&mut self, delta: isize) {
        let next = self.selected_action as isize + delta;
        self.selected_action = next.clamp(0, LAST_ACTION as isize) as usize;
        self.inspected_action = None;
    }

    fn on_naming_key(&mut self, key: KeyInput) -> Vec<Effect> {
        match key {
            KeyInput::Char(c) if !c.is_control() => {
                if self.project_name_input.chars().count() < self.name_char_limit {
                    self.project_name_input.push(c);
                }
                self.input_error = None;
            }
            KeyInput::Backspace => {
                self.project_name_input.pop();
                self.input_error = None;
            }
            KeyInput::Confirm => return self.confirm_name(),
            _ => {}
        }
        Vec::new()
    }

    fn confirm_name(&mut self) -> Vec<Effect> {
        match ProjectSpec::new(&self.project_name_input, &self.version) {
            Ok(spec) => {
                self.input_error = None;
                self.project = Some(spec.clone());
                self.provisioning_started = true;
                self.screen = Screen::Provisioning;
                vec![
                    Effect::ScheduleFrame,
                    Effect::ScheduleSpinner,
                    Effect::StartProvisioning(spec),
                ]
            }
            Err(e) => {
                self.input_error = Some(e.to_string());
                Vec::new()
            }
        }
    }

    fn on_countdown(&mut self, generation: u64) -> Vec<Effect> {
        if generation != self.countdown_generation {
            return Vec::new();
        }

        match self.screen {
            Screen::Menu => {
                self.countdown_ticks = self.countdown_ticks.saturating_sub(1);
                if self.countdown_ticks == 0 {
                    self.quit();
                    return Vec::new();
                }
                vec![Effect::ScheduleCountdown { generation }]
            }
            // Post-completion countdown
            Screen::Provisioning | Screen::Done => {
                self.countdown_ticks = self.countdown_ticks.saturating_sub(1);
                if self.countdown_ticks == 0 {
                    return Vec::new();
                }
                vec![Effect::ScheduleCountdown { generation }]
            }
            Screen::NamingProject | Screen::Quitting => Vec::new(),
        }
    }

    fn on_frame(&mut self) -> Vec<Effect> {
        if self.screen != Screen::Provisioning || self.animation_finished {
            return Vec::new();
        }

        self.animation_frame += 1;
        let t = f64::from(self.animation_frame) / f64::from(self.frames_to_complete);
        if t < 1.0 {
            self.progress = self.progress.max(ease_out_cubic(t));
            return vec![Effect::ScheduleFrame];
        }

        self.progress = 1.0;
        self.animation_finished = true;
        if self.provisioning_done {
            self.screen = Screen::Done;
        }

        if self.exit_countdown == 0 {
            self.countdown_ticks = 0;
            self.countdown_generation += 1;
            return Vec::new();
        }
        vec![self.restart_countdown(self.exit_countdown)]
    }

    fn on_spinner(&mut self) -> Vec<Effect> {
        if self.screen != Screen::Provisioning {
            return Vec::new();
        }
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
        vec![Effect::ScheduleSpinner]
    }

    fn on_complete(&mut self, result: ProvisioningResult) -> Vec<Effect> {
        self.provisioning_done = true;
        self.result = Some(result);
        if self.screen == Screen::Provisioning && self.animation_finished {
            self.screen = Screen::Done;
        }
        Vec::new()
    }

    fn restart_countdown(&mut self, ticks: u32) -> Effect {
        self.countdown_ticks = ticks;
        self.countdown_generation += 1;
        Effect::ScheduleCountdown {
            generation: self.countdown_generation,
        }
    }

    /// Pending timers die with the screen: nothing re-arms from `Quitting`
    fn quit(&mut self) {
        self.screen = Screen::Quitting;
        self.countdown_generation += 1;
    }
}

/// Monotonic on [0, 1], with `ease_out_cubic(1.0) == 1.0`
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}
