//! Screen rendering, a pure function of the wizard state

use super::state::{Screen, WizardState, ACTIONS, SPINNER_FRAMES};
use super::theme::Theme;
use colored::Colorize;

/// Static text shown when a not-yet-implemented action is confirmed
const STUB_TEXT: [&str; 3] = [
    "Modular packages are not available yet.",
    "Reading time? Then you'll need an actual library.",
    "It's always good to see friends. Go say hi!",
];

/// Render the whole screen for `state`
pub fn render(state: &WizardState, theme: &Theme) -> String {
    let body = match state.screen {
        Screen::Menu => menu_view(state, theme),
        Screen::NamingProject => naming_view(state, theme),
        Screen::Provisioning => provisioning_view(state, theme),
        Screen::Done => done_view(state, theme),
        Screen::Quitting => quitting_view(state, theme),
    };

    indent(&body, theme)
}

/// Shown while waiting for a task that outlived the wizard
pub fn render_waiting(project_name: &str, spinner_frame: usize, theme: &Theme) -> String {
    let spinner = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()].color(theme.keyword);
    let body = format!(
        "{} Waiting for '{}' to finish generating...\n\n{}",
        spinner,
        project_name.color(theme.keyword),
        help_line(&["esc: stop waiting"], theme)
    );
    indent(&body, theme)
}

/// Blank line above and below, every non-empty line shifted by the margin
fn indent(body: &str, theme: &Theme) -> String {
    let margin = " ".repeat(theme.left_margin);
    let mut out = String::from("\n");
    for line in body.lines() {
        if line.is_empty() {
            out.push('\n');
        } else {
            out.push_str(&margin);
            out.push_str(line);
            out.push('\n');
        }
    }
    out.push('\n');
    out
}

fn menu_view(state: &WizardState, theme: &Theme) -> String {
    let choices: Vec<String> = ACTIONS
        .iter()
        .enumerate()
        .map(|(i, label)| checkbox(&format!("{}. {}", i + 1, label), i == state.selected_action, theme))
        .collect();

    let mut view = format!(
        "What do you plan?\n\n{}\n\nProgram quits in {} seconds\n",
        choices.join("\n"),
        state.countdown_ticks.to_string().color(theme.ticks)
    );

    if let Some(action) = state.inspected_action {
        if let Some(text) = action.checked_sub(1).and_then(|i| STUB_TEXT.get(i)) {
            view.push('\n');
            view.push_str(&text.color(theme.keyword).to_string());
            view.push('\n');
        }
    }

    view.push('\n');
    view.push_str(&help_line(
        &["j/k, up/down: select", "enter: choose", "q, esc: quit"],
        theme,
    ));
    view
}

fn checkbox(label: &str, checked: bool, theme: &Theme) -> String {
    if checked {
        format!("[x] {}", label).color(theme.checkbox).to_string()
    } else {
        format!("[ ] {}", label)
    }
}

fn help_line(items: &[&str], theme: &Theme) -> String {
    items
        .iter()
        .map(|item| item.color(theme.subtle).to_string())
        .collect::<Vec<_>>()
        .join(&theme.dot())
}

fn naming_view(state: &WizardState, theme: &Theme) -> String {
    let input = if state.project_name_input.is_empty() {
        "project name".color(theme.subtle).to_string()
    } else {
        state.project_name_input.clone()
    };

    let mut view = format!(
        "Project name? Use `-` or `_` as separator.\n\n> {}█\n",
        input
    );
    if let Some(error) = &state.input_error {
        view.push('\n');
        view.push_str(&error.color(theme.error).to_string());
        view.push('\n');
    }
    view.push('\n');
    view.push_str(&help_line(&["enter: create", "esc: quit"], theme));
    view
}

fn project_name(state: &WizardState) -> &str {
    state.project.as_ref().map(|p| p.name.as_str()).unwrap_or("")
}

fn provisioning_view(state: &WizardState, theme: &Theme) -> String {
    let spinner = SPINNER_FRAMES[state.spinner_frame % SPINNER_FRAMES.len()].color(theme.keyword);

    if !state.animation_finished {
        return format!(
            "{} Generating {}...\n\n{}%",
            spinner,
            project_name(state).color(theme.keyword),
            theme.progress_bar(state.progress)
        );
    }

    format!(
        "{} Generating {}... waiting for dependencies\n\n{}",
        spinner,
        project_name(state).color(theme.keyword),
        help_line(&["esc: quit (generation keeps running)"], theme)
    )
}

fn done_view(state: &WizardState, theme: &Theme) -> String {
    let name = project_name(state);
    let headline = match &state.result {
        Some(result) if !result.overall_succeeded => format!(
            "Project '{}' created with {} problem(s).",
            name,
            result.problem_count()
        ),
        Some(result) if result.problem_count() > 0 => format!(
            "🎉 Project '{}' created! {} dependency fetch(es) failed.",
            name,
            result.problem_count()
        ),
        _ => format!("🎉 Project '{}' created!", name),
    };

    let mut view = format!("{}\n\n{}%\n", headline, theme.progress_bar(1.0));
    if state.countdown_ticks > 0 {
        view.push_str(&format!(
            "\nExiting in {} seconds...\n",
            state.countdown_ticks.to_string().color(theme.ticks)
        ));
    }
    view.push_str("\nSee you later!");
    view
}

fn quitting_view(state: &WizardState, theme: &Theme) -> String {
    if state.provisioning_started && !state.provisioning_done {
        return format!(
            "Stopped. '{}' is still being generated in the background.\n\nSee you later!",
            project_name(state).color(theme.keyword)
        );
    }
    if let Some(project) = &state.project {
        return format!("Project '{}' is ready.\n\nSee you later!", project.name);
    }
    "See you later!".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WizardSettings;
    use crate::generator::{ProvisioningResult, ProjectSpec};
    use crate::wizard::event::{Event, KeyInput};

    fn plain_theme() -> Theme {
        colored::control::set_override(false);
        Theme::new(10)
    }

    fn state() -> WizardState {
        WizardState::new(&WizardSettings::default(), "1.0.0")
    }

    fn press(state: &mut WizardState, key: KeyInput) {
        state.update(Event::Input(key));
    }

    fn to_provisioning(state: &mut WizardState, name: &str) {
        press(state, KeyInput::Confirm);
        for c in name.chars() {
            press(state, KeyInput::Char(c));
        }
        press(state, KeyInput::Confirm);
    }

    #[test]
    fn test_menu_highlights_selection_and_countdown() {
        let theme = plain_theme();
        let mut state = state();
        press(&mut state, KeyInput::Down);

        let out = render(&state, &theme);
        assert!(out.contains("[ ] 1. Create boilerplate"));
        assert!(out.contains("[x] 2. Add modular package"));
        assert!(out.contains("Program quits in 60 seconds"));
        assert!(out.contains("enter: choose"));
        assert!(out.lines().filter(|l| !l.is_empty()).all(|l| l.starts_with("  ")));
    }

    #[test]
    fn test_menu_shows_stub_text() {
        let theme = plain_theme();
        let mut state = state();
        press(&mut state, KeyInput::Down);
        press(&mut state, KeyInput::Down);
        press(&mut state, KeyInput::Confirm);

        assert!(render(&state, &theme).contains("actual library"));
    }

    #[test]
    fn test_naming_shows_input_and_error() {
        let theme = plain_theme();
        let mut state = state();
        press(&mut state, KeyInput::Confirm);
        assert!(render(&state, &theme).contains("> project name█"));

        for c in "bad name".chars() {
            press(&mut state, KeyInput::Char(c));
        }
        press(&mut state, KeyInput::Confirm);
        let out = render(&state, &theme);
        assert!(out.contains("> bad name█"));
        assert!(out.contains("not allowed"));
    }

    #[test]
    fn test_provisioning_shows_progress_bar() {
        let theme = plain_theme();
        let mut state = state();
        to_provisioning(&mut state, "demo-app");

        let out = render(&state, &theme);
        assert!(out.contains("Generating demo-app..."));
        assert!(out.contains("░░░░░░░░░░   0%"));
    }

    #[test]
    fn test_provisioning_waits_after_animation() {
        let theme = plain_theme();
        let mut state = state();
        to_provisioning(&mut state, "demo-app");
        while state.progress() < 1.0 {
            state.update(Event::AnimationFrame);
        }

        let out = render(&state, &theme);
        assert!(out.contains("waiting for dependencies"));
        assert!(!out.contains('░'));
    }

    #[test]
    fn test_done_interpolates_project_name() {
        let theme = plain_theme();
        let mut state = state();
        to_provisioning(&mut state, "demo-app");
        while state.progress() < 1.0 {
            state.update(Event::AnimationFrame);
        }
        let mut result = ProvisioningResult::default();
        result.overall_succeeded = true;
        state.update(Event::ProvisioningComplete(result));

        let out = render(&state, &theme);
        assert!(out.contains("🎉 Project 'demo-app' created!"));
        assert!(out.contains("Exiting in 5 seconds..."));
        assert!(out.contains("██████████ 100%"));
    }

    #[test]
    fn test_done_reports_failures() {
        let theme = plain_theme();
        let mut state = state();
        to_provisioning(&mut state, "demo-app");
        while state.progress() < 1.0 {
            state.update(Event::AnimationFrame);
        }
        let mut result = ProvisioningResult::default();
        result.file_errors.push((
            "demo-app/main.go".into(),
            crate::error::ProvisionError::InputValidation("x".to_string()),
        ));
        state.update(Event::ProvisioningComplete(result));

        assert!(render(&state, &theme).contains("created with 1 problem(s)"));
    }

    #[test]
    fn test_waiting_view_names_project_and_exit_key() {
        let theme = plain_theme();
        let out = render_waiting("demo-app", SPINNER_FRAMES.len() + 1, &theme);

        assert!(out.contains("⣽ Waiting for 'demo-app' to finish generating..."));
        assert!(out.contains("esc: stop waiting"));
        assert!(out.lines().filter(|l| !l.is_empty()).all(|l| l.starts_with("  ")));
    }

    #[test]
    fn test_quitting_messages() {
        let theme = plain_theme();

        let mut idle = state();
        press(&mut idle, KeyInput::Quit);
        assert!(render(&idle, &theme).contains("See you later!"));

        let mut busy = state();
        to_provisioning(&mut busy, "demo-app");
        press(&mut busy, KeyInput::Quit);
        assert!(render(&busy, &theme).contains("'demo-app' is still being generated"));

        assert_eq!(
            busy.project(),
            Some(&ProjectSpec::new("demo-app", "1.0.0").unwrap())
        );
    }
}
