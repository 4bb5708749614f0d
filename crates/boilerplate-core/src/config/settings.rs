//! Timing and limit settings, optionally loaded from YAML

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Settings for timers and limits used by the wizard and the generator
///
/// Every field has a default, so a settings file only lists what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardSettings {
    /// Seconds the menu waits for input before quitting
    pub idle_countdown_secs: u32,

    /// Seconds the final screen stays up after the progress bar completes
    pub exit_countdown_secs: u32,

    /// Animation frames per second while provisioning
    pub frame_rate: u32,

    /// Frames until the progress bar reaches 100%
    pub frames_to_complete: u32,

    /// Spinner frame interval
    pub spinner_interval_ms: u64,

    /// Maximum characters accepted for the project name
    pub name_char_limit: usize,

    /// Limit for each external command
    pub command_timeout_secs: u64,

    /// How long to wait for an in-flight provisioning task after quitting
    pub shutdown_grace_secs: u64,
}

impl Default for WizardSettings {
    fn default() -> Self {
        Self {
            idle_countdown_secs: 60,
            exit_countdown_secs: 5,
            frame_rate: 60,
            frames_to_complete: 100,
            spinner_interval_ms: 100,
            name_char_limit: 156,
            command_timeout_secs: 120,
            shutdown_grace_secs: 30,
        }
    }
}

impl WizardSettings {
    /// Load settings from a YAML file and validate them
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|e| match e {
            SettingsError::Parse { source, .. } => SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Parse and validate settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, SettingsError> {
        let settings: WizardSettings =
            serde_yaml::from_str(content).map_err(|source| SettingsError::Parse {
                path: PathBuf::new(),
                source,
            })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.idle_countdown_secs == 0 {
            return Err(SettingsError::Invalid {
                field: "idle_countdown_secs",
                reason: "must be positive".to_string(),
            });
        }
        if self.frame_rate == 0 || self.frame_rate > 240 {
            return Err(SettingsError::Invalid {
                field: "frame_rate",
                reason: format!("must be between 1 and 240, got {}", self.frame_rate),
            });
        }
        if self.frames_to_complete == 0 {
            return Err(SettingsError::Invalid {
                field: "frames_to_complete",
                reason: "must be positive".to_string(),
            });
        }
        if self.name_char_limit == 0 {
            return Err(SettingsError::Invalid {
                field: "name_char_limit",
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }

    pub fn countdown_interval(&self) -> Duration {
        Duration::from_secs(1)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate.max(1)
    }

    pub fn spinner_interval(&self) -> Duration {
        Duration::from_millis(self.spinner_interval_ms.max(1))
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}

/// Pick the template directory
///
/// Order: explicit flag, environment variable, `templates/<subdir>` next to
/// the executable, `templates/<subdir>` in the working directory. The last
/// candidate is returned even when it does not exist so the caller can
/// report it.
pub fn resolve_template_dir(
    flag: Option<&Path>,
    env_var: &str,
    subdir: &str,
) -> PathBuf {
    if let Some(dir) = flag {
        return dir.to_path_buf();
    }

    if let Ok(dir) = std::env::var(env_var) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }

    let beside_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.join("templates").join(subdir)));
    if let Some(dir) = beside_exe {
        if dir.is_dir() {
            return dir;
        }
    }

    PathBuf::from("templates").join(subdir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let settings = WizardSettings::from_yaml("idle_countdown_secs: 10\nframe_rate: 30\n").unwrap();
        assert_eq!(settings.idle_countdown_secs, 10);
        assert_eq!(settings.frame_rate, 30);
        assert_eq!(settings.exit_countdown_secs, 5);
        assert_eq!(settings.name_char_limit, 156);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(WizardSettings::from_yaml("{}").unwrap(), WizardSettings::default());
    }

    #[test]
    fn test_unknown_types_fail_to_parse() {
        assert!(matches!(
            WizardSettings::from_yaml("frame_rate: fast"),
            Err(SettingsError::Parse { .. })
        ));
    }

    #[test]
    fn test_zero_frame_rate_is_invalid() {
        assert!(matches!(
            WizardSettings::from_yaml("frame_rate: 0"),
            Err(SettingsError::Invalid { field: "frame_rate", .. })
        ));
    }

    #[test]
    fn test_frame_interval() {
        let settings = WizardSettings::default();
        assert_eq!(settings.frame_interval(), Duration::from_secs(1) / 60);
        assert_eq!(settings.spinner_interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wizard.yaml");
        std::fs::write(&path, "exit_countdown_secs: [1]").unwrap();

        match WizardSettings::load(&path) {
            Err(SettingsError::Parse { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_template_dir_flag_wins() {
        let dir = resolve_template_dir(
            Some(Path::new("/custom/templates")),
            "BOILERPLATE_TEST_UNSET_VAR",
            "go-service",
        );
        assert_eq!(dir, PathBuf::from("/custom/templates"));
    }

    #[test]
    fn test_template_dir_falls_back_to_working_directory() {
        let dir = resolve_template_dir(None, "BOILERPLATE_TEST_UNSET_VAR", "no-such-flavour");
        assert_eq!(dir, PathBuf::from("templates/no-such-flavour"));
    }
}
