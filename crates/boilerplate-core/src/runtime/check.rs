//! Toolchain detection

use crate::runtime::command::CommandSpec;
use std::process::Command;

/// Runtime detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: String,
    pub version: Option<String>,
    pub available: bool,
}

impl RuntimeInfo {
    fn missing(name: &str) -> Self {
        Self {
            name: name.to_string(),
            version: None,
            available: false,
        }
    }
}

/// Check whether the toolchain answers its version command
///
/// `version_command` is something like `go version`; its first line of stdout becomes
/// the reported version.
pub fn check_toolchain(name: &str, version_command: &CommandSpec) -> RuntimeInfo {
    let output = Command::new(&version_command.program).args(&version_command.args).output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout)
                .lines()
                .next()
                .map(|line| line.trim().to_string())
                .filter(|line| !line.is_empty());
            RuntimeInfo {
                name: name.to_string(),
                version,
                available: true,
            }
        }
        _ => RuntimeInfo::missing(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_toolchain() {
        let command = CommandSpec::new("definitely-not-a-real-binary-xyz", ["version"]);
        let info = check_toolchain("Nothing", &command);
        assert!(!info.available);
        assert!(info.version.is_none());
        assert_eq!(info.name, "Nothing");
    }

    #[cfg(unix)]
    #[test]
    fn test_available_toolchain_reports_first_line() {
        let command = CommandSpec::new("sh", ["-c", "echo 'go version go1.22.1 linux/amd64'; echo extra"]);
        let info = check_toolchain("Go", &command);
        assert!(info.available);
        assert_eq!(info.version.as_deref(), Some("go version go1.22.1 linux/amd64"));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_version_command_is_unavailable() {
        let command = CommandSpec::new("sh", ["-c", "exit 1"]);
        assert!(!check_toolchain("Go", &command).available);
    }
}
