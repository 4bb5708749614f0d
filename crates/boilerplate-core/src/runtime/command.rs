//! External command execution for project initialization and dependency fetching
//!
//! Commands run with their working directory set to the new project and are
//! bounded by a timeout. Output is captured rather than streamed so it never
//! interleaves with the wizard's screen.

use std::fmt;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

/// Lines of stderr kept in a failure message
const STDERR_TAIL_LINES: usize = 5;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("could not start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with code {code}{}", format_stderr(.stderr))]
    Failed {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("`{command}` timed out after {} seconds", .after.as_secs())]
    TimedOut { command: String, after: Duration },
}

fn format_stderr(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {}", stderr)
    }
}

/// A program plus arguments, e.g. `go get github.com/joho/godotenv`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Run to completion inside `dir`, failing on non-zero exit or timeout
    ///
    /// Both pipes are drained while waiting so a chatty child never blocks on
    /// a full pipe. On timeout the child is dropped and therefore killed.
    pub async fn run_in(&self, dir: &Path, limit: Duration) -> Result<(), CommandError> {
        let child = TokioCommand::new(&self.program)
            .args(&self.args)
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| CommandError::Spawn {
                command: self.to_string(),
                source,
            })?;

        match timeout(limit, child.wait_with_output()).await {
            Ok(Ok(output)) if output.status.success() => Ok(()),
            Ok(Ok(output)) => Err(CommandError::Failed {
                command: self.to_string(),
                code: output.status.code().unwrap_or(-1),
                stderr: tail(&String::from_utf8_lossy(&output.stderr), STDERR_TAIL_LINES),
            }),
            Ok(Err(source)) => Err(CommandError::Spawn {
                command: self.to_string(),
                source,
            }),
            Err(_) => Err(CommandError::TimedOut {
                command: self.to_string(),
                after: limit,
            }),
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

fn tail(text: &str, lines: usize) -> String {
    let all: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = all.len().saturating_sub(lines);
    all[start..].join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_joins_program_and_args() {
        let cmd = CommandSpec::new("go", ["get", "github.com/joho/godotenv"]);
        assert_eq!(cmd.to_string(), "go get github.com/joho/godotenv");
    }

    #[test]
    fn test_tail_keeps_last_lines() {
        assert_eq!(tail("a\nb\n\nc\nd", 2), "c | d");
        assert_eq!(tail("", 3), "");
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = CommandSpec::new("definitely-not-a-real-binary-xyz", Vec::<String>::new());
        let err = cmd.run_in(dir.path(), Duration::from_secs(5)).await.unwrap_err();
        assert!(matches!(err, CommandError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_success_runs_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = CommandSpec::new("sh", ["-c", "touch ran-here"]);
        cmd.run_in(dir.path(), Duration::from_secs(5)).await.unwrap();
        assert!(dir.path().join("ran-here").exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_captures_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = CommandSpec::new("sh", ["-c", "echo 'module not found' >&2; exit 3"]);
        match cmd.run_in(dir.path(), Duration::from_secs(5)).await {
            Err(CommandError::Failed { code, stderr, .. }) => {
                assert_eq!(code, 3);
                assert_eq!(stderr, "module not found");
            }
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_large_output_does_not_stall() {
        let dir = tempfile::tempdir().unwrap();
        // Far more than a pipe buffer on both streams
        let cmd = CommandSpec::new(
            "sh",
            ["-c", "head -c 300000 /dev/zero; head -c 300000 /dev/zero >&2"],
        );
        cmd.run_in(dir.path(), Duration::from_secs(10)).await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout_kills_command() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = CommandSpec::new("sleep", ["5"]);
        let err = cmd
            .run_in(dir.path(), Duration::from_millis(100))
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::TimedOut { .. }));
    }
}
