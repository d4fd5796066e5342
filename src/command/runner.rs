//! One-shot execution of external tools.

use crate::command::builder::CommandSpec;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

/// A tool run that did not succeed, as reported back to the client.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("`{cmd}` failed: {stderr}")]
pub struct CommandFailure {
    pub cmd: String,
    pub stdout: String,
    pub stderr: String,
}

/// Spawns each command exactly once, without retries.
#[derive(Debug, Clone, Default)]
pub struct ToolRunner {
    /// `None` waits for the tool indefinitely.
    timeout: Option<Duration>,
}

impl ToolRunner {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    /// Run `spec` and return its stdout.
    ///
    /// Launch errors, non-zero exits and timeouts all become a
    /// [`CommandFailure`] carrying the rendered command line.
    pub async fn run(&self, spec: &CommandSpec) -> Result<String, CommandFailure> {
        let cmd = spec.to_string();
        tracing::info!(tool = spec.tool, %cmd, "Running tool");

        let child = Command::new(&spec.program)
            .args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output();

        let result = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, child).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!(tool = spec.tool, timeout = ?limit, "Tool timed out");
                    return Err(CommandFailure {
                        cmd,
                        stdout: String::new(),
                        stderr: format!("timed out after {:?}", limit),
                    });
                }
            },
            None => child.await,
        };

        let output = match result {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!(tool = spec.tool, error = %e, "Failed to launch tool");
                return Err(CommandFailure {
                    cmd,
                    stdout: String::new(),
                    stderr: format!("failed to launch {}: {}", spec.tool, e),
                });
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if output.status.success() {
            return Ok(stdout);
        }

        tracing::debug!(tool = spec.tool, status = %output.status, "Tool reported failure");
        Err(CommandFailure {
            cmd,
            stdout,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::command::builder::OutputTarget;
    use std::path::PathBuf;

    fn sh(script: &str) -> CommandSpec {
        CommandSpec {
            tool: "sh",
            program: PathBuf::from("/bin/sh"),
            args: vec!["-c".to_string(), script.to_string()],
            output: OutputTarget::Stdout,
        }
    }

    #[tokio::test]
    async fn test_success_returns_stdout() {
        let out = ToolRunner::default().run(&sh("echo hello")).await.unwrap();
        assert_eq!(out, "hello\n");
    }

    #[tokio::test]
    async fn test_nonzero_exit_reports_streams() {
        let err = ToolRunner::default()
            .run(&sh("echo partial; echo broken >&2; exit 3"))
            .await
            .unwrap_err();
        assert_eq!(err.stdout, "partial\n");
        assert_eq!(err.stderr, "broken\n");
        assert!(err.cmd.starts_with("/bin/sh -c"));
    }

    #[tokio::test]
    async fn test_missing_program_is_failure() {
        let spec = CommandSpec {
            tool: "ghost",
            program: PathBuf::from("/nonexistent/ghost-tool"),
            args: vec![],
            output: OutputTarget::Stdout,
        };
        let err = ToolRunner::default().run(&spec).await.unwrap_err();
        assert_eq!(err.cmd, "/nonexistent/ghost-tool");
        assert!(err.stderr.contains("failed to launch ghost"));
    }

    #[tokio::test]
    async fn test_timeout_is_failure() {
        let runner = ToolRunner::new(Some(Duration::from_millis(100)));
        let err = runner.run(&sh("sleep 5")).await.unwrap_err();
        assert!(err.stderr.contains("timed out"));
    }
}
