//! External renderer invocation

use std::process::{Command, Stdio};

use crate::command::RenderCommand;
use crate::error::{PlayblastError, Result};

/// Captured result of a finished renderer process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOutcome {
    /// Exit code; `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    /// Everything written to stdout
    pub stdout: Vec<u8>,
    /// Everything written to stderr
    pub stderr: Vec<u8>,
}

impl RenderOutcome {
    /// Whether the renderer exited with code 0
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Exit code this tool should report: the renderer's own code (0 on
    /// success), or 1 if it was killed before exiting
    pub fn propagated_code(&self) -> i32 {
        self.exit_code.unwrap_or(1)
    }
}

/// Runs a render command to completion
pub trait CommandRunner {
    /// Execute `command` and wait for it to finish
    fn run(&self, command: &RenderCommand) -> Result<RenderOutcome>;
}

/// Runs commands through a POSIX shell (`<shell> -c <command>`)
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: String,
}

impl ShellRunner {
    /// Runner using the given shell executable
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new("sh")
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &RenderCommand) -> Result<RenderOutcome> {
        log::debug!("Running via {}: {}", self.shell, command);

        let output = Command::new(&self.shell)
            .arg("-c")
            .arg(command.as_str())
            .stdin(Stdio::null())
            .output()
            .map_err(PlayblastError::Spawn)?;

        let outcome = RenderOutcome {
            exit_code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        };
        log::debug!("Renderer exited with {:?}", outcome.exit_code);
        Ok(outcome)
    }
}
