//! Process execution behind a narrow capability trait.
//!
//! The formatting pipeline talks to the external formatter exclusively
//! through [`FormatterRunner`]: command plus argument list in, exit status
//! and captured streams out. Tests substitute a fake; the real
//! implementation runs the process with piped stdio, buffering both output
//! streams to completion.

use async_trait::async_trait;
use std::io;
use std::io::Write as _;
use std::process::Stdio;
use thiserror::Error;
use tokio::io::AsyncWriteExt as _;

/// A resolved formatter command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Executable path or name.
    pub command: String,
    /// Arguments, e.g. parser mode and print width.
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }

    /// The command line as one displayable string, for error reporting.
    pub fn display(&self) -> String {
        let mut line = self.command.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Captured result of a finished formatter process.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    /// Exit code; -1 when the process was terminated by a signal.
    pub status: i32,
    /// Full standard output.
    pub stdout: String,
    /// Full standard error.
    pub stderr: String,
}

impl ProcessOutput {
    /// Whether the process signalled success and produced usable output.
    pub fn is_success(&self) -> bool {
        self.status == 0 && !self.stdout.trim().is_empty()
    }
}

/// Failures at the process boundary.
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("failed to spawn '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("i/o error while running '{command}': {source}")]
    Io {
        command: String,
        #[source]
        source: io::Error,
    },
}

/// Narrow capability for running the external formatter.
///
/// `run` executes to completion; cancellation happens by dropping the
/// returned future, which must terminate the underlying process.
/// `run_blocking` is the synchronous path and carries no deadline of its
/// own.
#[async_trait]
pub trait FormatterRunner: Send + Sync {
    async fn run(&self, invocation: &Invocation, input: &str)
        -> Result<ProcessOutput, RunnerError>;

    fn run_blocking(
        &self,
        invocation: &Invocation,
        input: &str,
    ) -> Result<ProcessOutput, RunnerError>;
}

/// The real runner, backed by `tokio::process` / `std::process`.
#[derive(Debug, Default)]
pub struct ProcessRunner;

#[async_trait]
impl FormatterRunner for ProcessRunner {
    async fn run(
        &self,
        invocation: &Invocation,
        input: &str,
    ) -> Result<ProcessOutput, RunnerError> {
        let mut child = tokio::process::Command::new(&invocation.command)
            .args(&invocation.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| RunnerError::Spawn {
                command: invocation.command.clone(),
                source,
            })?;

        let io_err = |source| RunnerError::Io {
            command: invocation.command.clone(),
            source,
        };

        // Feed stdin concurrently with draining the output streams so a
        // formatter that starts writing before consuming all input cannot
        // deadlock against a full pipe.
        let mut stdin = child.stdin.take();
        let write = async {
            if let Some(pipe) = stdin.as_mut() {
                pipe.write_all(input.as_bytes()).await?;
                pipe.shutdown().await?;
            }
            drop(stdin.take());
            Ok::<(), io::Error>(())
        };
        let (written, output) = tokio::join!(write, child.wait_with_output());
        written.map_err(io_err)?;
        let output = output.map_err(io_err)?;

        Ok(ProcessOutput {
            status: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn run_blocking(
        &self,
        invocation: &Invocation,
        input: &str,
    ) -> Result<ProcessOutput, RunnerError> {
        let mut child = std::process::Command::new(&invocation.command)
            .args(&invocation.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| RunnerError::Spawn {
                command: invocation.command.clone(),
                source,
            })?;

        let io_err = |source| RunnerError::Io {
            command: invocation.command.clone(),
            source,
        };

        if let Some(mut pipe) = child.stdin.take() {
            pipe.write_all(input.as_bytes()).map_err(io_err)?;
            // dropping the pipe closes it, signalling end of input
        }
        let output = child.wait_with_output().map_err(io_err)?;

        Ok(ProcessOutput {
            status: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
