//! External command execution seam.
//!
//! All process invocations (listing running apps, quitting an app) go through
//! the [`Executor`] trait so the orchestration logic can be exercised in tests
//! with a scripted fake. [`OsExecutor`] is the only real implementation.

use std::io;
use std::process::Command;

use log::debug;

/// Outcome of running an external command.
///
/// Spawn failures are surfaced as `io::Error` by [`Executor::run`]; a command
/// that spawned but exited non-zero comes back as `success: false` with its
/// combined output intact so callers can inspect it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutput {
    /// Whether the command exited with status 0.
    pub success: bool,
    /// Combined stdout and stderr, lossily decoded.
    pub output: String,
}

impl ExecOutput {
    /// Trimmed combined output, for error messages.
    pub fn trimmed(&self) -> &str {
        self.output.trim()
    }
}

/// Abstract capability to run an external command and capture its output.
pub trait Executor {
    fn run(&self, program: &str, args: &[&str]) -> io::Result<ExecOutput>;
}

/// Real executor backed by `std::process::Command`.
///
/// Calls are blocking and have no timeout; a hung external tool blocks the
/// whole run. Acceptable for a short-lived CLI invocation.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsExecutor;

impl Executor for OsExecutor {
    fn run(&self, program: &str, args: &[&str]) -> io::Result<ExecOutput> {
        debug!("executing: {} {:?}", program, args);
        let output = Command::new(program).args(args).output()?;

        let mut combined = String::from_utf8_lossy(&output.stdout).to_string();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(ExecOutput {
            success: output.status.success(),
            output: combined,
        })
    }
}
