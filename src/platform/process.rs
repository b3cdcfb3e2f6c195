//! External process invocation for vendor tools.

use std::process::Command;

use crate::error::{Result, TelemetryError};

/// Runs command-line tools.
///
/// Calls block until the child exits; no timeout is applied.
pub trait CommandRunner: Send + Sync {
    /// Run `program` and report whether it exited successfully.
    ///
    /// A program that cannot be spawned counts as unsuccessful.
    fn succeeds(&self, program: &str, args: &[&str]) -> bool;

    /// Run `program` and capture stdout. Spawn failures and non-zero exits are errors.
    fn stdout(&self, program: &str, args: &[&str]) -> Result<String>;
}

/// [`CommandRunner`] backed by [`std::process::Command`]
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn succeeds(&self, program: &str, args: &[&str]) -> bool {
        match Command::new(program).args(args).output() {
            Ok(output) => output.status.success(),
            Err(e) => {
                log::debug!("Failed to run {}: {}", program, e);
                false
            }
        }
    }

    fn stdout(&self, program: &str, args: &[&str]) -> Result<String> {
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| TelemetryError::process(format!("failed to run {}: {}", program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TelemetryError::process(format!(
                "{} exited with {}: {}",
                program,
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
