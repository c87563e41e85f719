//! # next-subnet Process Execution Utilities (`common::process`)
//!
//! File: cli/src/common/process.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Runs an external command to completion and captures its output, giving up
//! after a fixed time. next-subnet uses it for the `gcloud` inventory query.
//!
//! ## Architecture
//!
//! `run_command_capture` spawns the program through `tokio::process::Command`
//! with stdout/stderr piped and stdin closed, then waits under
//! `tokio::time::timeout`. The child is spawned with `kill_on_drop(true)`, so
//! when the timeout fires and the wait future is dropped the child is killed.
//!
//! Failures map onto `SubnetError`:
//! - executable missing → `CommandNotFound`
//! - timeout elapsed → `CommandTimeout`
//! - non-zero exit → `ExternalCommand` carrying the captured output
//! - any other spawn/wait error → the I/O error with context
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::process;
//! use std::time::Duration;
//!
//! # async fn run_example() -> Result<()> {
//! let out = process::run_command_capture("git", &["status"], Duration::from_secs(5)).await?;
//! println!("{}", out.stdout);
//! # Ok(())
//! # }
//! ```
//!
use crate::core::error::{Result, SubnetError};
use anyhow::{anyhow, Context};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Output of a command that exited successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Runs `program` with `args`, waiting at most `timeout` for it to exit.
///
/// # Errors
///
/// See the module documentation for how failures are classified.
pub async fn run_command_capture(
    program: &str,
    args: &[&str],
    timeout: Duration,
) -> Result<CommandOutput> {
    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    debug!("Running: {} {} (timeout {:?})", program, args.join(" "), timeout);

    let child = match command.spawn() {
        Ok(child) => child,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("Command '{}' not found (ErrorKind::NotFound).", program);
            return Err(anyhow!(SubnetError::CommandNotFound {
                cmd: program.to_string(),
            }));
        }
        Err(e) => {
            return Err(anyhow::Error::new(e)
                .context(format!("Failed to execute command '{}'", program)));
        }
    };

    let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(result) => {
            result.with_context(|| format!("Failed to collect output of '{}'", program))?
        }
        Err(_) => {
            return Err(anyhow!(SubnetError::CommandTimeout {
                cmd: program.to_string(),
                secs: timeout.as_secs(),
            }));
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !output.status.success() {
        let exit_code = output
            .status
            .code()
            .map_or("?".to_string(), |c| c.to_string());
        // Callers decide how loud this is; the gcloud lookup only warns.
        debug!(
            "Command '{} {:?}' failed with exit code {}",
            program, args, exit_code
        );
        // gcloud reports problems on stderr; fall back to stdout for tools that don't.
        let detail = if stderr.trim().is_empty() { stdout } else { stderr };
        return Err(anyhow!(SubnetError::ExternalCommand {
            cmd: format!("{} {}", program, args.join(" ")),
            status: exit_code,
            output: detail,
        }));
    }

    debug!("Command '{}' produced {} bytes of stdout", program, stdout.len());
    Ok(CommandOutput { stdout, stderr })
}
