//! # next-subnet Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module defines the error types used throughout next-subnet. Errors
//! fall into two groups:
//! - **Fatal input errors** (`Config`, `InvalidBlock`, `InvalidRequest`) abort
//!   the run before any allocation is attempted. `main` reports them on stderr
//!   and exits with code 2.
//! - **Data-source errors** (`ExternalCommand`, `CommandNotFound`,
//!   `CommandTimeout`, `Inventory`) are produced while gathering used ranges.
//!   The collector downgrades them to warnings; they never reach `main`.
//!
//! ## Architecture
//!
//! - `SubnetError`: a `thiserror` enum with one variant per failure kind.
//! - `Result<T>`: an alias for `anyhow::Result<T>` so call sites can attach
//!   context with `anyhow::Context` and still downcast to `SubnetError`.
//!
//! ## Examples
//!
//! ```rust
//! // Reject a request before enumerating candidates
//! if prefix_len < parent.prefix_len() {
//!     return Err(SubnetError::InvalidRequest { prefix_len, parent: parent.to_string() })?;
//! }
//!
//! // Tell a missing executable apart from other failures
//! match err.downcast_ref::<SubnetError>() {
//!     Some(SubnetError::CommandNotFound { .. }) => warn!("gcloud binary not found"),
//!     _ => warn!("could not fetch GCP subnets ({})", err),
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for next-subnet.
#[derive(Error, Debug)]
pub enum SubnetError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid address block '{0}': expected a network such as 10.0.0.0/16 with host bits zeroed")]
    InvalidBlock(String),

    #[error("Invalid subnet request: /{prefix_len} is not a valid subnet size inside {parent}")]
    InvalidRequest { prefix_len: u8, parent: String },

    #[error("External command failed: {cmd}, Status: {status}, Output:\n{output}")]
    ExternalCommand {
        cmd: String,
        status: String,
        output: String,
    },

    #[error("External command '{cmd}' not found")]
    CommandNotFound { cmd: String },

    #[error("External command '{cmd}' timed out after {secs}s")]
    CommandTimeout { cmd: String, secs: u64 },

    #[error("Inventory output could not be read: {0}")]
    Inventory(String),
}

/// Type alias for Result using anyhow::Error.
pub type Result<T> = anyhow::Result<T>;
