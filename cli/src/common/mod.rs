//! # next-subnet Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared helpers that are not specific to allocation logic, kept apart from
//! the domain code in `subnet::` and the infrastructure in `core::`.
//!
//! - **`fs`**: Reading optional files and sanitizing raw bytes.
//! - **`network`**: Parsing address and network text.
//! - **`process`**: Running an external command with captured output and a timeout.
//!

/// Utilities for filesystem reads.
pub mod fs;
/// Utilities for address and network parsing.
pub mod network;
/// Utilities for executing external processes.
pub mod process;
