//! # next-subnet Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module aggregates the infrastructure shared by the rest of the
//! application:
//! - `config`: Optional TOML configuration for the remote inventory lookup
//! - `error`: Error types and the `Result` alias
//!
//! ## Usage
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{SubnetError, Result}; // For error handling
//! ```
//!
pub mod config;
pub mod error;
