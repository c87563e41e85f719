//! # next-subnet Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Filesystem helpers used by the local record source.
//!
//! - **`io`**: Reading files that may be absent (`read_optional_file`) and
//!   cleaning raw bytes before parsing (`strip_nul_bytes`).
//!

/// Contains basic file I/O operations (e.g., `read_optional_file`, `strip_nul_bytes`).
pub mod io;
