//! # next-subnet Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module centralizes the filesystem reads next-subnet performs. The tool
//! never writes to disk; it only reads the local subnet record, which may
//! legitimately be missing.
//!
//! ## Architecture
//!
//! - **`read_optional_file`**: Reads a whole file as bytes, returning `Ok(None)`
//!   when nothing exists at the path. Any other I/O failure is an error with
//!   context naming the file.
//! - **`strip_nul_bytes`**: Removes embedded NUL bytes. Spreadsheet exports
//!   sometimes contain them, and they break CSV row splitting.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::io;
//!
//! if let Some(raw) = io::read_optional_file(Path::new("subnets.csv"))? {
//!     let clean = io::strip_nul_bytes(&raw);
//!     // hand `clean` to the CSV reader
//! }
//! ```
//!
use crate::core::error::Result;
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Reads the entire content of a file, or `None` if the file does not exist.
///
/// # Errors
///
/// Returns an `Err` if the path exists but cannot be read (e.g. permissions,
/// or the path is a directory), with context indicating which file failed.
pub fn read_optional_file(path: &Path) -> Result<Option<Vec<u8>>> {
    if !path.exists() {
        debug!("File not found, treating as empty: {:?}", path);
        return Ok(None);
    }
    let bytes = fs::read(path).with_context(|| format!("Failed to read file {:?}", path))?;
    debug!("Read {} bytes from {:?}", bytes.len(), path);
    Ok(Some(bytes))
}

/// Returns a copy of `bytes` with every NUL byte removed.
pub fn strip_nul_bytes(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().copied().filter(|&b| b != 0).collect()
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_optional_file_missing() -> Result<()> {
        let base_dir = tempdir()?;
        let missing = base_dir.path().join("nonexistent.csv");
        assert!(read_optional_file(&missing)?.is_none());
        Ok(())
    }

    #[test]
    fn test_read_optional_file_present() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("subnets.csv");
        fs::write(&file_path, "CIDR\n10.0.0.0/24\n")?;
        let content = read_optional_file(&file_path)?;
        assert_eq!(content.as_deref(), Some(&b"CIDR\n10.0.0.0/24\n"[..]));
        Ok(())
    }

    #[test]
    fn test_read_optional_file_directory_is_error() -> Result<()> {
        let base_dir = tempdir()?;
        let result = read_optional_file(base_dir.path());
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Failed to read file"));
        Ok(())
    }

    #[test]
    fn test_strip_nul_bytes() {
        assert_eq!(strip_nul_bytes(b"10.0\0.0.0/\x0024"), b"10.0.0.0/24".to_vec());
        assert_eq!(strip_nul_bytes(b"\0\0"), Vec::<u8>::new());
        assert_eq!(strip_nul_bytes(b"CIDR"), b"CIDR".to_vec());
    }
}
