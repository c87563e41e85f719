//! # next-subnet Local Record Source
//!
//! File: cli/src/subnet/record.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Reads the local subnet record, a CSV file with a header row, and yields
//! at most one candidate CIDR string per data row. The file is optional: a
//! missing file simply contributes nothing.
//!
//! ## Column Selection
//!
//! For each row the first match wins:
//! 1. the `SubnetCIDR` column, if its value is non-empty
//! 2. the `CIDR` column, if its value is non-empty
//! 3. the first field (in column order) containing a `/`
//!
//! Column names are matched exactly. When a name appears more than once in
//! the header, the last such column is used. The chosen value is returned
//! as-is; a value that later fails to parse is dropped by the collector and
//! does not fall through to the next rule.
//!
//! ## Tolerance
//!
//! NUL bytes are stripped before parsing. Rows shorter or longer than the
//! header are accepted (fields past the header width are ignored). Fields are
//! decoded lossily, so invalid UTF-8 in one field (say a Latin-1 name) never
//! hides the CIDR in the same row. A file that exists but cannot be
//! read at all is reported as a warning and treated as empty.
//!
use crate::common::fs::io;
use crate::core::error::Result;
use anyhow::Context;
use csv::{ReaderBuilder, StringRecord};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const SUBNET_CIDR_COLUMN: &str = "SubnetCIDR";
const CIDR_COLUMN: &str = "CIDR";

/// A CSV file listing subnets that are already in use.
#[derive(Debug, Clone)]
pub struct RecordSource {
    path: PathBuf,
}

impl RecordSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Candidate CIDR strings from the record. Never fails.
    pub fn read_candidates(&self) -> Vec<String> {
        match self.try_read_candidates() {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(
                    "Could not read subnet record {} ({:#}); continuing without it.",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    fn try_read_candidates(&self) -> Result<Vec<String>> {
        let Some(raw) = io::read_optional_file(&self.path)? else {
            info!(
                "Subnet record {} not found; no local ranges.",
                self.path.display()
            );
            return Ok(Vec::new());
        };
        let clean = io::strip_nul_bytes(&raw);
        let candidates = candidates_from_csv(&clean)?;
        info!(
            "Read {} candidate range(s) from {}",
            candidates.len(),
            self.path.display()
        );
        Ok(candidates)
    }
}

/// Positions of the recognised columns in the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RecordColumns {
    subnet_cidr: Option<usize>,
    cidr: Option<usize>,
    width: usize,
}

impl RecordColumns {
    fn locate(headers: &StringRecord) -> Self {
        Self {
            subnet_cidr: last_position(headers, SUBNET_CIDR_COLUMN),
            cidr: last_position(headers, CIDR_COLUMN),
            width: headers.len(),
        }
    }

    fn pick<'r>(&self, record: &'r StringRecord) -> Option<&'r str> {
        let named = |column: Option<usize>| {
            column
                .and_then(|i| record.get(i))
                .filter(|value| !value.is_empty())
        };
        named(self.subnet_cidr)
            .or_else(|| named(self.cidr))
            .or_else(|| record.iter().take(self.width).find(|v| v.contains('/')))
    }
}

fn last_position(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .enumerate()
        .filter(|(_, h)| *h == name)
        .map(|(i, _)| i)
        .last()
}

/// Extracts one candidate per data row from CSV bytes.
///
/// # Errors
///
/// Fails only when the header row itself cannot be read.
pub fn candidates_from_csv(data: &[u8]) -> Result<Vec<String>> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(data);
    let headers = StringRecord::from_byte_record_lossy(
        reader
            .byte_headers()
            .context("Failed to read CSV header row")?
            .clone(),
    );
    let columns = RecordColumns::locate(&headers);
    debug!("Record header {:?} -> {:?}", headers, columns);

    let mut candidates = Vec::new();
    for (index, row) in reader.byte_records().enumerate() {
        match row {
            Ok(raw) => {
                let record = StringRecord::from_byte_record_lossy(raw);
                if let Some(value) = columns.pick(&record) {
                    candidates.push(value.to_string());
                }
            }
            Err(e) => debug!("Skipping unreadable record row {}: {}", index + 1, e),
        }
    }
    Ok(candidates)
}
