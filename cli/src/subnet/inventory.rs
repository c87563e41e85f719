//! # next-subnet Cloud Inventory Source
//!
//! File: cli/src/subnet/inventory.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Lists the subnets that already exist in a GCP project and region by
//! running
//!
//! ```bash
//! gcloud compute networks subnets list --project <P> --regions <R> --format=json
//! ```
//!
//! and returns the `ipCidrRange` of every record as a candidate used range.
//!
//! ## Failure Policy
//!
//! The lookup is best-effort. Any failure (gcloud missing, non-zero exit,
//! timeout, output that is not a JSON array) is logged as a warning and the
//! source contributes nothing, so allocation still runs on the local record.
//! Individual records that are not objects, or whose `ipCidrRange` is missing
//! or not a string, are skipped while the rest of the list is kept.
//!
use crate::common::process;
use crate::core::error::{Result, SubnetError};
use anyhow::anyhow;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

/// One element of the `gcloud ... --format=json` array. Other fields are ignored.
#[derive(Deserialize, Debug)]
struct SubnetRecord {
    #[serde(rename = "ipCidrRange")]
    ip_cidr_range: Option<String>,
}

/// The remote subnet listing for one project and region.
#[derive(Debug, Clone)]
pub struct InventorySource {
    command: String,
    project: String,
    region: String,
    timeout: Duration,
}

impl InventorySource {
    pub fn new(
        command: impl Into<String>,
        project: impl Into<String>,
        region: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            command: command.into(),
            project: project.into(),
            region: region.into(),
            timeout,
        }
    }

    fn args(&self) -> [&str; 9] {
        [
            "compute",
            "networks",
            "subnets",
            "list",
            "--project",
            self.project.as_str(),
            "--regions",
            self.region.as_str(),
            "--format=json",
        ]
    }

    /// Candidate CIDR strings from the live inventory. Never fails.
    pub async fn fetch_candidates(&self) -> Vec<String> {
        match self.try_fetch_candidates().await {
            Ok(candidates) => {
                info!(
                    "Fetched {} candidate range(s) from project '{}' region '{}'",
                    candidates.len(),
                    self.project,
                    self.region
                );
                candidates
            }
            Err(e) => {
                report_failure(&e);
                Vec::new()
            }
        }
    }

    async fn try_fetch_candidates(&self) -> Result<Vec<String>> {
        let output = process::run_command_capture(&self.command, &self.args(), self.timeout).await?;
        if !output.stderr.trim().is_empty() {
            debug!("gcloud stderr: {}", output.stderr.trim());
        }
        parse_subnet_list(&output.stdout)
    }
}

fn report_failure(err: &anyhow::Error) {
    match err.downcast_ref::<SubnetError>() {
        Some(SubnetError::ExternalCommand { output, .. }) => {
            warn!("gcloud returned error: {}", output.trim())
        }
        Some(SubnetError::CommandNotFound { .. }) => {
            warn!("gcloud binary not found; skipping GCP lookup.")
        }
        _ => warn!("could not fetch GCP subnets ({:#})", err),
    }
}

/// Extracts the `ipCidrRange` values from a gcloud JSON subnet list.
///
/// # Errors
///
/// Fails when `json` is not a JSON array.
pub fn parse_subnet_list(json: &str) -> Result<Vec<String>> {
    let records: Vec<serde_json::Value> = serde_json::from_str(json).map_err(|e| {
        anyhow!(SubnetError::Inventory(format!(
            "expected a JSON array of subnets: {}",
            e
        )))
    })?;

    let ranges = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            match serde_json::from_value::<SubnetRecord>(value) {
                Ok(record) => record.ip_cidr_range,
                Err(e) => {
                    debug!("Skipping inventory record {}: {}", index, e);
                    None
                }
            }
        })
        .collect();
    Ok(ranges)
}
