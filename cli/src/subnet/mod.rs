//! # next-subnet Allocation Driver
//!
//! File: cli/src/subnet/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module defines the command-line arguments of `next-subnet` and the
//! handler that turns them into an allocation.
//!
//! ## Architecture
//!
//! Data flows one way through three parts:
//! - `record` and `inventory`: the two sources of used ranges
//! - `collector`: unions them into an `ExclusionSet`
//! - `allocator`: scans the parent block for the first free subnet
//!
//! `handle_next_subnet` validates the request, loads configuration, runs
//! collection and then allocation, and hands the `Allocation` back to `main`
//! for printing. Invalid requests are rejected before any source is read.
//!
//! ## Examples
//!
//! ```bash
//! # First free /24 in 10.0.0.0/16, skipping what subnets.csv and GCP already use
//! next-subnet 10.0.0.0/16 24 subnets.csv my-project us-central1
//!
//! # Local record only
//! next-subnet --no-remote 10.0.0.0/16 24 subnets.csv my-project us-central1
//! ```
//!
use crate::common::network::cidr;
use crate::core::config::{self, ConfigOverrides};
use crate::core::error::Result;
use clap::Parser;
use ipnet::IpNet;
use std::path::PathBuf;
use tracing::{debug, info};

pub mod allocator;
pub mod collector;
pub mod inventory;
pub mod record;

use allocator::Allocation;
use inventory::InventorySource;
use record::RecordSource;

/// # Allocation Arguments (`NextSubnetArgs`)
///
/// Five required positionals, in the order the tool has always taken them,
/// plus optional flags for the remote lookup.
#[derive(Parser, Debug)]
pub struct NextSubnetArgs {
    /// Parent address block to allocate from (e.g. 10.0.0.0/16).
    #[arg(value_name = "BLOCK", value_parser = cidr::parse_block_arg)]
    pub block: IpNet,

    /// Prefix length of the subnet to allocate (e.g. 24).
    #[arg(value_name = "PREFIX_LEN")]
    pub prefix_len: u8,

    /// CSV record of subnets already in use (may be absent).
    #[arg(value_name = "RECORD_CSV")]
    pub record_csv: PathBuf,

    /// GCP project whose subnets are already in use.
    #[arg(value_name = "PROJECT")]
    pub project: String,

    /// GCP region to list subnets in.
    #[arg(value_name = "REGION")]
    pub region: String,

    /// Extra positional arguments are accepted and ignored.
    #[arg(hide = true, value_name = "IGNORED")]
    pub extra: Vec<String>,

    /// Configuration file to load instead of the per-user one.
    #[arg(long, env = "NEXT_SUBNET_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// gcloud executable used for the inventory lookup.
    #[arg(long = "gcloud", env = "NEXT_SUBNET_GCLOUD", value_name = "PATH")]
    pub gcloud: Option<String>,

    /// Seconds to wait for the inventory lookup before giving up.
    #[arg(long, env = "NEXT_SUBNET_TIMEOUT_SECS", value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Skip the inventory lookup and use the local record only.
    #[arg(long)]
    pub no_remote: bool,
}

impl NextSubnetArgs {
    fn config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            config_path: self.config.clone(),
            inventory_command: self.gcloud.clone(),
            timeout_secs: self.timeout_secs,
            no_remote: self.no_remote,
        }
    }
}

/// # Handle Allocation (`handle_next_subnet`)
///
/// Runs one allocation request end to end.
///
/// ## Returns
///
/// * `Ok(Allocation)`: the chosen subnet, or `Allocation::Exhausted`.
/// * `Err`: the request is invalid (prefix shorter than the parent's, or
///   beyond the address family) or the configuration cannot be loaded.
///   Data-source problems never surface here.
pub async fn handle_next_subnet(args: NextSubnetArgs) -> Result<Allocation> {
    info!(
        "Allocating a /{} from {} (project '{}', region '{}')",
        args.prefix_len, args.block, args.project, args.region
    );
    if !args.extra.is_empty() {
        debug!("Ignoring extra arguments: {:?}", args.extra);
    }

    allocator::validate_request(args.block, args.prefix_len)?;
    let cfg = config::load_config(&args.config_overrides())?;

    let record = RecordSource::new(&args.record_csv);
    let inventory = cfg.inventory.enabled.then(|| {
        InventorySource::new(
            cfg.inventory.command.clone(),
            args.project.clone(),
            args.region.clone(),
            cfg.inventory.timeout(),
        )
    });

    let excluded = collector::collect_used_ranges(&record, inventory.as_ref()).await;
    let allocation = allocator::allocate(args.block, args.prefix_len, &excluded)?;
    info!("Allocation result: {}", allocation);
    Ok(allocation)
}
