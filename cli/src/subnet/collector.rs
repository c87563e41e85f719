//! # next-subnet Range Collector
//!
//! File: cli/src/subnet/collector.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Builds the `ExclusionSet`: the networks already in use, gathered from the
//! local record and (optionally) the cloud inventory. Every candidate string
//! goes through `cidr::parse_network`; strings that do not parse are dropped
//! and counted, never reported as errors. Deduplication happens on the typed
//! value, whose canonical text form is what `Display` prints.
//!
//! ## Usage
//!
//! ```rust
//! let record = RecordSource::new("subnets.csv");
//! let excluded = collector::collect_used_ranges(&record, Some(&inventory)).await;
//! assert!(excluded.contains(&"10.0.0.0/24".parse()?));
//! ```
//!
use crate::common::network::cidr;
use crate::subnet::inventory::InventorySource;
use crate::subnet::record::RecordSource;
use ipnet::IpNet;
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Networks that must not be handed out. Immutable once built.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExclusionSet {
    ranges: BTreeSet<IpNet>,
}

impl ExclusionSet {
    /// Exact membership. A network merely inside (or around) a member is not a member.
    pub fn contains(&self, net: &IpNet) -> bool {
        self.ranges.contains(net)
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IpNet> {
        self.ranges.iter()
    }
}

impl FromIterator<IpNet> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = IpNet>>(iter: I) -> Self {
        Self {
            ranges: iter.into_iter().collect(),
        }
    }
}

/// Accumulates candidate strings from any number of sources.
#[derive(Debug, Default)]
pub struct RangeCollector {
    ranges: BTreeSet<IpNet>,
    rejected: usize,
}

impl RangeCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one candidate. Returns whether it parsed.
    pub fn add_candidate(&mut self, text: &str) -> bool {
        match cidr::parse_network(text) {
            Ok(net) => {
                self.ranges.insert(net);
                true
            }
            Err(_) => {
                debug!("Ignoring unparsable used range {:?}", text);
                self.rejected += 1;
                false
            }
        }
    }

    pub fn extend_from<I, S>(&mut self, source: &str, candidates: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let (mut accepted, mut total) = (0usize, 0usize);
        for candidate in candidates {
            total += 1;
            if self.add_candidate(candidate.as_ref()) {
                accepted += 1;
            }
        }
        debug!("{}: {} of {} candidate(s) parsed", source, accepted, total);
    }

    /// Number of candidates dropped so far.
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    pub fn finish(self) -> ExclusionSet {
        ExclusionSet {
            ranges: self.ranges,
        }
    }
}

/// Gathers used ranges from the record and, when given, the inventory.
pub async fn collect_used_ranges(
    record: &RecordSource,
    inventory: Option<&InventorySource>,
) -> ExclusionSet {
    let mut collector = RangeCollector::new();
    debug!("Reading local record {}", record.path().display());
    collector.extend_from("local record", record.read_candidates());

    match inventory {
        Some(inventory) => {
            collector.extend_from("cloud inventory", inventory.fetch_candidates().await)
        }
        None => info!("Remote inventory lookup disabled; using the local record only."),
    }

    let rejected = collector.rejected();
    let excluded = collector.finish();
    info!(
        "Exclusion set holds {} range(s) ({} candidate(s) ignored)",
        excluded.len(),
        rejected
    );
    if excluded.is_empty() {
        info!("No used ranges found; the first candidate will be allocated.");
    }
    debug!(
        "Excluded ranges: {:?}",
        excluded.iter().map(ToString::to_string).collect::<Vec<_>>()
    );
    excluded
}
