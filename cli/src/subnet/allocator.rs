//! # next-subnet Address-Block Allocator
//!
//! File: cli/src/subnet/allocator.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! First-fit allocation by exclusion. The parent block is partitioned at the
//! requested prefix length and the candidates are walked in ascending
//! address order; the first one that is not an exact member of the
//! `ExclusionSet` is returned.
//!
//! Exclusion is exact-match only: an excluded `/24` does not rule out the
//! `/25`s inside it, and an excluded `/25` does not rule out the `/24` that
//! contains it.
//!
//! Candidates come from `IpNet::subnets`, which yields them lazily, so a
//! `/8` split into `/24`s stops at the first free block instead of building
//! all 65,536 candidates.
//!
use crate::core::error::SubnetError;
use crate::subnet::collector::ExclusionSet;
use ipnet::{IpNet, IpSubnets};
use std::fmt;

/// Printed when every candidate is excluded.
pub const NO_AVAILABLE_SUBNET: &str = "NO_AVAILABLE_SUBNET";

/// Outcome of a valid allocation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Allocation {
    Subnet(IpNet),
    Exhausted,
}

impl Allocation {
    /// Process exit code for this outcome.
    pub fn exit_code(&self) -> u8 {
        match self {
            Allocation::Subnet(_) => 0,
            Allocation::Exhausted => 1,
        }
    }
}

impl fmt::Display for Allocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Allocation::Subnet(net) => write!(f, "{}", net),
            Allocation::Exhausted => f.write_str(NO_AVAILABLE_SUBNET),
        }
    }
}

/// Lazily enumerates the subnets of `parent` at `prefix_len`, lowest address first.
///
/// # Errors
///
/// `SubnetError::InvalidRequest` when `prefix_len` is shorter than the
/// parent's prefix or longer than the address family allows.
pub fn candidates(parent: IpNet, prefix_len: u8) -> Result<IpSubnets, SubnetError> {
    parent
        .subnets(prefix_len)
        .map_err(|_| SubnetError::InvalidRequest {
            prefix_len,
            parent: parent.to_string(),
        })
}

/// Checks a request without enumerating anything.
pub fn validate_request(parent: IpNet, prefix_len: u8) -> Result<(), SubnetError> {
    candidates(parent, prefix_len).map(|_| ())
}

/// Returns the first subnet of `parent` at `prefix_len` not in `excluded`.
pub fn allocate(
    parent: IpNet,
    prefix_len: u8,
    excluded: &ExclusionSet,
) -> Result<Allocation, SubnetError> {
    let free = candidates(parent, prefix_len)?.find(|candidate| !excluded.contains(candidate));
    Ok(free.map_or(Allocation::Exhausted, Allocation::Subnet))
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn net(text: &str) -> IpNet {
        text.parse().unwrap()
    }

    fn excluded(ranges: &[&str]) -> ExclusionSet {
        ranges.iter().map(|r| net(r)).collect()
    }

    #[test]
    fn test_first_candidate_when_nothing_excluded() {
        let result = allocate(net("10.0.0.0/16"), 24, &ExclusionSet::default()).unwrap();
        assert_eq!(result, Allocation::Subnet(net("10.0.0.0/24")));
        assert_eq!(result.to_string(), "10.0.0.0/24");
        assert_eq!(result.exit_code(), 0);
    }

    #[test]
    fn test_skips_excluded_in_order() {
        let used = excluded(&["10.0.0.0/24", "10.0.1.0/24", "10.0.3.0/24"]);
        assert_eq!(
            allocate(net("10.0.0.0/22"), 24, &used).unwrap(),
            Allocation::Subnet(net("10.0.2.0/24"))
        );
    }

    #[test]
    fn test_same_prefix_as_parent() {
        let used = excluded(&["10.0.0.0/24"]);
        let result = allocate(net("10.0.0.0/24"), 24, &used).unwrap();
        assert_eq!(result, Allocation::Exhausted);
        assert_eq!(result.to_string(), NO_AVAILABLE_SUBNET);
        assert_eq!(result.exit_code(), 1);

        assert_eq!(
            allocate(net("10.0.0.0/24"), 24, &ExclusionSet::default()).unwrap(),
            Allocation::Subnet(net("10.0.0.0/24"))
        );
    }

    #[test]
    fn test_exhausted_when_all_excluded() {
        let used = excluded(&["10.0.0.0/26", "10.0.0.64/26", "10.0.0.128/26", "10.0.0.192/26"]);
        assert_eq!(
            allocate(net("10.0.0.0/24"), 26, &used).unwrap(),
            Allocation::Exhausted
        );
    }

    #[test]
    fn test_containment_does_not_exclude() {
        // A covering /23 and a nested /25 are not exact matches for any /24.
        let used = excluded(&["10.0.0.0/23", "10.0.0.0/25"]);
        assert_eq!(
            allocate(net("10.0.0.0/23"), 24, &used).unwrap(),
            Allocation::Subnet(net("10.0.0.0/24"))
        );
    }

    #[test]
    fn test_other_blocks_are_irrelevant() {
        let used = excluded(&["192.168.0.0/24", "fd00::/64"]);
        assert_eq!(
            allocate(net("10.0.0.0/23"), 24, &used).unwrap(),
            Allocation::Subnet(net("10.0.0.0/24"))
        );
    }

    #[test]
    fn test_completeness_over_partial_exclusions() {
        let all = ["10.0.0.0/26", "10.0.0.64/26", "10.0.0.128/26", "10.0.0.192/26"];
        for skip in 0..all.len() {
            let used: ExclusionSet = all
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != skip)
                .map(|(_, r)| net(r))
                .collect();
            assert_eq!(
                allocate(net("10.0.0.0/24"), 26, &used).unwrap(),
                Allocation::Subnet(net(all[skip])),
                "only {} is free",
                all[skip]
            );
        }
    }

    #[test]
    fn test_deterministic() {
        let used = excluded(&["10.1.0.0/24", "10.1.2.0/24"]);
        let first = allocate(net("10.1.0.0/16"), 24, &used).unwrap();
        let second = allocate(net("10.1.0.0/16"), 24, &used).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, Allocation::Subnet(net("10.1.1.0/24")));
    }

    #[test]
    fn test_large_space_scan() {
        let used: ExclusionSet = candidates(net("10.0.0.0/8"), 24).unwrap().take(1000).collect();
        assert_eq!(
            allocate(net("10.0.0.0/8"), 24, &used).unwrap(),
            Allocation::Subnet(net("10.3.232.0/24"))
        );
    }

    #[test]
    fn test_ipv6() {
        let used = excluded(&["fd00::/64"]);
        assert_eq!(
            allocate(net("fd00::/48"), 64, &used).unwrap(),
            Allocation::Subnet(net("fd00:0:0:1::/64"))
        );
    }

    #[test]
    fn test_result_is_subnet_of_parent_at_requested_length() {
        let parent = net("172.16.0.0/12");
        let used = excluded(&["172.16.0.0/20", "172.16.16.0/20"]);
        match allocate(parent, 20, &used).unwrap() {
            Allocation::Subnet(subnet) => {
                assert_eq!(subnet.prefix_len(), 20);
                assert!(parent.contains(&subnet));
                assert!(!used.contains(&subnet));
            }
            Allocation::Exhausted => panic!("expected a subnet"),
        }
    }

    #[test]
    fn test_rejects_larger_than_parent() {
        let err = allocate(net("10.0.0.0/24"), 16, &ExclusionSet::default()).unwrap_err();
        assert!(matches!(
            err,
            SubnetError::InvalidRequest { prefix_len: 16, .. }
        ));
        assert!(validate_request(net("10.0.0.0/24"), 16).is_err());
    }

    #[test]
    fn test_rejects_prefix_beyond_family() {
        assert!(validate_request(net("10.0.0.0/24"), 33).is_err());
        assert!(validate_request(net("fd00::/64"), 129).is_err());
        assert!(validate_request(net("fd00::/64"), 128).is_ok());
    }
}
