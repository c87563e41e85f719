//! # next-subnet CIDR Parsing (`common::network::cidr`)
//!
//! File: cli/src/common/network/cidr.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Turns network text into `ipnet::IpNet` values. The same rules apply to the
//! parent block given on the command line and to every used range read from
//! the local record or the cloud inventory, so a range that would be rejected
//! as a parent is also never counted as used.
//!
//! Accepted forms (surrounding whitespace is ignored):
//! - `addr/prefix` for IPv4 and IPv6, e.g. `10.0.0.0/24`, `fd00::/64`
//! - `a.b.c.d/m.m.m.m` with a contiguous IPv4 netmask, e.g. `10.0.0.0/255.255.255.0`,
//!   or hostmask, e.g. `10.0.0.0/0.0.0.255` (a netmask reading wins when both fit)
//! - a bare address, taken as a single-host network (`/32` or `/128`)
//!
//! Parsing is strict: host bits must be zero, so `10.0.0.1/24` is rejected
//! rather than silently truncated to `10.0.0.0/24`.
//!
use crate::core::error::SubnetError;
use ipnet::{IpNet, Ipv4Net};
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

/// Parses `text` into a canonical network.
///
/// # Errors
///
/// Returns `SubnetError::InvalidBlock` when the text is empty, is not an
/// address or network, uses a non-contiguous mask, or has host bits set.
pub fn parse_network(text: &str) -> Result<IpNet, SubnetError> {
    let trimmed = text.trim();
    let invalid = || SubnetError::InvalidBlock(trimmed.to_string());

    let net = match trimmed.split_once('/') {
        None => {
            let addr = IpAddr::from_str(trimmed).map_err(|_| invalid())?;
            let max_prefix = if addr.is_ipv4() { 32 } else { 128 };
            IpNet::new(addr, max_prefix).map_err(|_| invalid())?
        }
        Some((addr, mask)) if mask.contains('.') => {
            let addr = Ipv4Addr::from_str(addr).map_err(|_| invalid())?;
            let mask = Ipv4Addr::from_str(mask).map_err(|_| invalid())?;
            let prefix_len = mask_prefix_len(mask).ok_or_else(invalid)?;
            IpNet::V4(Ipv4Net::new(addr, prefix_len).map_err(|_| invalid())?)
        }
        Some(_) => IpNet::from_str(trimmed).map_err(|_| invalid())?,
    };

    if net.trunc() != net {
        return Err(invalid());
    }
    Ok(net)
}

/// Prefix length of a dotted mask, read as a netmask first and then as a hostmask.
fn mask_prefix_len(mask: Ipv4Addr) -> Option<u8> {
    netmask_prefix_len(mask).or_else(|| netmask_prefix_len(Ipv4Addr::from(!u32::from(mask))))
}

/// Prefix length of a contiguous netmask (`255.255.254.0` -> 23), or `None`.
fn netmask_prefix_len(mask: Ipv4Addr) -> Option<u8> {
    let bits = u32::from(mask);
    let ones = bits.leading_ones();
    // Everything after the leading ones must be zero.
    let rest = bits.checked_shl(ones).unwrap_or(0);
    (rest == 0).then_some(ones as u8)
}

/// Adapter for clap's `value_parser`.
pub fn parse_block_arg(text: &str) -> Result<IpNet, String> {
    parse_network(text).map_err(|e| e.to_string())
}
