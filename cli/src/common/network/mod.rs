//! # next-subnet Network Utilities Module (`common::network`)
//!
//! File: cli/src/common/network/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module groups the address-handling helpers shared by the command
//! line parser and the range collector.
//!
//! - **`cidr`**: Strict parsing of network text (`10.0.0.0/24`,
//!   `10.0.0.0/255.255.255.0`, bare addresses) into `ipnet::IpNet`.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::network::cidr;
//!
//! let block = cidr::parse_network("10.0.0.0/16")?;
//! assert_eq!(block.prefix_len(), 16);
//! ```
//!

pub mod cidr;
