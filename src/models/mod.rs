//! Domain models for CIDR arithmetic.
//!
//! This module contains the value types used throughout the crate:
//! - [`Ipv4`] - IPv4 address with CIDR notation support
//! - [`AddressRange`] - closed integer range covered by a CIDR
//! - [`SubnetCandidate`], [`PlannerQuery`], [`AvailableSubnets`] - planner input/output

mod candidate;
mod ipv4;

// Re-export public types
pub use candidate::{AvailableSubnets, NetmaskRange, PlannerQuery, SubnetCandidate};
pub use ipv4::{get_cidr_mask, int_to_ip, ip_to_int, lo_mask, AddressRange, Ipv4, MAX_LENGTH};
