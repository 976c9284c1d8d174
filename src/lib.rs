//! IPv4 CIDR arithmetic for IP address management.
//!
//! The typed API in [`models`] and [`processing`] works on parsed [`Ipv4`]
//! values and never fails. The functions at the crate root take CIDR
//! strings, parse them up front and return an error naming the first
//! malformed input.
//!
//! ```
//! use ipam_cidr::{is_subnet_of, is_subnet_overlap};
//! assert!(is_subnet_of("10.0.0.0/25", "10.0.0.0/24").unwrap());
//! assert!(!is_subnet_overlap("10.0.0.0/24", &["10.0.1.0/24"]).unwrap());
//! ```

pub mod cli;
pub mod config;
pub mod models;
pub mod output;
pub mod processing;
pub mod validate;

use models::{get_cidr_mask, AddressRange, AvailableSubnets, Ipv4, PlannerQuery, SubnetCandidate};
use std::error::Error;

pub use models::{int_to_ip, ip_to_int};

/// Closed integer range `[network, broadcast]` of a CIDR string.
pub fn range_of_cidr(cidr: &str) -> Result<AddressRange, Box<dyn Error>> {
    Ok(Ipv4::new(cidr)?.range())
}

/// True when `cidr` intersects any of `existing`.
pub fn is_subnet_overlap<S: AsRef<str>>(
    cidr: &str,
    existing: &[S],
) -> Result<bool, Box<dyn Error>> {
    let candidate = Ipv4::new(cidr)?;
    let existing = Ipv4::parse_all(existing)?;
    Ok(processing::is_overlapping(candidate, &existing))
}

/// True when `child` lies entirely inside `parent`.
pub fn is_subnet_of(child: &str, parent: &str) -> Result<bool, Box<dyn Error>> {
    Ok(processing::is_subnet_of(Ipv4::new(child)?, Ipv4::new(parent)?))
}

/// Every address of `cidr` in order, network and broadcast included.
pub fn expand_cidr(cidr: &str) -> Result<Vec<String>, Box<dyn Error>> {
    Ok(processing::expand_cidr(Ipv4::new(cidr)?))
}

/// Address count of `cidr`, network and broadcast included.
pub fn get_subnet_size(cidr: &str) -> Result<u64, Box<dyn Error>> {
    Ok(processing::subnet_size(Ipv4::new(cidr)?))
}

/// Every subnet of `cidr` down to `/target_mask`, sorted by mask then
/// address, each tagged with its overlap against `existing`. A target mask
/// over 32 is an error.
pub fn available_subnets<S: AsRef<str>>(
    cidr: &str,
    target_mask: u8,
    existing: &[S],
) -> Result<Vec<SubnetCandidate>, Box<dyn Error>> {
    let target = Ipv4::new(cidr)?;
    get_cidr_mask(target_mask)?;
    let existing = Ipv4::parse_all(existing)?;
    Ok(processing::available_subnets(target, target_mask, &existing))
}

/// Object-form planner call. `excluded` is added to the query's own
/// exclusions.
pub fn available_subnets_for<S: AsRef<str>>(
    query: &PlannerQuery,
    excluded: &[S],
) -> Result<AvailableSubnets, Box<dyn Error>> {
    let target = query.target()?;
    get_cidr_mask(query.netmask_range.max)?;
    let mut existing = query.exclusions.clone();
    existing.extend(Ipv4::parse_all(excluded)?);
    Ok(processing::available_subnets_in_range(
        target,
        query.netmask_range.min,
        query.netmask_range.max,
        &existing,
    ))
}
