//! Overlapping CIDR detection and containment.
//!
//! Every form that creates a block, external network, subnet or
//! reservation runs these checks against the CIDRs already allocated next
//! to it.

use crate::models::Ipv4;

/// True when `candidate` shares at least one address with any of `existing`.
///
/// Holds for partial overlap, containment in either direction and
/// equality. An empty `existing` is never overlapping.
pub fn is_overlapping(candidate: Ipv4, existing: &[Ipv4]) -> bool {
    let current = candidate.range();
    existing.iter().any(|e| current.intersects(&e.range()))
}

/// The entries of `existing` that intersect `candidate`, in input order.
pub fn find_overlaps(candidate: Ipv4, existing: &[Ipv4]) -> Vec<Ipv4> {
    let current = candidate.range();
    let overlaps: Vec<Ipv4> = existing
        .iter()
        .filter(|e| current.intersects(&e.range()))
        .copied()
        .collect();

    if !overlaps.is_empty() {
        log::debug!(
            "{candidate} overlaps {} of {} existing CIDR(s)",
            overlaps.len(),
            existing.len()
        );
    }
    overlaps
}

/// True when every address of `child` is inside `parent`.
pub fn is_subnet_of(child: Ipv4, parent: Ipv4) -> bool {
    parent.range().covers(&child.range())
}
