//! Allocation planner: enumerate every subnet of a prefix down to a target
//! mask and tag the ones already taken.

use crate::models::{
    get_cidr_mask, AvailableSubnets, Ipv4, PlannerQuery, SubnetCandidate, MAX_LENGTH,
};

/// Every subnet of `target` from `/target.mask + 1` down to `/target_mask`,
/// tagged with its overlap against `existing`.
///
/// When `target_mask` equals the target's own mask the result is the
/// target alone. A `target_mask` shorter than the target yields nothing.
/// Output is ordered by mask, then by network address. A `target_mask`
/// over 32 is treated as 32.
pub fn available_subnets(
    target: Ipv4,
    target_mask: u8,
    existing: &[Ipv4],
) -> Vec<SubnetCandidate> {
    let target = target.network();
    let target_mask = target_mask.min(MAX_LENGTH);

    let mut blocks = if target_mask == target.mask {
        vec![target]
    } else {
        bisect(target, target_mask)
    };

    blocks.sort_by_key(|b| (b.mask, u32::from(b.addr)));
    let subnets: Vec<SubnetCandidate> = blocks
        .into_iter()
        .map(|b| SubnetCandidate::new(b, existing))
        .collect();
    log::debug!(
        "available_subnets({target}, /{target_mask}) -> {} candidates",
        subnets.len()
    );
    subnets
}

/// Split `parent` into its two halves and recurse into both until
/// `target_mask` is reached. Each level returns a fresh list.
fn bisect(parent: Ipv4, target_mask: u8) -> Vec<Ipv4> {
    if parent.mask >= target_mask {
        return Vec::new();
    }

    let child_mask = parent.mask + 1;
    let lo = u32::from(parent.lo());
    let hi = lo | (1u32 << (MAX_LENGTH - child_mask));

    let mut subnets = Vec::new();
    for child_addr in [lo, hi] {
        let child = Ipv4 {
            addr: child_addr.into(),
            mask: child_mask,
        };
        log::trace!("bisect {parent} -> {child}");
        subnets.push(child);
        subnets.extend(bisect(child, target_mask));
    }
    subnets
}

/// Object-form planner: every subnet of `query.address/query.netmask` for
/// each prefix in `query.netmask_range`, tagged against `existing`.
///
/// Prefixes shorter than the planned one contribute nothing; a prefix equal
/// to it contributes the prefix itself.
pub fn available_subnets_in_range(
    query: Ipv4,
    min: u8,
    max: u8,
    existing: &[Ipv4],
) -> AvailableSubnets {
    let target = query.network();
    let max = max.min(MAX_LENGTH);
    if max < target.mask || min > max {
        return AvailableSubnets::default();
    }

    let mut subnets: Vec<SubnetCandidate> = available_subnets(target, max, existing)
        .into_iter()
        .filter(|s| s.mask >= min)
        .collect();

    if min <= target.mask && max > target.mask {
        subnets.insert(0, SubnetCandidate::new(target, existing));
    }

    AvailableSubnets::from_candidates(subnets)
}

/// Run a [`PlannerQuery`] using its own exclusion list. A range maximum
/// over 32 is an error.
pub fn plan_query(query: &PlannerQuery) -> Result<AvailableSubnets, Box<dyn std::error::Error>> {
    let target = query.target()?;
    get_cidr_mask(query.netmask_range.max)?;
    Ok(available_subnets_in_range(
        target,
        query.netmask_range.min,
        query.netmask_range.max,
        &query.exclusions,
    ))
}
