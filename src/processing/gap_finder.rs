//! Gap finding between allocated CIDRs.
//!
//! Identifies the unused address space left inside a parent prefix and
//! picks the next CIDR of a requested size out of it.

use crate::models::{lo_mask, AddressRange, Ipv4, MAX_LENGTH};
use itertools::Itertools;
use std::net::Ipv4Addr;

/// Unused space of `parent` as the fewest, largest aligned CIDR blocks,
/// in ascending order.
///
/// `used` entries may overlap each other or reach outside the parent.
pub fn free_blocks(parent: Ipv4, used: &[Ipv4]) -> Vec<Ipv4> {
    let bounds = parent.range();
    let taken: Vec<AddressRange> = used
        .iter()
        .map(|u| u.range())
        .filter(|r| r.intersects(&bounds))
        .sorted_by_key(|r| r.start)
        .collect();

    let mut blocks = Vec::new();
    // u64 so the cursor can step past 255.255.255.255
    let mut next_ip = bounds.start as u64;
    for r in taken {
        if r.start as u64 > next_ip {
            blocks.extend(fill_gap(next_ip as u32, r.start - 1));
        }
        next_ip = next_ip.max(r.end as u64 + 1);
    }
    if next_ip <= bounds.end as u64 {
        blocks.extend(fill_gap(next_ip as u32, bounds.end));
    }

    log::debug!(
        "free_blocks({parent}) with {} used -> {} free block(s)",
        used.len(),
        blocks.len()
    );
    blocks
}

/// Cover `[first, last]` with aligned blocks, biggest first.
fn fill_gap(first: u32, last: u32) -> Vec<Ipv4> {
    let mut blocks = Vec::new();
    let mut next_ip = first as u64;
    while next_ip <= last as u64 {
        let addr = Ipv4Addr::from(next_ip as u32);
        let block = Ipv4 {
            addr,
            mask: find_biggest_subnet(addr, last),
        };
        blocks.push(block);
        next_ip = block.range().end as u64 + 1;
    }
    blocks
}

/// Find the biggest subnet starting at `start_ip` that ends at or before
/// `last`.
///
/// The returned mask is constrained by:
/// 1. The IP alignment - `start_ip` must be a valid network address for the mask
/// 2. The subnet must not reach past `last`
fn find_biggest_subnet(start_ip: Ipv4Addr, last: u32) -> u8 {
    let mut next_mask = lo_mask(start_ip);

    loop {
        let next_subnet = Ipv4 {
            addr: start_ip,
            mask: next_mask,
        };
        if next_mask < MAX_LENGTH && next_subnet.range().end > last {
            next_mask += 1;
        } else {
            break;
        }
    }
    next_mask
}

/// Pick the next free `/size` inside `parent`.
///
/// * `reverse_search` - search from the end of the parent and take the last
///   `/size` of the chosen free block.
/// * `smallest_cidr` - prefer the smallest free block that still fits, so
///   large free blocks are not broken up.
///
/// Returns `None` when no free block can hold a `/size`.
pub fn next_available(
    parent: Ipv4,
    used: &[Ipv4],
    size: u8,
    reverse_search: bool,
    smallest_cidr: bool,
) -> Option<Ipv4> {
    if size > MAX_LENGTH {
        return None;
    }

    let mut candidates: Vec<Ipv4> = free_blocks(parent, used)
        .into_iter()
        .filter(|b| b.mask <= size)
        .collect();
    if reverse_search {
        candidates.reverse();
    }

    let block = if smallest_cidr {
        let min_mask = candidates.iter().map(|b| b.mask).max()?;
        candidates.into_iter().find(|b| b.mask == min_mask)?
    } else {
        candidates.into_iter().next()?
    };

    let subnet = if reverse_search {
        Ipv4 {
            addr: block.hi(),
            mask: size,
        }
        .network()
    } else {
        Ipv4 {
            addr: block.lo(),
            mask: size,
        }
    };
    log::debug!("next_available({parent}, /{size}) -> {subnet} from free block {block}");
    Some(subnet)
}

/// Try each `(parent, used)` pair in order and return the index of the
/// first parent with room for a `/size`, with the CIDR picked from it.
pub fn next_available_across(
    parents: &[(Ipv4, Vec<Ipv4>)],
    size: u8,
    reverse_search: bool,
    smallest_cidr: bool,
) -> Option<(usize, Ipv4)> {
    parents.iter().enumerate().find_map(|(i, (parent, used))| {
        next_available(*parent, used, size, reverse_search, smallest_cidr).map(|cidr| (i, cidr))
    })
}
