//! CIDR arithmetic.
//!
//! This module contains the pure address calculations:
//! - [`overlap`] - Overlap and containment tests
//! - [`expand`] - Host expansion and capacity
//! - [`planner`] - Recursive subnet enumeration for allocation planning
//! - [`gap_finder`] - Free space and next available CIDR

mod expand;
mod gap_finder;
mod overlap;
mod planner;

// Re-export public functions
pub use expand::{expand_cidr, subnet_size, usable_hosts};
pub use gap_finder::{free_blocks, next_available, next_available_across};
pub use overlap::{find_overlaps, is_overlapping, is_subnet_of};
pub use planner::{available_subnets, available_subnets_in_range, plan_query};
