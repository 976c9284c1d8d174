//! Allocation planner data model.

use super::Ipv4;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::net::Ipv4Addr;

/// One subnet the planner could hand out.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SubnetCandidate {
    /// CIDR notation, e.g. `10.0.0.64/26`.
    pub cidr: String,
    /// Network address.
    pub network: String,
    /// Prefix length.
    pub mask: u8,
    /// True when the subnet intersects an existing allocation.
    pub overlap: bool,
}

impl SubnetCandidate {
    /// Build a candidate for `subnet`, tagging overlap against `existing`.
    pub fn new(subnet: Ipv4, existing: &[Ipv4]) -> SubnetCandidate {
        let subnet = subnet.network();
        SubnetCandidate {
            cidr: subnet.to_string(),
            network: subnet.addr.to_string(),
            mask: subnet.mask,
            overlap: crate::processing::is_overlapping(subnet, existing),
        }
    }
}

/// Inclusive prefix-length window for the planner.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetmaskRange {
    pub min: u8,
    pub max: u8,
}

/// Object form of a planner request, as sent by the planner view.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlannerQuery {
    /// Network address of the prefix being planned.
    pub address: Ipv4Addr,
    /// Prefix length of the prefix being planned.
    pub netmask: u8,
    pub netmask_range: NetmaskRange,
    /// CIDRs already allocated inside the prefix.
    #[serde(default)]
    pub exclusions: Vec<Ipv4>,
}

impl PlannerQuery {
    /// The prefix being planned.
    pub fn target(&self) -> Result<Ipv4, Box<dyn Error>> {
        Ipv4::from_parts(self.address, self.netmask)
    }
}

/// Planner result: every candidate plus the CIDRs of those that overlap.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AvailableSubnets {
    pub subnets: Vec<SubnetCandidate>,
    pub subnets_excluded: Vec<String>,
}

impl AvailableSubnets {
    /// Collect the overlapping CIDRs out of an already sorted candidate list.
    pub fn from_candidates(subnets: Vec<SubnetCandidate>) -> AvailableSubnets {
        let subnets_excluded = subnets
            .iter()
            .filter(|s| s.overlap)
            .map(|s| s.cidr.clone())
            .collect();
        AvailableSubnets {
            subnets,
            subnets_excluded,
        }
    }

    /// Candidates that do not touch any existing allocation.
    pub fn free(&self) -> impl Iterator<Item = &SubnetCandidate> {
        self.subnets.iter().filter(|s| !s.overlap)
    }
}
