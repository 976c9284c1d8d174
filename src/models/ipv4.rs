//! IPv4 address and CIDR notation utilities.
//!
//! Provides [`Ipv4`] for a parsed `address/prefix` pair, [`AddressRange`]
//! for the closed integer interval it covers, and the integer conversions
//! the rest of the engine is built on.

use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Parse a dotted quad into its `u32` value, most significant octet first.
///
/// # Examples
/// ```
/// use ipam_cidr::models::ip_to_int;
/// assert_eq!(ip_to_int("10.0.0.1").unwrap(), 0x0A000001);
/// ```
pub fn ip_to_int(ip: &str) -> Result<u32, Box<dyn Error>> {
    let addr: Ipv4Addr = ip
        .trim()
        .parse()
        .map_err(|_| format!("Invalid address {ip}"))?;
    Ok(u32::from(addr))
}

/// Format a `u32` as a dotted quad.
pub fn int_to_ip(n: u32) -> String {
    Ipv4Addr::from(n).to_string()
}

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use ipam_cidr::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, Box<dyn Error>> {
    if len > MAX_LENGTH {
        Err(format!("Network length /{len} is too long").into())
    } else {
        Ok(mask_bits(len))
    }
}

/// Mask for a prefix already known to be in range. Shifts are done in u64
/// so /0 does not overflow.
fn mask_bits(len: u8) -> u32 {
    let right_len = MAX_LENGTH - len.min(MAX_LENGTH);
    let all_bits = u32::MAX as u64;
    ((all_bits >> right_len) << right_len) as u32
}

/// Calculate the minimum mask for an IP address based on trailing zeros,
/// i.e. the largest block this address can be the network address of.
pub fn lo_mask(ip: Ipv4Addr) -> u8 {
    let trailing_zeros = u32::from(ip).trailing_zeros() as u8;
    MAX_LENGTH - trailing_zeros
}

/// Closed interval `[start, end]` of addresses covered by a CIDR.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AddressRange {
    pub start: u32,
    pub end: u32,
}

impl AddressRange {
    /// True when the two closed ranges share at least one address.
    pub fn intersects(&self, other: &AddressRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// True when `other` lies entirely inside `self`.
    pub fn covers(&self, other: &AddressRange) -> bool {
        self.start <= other.start && self.end >= other.end
    }

    /// Number of addresses in the range.
    pub fn len(&self) -> u64 {
        (self.end as u64) - (self.start as u64) + 1
    }

    /// A range always holds at least one address.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// IPv4 address with CIDR notation support.
///
/// The address is kept as given; host bits are only cleared when a range
/// or network address is asked for.
#[derive(Eq, Ord, Debug, Copy, Clone, Hash)]
pub struct Ipv4 {
    /// The IPv4 address.
    pub addr: Ipv4Addr,
    /// The subnet mask length (0-32).
    pub mask: u8,
}

impl Serialize for Ipv4 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Ipv4 {
    fn deserialize<D>(deserializer: D) -> Result<Ipv4, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ipv4::new(&s).map_err(|e| de::Error::custom(format!("invalid CIDR {s}: {e}")))
    }
}

impl FromStr for Ipv4 {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ipv4::new(s)
    }
}

impl Ipv4 {
    /// Create a new [`Ipv4`] from a CIDR string (e.g., "10.0.0.0/24").
    pub fn new(addr_cidr: &str) -> Result<Ipv4, Box<dyn Error>> {
        let addr_cidr = addr_cidr.trim();
        let parts: Vec<&str> = addr_cidr.split('/').collect();
        if parts.len() != 2 {
            return Err(format!("Invalid address/mask {addr_cidr}").into());
        }
        let addr: Ipv4Addr = parts[0]
            .parse()
            .map_err(|_| format!("Invalid address {}", parts[0]))?;
        let mask: u8 = parts[1]
            .parse()
            .map_err(|_| format!("Invalid mask {}", parts[1]))?;
        Ipv4::from_parts(addr, mask)
    }

    /// Build from an address and prefix length, rejecting prefixes over 32.
    pub fn from_parts(addr: Ipv4Addr, mask: u8) -> Result<Ipv4, Box<dyn Error>> {
        get_cidr_mask(mask)?;
        Ok(Ipv4 { addr, mask })
    }

    /// Parse every CIDR in a list, failing on the first bad entry.
    pub fn parse_all<S: AsRef<str>>(cidrs: &[S]) -> Result<Vec<Ipv4>, Box<dyn Error>> {
        cidrs.iter().map(|c| Ipv4::new(c.as_ref())).collect()
    }

    /// The subnet mask as u32.
    pub fn netmask(&self) -> u32 {
        mask_bits(self.mask)
    }

    /// Closed integer range covered by this CIDR.
    pub fn range(&self) -> AddressRange {
        let mask = self.netmask();
        let addr = u32::from(self.addr);
        AddressRange {
            start: addr & mask,
            end: addr | !mask,
        }
    }

    /// Get the lowest (network) address in the subnet.
    pub fn lo(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.range().start)
    }

    /// Get the highest (broadcast) address in the subnet.
    pub fn hi(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.range().end)
    }

    /// Same prefix with the host bits cleared.
    pub fn network(&self) -> Ipv4 {
        Ipv4 {
            addr: self.lo(),
            mask: self.mask,
        }
    }

    /// Total addresses in the subnet, network and broadcast included.
    /// A hand-built mask over 32 counts as a single host, like [`range`].
    ///
    /// [`range`]: Ipv4::range
    pub fn size(&self) -> u64 {
        self.range().len()
    }
}

impl std::fmt::Display for Ipv4 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}

impl PartialEq for Ipv4 {
    fn eq(&self, other: &Ipv4) -> bool {
        self.addr == other.addr && self.mask == other.mask
    }
}

impl PartialOrd for Ipv4 {
    fn partial_cmp(&self, other: &Ipv4) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
