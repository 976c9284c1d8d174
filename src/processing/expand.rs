//! Host address expansion and subnet capacity.

use crate::models::{int_to_ip, Ipv4};

/// Every address in `cidr`, network to broadcast, as dotted quads.
///
/// Materialises `2^(32 - mask)` strings; callers cap the mask before
/// expanding wide prefixes.
pub fn expand_cidr(cidr: Ipv4) -> Vec<String> {
    let range = cidr.range();
    log::trace!("expand_cidr({cidr}) -> {} addresses", range.len());
    (range.start..=range.end).map(int_to_ip).collect()
}

/// Addresses a host can use: the expansion without network and broadcast.
pub fn usable_hosts(cidr: Ipv4) -> Vec<String> {
    let mut hosts = expand_cidr(cidr);
    if hosts.len() <= 2 {
        return Vec::new();
    }
    hosts.pop();
    hosts.remove(0);
    hosts
}

/// Total address count of `cidr`, network and broadcast included.
pub fn subnet_size(cidr: Ipv4) -> u64 {
    cidr.size()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(s: &str) -> Ipv4 {
        Ipv4::new(s).unwrap()
    }

    #[test]
    fn test_expand_cidr_30() {
        let cidr = ip("10.0.0.0/30");
        let hosts = expand_cidr(cidr);
        assert_eq!(
            hosts,
            vec!["10.0.0.0", "10.0.0.1", "10.0.0.2", "10.0.0.3"]
        );
        assert_eq!(hosts.len() as u64, subnet_size(cidr));
    }

    #[test]
    fn test_expand_cidr_crosses_octet() {
        let hosts = expand_cidr(ip("10.0.0.0/23"));
        assert_eq!(hosts.len(), 512);
        assert_eq!(hosts[255], "10.0.0.255");
        assert_eq!(hosts[256], "10.0.1.0");
        assert_eq!(hosts[511], "10.0.1.255");
    }

    #[test]
    fn test_expand_host_bits_and_edges() {
        assert_eq!(expand_cidr(ip("10.0.0.5/30"))[0], "10.0.0.4");
        assert_eq!(expand_cidr(ip("8.8.8.8/32")), vec!["8.8.8.8"]);
        assert_eq!(
            expand_cidr(ip("255.255.255.254/31")),
            vec!["255.255.255.254", "255.255.255.255"]
        );
    }

    #[test]
    fn test_usable_hosts() {
        assert_eq!(usable_hosts(ip("10.0.0.0/30")), vec!["10.0.0.1", "10.0.0.2"]);
        assert_eq!(usable_hosts(ip("10.0.0.0/24")).len(), 254);
        assert!(usable_hosts(ip("10.0.0.0/31")).is_empty());
        assert!(usable_hosts(ip("10.0.0.0/32")).is_empty());
    }

    #[test]
    fn test_subnet_size() {
        assert_eq!(subnet_size(ip("10.0.0.0/24")), 256);
        assert_eq!(subnet_size(ip("10.0.0.0/32")), 1);
        assert_eq!(subnet_size(ip("10.0.0.0/8")), 16777216);
        assert_eq!(subnet_size(ip("0.0.0.0/0")), 4294967296);
    }

    #[test]
    fn test_size_matches_expansion_for_long_mask() {
        let long = Ipv4 {
            addr: "10.0.0.0".parse().unwrap(),
            mask: 33,
        };
        assert_eq!(subnet_size(long), 1);
        assert_eq!(expand_cidr(long).len() as u64, subnet_size(long));
    }
}
