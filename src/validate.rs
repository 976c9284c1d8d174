//! CIDR format validation and the composite check run by the create/edit
//! forms: format, containment in the parent, and overlap with each group
//! of sibling allocations.

use crate::models::Ipv4;
use crate::processing::{find_overlaps, is_subnet_of};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::error::Error;

lazy_static! {
    static ref CIDR_RE: Regex = Regex::new(
        r"^((25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9][0-9]|[0-9])\.){3}(25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9][0-9]|[0-9])/(3[0-2]|[1-2][0-9]|[0-9])$"
    )
    .expect("Invalid Regex?");
}

/// True when `cidr` is a dotted quad with octets 0-255 and a prefix 0-32,
/// without leading zeros or surrounding whitespace.
pub fn is_valid_cidr(cidr: &str) -> bool {
    CIDR_RE.is_match(cidr)
}

/// One sibling allocation the candidate collides with.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    /// Label of the sibling group, e.g. `reservations`.
    pub group: String,
    pub cidr: Ipv4,
}

/// Outcome of [`check_cidr`].
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CidrCheck {
    pub cidr: String,
    pub valid_format: bool,
    /// `None` when no parent was given or the format was invalid.
    pub within_parent: Option<bool>,
    pub conflicts: Vec<Conflict>,
}

impl CidrCheck {
    /// Valid, inside the parent when one was given, and free of conflicts.
    pub fn is_ok(&self) -> bool {
        self.valid_format && self.within_parent.unwrap_or(true) && self.conflicts.is_empty()
    }
}

/// Check a candidate CIDR the way the create/edit forms do.
///
/// A malformed candidate is reported, not returned as an error; a
/// malformed parent or sibling is an error naming the bad entry.
///
/// # Arguments
/// * `candidate` - CIDR typed by the operator
/// * `parent` - Optional CIDR the candidate must lie inside
/// * `groups` - Labelled sibling CIDR lists the candidate must not overlap
pub fn check_cidr<S: AsRef<str>>(
    candidate: &str,
    parent: Option<&str>,
    groups: &[(&str, &[S])],
) -> Result<CidrCheck, Box<dyn Error>> {
    let mut check = CidrCheck {
        cidr: candidate.to_string(),
        valid_format: is_valid_cidr(candidate),
        within_parent: None,
        conflicts: Vec::new(),
    };
    if !check.valid_format {
        log::debug!("check_cidr: '{candidate}' is not a valid CIDR");
        return Ok(check);
    }
    let cidr = Ipv4::new(candidate)?;

    if let Some(parent) = parent {
        let parent = Ipv4::new(parent).map_err(|e| format!("parent {parent}: {e}"))?;
        check.within_parent = Some(is_subnet_of(cidr, parent));
    }

    for (group, siblings) in groups {
        let siblings =
            Ipv4::parse_all(siblings).map_err(|e| format!("group '{group}': {e}"))?;
        check
            .conflicts
            .extend(find_overlaps(cidr, &siblings).into_iter().map(|c| Conflict {
                group: group.to_string(),
                cidr: c,
            }));
    }

    Ok(check)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_cidr() {
        assert!(is_valid_cidr("10.0.0.0/24"));
        assert!(is_valid_cidr("0.0.0.0/0"));
        assert!(is_valid_cidr("255.255.255.255/32"));
        assert!(is_valid_cidr("10.250.1.9/8"));
        assert!(!is_valid_cidr("10.0.0.0"));
        assert!(!is_valid_cidr("10.0.0.0/33"));
        assert!(!is_valid_cidr("10.0.0.256/24"));
        assert!(!is_valid_cidr("10.0.0/24"));
        assert!(!is_valid_cidr("10x0x0x0/24"));
        assert!(!is_valid_cidr("010.0.0.0/24"));
        assert!(!is_valid_cidr(" 10.0.0.0/24"));
        assert!(!is_valid_cidr(""));
    }

    #[test]
    fn test_check_cidr_ok() {
        let resv = vec!["10.0.8.0/24".to_string()];
        let vnets = vec!["10.0.0.0/22".to_string()];
        let check = check_cidr(
            "10.0.4.0/24",
            Some("10.0.0.0/16"),
            &[("reservations", &resv[..]), ("vnets", &vnets[..])],
        )
        .unwrap();
        assert!(check.is_ok());
        assert_eq!(check.within_parent, Some(true));
    }

    #[test]
    fn test_check_cidr_conflicts() {
        let resv = vec!["10.0.4.128/25"];
        let externals = vec!["10.0.0.0/22", "10.0.4.0/26"];
        let check = check_cidr(
            "10.0.4.0/24",
            Some("10.0.0.0/16"),
            &[("reservations", &resv[..]), ("externals", &externals[..])],
        )
        .unwrap();
        assert!(!check.is_ok());
        assert_eq!(
            check.conflicts,
            vec![
                Conflict {
                    group: "reservations".to_string(),
                    cidr: Ipv4::new("10.0.4.128/25").unwrap()
                },
                Conflict {
                    group: "externals".to_string(),
                    cidr: Ipv4::new("10.0.4.0/26").unwrap()
                },
            ]
        );
    }

    #[test]
    fn test_check_cidr_outside_parent_and_bad_format() {
        let none: Vec<&str> = vec![];
        let groups = [("vnets", &none[..])];
        let check = check_cidr("10.1.0.0/24", Some("10.0.0.0/16"), &groups).unwrap();
        assert_eq!(check.within_parent, Some(false));
        assert!(!check.is_ok());

        let check = check_cidr("10.1.0.0/40", Some("10.0.0.0/16"), &groups).unwrap();
        assert!(!check.valid_format);
        assert_eq!(check.within_parent, None);
        assert!(!check.is_ok());

        let check = check_cidr::<&str>("10.1.0.0/24", None, &[]).unwrap();
        assert!(check.is_ok());
    }

    #[test]
    fn test_check_cidr_bad_siblings() {
        let bad = vec!["10.0.0.0/24", "nonsense"];
        let err = check_cidr("10.0.4.0/24", None, &[("vnets", &bad[..])]).unwrap_err();
        assert!(err.to_string().contains("vnets"));
        assert!(check_cidr::<&str>("10.0.4.0/24", Some("10.0.0.0"), &[]).is_err());
    }
}
