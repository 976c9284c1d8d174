//! Terminal output utilities.
//!
//! Provides formatting helpers for terminal output.

use crate::models::SubnetCandidate;
use crate::validate::CidrCheck;
use colored::Colorize;
use itertools::Itertools;

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
///
/// # Returns
/// A quoted, right-aligned string
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    let quoted = format!("\"{value_str}\"");
    let quoted_len = quoted.len();

    if quoted_len >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

/// Header line matching [`candidate_table_row`].
pub fn candidate_table_header() -> String {
    [
        format_field("cidr", 20),
        format_field("network", 17),
        format_field("mask", 6),
        format_field("size", 12),
        "status".to_string(),
    ]
    .join(" ")
}

/// One planner candidate as an aligned row; overlapping rows are red.
pub fn candidate_table_row(candidate: &SubnetCandidate) -> String {
    let size = 1u64 << (32 - candidate.mask.min(32));
    let status = if candidate.overlap {
        "overlap".red().to_string()
    } else {
        "free".green().to_string()
    };
    [
        format_field(&candidate.cidr, 20),
        format_field(&candidate.network, 17),
        format_field(format!("/{}", candidate.mask), 6),
        format_field(size, 12),
        status,
    ]
    .join(" ")
}

/// Human readable summary of a [`CidrCheck`].
pub fn check_summary(check: &CidrCheck) -> String {
    let mut lines = Vec::new();
    let verdict = if check.is_ok() {
        "OK".on_green().to_string()
    } else {
        "REJECTED".on_red().to_string()
    };
    lines.push(format!("{} {verdict}", check.cidr));

    if !check.valid_format {
        lines.push("  invalid CIDR format".to_string());
    }
    if check.within_parent == Some(false) {
        lines.push("  not inside the parent CIDR".to_string());
    }
    for (group, conflicts) in &check.conflicts.iter().group_by(|c| c.group.clone()) {
        lines.push(format!(
            "  overlaps {group}: {}",
            conflicts.map(|c| c.cidr).join(", ")
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Ipv4;
    use crate::validate::check_cidr;

    #[test]
    fn test_format_field_short() {
        assert_eq!(format_field("test", 10), "    \"test\"");
    }

    #[test]
    fn test_format_field_exact() {
        assert_eq!(format_field("test", 6), "\"test\"");
    }

    #[test]
    fn test_format_field_long() {
        assert_eq!(format_field("long_value", 5), "\"long_value\"");
    }

    #[test]
    fn test_format_field_number() {
        assert_eq!(format_field(42, 6), "  \"42\"");
    }

    #[test]
    fn test_candidate_table_row() {
        let c = SubnetCandidate::new(Ipv4::new("10.0.0.128/25").unwrap(), &[]);
        let row = candidate_table_row(&c);
        assert!(row.starts_with("     \"10.0.0.128/25\""));
        assert!(row.contains("\"/25\""));
        assert!(row.contains("\"128\""));
        assert!(row.contains("free"));
    }

    #[test]
    fn test_check_summary_groups_conflicts() {
        let resv = vec!["10.0.4.0/26", "10.0.4.64/26"];
        let vnets = vec!["10.0.4.128/25"];
        let check = check_cidr(
            "10.0.4.0/24",
            None,
            &[("reservations", &resv[..]), ("vnets", &vnets[..])],
        )
        .unwrap();
        let summary = check_summary(&check);
        assert!(summary.contains("REJECTED"));
        assert!(summary.contains("overlaps reservations: 10.0.4.0/26, 10.0.4.64/26"));
        assert!(summary.contains("overlaps vnets: 10.0.4.128/25"));
    }
}
