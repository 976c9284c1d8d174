//! CSV output formatting for planner results.

use crate::models::AvailableSubnets;
use crate::models::SubnetCandidate;
use chrono::Utc;

/// CSV header for candidate rows.
pub const CSV_HEADER: &str = r#""cidr","network","mask","size","overlap""#;

/// Render planner candidates as CSV, header first.
pub fn candidates_csv(result: &AvailableSubnets) -> String {
    let mut lines = Vec::with_capacity(result.subnets.len() + 1);
    lines.push(CSV_HEADER.to_string());
    lines.extend(result.subnets.iter().map(csv_row));
    lines.join("\n")
}

/// Render one candidate as a CSV row.
fn csv_row(c: &SubnetCandidate) -> String {
    format!(
        r#"{cidr},{network},{mask},{size},{overlap}"#,
        cidr = escape_csv_field(&c.cidr),
        network = escape_csv_field(&c.network),
        mask = c.mask,
        size = 1u64 << (32 - c.mask.min(32)),
        overlap = c.overlap,
    )
}

/// Planner candidates as CSV followed by a `# generated` timestamp
/// comment line.
pub fn candidates_csv_report(result: &AvailableSubnets) -> String {
    log::info!(
        "#Start candidates_csv_report() {} candidates, {} excluded",
        result.subnets.len(),
        result.subnets_excluded.len()
    );
    format!(
        "{}\n# generated {}",
        candidates_csv(result),
        Utc::now().format("%Y-%m-%dT%H:%M:%SZ")
    )
}

fn escape_csv_field(input: &str) -> String {
    if input.contains(',') || input.contains('"') {
        // excel does not like spaces after comma between fields
        let escaped = input.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        input.to_string()
    }
}
