//! Command line front end.
//!
//! Each subcommand maps onto one engine operation. [`execute`] returns
//! the text to print so `main` stays a thin shell.

use crate::config::Config;
use crate::models::{get_cidr_mask, AvailableSubnets, Ipv4, PlannerQuery};
use crate::output::{
    candidate_table_header, candidate_table_row, candidates_csv_report, check_summary, to_json,
};
use crate::processing::{
    available_subnets_in_range, expand_cidr, find_overlaps, is_subnet_of, next_available,
    subnet_size, usable_hosts,
};
use crate::validate::check_cidr;
use clap::{Parser, Subcommand, ValueEnum};
use itertools::Itertools;
use serde_json::json;
use std::error::Error;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug, Clone)]
#[command(author, version, long_about = None)]
#[command(name = "ipam-cidr")]
#[command(about = "IPv4 CIDR arithmetic for IP address management")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

/// How to print results.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Does a CIDR overlap any of the existing CIDRs?
    Overlap {
        cidr: String,
        existing: Vec<String>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Is CHILD entirely inside PARENT?
    Contains { child: String, parent: String },

    /// List every address of a CIDR
    Expand {
        cidr: String,
        /// Drop the network and broadcast addresses
        #[arg(long)]
        usable: bool,
        /// Refuse CIDRs with more addresses than this
        #[arg(long)]
        max_hosts: Option<u64>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Address count of a CIDR
    Size {
        cidr: String,
        /// Subtract the network and broadcast addresses
        #[arg(long)]
        usable: bool,
    },

    /// Enumerate candidate subnets of a prefix and flag the taken ones
    Plan {
        /// Prefix to plan, e.g. 10.0.0.0/24
        #[arg(required_unless_present = "request")]
        cidr: Option<String>,
        /// Most specific mask to enumerate
        #[arg(required_unless_present = "request")]
        mask: Option<u8>,
        /// Least specific mask to list (defaults to one below the prefix)
        #[arg(long)]
        min: Option<u8>,
        /// Existing allocation, repeatable
        #[arg(short, long = "exclude", value_name = "CIDR")]
        exclude: Vec<String>,
        /// JSON planner request: address, netmask, netmaskRange, exclusions
        #[arg(long, value_name = "FILE", conflicts_with_all = ["cidr", "mask", "min"])]
        request: Option<PathBuf>,
        /// Refuse to enumerate more masks than this below the prefix
        #[arg(long)]
        max_depth: Option<u8>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Next free CIDR of a given size inside a parent
    Next {
        parent: String,
        size: u8,
        /// Existing allocation, repeatable
        #[arg(short, long = "used", value_name = "CIDR")]
        used: Vec<String>,
        /// Search from the end of the parent
        #[arg(long)]
        reverse: bool,
        /// Prefer the smallest free block that fits
        #[arg(long)]
        smallest: bool,
    },

    /// Validate a CIDR against a parent and groups of sibling allocations
    Check {
        cidr: String,
        #[arg(long)]
        parent: Option<String>,
        /// Sibling group as label=cidr,cidr; repeatable
        #[arg(short, long = "group", value_name = "LABEL=CIDRS")]
        group: Vec<String>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

/// Run one command and return what should be printed.
pub fn execute(command: &Command, config: &Config) -> Result<String, Box<dyn Error>> {
    log::info!("#Start execute() {command:?}");

    match command {
        Command::Overlap {
            cidr,
            existing,
            format,
        } => {
            let candidate = Ipv4::new(cidr)?;
            let existing = Ipv4::parse_all(existing)?;
            let overlaps = find_overlaps(candidate, &existing);
            match format {
                OutputFormat::Json => to_json(&json!({
                    "cidr": candidate,
                    "overlap": !overlaps.is_empty(),
                    "overlaps": overlaps,
                })),
                _ if overlaps.is_empty() => Ok("false".to_string()),
                _ => Ok(format!("true\n{}", overlaps.iter().join("\n"))),
            }
        }

        Command::Contains { child, parent } => {
            Ok(is_subnet_of(Ipv4::new(child)?, Ipv4::new(parent)?).to_string())
        }

        Command::Expand {
            cidr,
            usable,
            max_hosts,
            format,
        } => {
            let cidr = Ipv4::new(cidr)?;
            let limit = max_hosts.unwrap_or(config.max_expand_hosts);
            if cidr.size() > limit {
                return Err(format!(
                    "{cidr} has {} addresses, more than the limit of {limit}",
                    cidr.size()
                )
                .into());
            }
            let hosts = if *usable {
                usable_hosts(cidr)
            } else {
                expand_cidr(cidr)
            };
            match format {
                OutputFormat::Json => to_json(&hosts),
                _ => Ok(hosts.join("\n")),
            }
        }

        Command::Size { cidr, usable } => {
            let size = subnet_size(Ipv4::new(cidr)?);
            let size = if *usable { size.saturating_sub(2) } else { size };
            Ok(size.to_string())
        }

        Command::Plan {
            cidr,
            mask,
            min,
            exclude,
            request,
            max_depth,
            format,
        } => {
            let (target, min, max, existing) = match request {
                Some(path) => {
                    let query = read_planner_request(path)?;
                    let mut existing = query.exclusions.clone();
                    existing.extend(Ipv4::parse_all(exclude)?);
                    (
                        query.target()?,
                        query.netmask_range.min,
                        query.netmask_range.max,
                        existing,
                    )
                }
                None => {
                    let target = Ipv4::new(cidr.as_deref().ok_or("plan needs a CIDR")?)?;
                    let max = mask.ok_or("plan needs a target mask")?;
                    let min = min.unwrap_or(target.mask.saturating_add(1).min(max));
                    (target, min, max, Ipv4::parse_all(exclude)?)
                }
            };

            get_cidr_mask(max)?;
            let limit = max_depth.unwrap_or(config.planner_max_depth);
            if max > target.mask && max - target.mask > limit {
                return Err(format!(
                    "/{max} is {} masks below {target}, more than the limit of {limit}",
                    max - target.mask
                )
                .into());
            }

            let result = available_subnets_in_range(target, min, max, &existing);
            render_plan(&result, *format)
        }

        Command::Next {
            parent,
            size,
            used,
            reverse,
            smallest,
        } => {
            let parent = Ipv4::new(parent)?;
            let used = Ipv4::parse_all(used)?;
            next_available(parent, &used, *size, *reverse, *smallest)
                .map(|cidr| cidr.to_string())
                .ok_or_else(|| format!("No free /{size} left in {parent}").into())
        }

        Command::Check {
            cidr,
            parent,
            group,
            format,
        } => {
            let groups = group
                .iter()
                .map(|g| parse_group(g))
                .collect::<Result<Vec<_>, _>>()?;
            let groups: Vec<(&str, &[String])> = groups
                .iter()
                .map(|(label, cidrs)| (label.as_str(), cidrs.as_slice()))
                .collect();
            let check = check_cidr(cidr, parent.as_deref(), &groups)?;
            match format {
                OutputFormat::Json => to_json(&check),
                _ => Ok(check_summary(&check)),
            }
        }
    }
}

fn render_plan(result: &AvailableSubnets, format: OutputFormat) -> Result<String, Box<dyn Error>> {
    match format {
        OutputFormat::Json => to_json(result),
        OutputFormat::Csv => Ok(candidates_csv_report(result)),
        OutputFormat::Table => {
            let mut lines = vec![candidate_table_header()];
            lines.extend(result.subnets.iter().map(candidate_table_row));
            lines.push(format!(
                "# {} candidates, {} free, {} overlapping",
                result.subnets.len(),
                result.free().count(),
                result.subnets_excluded.len()
            ));
            Ok(lines.join("\n"))
        }
    }
}

/// Read a JSON [`PlannerQuery`], reporting the JSON path of any bad field.
pub fn read_planner_request(path: &Path) -> Result<PlannerQuery, Box<dyn Error>> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("Error reading planner request {}: {e}", path.display()))?;
    let mut deserializer = serde_json::Deserializer::from_str(&json);
    let query: PlannerQuery = serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        format!(
            "Error parsing planner request {}: path={} error={}",
            path.display(),
            e.path(),
            e
        )
    })?;
    log::info!("Read planner request from {}", path.display());
    Ok(query)
}

/// Parse `label=cidr,cidr` into its label and CIDR list. The list may be
/// empty.
pub fn parse_group(group: &str) -> Result<(String, Vec<String>), Box<dyn Error>> {
    let (label, cidrs) = group
        .split_once('=')
        .ok_or_else(|| format!("Group '{group}' must look like label=cidr,cidr"))?;
    let label = label.trim();
    if label.is_empty() {
        return Err(format!("Group '{group}' has no label").into());
    }
    let cidrs = cidrs
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect();
    Ok((label.to_string(), cidrs))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(args: &[&str]) -> Result<String, Box<dyn Error>> {
        let args = Args::try_parse_from(std::iter::once("ipam-cidr").chain(args.iter().copied()))?;
        execute(&args.command, &Config::default())
    }

    #[test]
    fn test_parse_group() {
        assert_eq!(
            parse_group("resv=10.0.0.0/24, 10.1.0.0/24").unwrap(),
            (
                "resv".to_string(),
                vec!["10.0.0.0/24".to_string(), "10.1.0.0/24".to_string()]
            )
        );
        assert_eq!(parse_group("vnets=").unwrap().1, Vec::<String>::new());
        assert!(parse_group("no-equals").is_err());
        assert!(parse_group("=10.0.0.0/24").is_err());
    }

    #[test]
    fn test_overlap_command() {
        assert_eq!(
            run(&["overlap", "10.0.0.0/24", "10.0.1.0/24"]).unwrap(),
            "false"
        );
        assert_eq!(
            run(&["overlap", "10.0.0.0/24", "10.0.1.0/24", "10.0.0.128/25"]).unwrap(),
            "true\n10.0.0.128/25"
        );
        let json = run(&["overlap", "10.0.0.0/24", "10.0.0.0/8", "--format", "json"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["overlap"], true);
        assert_eq!(value["overlaps"][0], "10.0.0.0/8");
    }

    #[test]
    fn test_contains_and_size() {
        assert_eq!(run(&["contains", "10.0.0.0/25", "10.0.0.0/24"]).unwrap(), "true");
        assert_eq!(run(&["size", "10.0.0.0/24"]).unwrap(), "256");
        assert_eq!(run(&["size", "10.0.0.0/24", "--usable"]).unwrap(), "254");
        assert_eq!(run(&["size", "10.0.0.0/32", "--usable"]).unwrap(), "0");
        assert!(run(&["size", "10.0.0.0/33"]).is_err());
    }

    #[test]
    fn test_expand_command() {
        assert_eq!(
            run(&["expand", "10.0.0.0/30", "--usable"]).unwrap(),
            "10.0.0.1\n10.0.0.2"
        );
        let err = run(&["expand", "10.0.0.0/8", "--max-hosts", "65536"]).unwrap_err();
        assert!(err.to_string().contains("more than the limit"));
    }

    #[test]
    fn test_plan_command() {
        let csv = run(&[
            "plan",
            "10.0.0.0/24",
            "26",
            "--exclude",
            "10.0.0.64/26",
            "--format",
            "csv",
        ])
        .unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[1], "10.0.0.0/25,10.0.0.0,25,128,true");

        let table = run(&["plan", "10.0.0.0/24", "26"]).unwrap();
        assert!(table.ends_with("# 6 candidates, 6 free, 0 overlapping"));

        let err = run(&["plan", "10.0.0.0/8", "24", "--max-depth", "10"]).unwrap_err();
        assert!(err.to_string().contains("more than the limit of 10"));

        let err = run(&["plan", "10.0.0.0/30", "40"]).unwrap_err();
        assert_eq!(err.to_string(), "Network length /40 is too long");
    }

    #[test]
    fn test_next_command() {
        assert_eq!(
            run(&["next", "10.0.0.0/24", "26", "--used", "10.0.0.0/26"]).unwrap(),
            "10.0.0.64/26"
        );
        assert_eq!(
            run(&["next", "10.0.0.0/24", "26", "--used", "10.0.0.0/26", "--reverse"]).unwrap(),
            "10.0.0.192/26"
        );
        assert!(run(&["next", "10.0.0.0/24", "24", "--used", "10.0.0.0/26"]).is_err());
    }

    #[test]
    fn test_check_command() {
        let json = run(&[
            "check",
            "10.0.4.0/24",
            "--parent",
            "10.0.0.0/16",
            "--group",
            "reservations=10.0.4.128/25",
            "--format",
            "json",
        ])
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["within_parent"], true);
        assert_eq!(value["conflicts"][0]["group"], "reservations");
        assert_eq!(value["conflicts"][0]["cidr"], "10.0.4.128/25");
    }
}
