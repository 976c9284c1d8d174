//! Runtime configuration read from the environment (and `.env`).

use std::env;
use std::error::Error;
use std::str::FromStr;

/// Default log4rs configuration file.
pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";
/// Largest expansion the CLI will print (a /16).
pub const DEFAULT_MAX_EXPAND_HOSTS: u64 = 65536;
/// The planner offers at most ten masks below the planned prefix.
pub const DEFAULT_PLANNER_MAX_DEPTH: u8 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path of the log4rs YAML file.
    pub log_config: String,
    /// Refuse to expand CIDRs with more addresses than this.
    pub max_expand_hosts: u64,
    /// Refuse planner runs more than this many masks below the target.
    pub planner_max_depth: u8,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_config: DEFAULT_LOG_CONFIG.to_string(),
            max_expand_hosts: DEFAULT_MAX_EXPAND_HOSTS,
            planner_max_depth: DEFAULT_PLANNER_MAX_DEPTH,
        }
    }
}

impl Config {
    /// Read `IPAM_LOG_CONFIG`, `IPAM_MAX_EXPAND_HOSTS` and
    /// `IPAM_PLANNER_MAX_DEPTH`, keeping defaults for unset variables.
    pub fn from_env() -> Result<Config, Box<dyn Error>> {
        Config::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Config, Box<dyn Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        Ok(Config {
            log_config: lookup("IPAM_LOG_CONFIG").unwrap_or(defaults.log_config),
            max_expand_hosts: parse_var(&lookup, "IPAM_MAX_EXPAND_HOSTS")?
                .unwrap_or(defaults.max_expand_hosts),
            planner_max_depth: parse_var(&lookup, "IPAM_PLANNER_MAX_DEPTH")?
                .unwrap_or(defaults.planner_max_depth),
        })
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, Box<dyn Error>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| format!("Invalid value for {key}: '{value}'").into()),
    }
}
