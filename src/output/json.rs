//! JSON output.

use serde::Serialize;
use std::error::Error;

/// Pretty-print any result as JSON.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, Box<dyn Error>> {
    serde_json::to_string_pretty(value).map_err(|e| format!("Error serializing JSON: {e}").into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Ipv4;
    use crate::processing::available_subnets_in_range;

    #[test]
    fn test_to_json_planner() {
        let target = Ipv4::new("10.0.0.0/30").unwrap();
        let result = available_subnets_in_range(target, 31, 31, &[]);
        let json = to_json(&result).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["subnets"][1]["cidr"], "10.0.0.2/31");
        assert_eq!(value["subnets"][1]["mask"], 31);
        assert!(value["subnetsExcluded"].as_array().unwrap().is_empty());
    }
}
