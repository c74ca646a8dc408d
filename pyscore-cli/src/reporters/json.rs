//! JSON reporter
//!
//! Outputs reports as pretty-printed JSON for piping to jq or other tools.

use crate::models::Report;
use anyhow::Result;

/// Render one report as an object, several as an array
pub fn render(reports: &[Report]) -> Result<String> {
    match reports {
        [single] => Ok(serde_json::to_string_pretty(single)?),
        _ => Ok(serde_json::to_string_pretty(reports)?),
    }
}
