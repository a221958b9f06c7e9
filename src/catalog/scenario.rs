//! Scenario and step records
//!
//! These are transient: produced by a seed parse, rewritten, serialized
//! into a migration and dropped.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Role;

/// One named QA test case
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scenario {
    pub role: Role,
    pub name: String,
    pub steps: Vec<Step>,
}

/// One instruction / expected-outcome pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub index: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    pub instruction: String,
    pub expected_outcome: String,
    #[serde(default)]
    pub capture_on_fail: bool,
    #[serde(default)]
    pub capture_on_pass: bool,
    /// Keys this tool doesn't interpret (`actor`, `tabIndicator`, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Step {
    /// Build a step that captures a screenshot on failure
    pub fn new(index: u32, instruction: &str, expected_outcome: &str) -> Self {
        Self {
            index,
            route: None,
            instruction: instruction.to_string(),
            expected_outcome: expected_outcome.to_string(),
            capture_on_fail: true,
            capture_on_pass: false,
            extra: Map::new(),
        }
    }

    /// Attach the route the step navigates to
    pub fn with_route(mut self, route: &str) -> Self {
        self.route = Some(route.to_string());
        self
    }
}

/// Decode a steps JSON array, skipping elements that aren't step objects
///
/// Returns `None` when the text isn't a JSON array at all.
pub fn steps_from_json(text: &str) -> Option<Vec<Step>> {
    let Value::Array(items) = serde_json::from_str::<Value>(text).ok()? else {
        return None;
    };

    let steps = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<Step>(item) {
            Ok(step) => Some(step),
            Err(e) => {
                tracing::debug!(error = %e, "skipping malformed step");
                None
            }
        })
        .collect();
    Some(steps)
}
