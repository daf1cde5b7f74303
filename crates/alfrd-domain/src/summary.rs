//! Summary result
//!
//! Summaries are open-ended: the model decides which structured fields suit a
//! document type, so the result is a JSON object rather than a fixed struct.
//! The `summary` key is always present.

use serde_json::{Map, Value};

/// Structured summary fields keyed by name
pub type SummaryResult = Map<String, Value>;

/// Key holding the one-line human summary
pub const SUMMARY_KEY: &str = "summary";

/// Key holding the failure description on a degraded summary
pub const ERROR_KEY: &str = "error";

/// The one-line summary text, if present as a string
pub fn summary_text(result: &SummaryResult) -> Option<&str> {
    result.get(SUMMARY_KEY).and_then(Value::as_str)
}

/// Whether the summary was produced by the fallback path
pub fn is_degraded(result: &SummaryResult) -> bool {
    result.contains_key(ERROR_KEY)
}

/// Structured fields only, without `summary` and `error`
pub fn structured_fields(result: &SummaryResult) -> Map<String, Value> {
    result
        .iter()
        .filter(|(k, _)| k.as_str() != SUMMARY_KEY && k.as_str() != ERROR_KEY)
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}
