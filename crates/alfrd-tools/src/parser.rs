//! Extract JSON objects from free-form LLM output
//!
//! Model output is not guaranteed to be pure JSON even at low temperature:
//! it may be wrapped in a markdown fence or surrounded by prose. Extraction is
//! an ordered chain of strategies, each returning `Some` on success.

use crate::error::ToolError;
use serde_json::{Map, Value};
use tracing::debug;

type Strategy = fn(&str) -> Option<Map<String, Value>>;

/// Strategies tried by [`parse_json_object`], in order
const STRATEGIES: [(&str, Strategy); 3] = [
    ("direct", parse_direct),
    ("fenced", parse_fenced),
    ("brace_span", parse_brace_span),
];

/// Parse a JSON object out of model output
///
/// Tries, in order: the whole text; the contents of a ```` ```json ```` fence;
/// the slice from the first `{` to the last `}`.
///
/// # Errors
///
/// Returns [`ToolError::Parse`] carrying the raw text if no strategy yields
/// a JSON object.
pub fn parse_json_object(raw: &str) -> Result<Map<String, Value>, ToolError> {
    for (name, strategy) in STRATEGIES {
        if let Some(object) = strategy(raw) {
            debug!("Parsed model response with '{}' strategy", name);
            return Ok(object);
        }
    }

    Err(ToolError::Parse {
        raw: raw.to_string(),
    })
}

/// Parse only the first-`{`-to-last-`}` span of model output
///
/// The single-strategy variant used where leading or trailing prose is the
/// only expected noise.
pub fn parse_brace_object(raw: &str) -> Result<Map<String, Value>, ToolError> {
    parse_brace_span(raw).ok_or_else(|| ToolError::Parse {
        raw: raw.to_string(),
    })
}

fn as_object(candidate: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(object)) => Some(object),
        _ => None,
    }
}

fn parse_direct(raw: &str) -> Option<Map<String, Value>> {
    as_object(raw.trim())
}

fn parse_fenced(raw: &str) -> Option<Map<String, Value>> {
    const OPEN: &str = "```json";
    const CLOSE: &str = "```";

    let start = raw.find(OPEN)? + OPEN.len();
    let rest = &raw[start..];
    let end = rest.find(CLOSE)?;
    as_object(rest[..end].trim())
}

fn parse_brace_span(raw: &str) -> Option<Map<String, Value>> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    as_object(&raw[start..=end])
}
