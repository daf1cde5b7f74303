//! Recurring series detection
//!
//! The detector has no matching algorithm of its own. Consistency across
//! documents comes from surfacing every known `(entity, series_type)` pair in
//! the prompt and requiring exact reuse, with zero-temperature sampling so the
//! same entity keeps producing the same identity.

use crate::config::ToolsConfig;
use crate::error::ToolError;
use crate::parser::parse_brace_object;
use crate::prompt::SeriesPromptBuilder;
use crate::types::SeriesRequest;
use alfrd_domain::{LlmProvider, SeriesDetectionResult};
use serde_json::{Map, Value};
use std::fmt::Display;
use tracing::{debug, info, warn};

/// Confidence reported for every series assignment
///
/// Series confidence is not modeled per call; the model's own value, if any,
/// is ignored.
pub const SERIES_CONFIDENCE: f64 = 0.85;

/// Frequency used when the model omits one
pub const DEFAULT_FREQUENCY: &str = "unknown";

const REQUIRED_FIELDS: [&str; 3] = ["entity", "series_type", "title"];

/// Detect the series a document belongs to (single attempt)
///
/// # Errors
///
/// Returns [`ToolError::SeriesDetection`] wrapping the LLM, parse or
/// missing-field failure.
pub fn detect<L>(
    llm: &L,
    request: &SeriesRequest,
    config: &ToolsConfig,
) -> Result<SeriesDetectionResult, ToolError>
where
    L: LlmProvider + ?Sized,
    L::Error: Display,
{
    detect_once(llm, request, config).map_err(|e| ToolError::SeriesDetection {
        source: Box::new(e),
    })
}

/// Detect the series, retrying on any failure
///
/// Makes up to `max_retries + 1` attempts with no delay between them. Every
/// failure kind is retried, including parse and missing-field failures.
///
/// # Errors
///
/// Returns [`ToolError::RetriesExhausted`] with the final attempt's error
/// once every attempt has failed.
pub fn detect_with_retry<L>(
    llm: &L,
    request: &SeriesRequest,
    config: &ToolsConfig,
    max_retries: u32,
) -> Result<SeriesDetectionResult, ToolError>
where
    L: LlmProvider + ?Sized,
    L::Error: Display,
{
    let attempts = max_retries.saturating_add(1);
    let mut last_error = None;

    for attempt in 1..=attempts {
        match detect(llm, request, config) {
            Ok(result) => {
                if attempt > 1 {
                    info!("Series detection succeeded on attempt {}/{}", attempt, attempts);
                }
                return Ok(result);
            }
            Err(e) => {
                warn!("Series detection attempt {}/{} failed: {}", attempt, attempts, e);
                last_error = Some(e);
            }
        }
    }

    let source = last_error
        .unwrap_or_else(|| ToolError::Invocation("no series detection attempt was made".to_string()));
    Err(ToolError::RetriesExhausted {
        attempts,
        source: Box::new(source),
    })
}

fn detect_once<L>(
    llm: &L,
    request: &SeriesRequest,
    config: &ToolsConfig,
) -> Result<SeriesDetectionResult, ToolError>
where
    L: LlmProvider + ?Sized,
    L::Error: Display,
{
    let message = SeriesPromptBuilder::new(request).build();
    debug!(
        "Series prompt length: {} chars ({} existing series)",
        message.len(),
        request.existing_series.len()
    );

    let response = llm
        .invoke(&request.series_prompt, &message, config.series.params())
        .map_err(|e| ToolError::Invocation(e.to_string()))?;

    let object = parse_brace_object(&response)?;
    let result = series_from_json(object)?;

    let reused = request
        .existing_series
        .iter()
        .any(|s| s.entity == result.entity && s.series_type == result.series_type);
    info!(
        "Detected series '{}' / '{}' ({})",
        result.entity,
        result.series_type,
        if reused { "existing" } else { "new" }
    );

    Ok(result)
}

/// Validate a parsed series response
pub(crate) fn series_from_json(
    mut object: Map<String, Value>,
) -> Result<SeriesDetectionResult, ToolError> {
    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|field| required_str(&object, field).is_none())
        .map(|field| field.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ToolError::MissingFields(missing));
    }

    let field = |object: &Map<String, Value>, key: &str| {
        required_str(object, key).unwrap_or_default().to_string()
    };

    let metadata = match object.remove("metadata") {
        Some(Value::Object(metadata)) => metadata,
        _ => Map::new(),
    };

    Ok(SeriesDetectionResult {
        entity: field(&object, "entity"),
        series_type: field(&object, "series_type"),
        frequency: required_str(&object, "frequency")
            .unwrap_or(DEFAULT_FREQUENCY)
            .to_string(),
        title: field(&object, "title"),
        description: object
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        metadata,
        confidence: SERIES_CONFIDENCE,
    })
}

fn required_str<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
