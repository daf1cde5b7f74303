//! Document classification
//!
//! Assigns a document to one of the known types, or proposes a new type.
//! Every failure is surfaced to the caller.

use crate::config::ToolsConfig;
use crate::error::ToolError;
use crate::parser::parse_json_object;
use crate::prompt::{ClassifierPromptBuilder, CLASSIFIER_SYSTEM_PROMPT};
use crate::types::ClassifyRequest;
use alfrd_domain::{clamp_confidence, ClassificationResult, LlmProvider};
use serde_json::{Map, Value};
use std::fmt::Display;
use tracing::{debug, error, info};

/// Confidence assumed when the model omits one
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Reasoning placeholder when the model omits one
pub const DEFAULT_REASONING: &str = "No reasoning provided";

/// Classify a document
///
/// # Errors
///
/// Returns [`ToolError::Classification`] naming the file when the LLM call
/// fails, no JSON object can be parsed, or `document_type` is missing.
pub fn classify<L>(
    llm: &L,
    request: &ClassifyRequest,
    config: &ToolsConfig,
) -> Result<ClassificationResult, ToolError>
where
    L: LlmProvider + ?Sized,
    L::Error: Display,
{
    info!(
        "Classifying '{}' ({} chars, {} known types)",
        request.filename,
        request.extracted_text.chars().count(),
        request.known_types.len()
    );

    match classify_once(llm, request, config) {
        Ok(result) => {
            info!(
                "Classified '{}' as '{}' (confidence {:.2}{})",
                request.filename,
                result.document_type,
                result.confidence,
                result
                    .suggested_type
                    .as_deref()
                    .map(|s| format!(", suggested new type '{}'", s))
                    .unwrap_or_default()
            );
            Ok(result)
        }
        Err(e) => {
            error!("Classification failed for '{}': {}", request.filename, e);
            Err(ToolError::Classification {
                filename: request.filename.clone(),
                source: Box::new(e),
            })
        }
    }
}

fn classify_once<L>(
    llm: &L,
    request: &ClassifyRequest,
    config: &ToolsConfig,
) -> Result<ClassificationResult, ToolError>
where
    L: LlmProvider + ?Sized,
    L::Error: Display,
{
    let message = ClassifierPromptBuilder::new(request, config).build();
    debug!("Classifier prompt length: {} chars", message.len());

    let response = llm
        .invoke(CLASSIFIER_SYSTEM_PROMPT, &message, config.classifier.params())
        .map_err(|e| ToolError::Invocation(e.to_string()))?;
    debug!("Classifier response length: {} chars", response.len());

    let object = parse_json_object(&response)?;
    classification_from_json(&object)
}

/// Validate a parsed classifier response
///
/// Only `document_type` is required. Confidence defaults to
/// [`DEFAULT_CONFIDENCE`] and is clamped into `[0, 1]`; tags are best-effort.
pub(crate) fn classification_from_json(
    object: &Map<String, Value>,
) -> Result<ClassificationResult, ToolError> {
    let document_type = non_empty_str(object, "document_type")
        .ok_or_else(|| ToolError::MissingFields(vec!["document_type".to_string()]))?;

    let confidence = object
        .get("confidence")
        .and_then(number_like)
        .map(clamp_confidence)
        .unwrap_or(DEFAULT_CONFIDENCE);

    let reasoning = non_empty_str(object, "reasoning")
        .unwrap_or(DEFAULT_REASONING)
        .to_string();

    let tags = object
        .get("tags")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok(ClassificationResult {
        document_type: document_type.to_string(),
        confidence,
        reasoning,
        tags,
        suggested_type: non_empty_str(object, "suggested_type").map(str::to_string),
        suggestion_reasoning: non_empty_str(object, "suggestion_reasoning").map(str::to_string),
    })
}

fn non_empty_str<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

// Models occasionally quote numbers ("0.9")
fn number_like(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
