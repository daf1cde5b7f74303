//! Document summarization
//!
//! Summarization never fails. Every error degrades to a fallback result
//! carrying the failure in its `error` field.

use crate::config::ToolsConfig;
use crate::error::ToolError;
use crate::parser::parse_json_object;
use crate::prompt::{preview, truncate_chars, SummarizerPromptBuilder};
use crate::types::SummarizeRequest;
use alfrd_domain::summary::{ERROR_KEY, SUMMARY_KEY};
use alfrd_domain::{LlmProvider, SummaryResult};
use serde_json::Value;
use std::fmt::Display;
use tracing::{debug, info, warn};

/// Summarize a document into structured fields plus a one-line summary
///
/// Always returns a map containing `summary`. On failure the map is
/// `{summary: <leading source text>, error: <description>}`.
pub fn summarize<L>(llm: &L, request: &SummarizeRequest, config: &ToolsConfig) -> SummaryResult
where
    L: LlmProvider + ?Sized,
    L::Error: Display,
{
    match summarize_once(llm, request, config) {
        Ok(result) => {
            info!(
                "Summarized '{}' ({} structured fields)",
                request.filename,
                result.len().saturating_sub(1)
            );
            result
        }
        Err(e) => {
            warn!("Summarization failed for '{}', using fallback: {}", request.filename, e);
            fallback_summary(&request.extracted_text, config.summary_fallback_chars, &e)
        }
    }
}

fn summarize_once<L>(
    llm: &L,
    request: &SummarizeRequest,
    config: &ToolsConfig,
) -> Result<SummaryResult, ToolError>
where
    L: LlmProvider + ?Sized,
    L::Error: Display,
{
    let message = SummarizerPromptBuilder::new(request, config).build()?;
    debug!(
        "Summarizer prompt length: {} chars (structured data: {})",
        message.len(),
        request.llm_data.is_some()
    );

    let response = llm
        .invoke(&request.summarizer_prompt, &message, config.summarizer.params())
        .map_err(|e| ToolError::Invocation(e.to_string()))?;

    let mut result = parse_summary_response(&response);

    if !matches!(result.get(SUMMARY_KEY), Some(Value::String(_))) {
        let shown = preview(&Value::Object(result.clone()), 200);
        warn!(
            "Summary response for '{}' has no 'summary' string: {}",
            request.filename, shown
        );
        let leading = truncate_chars(&request.extracted_text, config.summary_fallback_chars);
        result.insert(SUMMARY_KEY.to_string(), Value::String(leading.to_string()));
    }

    Ok(result)
}

/// Parse model output, wrapping unparseable text as the summary itself
fn parse_summary_response(response: &str) -> SummaryResult {
    parse_json_object(response).unwrap_or_else(|_| {
        debug!("Summary response is not JSON, using raw text as summary");
        let mut result = SummaryResult::new();
        result.insert(
            SUMMARY_KEY.to_string(),
            Value::String(response.trim().to_string()),
        );
        result
    })
}

fn fallback_summary(extracted_text: &str, max_chars: usize, error: &ToolError) -> SummaryResult {
    let mut result = SummaryResult::new();
    result.insert(
        SUMMARY_KEY.to_string(),
        Value::String(truncate_chars(extracted_text, max_chars).to_string()),
    );
    result.insert(ERROR_KEY.to_string(), Value::String(error.to_string()));
    result
}
