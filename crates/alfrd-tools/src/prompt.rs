//! LLM prompt construction for classification, series detection and summaries

use crate::config::ToolsConfig;
use crate::types::{ClassifyRequest, SeriesRequest, SummarizeRequest};
use alfrd_domain::SeriesCandidate;
use serde_json::Value;

/// System prompt for classification; the dynamic instructions go in the message
pub const CLASSIFIER_SYSTEM_PROMPT: &str =
    "You are a document classification assistant. Respond only with a single JSON object.";

/// Truncate to at most `max_chars` characters, on a char boundary
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Builds the classification user message
pub struct ClassifierPromptBuilder<'a> {
    request: &'a ClassifyRequest,
    max_text_chars: usize,
    max_tags: usize,
}

impl<'a> ClassifierPromptBuilder<'a> {
    /// Create a new builder with the limits from `config`
    pub fn new(request: &'a ClassifyRequest, config: &ToolsConfig) -> Self {
        Self {
            request,
            max_text_chars: config.max_text_chars,
            max_tags: config.max_tags,
        }
    }

    /// Build the complete classification message
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(self.request.classifier_prompt.trim());
        prompt.push_str("\n\n");

        prompt.push_str("Known document types:\n");
        if self.request.known_types.is_empty() {
            prompt.push_str("(none yet)\n");
        }
        for doc_type in &self.request.known_types {
            prompt.push_str(&format!("- {}\n", doc_type));
        }
        prompt.push('\n');

        // Most frequent first, so truncation keeps the most useful tags
        let tags: Vec<&str> = self
            .request
            .existing_tags
            .iter()
            .take(self.max_tags)
            .map(String::as_str)
            .collect();
        prompt.push_str("Existing tags (reuse these when they apply):\n");
        if tags.is_empty() {
            prompt.push_str("(none yet)\n\n");
        } else {
            prompt.push_str(&tags.join(", "));
            prompt.push_str("\n\n");
        }

        prompt.push_str(&format!("Filename: {}\n\n", self.request.filename));

        prompt.push_str("Document text:\n---\n");
        prompt.push_str(truncate_chars(&self.request.extracted_text, self.max_text_chars));
        prompt.push_str("\n---\n\n");

        prompt.push_str(CLASSIFIER_OUTPUT_FORMAT);
        prompt
    }
}

/// Builds the series detection user message
pub struct SeriesPromptBuilder<'a> {
    request: &'a SeriesRequest,
}

impl<'a> SeriesPromptBuilder<'a> {
    /// Create a new builder
    pub fn new(request: &'a SeriesRequest) -> Self {
        Self { request }
    }

    /// Build the complete series detection message
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(&format!("Document summary: {}\n", self.request.summary));
        prompt.push_str(&format!("Document type: {}\n", self.request.document_type));

        let structured = serde_json::to_string_pretty(&self.request.structured_data)
            .unwrap_or_else(|_| "{}".to_string());
        prompt.push_str("Structured data:\n");
        prompt.push_str(&structured);
        prompt.push('\n');

        if self.request.tags.is_empty() {
            prompt.push_str("Tags: (none)\n\n");
        } else {
            prompt.push_str(&format!("Tags: {}\n\n", self.request.tags.join(", ")));
        }

        if !self.request.existing_series.is_empty() {
            prompt.push_str(&existing_series_section(&self.request.existing_series));
        }

        prompt.push_str(SERIES_OUTPUT_FORMAT);
        prompt
    }
}

/// Enumerates every known series and requires exact reuse
fn existing_series_section(existing: &[SeriesCandidate]) -> String {
    let mut section = String::from(
        "Existing series:\n\
         If this document plausibly belongs to one of these series, you MUST reuse its \
         entity and series_type EXACTLY as written below. Do not invent a new name or \
         type that is a near-duplicate of an existing one.\n",
    );
    for candidate in existing {
        section.push_str(&format!(
            "- entity: \"{}\", series_type: \"{}\"\n",
            candidate.entity, candidate.series_type
        ));
    }
    section.push('\n');
    section
}

/// Builds the summarization user message
pub struct SummarizerPromptBuilder<'a> {
    request: &'a SummarizeRequest,
    max_text_chars: usize,
}

impl<'a> SummarizerPromptBuilder<'a> {
    /// Create a new builder with the limits from `config`
    pub fn new(request: &'a SummarizeRequest, config: &ToolsConfig) -> Self {
        Self {
            request,
            max_text_chars: config.max_text_chars,
        }
    }

    /// Build the complete summarization message
    ///
    /// Structured extraction data takes precedence over flat text; spatial
    /// layout improves field extraction for forms and bills.
    pub fn build(&self) -> Result<String, serde_json::Error> {
        let mut prompt = String::new();

        prompt.push_str(&format!("Filename: {}\n", self.request.filename));
        prompt.push_str(&format!("Document type: {}\n\n", self.request.document_type));

        match &self.request.llm_data {
            Some(data) if !data.is_null() => {
                let serialized = serde_json::to_string(data)?;
                prompt.push_str("Document content (structured extraction data, JSON):\n---\n");
                prompt.push_str(truncate_chars(&serialized, self.max_text_chars));
            }
            _ => {
                prompt.push_str("Document text:\n---\n");
                prompt.push_str(truncate_chars(&self.request.extracted_text, self.max_text_chars));
            }
        }
        prompt.push_str("\n---\n\n");

        prompt.push_str(SUMMARY_OUTPUT_FORMAT);
        Ok(prompt)
    }
}

/// Render a JSON value compactly for log lines
pub(crate) fn preview(value: &Value, max_chars: usize) -> String {
    let rendered = value.to_string();
    truncate_chars(&rendered, max_chars).to_string()
}

const CLASSIFIER_OUTPUT_FORMAT: &str = r#"Choose document_type from the known types whenever one fits.
If none fits well, use the closest known type for document_type and propose a new snake_case type in suggested_type, explaining why in suggestion_reasoning.

Output format (JSON object only, no additional text):
{
  "document_type": "one of the known types",
  "confidence": 0.0-1.0,
  "reasoning": "why this type was chosen",
  "tags": ["tag1", "tag2"],
  "suggested_type": "new_type_name or null",
  "suggestion_reasoning": "why a new type is needed, or null"
}"#;

const SERIES_OUTPUT_FORMAT: &str = r#"Output format (JSON object only, no additional text):
{
  "entity": "issuing organization or person",
  "series_type": "snake_case_series_type",
  "frequency": "monthly | quarterly | annual | weekly | irregular | unknown",
  "title": "short human-readable series title",
  "description": "one sentence describing the series",
  "metadata": {"account_number": "...", "...": "..."}
}"#;

const SUMMARY_OUTPUT_FORMAT: &str = r#"Return a JSON object with:
- "summary": ONE concise sentence describing the document. For bills and invoices include the vendor, the amount and the due date.
- any additional fields appropriate to this document type (for example vendor, amount, due_date, account_number, period_start, period_end, line_items).

Output JSON only, no additional text."#;
