//! Callable tool surface for an LLM orchestration layer
//!
//! Each document operation is exposed under a stable name with a JSON
//! Schema describing its arguments. Prompts default to the registry's
//! [`PromptLibrary`] and may be overridden per call.

use crate::classifier::classify;
use crate::config::{PromptLibrary, ToolsConfig};
use crate::error::ToolError;
use crate::series::detect_with_retry;
use crate::summarizer::summarize;
use crate::types::{ClassifyRequest, SeriesRequest, SummarizeRequest};
use alfrd_domain::{LlmProvider, SeriesCandidate};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::BTreeSet;
use std::fmt::Display;
use std::sync::Arc;
use tracing::debug;

/// Tool name for document classification
pub const CLASSIFY_DOCUMENT: &str = "classify_document";

/// Tool name for document summarization
pub const SUMMARIZE_DOCUMENT: &str = "summarize_document";

/// Tool name for series detection
pub const DETECT_SERIES: &str = "detect_series";

/// Tool definition advertised to clients
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    /// Tool name
    pub name: String,
    /// Tool description
    pub description: String,
    /// Input schema (JSON Schema)
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Arguments for `classify_document`
#[derive(Debug, Deserialize)]
pub struct ClassifyParams {
    /// Text extracted from the document
    pub extracted_text: String,
    /// Original filename
    pub filename: String,
    /// Classifier instructions (defaults to the library prompt)
    #[serde(default)]
    pub classifier_prompt: Option<String>,
    /// Known document types (defaults to the registry's set)
    #[serde(default)]
    pub known_types: Option<BTreeSet<String>>,
    /// Existing tags, most frequently used first
    #[serde(default)]
    pub existing_tags: Vec<String>,
}

/// Arguments for `summarize_document`
#[derive(Debug, Deserialize)]
pub struct SummarizeParams {
    /// Text extracted from the document
    pub extracted_text: String,
    /// Original filename
    pub filename: String,
    /// Classified document type
    pub document_type: String,
    /// Summarizer prompt (defaults to the library prompt for the type)
    #[serde(default)]
    pub summarizer_prompt: Option<String>,
    /// Structured extraction output
    #[serde(default)]
    pub llm_data: Option<Value>,
}

/// Arguments for `detect_series`
#[derive(Debug, Deserialize)]
pub struct DetectSeriesParams {
    /// One-line document summary
    pub summary: String,
    /// Classified document type
    pub document_type: String,
    /// Structured fields from the summarizer
    #[serde(default)]
    pub structured_data: Map<String, Value>,
    /// Classification tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Series prompt (defaults to the library prompt)
    #[serde(default)]
    pub series_prompt: Option<String>,
    /// Known series
    #[serde(default)]
    pub existing_series: Vec<SeriesCandidate>,
}

/// Definitions of every tool the registry can call
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: CLASSIFY_DOCUMENT.to_string(),
            description: "Classify a document into a known type, or suggest a new type".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "extracted_text": {"type": "string", "description": "Text extracted from the document"},
                    "filename": {"type": "string", "description": "Original filename"},
                    "classifier_prompt": {"type": "string", "description": "Classifier instructions override"},
                    "known_types": {"type": "array", "items": {"type": "string"}, "description": "Known document types"},
                    "existing_tags": {"type": "array", "items": {"type": "string"}, "description": "Existing tags, most used first"}
                },
                "required": ["extracted_text", "filename"]
            }),
        },
        ToolDefinition {
            name: SUMMARIZE_DOCUMENT.to_string(),
            description: "Extract a summary and structured fields from a classified document".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "extracted_text": {"type": "string", "description": "Text extracted from the document"},
                    "filename": {"type": "string", "description": "Original filename"},
                    "document_type": {"type": "string", "description": "Classified document type"},
                    "summarizer_prompt": {"type": "string", "description": "Summarizer prompt override"},
                    "llm_data": {"description": "Structured extraction output, preferred over extracted_text"}
                },
                "required": ["extracted_text", "filename", "document_type"]
            }),
        },
        ToolDefinition {
            name: DETECT_SERIES.to_string(),
            description: "Assign a document to a recurring series, reusing known series where they match".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "summary": {"type": "string", "description": "One-line document summary"},
                    "document_type": {"type": "string", "description": "Classified document type"},
                    "structured_data": {"type": "object", "description": "Structured fields from the summarizer"},
                    "tags": {"type": "array", "items": {"type": "string"}},
                    "series_prompt": {"type": "string", "description": "Series prompt override"},
                    "existing_series": {
                        "type": "array",
                        "description": "Known series to reuse",
                        "items": {
                            "type": "object",
                            "properties": {
                                "entity": {"type": "string"},
                                "series_type": {"type": "string"}
                            },
                            "required": ["entity", "series_type"]
                        }
                    }
                },
                "required": ["summary", "document_type"]
            }),
        },
    ]
}

/// Dispatches tool calls by name
pub struct ToolRegistry<L>
where
    L: LlmProvider,
{
    llm: Arc<L>,
    config: ToolsConfig,
    prompts: PromptLibrary,
    known_types: BTreeSet<String>,
}

impl<L> ToolRegistry<L>
where
    L: LlmProvider + Send + Sync,
    L::Error: Display,
{
    /// Create a registry
    pub fn new(llm: L, config: ToolsConfig, prompts: PromptLibrary) -> Self {
        Self {
            llm: Arc::new(llm),
            config,
            prompts,
            known_types: BTreeSet::new(),
        }
    }

    /// Set the document types used when a call does not supply its own
    pub fn with_known_types<I, S>(mut self, known_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known_types = known_types.into_iter().map(Into::into).collect();
        self
    }

    /// Definitions of the callable tools
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        tool_definitions()
    }

    /// Call a tool by name
    ///
    /// # Errors
    ///
    /// [`ToolError::UnknownTool`] for an unrecognized name,
    /// [`ToolError::InvalidParams`] when the arguments do not deserialize,
    /// otherwise the operation's own error.
    pub fn call(&self, name: &str, arguments: Value) -> Result<Value, ToolError> {
        debug!("Calling tool '{}'", name);

        match name {
            CLASSIFY_DOCUMENT => self.call_classify(parse_params(arguments)?),
            SUMMARIZE_DOCUMENT => self.call_summarize(parse_params(arguments)?),
            DETECT_SERIES => self.call_detect_series(parse_params(arguments)?),
            _ => Err(ToolError::UnknownTool(name.to_string())),
        }
    }

    fn call_classify(&self, params: ClassifyParams) -> Result<Value, ToolError> {
        let request = ClassifyRequest {
            extracted_text: params.extracted_text,
            filename: params.filename,
            classifier_prompt: params
                .classifier_prompt
                .unwrap_or_else(|| self.prompts.classifier.clone()),
            known_types: params.known_types.unwrap_or_else(|| self.known_types.clone()),
            existing_tags: params.existing_tags,
        };
        let result = classify(self.llm.as_ref(), &request, &self.config)?;
        Ok(serde_json::to_value(result)?)
    }

    fn call_summarize(&self, params: SummarizeParams) -> Result<Value, ToolError> {
        let summarizer_prompt = params
            .summarizer_prompt
            .unwrap_or_else(|| self.prompts.summarizer_for(&params.document_type).to_string());
        let request = SummarizeRequest {
            extracted_text: params.extracted_text,
            filename: params.filename,
            document_type: params.document_type,
            summarizer_prompt,
            llm_data: params.llm_data,
        };
        Ok(Value::Object(summarize(self.llm.as_ref(), &request, &self.config)))
    }

    fn call_detect_series(&self, params: DetectSeriesParams) -> Result<Value, ToolError> {
        let request = SeriesRequest {
            summary: params.summary,
            document_type: params.document_type,
            structured_data: params.structured_data,
            tags: params.tags,
            series_prompt: params
                .series_prompt
                .unwrap_or_else(|| self.prompts.series.clone()),
            existing_series: params.existing_series,
        };
        let result = detect_with_retry(
            self.llm.as_ref(),
            &request,
            &self.config,
            self.config.series_max_retries,
        )?;
        Ok(serde_json::to_value(result)?)
    }
}

fn parse_params<T: DeserializeOwned>(arguments: Value) -> Result<T, ToolError> {
    serde_json::from_value(arguments).map_err(|e| ToolError::InvalidParams(e.to_string()))
}
