//! Request types for the document tools
//!
//! Each request is a snapshot: known types, tags and series are passed in by
//! the caller rather than read from storage.

use alfrd_domain::SeriesCandidate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Request to classify a document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyRequest {
    /// Text extracted from the document (OCR or native text)
    pub extracted_text: String,

    /// Original filename
    pub filename: String,

    /// Dynamic classifier instructions
    pub classifier_prompt: String,

    /// Document types the system already knows
    pub known_types: BTreeSet<String>,

    /// Existing tags, most frequently used first
    #[serde(default)]
    pub existing_tags: Vec<String>,
}

/// Request to detect the series a document belongs to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesRequest {
    /// One-line document summary
    pub summary: String,

    /// Classified document type
    pub document_type: String,

    /// Structured fields extracted by the summarizer
    #[serde(default)]
    pub structured_data: Map<String, Value>,

    /// Classification tags
    #[serde(default)]
    pub tags: Vec<String>,

    /// Series detector system prompt
    pub series_prompt: String,

    /// Series already known, for deduplication (empty when none exist)
    #[serde(default)]
    pub existing_series: Vec<SeriesCandidate>,
}

/// Request to summarize a document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeRequest {
    /// Text extracted from the document
    pub extracted_text: String,

    /// Original filename
    pub filename: String,

    /// Classified document type
    pub document_type: String,

    /// Type-specific summarizer system prompt
    pub summarizer_prompt: String,

    /// Richer structured extraction output (e.g. OCR blocks with geometry)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_data: Option<Value>,
}
