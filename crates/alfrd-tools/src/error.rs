//! Error types for the document tools

use thiserror::Error;

/// Errors that can occur while classifying, summarizing or grouping documents
#[derive(Error, Debug)]
pub enum ToolError {
    /// No JSON object could be extracted from the model output
    #[error("No JSON object found in model response ({} chars)", .raw.len())]
    Parse {
        /// The raw model output, kept for diagnostics
        raw: String,
    },

    /// Required fields absent from an otherwise parsed response
    #[error("Missing required field(s): {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// LLM provider error
    #[error("LLM error: {0}")]
    Invocation(String),

    /// Classification failed for a document
    #[error("Classification failed for '{filename}': {source}")]
    Classification {
        /// Document filename
        filename: String,
        /// Underlying cause
        source: Box<ToolError>,
    },

    /// A single series detection attempt failed
    #[error("Series detection failed: {source}")]
    SeriesDetection {
        /// Underlying cause
        source: Box<ToolError>,
    },

    /// Every series detection attempt failed
    #[error("Series detection failed after {attempts} attempt(s): {source}")]
    RetriesExhausted {
        /// Number of attempts made
        attempts: u32,
        /// Failure of the final attempt
        source: Box<ToolError>,
    },

    /// Tool name not in the registry
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Tool arguments did not match the tool's input schema
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ToolError {
    /// The innermost error, looking through the labeled wrappers
    pub fn root_cause(&self) -> &ToolError {
        match self {
            ToolError::Classification { source, .. }
            | ToolError::SeriesDetection { source }
            | ToolError::RetriesExhausted { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(e: serde_json::Error) -> Self {
        ToolError::Json(e.to_string())
    }
}
