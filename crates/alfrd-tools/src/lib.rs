//! ALFRD document tools
//!
//! Turns extracted document text into a classification, a structured
//! summary and a recurring-series assignment, using an LLM behind the
//! [`LlmProvider`](alfrd_domain::LlmProvider) trait.
//!
//! # Architecture
//!
//! ```text
//! Text → Classifier → Summarizer → Series Detector → ProcessedDocument
//! ```
//!
//! Every tool is a pure function of its request: known types, tags and
//! series are supplied by the caller as a snapshot. Classification and
//! series detection surface their failures; summarization degrades to a
//! fallback summary instead.
//!
//! # Example Usage
//!
//! ```
//! use alfrd_llm::MockProvider;
//! use alfrd_tools::{DocumentInput, DocumentProcessor, ProcessingContext, PromptLibrary, ToolsConfig};
//!
//! let llm = MockProvider::new(
//!     r#"{"entity": "PG&E", "series_type": "monthly_utility_bill", "title": "PG&E Bills"}"#,
//! );
//! llm.push_response(r#"{"document_type": "bill", "confidence": 0.9}"#);
//! llm.push_response(r#"{"summary": "PG&E bill, $120.45 due Feb 5"}"#);
//!
//! let processor = DocumentProcessor::new(llm, ToolsConfig::default(), PromptLibrary::default());
//! let document = DocumentInput {
//!     filename: "pge.pdf".to_string(),
//!     extracted_text: "PG&E ... Amount due $120.45".to_string(),
//!     llm_data: None,
//! };
//!
//! let processed = processor.process(&document, &ProcessingContext::default()).unwrap();
//! assert_eq!(processed.classification.document_type, "bill");
//! assert_eq!(processed.series.series_type, "monthly_utility_bill");
//! ```

#![warn(missing_docs)]

mod classifier;
mod config;
mod error;
mod parser;
mod pipeline;
mod prompt;
pub mod registry;
mod series;
mod summarizer;
mod types;

#[cfg(test)]
mod tests;

pub use classifier::{classify, DEFAULT_CONFIDENCE, DEFAULT_REASONING};
pub use config::{LlmSettings, PromptLibrary, ToolsConfig};
pub use error::ToolError;
pub use parser::{parse_brace_object, parse_json_object};
pub use pipeline::{DocumentInput, DocumentProcessor, ProcessedDocument, ProcessingContext};
pub use prompt::{truncate_chars, CLASSIFIER_SYSTEM_PROMPT};
pub use registry::{tool_definitions, ToolDefinition, ToolRegistry};
pub use series::{detect, detect_with_retry, DEFAULT_FREQUENCY, SERIES_CONFIDENCE};
pub use summarizer::summarize;
pub use types::{ClassifyRequest, SeriesRequest, SummarizeRequest};
