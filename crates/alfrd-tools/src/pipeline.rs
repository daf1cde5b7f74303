//! End-to-end processing of a single document

use crate::classifier::classify;
use crate::config::{PromptLibrary, ToolsConfig};
use crate::error::ToolError;
use crate::series::detect_with_retry;
use crate::summarizer::summarize;
use crate::types::{ClassifyRequest, SeriesRequest, SummarizeRequest};
use alfrd_domain::summary::{structured_fields, summary_text};
use alfrd_domain::{
    ClassificationResult, LlmProvider, SeriesCandidate, SeriesDetectionResult, SummaryResult,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt::Display;
use std::sync::Arc;
use tracing::info;

/// A document ready for processing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentInput {
    /// Original filename
    pub filename: String,

    /// Text extracted from the document
    pub extracted_text: String,

    /// Richer structured extraction output, preferred by the summarizer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_data: Option<Value>,
}

/// Snapshot of what the system already knows, taken by the caller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingContext {
    /// Known document types
    pub known_types: BTreeSet<String>,

    /// Existing tags, most frequently used first
    pub existing_tags: Vec<String>,

    /// Known series
    pub existing_series: Vec<SeriesCandidate>,
}

/// Everything the tools produced for one document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedDocument {
    /// Classification outcome
    pub classification: ClassificationResult,

    /// Summary and structured fields
    pub summary: SummaryResult,

    /// Series assignment
    pub series: SeriesDetectionResult,
}

/// Runs classification, summarization and series detection in order
pub struct DocumentProcessor<L>
where
    L: LlmProvider,
{
    llm: Arc<L>,
    config: ToolsConfig,
    prompts: PromptLibrary,
}

impl<L> DocumentProcessor<L>
where
    L: LlmProvider + Send + Sync,
    L::Error: Display,
{
    /// Create a new processor
    pub fn new(llm: L, config: ToolsConfig, prompts: PromptLibrary) -> Self {
        Self::from_shared(Arc::new(llm), config, prompts)
    }

    /// Create a processor sharing an existing provider
    pub fn from_shared(llm: Arc<L>, config: ToolsConfig, prompts: PromptLibrary) -> Self {
        Self {
            llm,
            config,
            prompts,
        }
    }

    /// Process one document
    ///
    /// # Errors
    ///
    /// Fails when classification fails or every series detection attempt
    /// fails. Summarization degrades instead of failing.
    pub fn process(
        &self,
        document: &DocumentInput,
        context: &ProcessingContext,
    ) -> Result<ProcessedDocument, ToolError> {
        let llm = self.llm.as_ref();

        let classification = classify(
            llm,
            &ClassifyRequest {
                extracted_text: document.extracted_text.clone(),
                filename: document.filename.clone(),
                classifier_prompt: self.prompts.classifier.clone(),
                known_types: context.known_types.clone(),
                existing_tags: context.existing_tags.clone(),
            },
            &self.config,
        )?;

        let summary = summarize(
            llm,
            &SummarizeRequest {
                extracted_text: document.extracted_text.clone(),
                filename: document.filename.clone(),
                document_type: classification.document_type.clone(),
                summarizer_prompt: self
                    .prompts
                    .summarizer_for(&classification.document_type)
                    .to_string(),
                llm_data: document.llm_data.clone(),
            },
            &self.config,
        );

        let series = detect_with_retry(
            llm,
            &SeriesRequest {
                summary: summary_text(&summary).unwrap_or_default().to_string(),
                document_type: classification.document_type.clone(),
                structured_data: structured_fields(&summary),
                tags: classification.tags.clone(),
                series_prompt: self.prompts.series.clone(),
                existing_series: context.existing_series.clone(),
            },
            &self.config,
            self.config.series_max_retries,
        )?;

        info!(
            "Processed '{}': {} in series '{}' / '{}'",
            document.filename, classification.document_type, series.entity, series.series_type
        );

        Ok(ProcessedDocument {
            classification,
            summary,
            series,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alfrd_llm::MockProvider;

    const CLASSIFIED: &str =
        r#"{"document_type": "bill", "confidence": 0.9, "reasoning": "due date", "tags": ["utility"]}"#;
    const SUMMARIZED: &str = r#"{"summary": "PG&E bill for $120.45", "amount": 120.45}"#;
    const SERIES: &str = r#"{"entity": "PG&E", "series_type": "monthly_utility_bill", "frequency": "monthly", "title": "PG&E Bills"}"#;

    fn document() -> DocumentInput {
        DocumentInput {
            filename: "pge.pdf".to_string(),
            extracted_text: "PG&E Amount due $120.45".to_string(),
            llm_data: None,
        }
    }

    #[test]
    fn test_process_runs_tools_in_order() {
        let llm = MockProvider::new(SERIES);
        llm.push_response(CLASSIFIED);
        llm.push_response(SUMMARIZED);

        let processor = DocumentProcessor::new(
            llm.clone(),
            ToolsConfig::default(),
            PromptLibrary::default(),
        );
        let result = processor.process(&document(), &ProcessingContext::default()).unwrap();

        assert_eq!(result.classification.document_type, "bill");
        assert_eq!(result.summary["amount"], 120.45);
        assert_eq!(result.series.entity, "PG&E");
        assert_eq!(llm.call_count(), 3);

        let series_call = &llm.calls()[2];
        assert!(series_call.user_message.contains("PG&E bill for $120.45"));
        assert!(series_call.user_message.contains("120.45"));
        assert!(series_call.user_message.contains("utility"));
    }

    #[test]
    fn test_type_specific_summarizer_prompt() {
        let llm = MockProvider::new(SERIES);
        llm.push_response(CLASSIFIED);
        llm.push_response(SUMMARIZED);

        let mut prompts = PromptLibrary::default();
        prompts
            .summarizers
            .insert("bill".to_string(), "Extract amount and due date.".to_string());

        let processor = DocumentProcessor::new(llm.clone(), ToolsConfig::default(), prompts);
        processor.process(&document(), &ProcessingContext::default()).unwrap();

        assert_eq!(llm.calls()[1].system, "Extract amount and due date.");
    }

    #[test]
    fn test_classification_failure_stops_processing() {
        let llm = MockProvider::new(SERIES);
        llm.push_response("not json");

        let processor = DocumentProcessor::new(
            llm.clone(),
            ToolsConfig::default(),
            PromptLibrary::default(),
        );
        let err = processor
            .process(&document(), &ProcessingContext::default())
            .unwrap_err();

        assert!(matches!(err, ToolError::Classification { .. }));
        assert_eq!(llm.call_count(), 1);
    }

    #[test]
    fn test_summary_failure_does_not_stop_processing() {
        let llm = MockProvider::new(SERIES);
        llm.push_response(CLASSIFIED);
        llm.push_error("model crashed");

        let processor = DocumentProcessor::new(
            llm.clone(),
            ToolsConfig::default(),
            PromptLibrary::default(),
        );
        let result = processor.process(&document(), &ProcessingContext::default()).unwrap();

        assert_eq!(result.summary["summary"], "PG&E Amount due $120.45");
        assert!(result.summary.contains_key("error"));
        assert_eq!(result.series.series_type, "monthly_utility_bill");
    }
}
