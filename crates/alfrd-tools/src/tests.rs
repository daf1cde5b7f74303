//! Scenario tests for the document tools

#[cfg(test)]
mod tests {
    use crate::{
        DocumentInput, DocumentProcessor, ProcessingContext, PromptLibrary, ToolError,
        ToolRegistry, ToolsConfig,
    };
    use alfrd_domain::summary::is_degraded;
    use alfrd_llm::MockProvider;
    use serde_json::json;
    use std::collections::BTreeSet;

    const PGE_SERIES: &str = r#"{
        "entity": "Pacific Gas & Electric",
        "series_type": "monthly_utility_bill",
        "frequency": "monthly",
        "title": "PG&E Electric Bills",
        "metadata": {"account_number": "1234-5678"}
    }"#;

    fn bill(month: &str) -> DocumentInput {
        DocumentInput {
            filename: format!("pge_{}.pdf", month),
            extracted_text: format!("Pacific Gas & Electric statement for {}. Amount due $120.45", month),
            llm_data: None,
        }
    }

    fn known_types() -> BTreeSet<String> {
        ["bill", "receipt", "bank_statement"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_recurring_bill_reuses_series() {
        let llm = MockProvider::new(PGE_SERIES);
        let processor = DocumentProcessor::new(
            llm.clone(),
            ToolsConfig::default(),
            PromptLibrary::default(),
        );

        // January: no series known yet
        llm.push_response(r#"{"document_type": "bill", "confidence": 0.95, "tags": ["utility"]}"#);
        llm.push_response(r#"{"summary": "PG&E bill for January", "amount": 120.45}"#);
        let mut context = ProcessingContext {
            known_types: known_types(),
            ..Default::default()
        };
        let january = processor.process(&bill("jan"), &context).unwrap();
        assert!(!llm.last_call().unwrap().user_message.contains("Existing series:"));

        // February: the January series is now known and offered for reuse
        context.existing_series.push(january.series.candidate());
        llm.push_response(r#"{"document_type": "bill", "confidence": 0.95, "tags": ["utility"]}"#);
        llm.push_response(r#"{"summary": "PG&E bill for February", "amount": 98.10}"#);
        let february = processor.process(&bill("feb"), &context).unwrap();

        let series_prompt = llm.last_call().unwrap().user_message;
        assert!(series_prompt.contains("MUST reuse"));
        assert!(series_prompt.contains(r#"entity: "Pacific Gas & Electric""#));
        assert_eq!(february.series.candidate(), january.series.candidate());
        assert_eq!(llm.call_count(), 6);
    }

    #[test]
    fn test_unfamiliar_document_suggests_new_type() {
        let llm = MockProvider::new(
            r#"{"entity": "Happy Paws Vet", "series_type": "annual_vaccination_record", "title": "Vet Records"}"#,
        );
        llm.push_response(
            r#"{"document_type": "receipt", "confidence": 0.45, "reasoning": "Has a total",
                "suggested_type": "pet_vaccination_record",
                "suggestion_reasoning": "Rabies vaccination certificate"}"#,
        );
        llm.push_response(r#"{"summary": "Rabies vaccination for Max", "pet_name": "Max"}"#);

        let processor = DocumentProcessor::new(
            llm,
            ToolsConfig::default(),
            PromptLibrary::default(),
        );
        let context = ProcessingContext {
            known_types: known_types(),
            ..Default::default()
        };
        let result = processor
            .process(
                &DocumentInput {
                    filename: "vet.jpg".to_string(),
                    extracted_text: "Happy Paws Vet. Rabies vaccine. Total $35".to_string(),
                    llm_data: None,
                },
                &context,
            )
            .unwrap();

        assert!(result.classification.has_suggestion());
        assert!(result.classification.is_known_type(&context.known_types));
        assert_eq!(result.summary["pet_name"], "Max");
    }

    #[test]
    fn test_degraded_summary_still_feeds_series_detection() {
        let llm = MockProvider::new(PGE_SERIES);
        llm.push_response(r#"{"document_type": "bill"}"#);
        llm.push_error("connection reset");

        let processor = DocumentProcessor::new(
            llm.clone(),
            ToolsConfig::default(),
            PromptLibrary::default(),
        );
        let result = processor
            .process(&bill("mar"), &ProcessingContext::default())
            .unwrap();

        assert!(is_degraded(&result.summary));
        let series_prompt = llm.last_call().unwrap().user_message;
        assert!(series_prompt.contains("Pacific Gas & Electric statement for mar"));
        assert!(!series_prompt.contains("connection reset"));
    }

    #[test]
    fn test_series_retries_are_configurable() {
        let llm = MockProvider::new("no json here");
        llm.push_response(r#"{"document_type": "bill"}"#);
        llm.push_response(r#"{"summary": "A bill"}"#);

        let config = ToolsConfig::from_toml("series_max_retries = 4").unwrap();
        let processor = DocumentProcessor::new(llm.clone(), config, PromptLibrary::default());
        let err = processor
            .process(&bill("apr"), &ProcessingContext::default())
            .unwrap_err();

        assert!(matches!(err, ToolError::RetriesExhausted { attempts: 5, .. }));
        assert_eq!(llm.call_count(), 2 + 5);
    }

    #[test]
    fn test_prompt_library_from_toml() {
        let prompts = PromptLibrary::from_toml(
            r#"
            classifier = "Classify household paperwork."

            [summarizers]
            bank_statement = "Extract balances and account numbers."
            "#,
        )
        .unwrap();

        assert_eq!(prompts.classifier, "Classify household paperwork.");
        assert_eq!(
            prompts.summarizer_for("bank_statement"),
            "Extract balances and account numbers."
        );
        assert_eq!(prompts.summarizer_for("bill"), PromptLibrary::default().summarizer);
    }

    #[test]
    fn test_registry_chain_matches_processor() {
        let llm = MockProvider::new(PGE_SERIES);
        llm.push_response(r#"{"document_type": "bill", "tags": ["utility"]}"#);
        llm.push_response(r#"{"summary": "PG&E bill", "amount": 120.45}"#);

        let tools = ToolRegistry::new(llm, ToolsConfig::default(), PromptLibrary::default());
        let classification = tools
            .call(
                "classify_document",
                json!({"extracted_text": "PG&E Amount due", "filename": "pge.pdf"}),
            )
            .unwrap();
        let summary = tools
            .call(
                "summarize_document",
                json!({
                    "extracted_text": "PG&E Amount due",
                    "filename": "pge.pdf",
                    "document_type": classification["document_type"]
                }),
            )
            .unwrap();
        let series = tools
            .call(
                "detect_series",
                json!({
                    "summary": summary["summary"],
                    "document_type": "bill",
                    "structured_data": {"amount": summary["amount"]},
                    "tags": classification["tags"]
                }),
            )
            .unwrap();

        assert_eq!(series["series_type"], "monthly_utility_bill");
        assert_eq!(series["metadata"]["account_number"], "1234-5678");
    }
}
