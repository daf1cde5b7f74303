//! Configuration for the document tools

use alfrd_domain::InvocationParams;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Sampling settings for one tool's LLM call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LlmSettings {
    /// Sampling temperature
    pub temperature: f32,

    /// Output token budget
    pub max_tokens: u32,
}

impl LlmSettings {
    /// Classifier default: low temperature for repeatable types
    pub const CLASSIFIER: LlmSettings = LlmSettings {
        temperature: 0.1,
        max_tokens: 1024,
    };

    /// Series default: zero temperature for stable series identity
    pub const SERIES: LlmSettings = LlmSettings {
        temperature: 0.0,
        max_tokens: 800,
    };

    /// Summarizer default: larger budget for structured extraction
    pub const SUMMARIZER: LlmSettings = LlmSettings {
        temperature: 0.1,
        max_tokens: 2048,
    };

    /// Convert to invocation parameters
    pub fn params(&self) -> InvocationParams {
        InvocationParams::new(self.temperature, self.max_tokens)
    }
}

/// Configuration for the classifier, series detector and summarizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Characters of document text (or serialized OCR data) included in prompts
    pub max_text_chars: usize,

    /// Existing tags offered to the classifier
    pub max_tags: usize,

    /// Characters of source text kept as the summary when summarization fails
    pub summary_fallback_chars: usize,

    /// Classifier sampling
    #[serde(deserialize_with = "classifier_settings")]
    pub classifier: LlmSettings,

    /// Series detector sampling
    #[serde(deserialize_with = "series_settings")]
    pub series: LlmSettings,

    /// Summarizer sampling
    #[serde(deserialize_with = "summarizer_settings")]
    pub summarizer: LlmSettings,

    /// Additional series detection attempts after the first failure
    pub series_max_retries: u32,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            max_text_chars: 4000,
            max_tags: 50,
            summary_fallback_chars: 500,
            classifier: LlmSettings::CLASSIFIER,
            series: LlmSettings::SERIES,
            summarizer: LlmSettings::SUMMARIZER,
            series_max_retries: 2,
        }
    }
}

/// A per-tool table; absent fields keep that tool's default
#[derive(Deserialize)]
struct PartialLlmSettings {
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

fn merge_settings<'de, D>(defaults: LlmSettings, deserializer: D) -> Result<LlmSettings, D::Error>
where
    D: Deserializer<'de>,
{
    let partial = PartialLlmSettings::deserialize(deserializer)?;
    Ok(LlmSettings {
        temperature: partial.temperature.unwrap_or(defaults.temperature),
        max_tokens: partial.max_tokens.unwrap_or(defaults.max_tokens),
    })
}

fn classifier_settings<'de, D: Deserializer<'de>>(d: D) -> Result<LlmSettings, D::Error> {
    merge_settings(LlmSettings::CLASSIFIER, d)
}

fn series_settings<'de, D: Deserializer<'de>>(d: D) -> Result<LlmSettings, D::Error> {
    merge_settings(LlmSettings::SERIES, d)
}

fn summarizer_settings<'de, D: Deserializer<'de>>(d: D) -> Result<LlmSettings, D::Error> {
    merge_settings(LlmSettings::SUMMARIZER, d)
}

impl ToolsConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_text_chars == 0 {
            return Err("max_text_chars must be greater than 0".to_string());
        }
        if self.summary_fallback_chars == 0 {
            return Err("summary_fallback_chars must be greater than 0".to_string());
        }
        for (name, settings) in [
            ("classifier", &self.classifier),
            ("series", &self.series),
            ("summarizer", &self.summarizer),
        ] {
            if !(0.0..=2.0).contains(&settings.temperature) {
                return Err(format!(
                    "{}.temperature {} out of range [0.0, 2.0]",
                    name, settings.temperature
                ));
            }
            if settings.max_tokens == 0 {
                return Err(format!("{}.max_tokens must be greater than 0", name));
            }
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

/// Dynamic prompts for the three tools
///
/// Prompts are data, not code: they are normally fetched from storage and
/// edited without redeploying. Summarizer prompts may be specialized per
/// document type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptLibrary {
    /// Classifier instructions, embedded in the classification message
    pub classifier: String,

    /// Series detector system prompt
    pub series: String,

    /// Summarizer system prompt used when no type-specific prompt exists
    pub summarizer: String,

    /// Summarizer system prompts keyed by document type
    pub summarizers: BTreeMap<String, String>,
}

impl PromptLibrary {
    /// Summarizer prompt for a document type, falling back to the default
    pub fn summarizer_for(&self, document_type: &str) -> &str {
        self.summarizers
            .get(document_type)
            .map(String::as_str)
            .unwrap_or(&self.summarizer)
    }

    /// Load prompts from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }
}

impl Default for PromptLibrary {
    fn default() -> Self {
        Self {
            classifier: DEFAULT_CLASSIFIER_PROMPT.to_string(),
            series: DEFAULT_SERIES_PROMPT.to_string(),
            summarizer: DEFAULT_SUMMARIZER_PROMPT.to_string(),
            summarizers: BTreeMap::new(),
        }
    }
}

const DEFAULT_CLASSIFIER_PROMPT: &str = r#"You are classifying personal documents (bills, receipts, statements, letters, forms) for a household filing system.
Pick the document type that best describes the document's purpose, not its layout.
Prefer an existing type whenever one reasonably fits. Only propose a new type when the document clearly belongs to a category none of the known types covers."#;

const DEFAULT_SERIES_PROMPT: &str = r#"You group documents into recurring series: documents issued repeatedly by the same entity for the same purpose, such as monthly utility bills, quarterly statements or annual insurance renewals.
Identify the issuing entity, the kind of series, and how often documents in it arrive."#;

const DEFAULT_SUMMARIZER_PROMPT: &str = r#"You extract structured data from personal documents.
Capture the fields a person would need later: parties, dates, amounts, account or reference numbers, and any action required."#;
