//! Classification result

use serde::{Deserialize, Serialize};

/// Outcome of classifying a single document
///
/// `document_type` is always present. `confidence` is always within
/// `[0.0, 1.0]` once produced by the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Assigned document type (one of the known types, or a new proposal)
    pub document_type: String,

    /// Confidence in the assignment, clamped into [0, 1]
    pub confidence: f64,

    /// Model's explanation for the assignment
    pub reasoning: String,

    /// Descriptive tags, in the order the model returned them
    #[serde(default)]
    pub tags: Vec<String>,

    /// New document type the model suggests adding to the known set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_type: Option<String>,

    /// Why the suggested type is warranted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion_reasoning: Option<String>,
}

impl ClassificationResult {
    /// Whether the assigned type is among `known_types`
    pub fn is_known_type<'a, I>(&self, known_types: I) -> bool
    where
        I: IntoIterator<Item = &'a String>,
    {
        known_types.into_iter().any(|t| t == &self.document_type)
    }

    /// Whether the model proposed a new document type
    pub fn has_suggestion(&self) -> bool {
        self.suggested_type
            .as_deref()
            .map(|s| !s.trim().is_empty())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ClassificationResult {
        ClassificationResult {
            document_type: "bill".to_string(),
            confidence: 0.9,
            reasoning: "Contains amount due".to_string(),
            tags: vec!["utility".to_string(), "electric".to_string()],
            suggested_type: None,
            suggestion_reasoning: None,
        }
    }

    #[test]
    fn test_is_known_type() {
        let known = vec!["bill".to_string(), "receipt".to_string()];
        assert!(sample().is_known_type(&known));

        let mut other = sample();
        other.document_type = "insurance_policy".to_string();
        assert!(!other.is_known_type(&known));
    }

    #[test]
    fn test_has_suggestion() {
        let mut result = sample();
        assert!(!result.has_suggestion());

        result.suggested_type = Some("   ".to_string());
        assert!(!result.has_suggestion());

        result.suggested_type = Some("insurance_policy".to_string());
        assert!(result.has_suggestion());
    }

    #[test]
    fn test_optional_fields_omitted_from_json() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("suggested_type").is_none());
        assert!(json.get("suggestion_reasoning").is_none());
        assert_eq!(json["tags"][0], "utility");
    }
}
