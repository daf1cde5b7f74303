//! Recurring document series

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identity of a series the caller already knows about
///
/// Supplied as deduplication context so the detector can reuse an existing
/// `(entity, series_type)` pair instead of inventing a near-duplicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesCandidate {
    /// Entity name, e.g. "Pacific Gas & Electric"
    pub entity: String,

    /// Series type in snake_case, e.g. "monthly_utility_bill"
    pub series_type: String,
}

impl SeriesCandidate {
    /// Create a new candidate
    pub fn new(entity: impl Into<String>, series_type: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            series_type: series_type.into(),
        }
    }
}

/// Series assignment for a single document
///
/// `entity`, `series_type` and `title` are never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesDetectionResult {
    /// Entity that issues the documents in the series
    pub entity: String,

    /// Series type (snake_case)
    pub series_type: String,

    /// Recurrence frequency ("monthly", "annual", ..., or "unknown")
    pub frequency: String,

    /// Human-readable series title
    pub title: String,

    /// Free-form description
    pub description: String,

    /// Additional series-level fields (account numbers, etc.)
    pub metadata: Map<String, Value>,

    /// Assignment confidence
    pub confidence: f64,
}

impl SeriesDetectionResult {
    /// The `(entity, series_type)` identity of this series
    pub fn candidate(&self) -> SeriesCandidate {
        SeriesCandidate::new(self.entity.clone(), self.series_type.clone())
    }
}
