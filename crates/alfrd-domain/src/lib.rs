//! ALFRD Domain Layer
//!
//! This crate contains the value types exchanged between the document
//! intelligence tools and their callers, plus the trait boundary to the
//! language model that powers them.
//!
//! ## Key Concepts
//!
//! - **Classification**: Assignment of a document to a known type, optionally
//!   proposing a new type
//! - **Series**: A recurring group of documents from one entity (e.g. monthly
//!   bills from the same utility)
//! - **Summary**: Open-ended structured fields plus a one-line human summary
//! - **LlmProvider**: The opaque `invoke(system, user, temperature, max_tokens)`
//!   capability
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture:
//! - No I/O, no network, no runtime
//! - Only serde for the JSON shape of results
//! - Infrastructure implementations live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod classification;
pub mod confidence;
pub mod series;
pub mod summary;
pub mod traits;

// Re-exports for convenience
pub use classification::ClassificationResult;
pub use confidence::clamp_confidence;
pub use series::{SeriesCandidate, SeriesDetectionResult};
pub use summary::SummaryResult;
pub use traits::{InvocationParams, LlmProvider};
