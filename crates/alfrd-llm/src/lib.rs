//! ALFRD LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `alfrd-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Scripted responses and failures for testing, with a log
//!   of every invocation
//! - `OllamaProvider`: Local Ollama API integration
//!
//! # Examples
//!
//! ```
//! use alfrd_llm::MockProvider;
//! use alfrd_domain::{InvocationParams, LlmProvider};
//!
//! let provider = MockProvider::new(r#"{"document_type": "bill"}"#);
//! let result = provider
//!     .invoke("system", "classify this", InvocationParams::new(0.1, 1024))
//!     .unwrap();
//! assert_eq!(result, r#"{"document_type": "bill"}"#);
//! assert_eq!(provider.calls()[0].user_message, "classify this");
//! ```

#![warn(missing_docs)]

pub mod ollama;

use alfrd_domain::{InvocationParams, LlmProvider};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

pub use ollama::OllamaProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// One recorded invocation of a `MockProvider`
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// System prompt
    pub system: String,
    /// User message
    pub user_message: String,
    /// Sampling parameters
    pub params: InvocationParams,
}

#[derive(Debug, Default)]
struct MockState {
    queued: VecDeque<Result<String, String>>,
    calls: Vec<RecordedCall>,
}

/// Mock LLM provider for deterministic testing
///
/// Queued outcomes are consumed in order; once the queue is empty every call
/// returns the default response. Every invocation is recorded so tests can
/// inspect the exact prompt and parameters.
///
/// # Examples
///
/// ```
/// use alfrd_llm::MockProvider;
/// use alfrd_domain::{InvocationParams, LlmProvider};
///
/// let provider = MockProvider::new("fallback");
/// provider.push_error("throttled");
/// provider.push_response("first");
///
/// let params = InvocationParams::new(0.0, 800);
/// assert!(provider.invoke("s", "u", params).is_err());
/// assert_eq!(provider.invoke("s", "u", params).unwrap(), "first");
/// assert_eq!(provider.invoke("s", "u", params).unwrap(), "fallback");
/// assert_eq!(provider.call_count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: Option<String>,
    state: Arc<Mutex<MockState>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: Some(response.into()),
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// Create a MockProvider that fails every call once its queue is empty
    pub fn failing() -> Self {
        Self {
            default_response: None,
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// Queue a response for the next unconsumed call
    pub fn push_response(&self, response: impl Into<String>) {
        self.lock().queued.push_back(Ok(response.into()));
    }

    /// Queue a failure for the next unconsumed call
    pub fn push_error(&self, message: impl Into<String>) {
        self.lock().queued.push_back(Err(message.into()));
    }

    /// Get the number of times invoke was called
    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    /// All recorded invocations, oldest first
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    /// The most recent invocation, if any
    pub fn last_call(&self) -> Option<RecordedCall> {
        self.lock().calls.last().cloned()
    }

    /// Clear recorded calls and queued outcomes
    pub fn reset(&self) {
        let mut state = self.lock();
        state.calls.clear();
        state.queued.clear();
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        // A panicking test thread must not poison the mock for the others
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProvider for MockProvider {
    type Error = LlmError;

    fn invoke(
        &self,
        system: &str,
        user_message: &str,
        params: InvocationParams,
    ) -> Result<String, Self::Error> {
        let mut state = self.lock();
        state.calls.push(RecordedCall {
            system: system.to_string(),
            user_message: user_message.to_string(),
            params,
        });

        match state.queued.pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(LlmError::Other(message)),
            None => self
                .default_response
                .clone()
                .ok_or_else(|| LlmError::Other("Mock error".to_string())),
        }
    }
}
