//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

/// Sampling parameters for one LLM invocation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvocationParams {
    /// Sampling temperature (0.0 = deterministic)
    pub temperature: f32,

    /// Maximum number of tokens to generate
    pub max_tokens: u32,
}

impl InvocationParams {
    /// Create new invocation parameters
    pub fn new(temperature: f32, max_tokens: u32) -> Self {
        Self {
            temperature,
            max_tokens,
        }
    }
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (alfrd-llm). The call is
/// synchronous and blocking; timeouts and transport retries belong to the
/// implementation.
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Invoke the model with a system prompt and a single user message
    fn invoke(
        &self,
        system: &str,
        user_message: &str,
        params: InvocationParams,
    ) -> Result<String, Self::Error>;
}

impl<T: LlmProvider + ?Sized> LlmProvider for &T {
    type Error = T::Error;

    fn invoke(
        &self,
        system: &str,
        user_message: &str,
        params: InvocationParams,
    ) -> Result<String, Self::Error> {
        (**self).invoke(system, user_message, params)
    }
}

impl<T: LlmProvider + ?Sized> LlmProvider for std::sync::Arc<T> {
    type Error = T::Error;

    fn invoke(
        &self,
        system: &str,
        user_message: &str,
        params: InvocationParams,
    ) -> Result<String, Self::Error> {
        (**self).invoke(system, user_message, params)
    }
}
