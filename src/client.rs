//! Language-model client contract
//!
//! The client owns everything that actually talks to a model: connections,
//! request formatting, streaming, retries. This crate never implements one;
//! callers inject theirs into [`crate::wrapper::LlmClientWrapper`].

use async_trait::async_trait;

/// Text-completion client consumed by the wrapper
///
/// Stop-sequence semantics belong to the implementation. Callers pass the
/// list through untouched.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Failure type reported by this client
    type Error: std::error::Error + Send + Sync + 'static;

    /// Generate a completion for `prompt`, blocking the calling thread
    fn generate(&self, prompt: &str, stop: Option<&[String]>) -> Result<String, Self::Error>;

    /// Generate a completion for `prompt` without blocking
    async fn generate_async(
        &self,
        prompt: &str,
        stop: Option<&[String]>,
    ) -> Result<String, Self::Error>;
}
