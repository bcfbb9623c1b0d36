//! Provider trait — the abstraction over LLM backends.
//!
//! A Provider knows how to send a rendered prompt to a model and get the
//! generated text back. Generation is a single blocking request/response;
//! the conversation loop awaits it inline.
//!
//! Implementations: Ollama (local HTTP), mocks for testing.

use crate::error::ProviderError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A single generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// The model to use (e.g., "llama3")
    pub model: String,

    /// The fully rendered prompt text
    pub prompt: String,

    /// Sampling temperature; `None` uses the provider's default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl GenerateRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            temperature: None,
        }
    }
}

/// A complete generation reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateReply {
    /// The generated text
    pub text: String,

    /// Which model actually responded (may differ from requested)
    pub model: String,
}

/// The core Provider trait.
///
/// The conversation loop calls `generate()` without knowing which backend is
/// being used — pure polymorphism.
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider (e.g., "ollama").
    fn name(&self) -> &str;

    /// Send a prompt and get the complete generated text.
    async fn generate(
        &self,
        request: GenerateRequest,
    ) -> std::result::Result<GenerateReply, ProviderError>;

    /// Health check — can we reach the provider?
    async fn health_check(&self) -> std::result::Result<bool, ProviderError> {
        Ok(true)
    }
}
