//! The conversation session — one turn at a time.
//!
//! Per turn: the policy sizes the window from the new input, the user turn
//! is recorded (which invalidates the recency cache), the cached ceiling of
//! recent turns is fetched and truncated to the window, the template renders
//! the prompt, the provider generates, and the reply is recorded.
//!
//! Strictly turn-by-turn: the session owns the store/cache pair mutably, so
//! no second turn can begin before the current append+invalidate completes.

use genius_context::{ContextAssembler, PromptTemplate, WindowPolicy};
use genius_core::provider::{GenerateRequest, Provider};
use genius_core::turn::Role;
use genius_core::Result;
use genius_history::RecencyCache;
use std::sync::Arc;
use tracing::info;

/// A single linear conversation against one provider and one history store.
pub struct ChatSession {
    cache: RecencyCache,
    policy: WindowPolicy,
    assembler: ContextAssembler,
    template: PromptTemplate,
    provider: Arc<dyn Provider>,
    model: String,
    temperature: Option<f32>,
    recent_limit: usize,
}

impl ChatSession {
    pub fn new(
        cache: RecencyCache,
        policy: WindowPolicy,
        template: PromptTemplate,
        provider: Arc<dyn Provider>,
        model: impl Into<String>,
        temperature: Option<f32>,
        recent_limit: usize,
    ) -> Self {
        Self {
            cache,
            policy,
            assembler: ContextAssembler::new(),
            template,
            provider,
            model: model.into(),
            temperature,
            recent_limit,
        }
    }

    /// Process one user turn and return the assistant's reply.
    ///
    /// The user turn is durably recorded before generation; if generation
    /// fails, the error propagates and the reply turn is not recorded.
    pub async fn turn(&mut self, user_input: &str) -> Result<String> {
        let window = self.policy.decide(user_input);

        self.cache.append(Role::User, user_input).await?;

        let turns = self.cache.fetch(self.recent_limit).await?;
        let context = self.assembler.assemble(&turns, window);
        let prompt = self.template.render(&context, user_input);

        let reply = self
            .provider
            .generate(GenerateRequest {
                model: self.model.clone(),
                prompt,
                temperature: self.temperature,
            })
            .await?;

        self.cache.append(Role::Assistant, &reply.text).await?;

        info!(window, turns = turns.len(), "Processed turn");
        Ok(reply.text)
    }

    /// Flush and release the underlying store.
    pub async fn close(&self) {
        self.cache.store().close().await;
    }
}
