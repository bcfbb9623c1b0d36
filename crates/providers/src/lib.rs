//! LLM provider implementations for Genius.

pub mod ollama;

pub use ollama::OllamaProvider;
