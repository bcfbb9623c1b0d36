//! Ollama provider implementation.
//!
//! Talks to Ollama's native `/api/generate` endpoint: a single
//! non-streaming request carrying the rendered prompt, returning the
//! generated text in the `response` field.

use async_trait::async_trait;
use genius_core::error::ProviderError;
use genius_core::provider::{GenerateReply, GenerateRequest, Provider};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// A local Ollama LLM provider.
pub struct OllamaProvider {
    base_url: String,
    client: reqwest::Client,
}

impl OllamaProvider {
    /// Create a provider against `base_url` (default `http://localhost:11434`)
    /// with the given request timeout.
    pub fn new(base_url: Option<&str>, timeout_secs: u64) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ProviderError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url
                .unwrap_or(DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            client,
        })
    }

    fn to_api_request(request: &GenerateRequest) -> ApiGenerateRequest {
        ApiGenerateRequest {
            model: request.model.clone(),
            prompt: request.prompt.clone(),
            stream: false,
            options: request
                .temperature
                .map(|temperature| ApiOptions { temperature }),
        }
    }
}

#[async_trait]
impl Provider for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn generate(
        &self,
        request: GenerateRequest,
    ) -> std::result::Result<GenerateReply, ProviderError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = Self::to_api_request(&request);

        debug!(model = %request.model, "Sending generation request");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(e.to_string())
                } else {
                    ProviderError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();

        if status == 404 {
            return Err(ProviderError::ModelNotFound(request.model));
        }

        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Ollama returned error");
            return Err(ProviderError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let api_response: ApiGenerateResponse =
            response.json().await.map_err(|e| ProviderError::ApiError {
                status_code: 200,
                message: format!("Failed to parse response: {e}"),
            })?;

        Ok(GenerateReply {
            text: api_response.response,
            model: api_response.model,
        })
    }

    async fn health_check(&self) -> std::result::Result<bool, ProviderError> {
        let url = format!("{}/api/version", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        Ok(response.status().is_success())
    }
}

// --- Wire types ---

#[derive(Debug, Serialize)]
struct ApiGenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<ApiOptions>,
}

#[derive(Debug, Serialize)]
struct ApiOptions {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ApiGenerateResponse {
    model: String,
    response: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_request_shape() {
        let req = GenerateRequest::new("llama3", "User: hi");
        let body = OllamaProvider::to_api_request(&req);
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["model"], "llama3");
        assert_eq!(json["prompt"], "User: hi");
        assert_eq!(json["stream"], false);
        assert!(json.get("options").is_none());
    }

    #[test]
    fn api_request_carries_temperature() {
        let mut req = GenerateRequest::new("llama3", "hello");
        req.temperature = Some(0.2);
        let body = OllamaProvider::to_api_request(&req);
        let json = serde_json::to_value(&body).unwrap();

        assert!((json["options"]["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn api_response_parses() {
        let raw = r#"{"model":"llama3","created_at":"2024-01-01T00:00:00Z","response":"Hello!","done":true}"#;
        let parsed: ApiGenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.model, "llama3");
        assert_eq!(parsed.response, "Hello!");
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let provider = OllamaProvider::new(Some("http://localhost:11434/"), 120).unwrap();
        assert_eq!(provider.base_url, "http://localhost:11434");
    }

    #[test]
    fn default_base_url() {
        let provider = OllamaProvider::new(None, 120).unwrap();
        assert_eq!(provider.base_url, "http://localhost:11434");
        assert_eq!(provider.name(), "ollama");
    }
}
