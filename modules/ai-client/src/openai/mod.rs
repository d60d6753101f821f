mod client;
pub(crate) mod types;

use crate::traits::TextService;
use anyhow::{anyhow, Result};
use async_trait::async_trait;

use client::{OpenAiClient, GROQ_API_URL};
use types::{ChatRequest, WireMessage};

// =============================================================================
// OpenAi Agent
// =============================================================================

/// Client for any OpenAI-compatible chat-completions endpoint.
///
/// Groq serves the same wire format, so `OpenAi::groq` is this client with a
/// different base URL.
#[derive(Clone)]
pub struct OpenAi {
    api_key: String,
    pub(crate) model: String,
    temperature: Option<f32>,
    base_url: Option<String>,
}

impl OpenAi {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            temperature: None,
            base_url: None,
        }
    }

    pub fn from_env(model: impl Into<String>) -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| anyhow!("OPENAI_API_KEY environment variable not set"))?;
        Ok(Self::new(api_key, model))
    }

    pub fn groq(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::new(api_key, model).with_base_url(GROQ_API_URL)
    }

    pub fn groq_from_env(model: impl Into<String>) -> Result<Self> {
        let api_key = std::env::var("GROQ_API_KEY")
            .map_err(|_| anyhow!("GROQ_API_KEY environment variable not set"))?;
        Ok(Self::groq(api_key, model))
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Get the model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    pub(crate) fn client(&self) -> OpenAiClient {
        let client = OpenAiClient::new(&self.api_key);
        if let Some(ref url) = self.base_url {
            client.with_base_url(url)
        } else {
            client
        }
    }

    /// Simple chat completion with an optional system message.
    pub async fn chat_completion(
        &self,
        system: Option<&str>,
        user: impl Into<String>,
    ) -> Result<String> {
        let mut request = ChatRequest::new(&self.model);
        if let Some(system) = system {
            request = request.message(WireMessage::system(system));
        }
        request = request.message(WireMessage::user(user));
        if let Some(temperature) = self.temperature {
            request = request.temperature(temperature);
        }

        let response = self.client().chat(&request).await?;

        response
            .text()
            .ok_or_else(|| anyhow!("No response from {}", self.model))
    }
}

// =============================================================================
// TextService Implementation
// =============================================================================

#[async_trait]
impl TextService for OpenAi {
    async fn invoke(&self, prompt: &str) -> Result<String> {
        self.chat_completion(None, prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_new() {
        let ai = OpenAi::new("sk-test", "gpt-4o-mini");
        assert_eq!(ai.model(), "gpt-4o-mini");
        assert_eq!(ai.api_key, "sk-test");
        assert!(ai.base_url.is_none());
    }

    #[test]
    fn test_groq_points_at_groq_endpoint() {
        let ai = OpenAi::groq("gsk-test", "llama-3.3-70b-versatile").with_temperature(0.3);
        assert_eq!(ai.base_url.as_deref(), Some(GROQ_API_URL));
        assert_eq!(ai.temperature, Some(0.3));
    }

    #[test]
    fn test_invoke_surfaces_connection_failure() {
        let ai = OpenAi::new("sk-test", "gpt-4o-mini").with_base_url("http://127.0.0.1:1/v1/");
        let result = tokio_test::block_on(ai.invoke("Name the capital of France."));
        assert!(result.is_err());
    }
}
