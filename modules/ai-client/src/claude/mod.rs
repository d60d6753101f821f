mod client;
pub(crate) mod types;

use crate::traits::TextService;
use anyhow::{anyhow, Result};
use async_trait::async_trait;

use client::ClaudeClient;
use types::*;

// =============================================================================
// Claude Agent
// =============================================================================

#[derive(Clone)]
pub struct Claude {
    api_key: String,
    pub(crate) model: String,
    temperature: Option<f32>,
    base_url: Option<String>,
}

impl Claude {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            temperature: None,
            base_url: None,
        }
    }

    pub fn from_env(model: impl Into<String>) -> Result<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .map_err(|_| anyhow!("ANTHROPIC_API_KEY environment variable not set"))?;
        Ok(Self::new(api_key, model))
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub(crate) fn client(&self) -> Result<ClaudeClient> {
        ClaudeClient::new(&self.api_key, self.base_url.as_deref())
    }

    pub async fn chat_completion(
        &self,
        system: Option<&str>,
        user: impl Into<String>,
    ) -> Result<String> {
        let mut request = ChatRequest::new(&self.model).message(WireMessage::user(user));
        if let Some(system) = system {
            request = request.system(system);
        }
        if let Some(temperature) = self.temperature {
            request = request.temperature(temperature);
        }

        self.client()?.complete(&request).await
    }
}

// =============================================================================
// TextService Implementation
// =============================================================================

#[async_trait]
impl TextService for Claude {
    async fn invoke(&self, prompt: &str) -> Result<String> {
        self.chat_completion(None, prompt).await
    }
}
