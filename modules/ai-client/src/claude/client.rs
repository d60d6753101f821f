use anyhow::{anyhow, Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use tracing::debug;

use super::types::*;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Messages-API transport. Headers are validated once, when the client is built.
pub(crate) struct ClaudeClient {
    http: reqwest::Client,
    messages_url: String,
    headers: HeaderMap,
}

impl ClaudeClient {
    pub fn new(api_key: &str, base_url: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(api_key).context("Anthropic API key is not a valid header")?,
        );
        headers.insert("anthropic-version", HeaderValue::from_static(ANTHROPIC_VERSION));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let base_url = base_url.unwrap_or(ANTHROPIC_API_URL).trim_end_matches('/');

        Ok(Self {
            http: reqwest::Client::new(),
            messages_url: format!("{base_url}/messages"),
            headers,
        })
    }

    /// Send one request and return its first text block.
    pub async fn complete(&self, request: &ChatRequest) -> Result<String> {
        debug!(model = %request.model, "Claude messages request");

        let response = self
            .http
            .post(&self.messages_url)
            .headers(self.headers.clone())
            .json(request)
            .send()
            .await
            .with_context(|| format!("Claude request to {} failed", self.messages_url))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(anyhow!("Claude API error ({}): {}", status, error_text));
        }

        let body: ChatResponse = response.json().await?;

        if let Some(ref usage) = body.usage {
            debug!(
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                stop_reason = body.stop_reason.as_deref().unwrap_or("unknown"),
                "Claude usage"
            );
        }

        body.text()
            .ok_or_else(|| anyhow!("No text in Claude response"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_url_joins_base_without_double_slash() {
        let client = ClaudeClient::new("sk-ant-test", Some("http://localhost:9000/v1/")).unwrap();
        assert_eq!(client.messages_url, "http://localhost:9000/v1/messages");
    }

    #[test]
    fn default_base_url_is_anthropic() {
        let client = ClaudeClient::new("sk-ant-test", None).unwrap();
        assert_eq!(client.messages_url, "https://api.anthropic.com/v1/messages");
        assert_eq!(client.headers["anthropic-version"], ANTHROPIC_VERSION);
    }

    #[test]
    fn invalid_key_is_rejected_up_front() {
        assert!(ClaudeClient::new("bad\nkey", None).is_err());
    }
}
