// Test double for the text service boundary.
//
// MockTextService answers from a scripted queue, then from an optional
// default, and records every prompt it was sent. No network.

use std::collections::VecDeque;
use std::sync::Mutex;

use ai_client::TextService;
use anyhow::{bail, Result};
use async_trait::async_trait;

pub struct MockTextService {
    responses: Mutex<VecDeque<String>>,
    /// Returned once the scripted queue is empty (optional).
    default_response: Option<String>,
    /// When set, every call fails with this message.
    failure: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl Default for MockTextService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTextService {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            default_response: None,
            failure: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Queue a response for the next unanswered call.
    pub fn respond(self, response: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(response.into());
        self
    }

    /// Response for any call after the queue runs out.
    pub fn with_default(mut self, response: impl Into<String>) -> Self {
        self.default_response = Some(response.into());
        self
    }

    /// Make every call fail, as an unreachable upstream would.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Every prompt received, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl TextService for MockTextService {
    async fn invoke(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        if let Some(ref message) = self.failure {
            bail!("MockTextService: {message}");
        }
        if let Some(response) = self.responses.lock().unwrap().pop_front() {
            return Ok(response);
        }
        if let Some(ref default) = self.default_response {
            return Ok(default.clone());
        }
        bail!("MockTextService: no response scripted for call {}", self.calls())
    }
}
