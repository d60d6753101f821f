use std::env;
use std::fmt;
use std::str::FromStr;

use ai_client::{Claude, OpenAi, TextService};
use tracing::info;

use crate::controller::MAX_ATTEMPTS;
use crate::error::{RefineryError, Result};

pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Which completion backend answers both generation and evaluation prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Provider {
    #[default]
    Groq,
    OpenAi,
    Anthropic,
}

impl Provider {
    pub fn api_key_var(self) -> &'static str {
        match self {
            Provider::Groq => "GROQ_API_KEY",
            Provider::OpenAi => "OPENAI_API_KEY",
            Provider::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            Provider::Groq => "llama-3.3-70b-versatile",
            Provider::OpenAi => "gpt-4o-mini",
            Provider::Anthropic => "claude-haiku-4-5-20251001",
        }
    }
}

impl FromStr for Provider {
    type Err = RefineryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "groq" => Ok(Provider::Groq),
            "openai" => Ok(Provider::OpenAi),
            "anthropic" | "claude" => Ok(Provider::Anthropic),
            other => Err(RefineryError::Config(format!(
                "unknown provider '{other}' (expected groq, openai or anthropic)"
            ))),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Provider::Groq => "groq",
            Provider::OpenAi => "openai",
            Provider::Anthropic => "anthropic",
        };
        f.write_str(name)
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub provider: Provider,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_attempts: u32,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let provider = match lookup("REFINERY_PROVIDER") {
            Some(value) => value.parse()?,
            None => Provider::default(),
        };

        let api_key = lookup(provider.api_key_var())
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                RefineryError::Config(format!(
                    "{} environment variable is required",
                    provider.api_key_var()
                ))
            })?;

        let model = lookup("REFINERY_MODEL").unwrap_or_else(|| provider.default_model().to_string());

        let temperature = match lookup("REFINERY_TEMPERATURE") {
            Some(value) => value.trim().parse().map_err(|_| {
                RefineryError::Config(format!("REFINERY_TEMPERATURE must be a number, got '{value}'"))
            })?,
            None => DEFAULT_TEMPERATURE,
        };

        let max_attempts = match lookup("REFINERY_MAX_ATTEMPTS") {
            Some(value) => parse_max_attempts(&value)?,
            None => MAX_ATTEMPTS,
        };

        Ok(Self {
            provider,
            api_key,
            model,
            temperature,
            max_attempts,
        })
    }

    /// Log the configuration without secrets.
    pub fn log_redacted(&self) {
        info!(
            provider = %self.provider,
            model = self.model.as_str(),
            temperature = self.temperature,
            max_attempts = self.max_attempts,
            api_key_set = !self.api_key.is_empty(),
            "Loaded configuration"
        );
    }

    /// Build the one completion handle shared by generator and evaluator.
    pub fn text_service(&self) -> Box<dyn TextService> {
        match self.provider {
            Provider::Groq => Box::new(
                OpenAi::groq(&self.api_key, &self.model).with_temperature(self.temperature),
            ),
            Provider::OpenAi => Box::new(
                OpenAi::new(&self.api_key, &self.model).with_temperature(self.temperature),
            ),
            Provider::Anthropic => Box::new(
                Claude::new(&self.api_key, &self.model).with_temperature(self.temperature),
            ),
        }
    }
}

pub fn parse_max_attempts(value: &str) -> Result<u32> {
    match value.trim().parse::<u32>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(RefineryError::Config(format!(
            "max attempts must be a positive integer, got '{value}'"
        ))),
    }
}
