//! Backend configuration with documented defaults
//!
//! Endpoints, model names and prompts for the two networked AI backends.
//! Every field has a default, so an empty TOML file (or no file at all)
//! yields a working offline-capable setup.

use std::path::Path;

use serde::Deserialize;

use crate::core::error::{AssistantError, Result};

/// Default chat-completions endpoint (OpenAI-compatible, Groq-hosted)
pub const DEFAULT_CLOUD_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Default model requested from the cloud endpoint
pub const DEFAULT_CLOUD_MODEL: &str = "mixtral-8x7b-32768";

/// Reply budget for cloud completions
///
/// Voice replies are read aloud, so they are kept to a couple of sentences.
pub const DEFAULT_MAX_TOKENS: u32 = 150;

/// System instruction sent ahead of every cloud request
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are BarbraAI, a helpful voice assistant. Parse user commands and respond naturally.";

/// Default Ollama generate endpoint
pub const DEFAULT_LOCAL_URL: &str = "http://localhost:11434/api/generate";

/// Default model requested from the local inference server
pub const DEFAULT_LOCAL_MODEL: &str = "llama2";

/// Text placed before the user's words in the local prompt
pub const DEFAULT_LOCAL_PREAMBLE: &str = "You are BarbraAI, a helpful voice assistant.";

/// Configuration for all AI backends
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub cloud: CloudConfig,
    pub local: LocalConfig,
}

/// Settings for the hosted chat-completion backend
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CloudConfig {
    /// Full URL of the chat-completions endpoint
    pub api_url: String,
    /// Model name placed in the request body
    pub model: String,
    /// Upper bound on generated tokens
    pub max_tokens: u32,
    /// System message preceding the user message
    pub system_prompt: String,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_CLOUD_URL.into(),
            model: DEFAULT_CLOUD_MODEL.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            system_prompt: DEFAULT_SYSTEM_PROMPT.into(),
        }
    }
}

/// Settings for the local inference server
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LocalConfig {
    /// Full URL of the generate endpoint
    pub api_url: String,
    /// Model name placed in the request body
    pub model: String,
    /// Fixed text that opens every prompt
    pub preamble: String,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_LOCAL_URL.into(),
            model: DEFAULT_LOCAL_MODEL.into(),
            preamble: DEFAULT_LOCAL_PREAMBLE.into(),
        }
    }
}

impl AssistantConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text, filling gaps with defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AssistantConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Apply `BARBRA_*` environment overrides
    ///
    /// Recognised: BARBRA_CLOUD_URL, BARBRA_CLOUD_MODEL,
    /// BARBRA_LOCAL_URL, BARBRA_LOCAL_MODEL
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("BARBRA_CLOUD_URL") {
            self.cloud.api_url = url;
        }
        if let Ok(model) = std::env::var("BARBRA_CLOUD_MODEL") {
            self.cloud.model = model;
        }
        if let Ok(url) = std::env::var("BARBRA_LOCAL_URL") {
            self.local.api_url = url;
        }
        if let Ok(model) = std::env::var("BARBRA_LOCAL_MODEL") {
            self.local.model = model;
        }
        self
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.cloud.api_url.trim().is_empty() || self.local.api_url.trim().is_empty() {
            return Err(AssistantError::Config("endpoint URLs must not be empty".into()));
        }

        if self.cloud.max_tokens == 0 {
            return Err(AssistantError::Config("cloud.max_tokens must be positive".into()));
        }

        Ok(())
    }
}
