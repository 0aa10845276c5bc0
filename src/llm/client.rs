//! Async HTTP clients for the networked AI backends
//!
//! Two wire formats are spoken:
//! - OpenAI-compatible chat completions (Groq, OpenAI, DeepSeek...)
//! - Ollama's single-shot `/api/generate`
//!
//! Both return `Ok(None)` when the server answered successfully but the
//! expected text field is missing or empty, so callers can tell a malformed
//! reply apart from an unreachable service.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::core::config::{CloudConfig, LocalConfig};
use crate::core::error::{AssistantError, Result};

/// Client for an OpenAI-compatible chat-completions endpoint
#[derive(Debug, Clone)]
pub struct ChatCompletionClient {
    client: Client,
    config: CloudConfig,
}

impl ChatCompletionClient {
    pub fn new(client: Client, config: CloudConfig) -> Self {
        Self { client, config }
    }

    /// Send one system + user exchange and return the first choice's text
    pub async fn complete(&self, api_key: &str, user: &str) -> Result<Option<String>> {
        let request = ChatRequest {
            messages: vec![
                Message {
                    role: "system".into(),
                    content: self.config.system_prompt.clone(),
                },
                Message {
                    role: "user".into(),
                    content: user.into(),
                },
            ],
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AssistantError::Status {
                service: "cloud AI",
                status: response.status().as_u16(),
            });
        }

        let completion: ChatResponse = response.json().await?;
        Ok(completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .filter(|text| !text.is_empty()))
    }
}

/// Client for an Ollama generate endpoint
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: Client,
    config: LocalConfig,
}

impl OllamaClient {
    pub fn new(client: Client, config: LocalConfig) -> Self {
        Self { client, config }
    }

    /// Prompt sent for `user`, preamble first
    pub fn prompt_for(&self, user: &str) -> String {
        format!("{} Respond to: {}", self.config.preamble, user)
    }

    /// Request a single non-streamed generation
    pub async fn generate(&self, user: &str) -> Result<Option<String>> {
        let request = GenerateRequest {
            model: self.config.model.clone(),
            prompt: self.prompt_for(user),
            stream: false,
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AssistantError::Status {
                service: "local AI",
                status: response.status().as_u16(),
            });
        }

        let generated: GenerateResponse = response.json().await?;
        Ok(generated.response.filter(|text| !text.is_empty()))
    }
}

// OpenAI-compatible API format
#[derive(Serialize)]
struct ChatRequest {
    messages: Vec<Message>,
    model: String,
    max_tokens: u32,
}

#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

// Ollama format
#[derive(Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: Option<String>,
}
