//! Replies for input that matched no intent
//!
//! One function per [`AiMode`]. All of them resolve to a response record;
//! every failure is turned into a message the user can act on.

use rand::seq::SliceRandom;
use reqwest::Client;

use crate::command::response::AiResponse;
use crate::core::config::AssistantConfig;
use crate::core::types::AiMode;
use crate::llm::client::{ChatCompletionClient, OllamaClient};

/// Canned offline replies, picked uniformly at random
pub const OFFLINE_REPLIES: [&str; 3] = [
    "I understand you want me to help with that. In offline mode, I can only execute predefined commands.",
    "I'm running in offline mode. Try commands like 'open WhatsApp' or 'turn on flashlight'.",
    "Offline AI is limited. For advanced features, switch to Cloud or Local AI mode in settings.",
];

pub const MSG_CLOUD_NEEDS_KEY: &str =
    "Cloud AI requires an API key. Please configure it in settings.";
pub const MSG_CLOUD_UNREACHABLE: &str =
    "Sorry, I couldn't connect to the cloud AI service. Check your internet connection.";
pub const MSG_CLOUD_EMPTY: &str = "No response received";
pub const MSG_LOCAL_UNREACHABLE: &str =
    "Local AI is not available. Make sure Ollama is running and accessible.";
pub const MSG_LOCAL_EMPTY: &str = "Local AI response unavailable";

/// The three reply strategies, sharing one HTTP client
pub struct AiBackends {
    cloud: ChatCompletionClient,
    local: OllamaClient,
}

impl AiBackends {
    pub fn new(config: AssistantConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: AssistantConfig) -> Self {
        Self {
            cloud: ChatCompletionClient::new(client.clone(), config.cloud),
            local: OllamaClient::new(client, config.local),
        }
    }

    /// Produce a reply for `text` using the given mode
    ///
    /// # Arguments
    /// * `mode` - Backend to use, read by the caller at call time
    /// * `credential` - API key, consulted by the cloud backend only
    /// * `text` - The user's input as submitted
    pub async fn respond(&self, mode: AiMode, credential: Option<&str>, text: &str) -> AiResponse {
        tracing::debug!("Delegating to {} backend", mode);
        match mode {
            AiMode::Offline => offline_reply(),
            AiMode::Cloud => self.cloud_reply(credential, text).await,
            AiMode::Local => self.local_reply(text).await,
        }
    }

    async fn cloud_reply(&self, credential: Option<&str>, text: &str) -> AiResponse {
        let api_key = match credential.map(str::trim).filter(|k| !k.is_empty()) {
            Some(key) => key,
            None => return AiResponse::ai(MSG_CLOUD_NEEDS_KEY),
        };

        match self.cloud.complete(api_key, text).await {
            Ok(Some(reply)) => AiResponse::ai(reply),
            Ok(None) => AiResponse::ai(MSG_CLOUD_EMPTY),
            Err(e) => {
                tracing::error!("Cloud AI request failed: {}", e);
                AiResponse::ai(MSG_CLOUD_UNREACHABLE)
            }
        }
    }

    async fn local_reply(&self, text: &str) -> AiResponse {
        match self.local.generate(text).await {
            Ok(Some(reply)) => AiResponse::ai(reply),
            Ok(None) => AiResponse::ai(MSG_LOCAL_EMPTY),
            Err(e) => {
                tracing::error!("Local AI request failed: {}", e);
                AiResponse::ai(MSG_LOCAL_UNREACHABLE)
            }
        }
    }
}

fn offline_reply() -> AiResponse {
    let mut rng = rand::thread_rng();
    let message = OFFLINE_REPLIES
        .choose(&mut rng)
        .copied()
        .unwrap_or(OFFLINE_REPLIES[0]);
    AiResponse::ai(message)
}
