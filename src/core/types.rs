//! Core type definitions used throughout the codebase

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::error::AssistantError;

/// Unique identifier for response records
///
/// UUIDv7, so the creation time is embedded in the identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseId(pub Uuid);

impl ResponseId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for ResponseId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ResponseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Which backend answers input that matched no intent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiMode {
    /// Canned replies, no network
    #[default]
    Offline,
    /// Hosted chat-completion API, needs a credential
    Cloud,
    /// Inference server on the local network
    Local,
}

impl AiMode {
    pub const ALL: [AiMode; 3] = [AiMode::Offline, AiMode::Cloud, AiMode::Local];

    pub fn as_str(&self) -> &'static str {
        match self {
            AiMode::Offline => "offline",
            AiMode::Cloud => "cloud",
            AiMode::Local => "local",
        }
    }
}

impl fmt::Display for AiMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AiMode {
    type Err = AssistantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "offline" => Ok(AiMode::Offline),
            "cloud" => Ok(AiMode::Cloud),
            "local" => Ok(AiMode::Local),
            other => Err(AssistantError::Config(format!("unknown AI mode: {}", other))),
        }
    }
}
