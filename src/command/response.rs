//! Response records appended to the conversation history

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::action::executor::ActionParams;
use crate::core::types::ResponseId;

/// Who produced a response record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKind {
    User,
    Ai,
}

/// What was executed for a matched command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    /// Action identifier, e.g. `open_app`
    #[serde(rename = "type")]
    pub action_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<ActionParams>,
}

impl ActionDescriptor {
    pub fn new(action_type: impl Into<String>) -> Self {
        Self {
            action_type: action_type.into(),
            target: None,
            parameters: None,
        }
    }
}

/// One turn of the conversation, user or assistant
///
/// Serializes as `{id, message, timestamp, type, action?}` with the
/// timestamp in epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiResponse {
    pub id: ResponseId,
    pub message: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: ResponseKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionDescriptor>,
}

impl AiResponse {
    fn new(kind: ResponseKind, message: impl Into<String>) -> Self {
        Self {
            id: ResponseId::new(),
            message: message.into(),
            timestamp: Utc::now(),
            kind,
            action: None,
        }
    }

    /// Assistant turn
    pub fn ai(message: impl Into<String>) -> Self {
        Self::new(ResponseKind::Ai, message)
    }

    /// User turn
    pub fn user(message: impl Into<String>) -> Self {
        Self::new(ResponseKind::User, message)
    }

    pub fn with_action(mut self, action: ActionDescriptor) -> Self {
        self.action = Some(action);
        self
    }

    pub fn is_ai(&self) -> bool {
        self.kind == ResponseKind::Ai
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let response = AiResponse::ai("Executed: Open WhatsApp application")
            .with_action(ActionDescriptor::new("open_app"));
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["type"], "ai");
        assert_eq!(value["message"], "Executed: Open WhatsApp application");
        assert_eq!(value["action"]["type"], "open_app");
        assert!(value["action"].get("target").is_none());
        assert!(value["timestamp"].is_i64());
        assert!(value["id"].is_string());
    }

    #[test]
    fn test_plain_reply_has_no_action_key() {
        let value = serde_json::to_value(AiResponse::user("hello")).unwrap();
        assert_eq!(value["type"], "user");
        assert!(value.get("action").is_none());
    }

    #[test]
    fn test_round_trips_through_json() {
        let mut params = ActionParams::new();
        params.insert("query".into(), "cats".into());
        let original = AiResponse::ai("Executed: Search YouTube for specific content")
            .with_action(ActionDescriptor {
                action_type: "search_youtube".into(),
                target: None,
                parameters: Some(params),
            });

        let json = serde_json::to_string(&original).unwrap();
        let back: AiResponse = serde_json::from_str(&json).unwrap();

        // timestamps keep millisecond precision only
        assert_eq!(back.id, original.id);
        assert_eq!(back.action, original.action);
        assert_eq!(back.timestamp.timestamp_millis(), original.timestamp.timestamp_millis());
    }

    #[test]
    fn test_each_record_gets_fresh_id() {
        assert_ne!(AiResponse::ai("a").id, AiResponse::ai("a").id);
    }
}
