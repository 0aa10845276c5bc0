//! Static table of recognised voice commands
//!
//! Order matters: the matcher walks this table top to bottom and the first
//! hit wins. More specific phrasings must therefore be declared before
//! commands whose triggers they contain (search-youtube before open-youtube,
//! since every search phrase also contains "youtube").

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::AssistantError;

/// Broad grouping of a command, mirrored in the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    System,
    App,
    Communication,
    Media,
}

/// Side effect a command performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    OpenApp,
    SearchYoutube,
    FlashlightOn,
    FlashlightOff,
    BrightnessDim,
}

impl ActionKind {
    /// Wire identifier, as recorded in action descriptors
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::OpenApp => "open_app",
            ActionKind::SearchYoutube => "search_youtube",
            ActionKind::FlashlightOn => "flashlight_on",
            ActionKind::FlashlightOff => "flashlight_off",
            ActionKind::BrightnessDim => "brightness_dim",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = AssistantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open_app" => Ok(ActionKind::OpenApp),
            "search_youtube" => Ok(ActionKind::SearchYoutube),
            "flashlight_on" => Ok(ActionKind::FlashlightOn),
            "flashlight_off" => Ok(ActionKind::FlashlightOff),
            "brightness_dim" => Ok(ActionKind::BrightnessDim),
            other => Err(AssistantError::Config(format!("unknown action: {}", other))),
        }
    }
}

/// A recognised intent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Command {
    /// Unique, kebab-case identifier
    pub id: &'static str,
    /// Lowercase phrases whose presence in the input selects this command
    pub triggers: &'static [&'static str],
    /// What to do when the command fires
    pub action: ActionKind,
    /// App the action is aimed at, for `open_app`
    pub target: Option<&'static str>,
    /// Human-readable summary, echoed back as "Executed: ..."
    pub description: &'static str,
    pub category: Category,
}

/// All known commands, in match priority order
pub static COMMANDS: &[Command] = &[
    Command {
        id: "open-whatsapp",
        triggers: &["open whatsapp", "launch whatsapp", "whatsapp"],
        action: ActionKind::OpenApp,
        target: Some("whatsapp"),
        description: "Open WhatsApp application",
        category: Category::App,
    },
    Command {
        id: "search-youtube",
        triggers: &["search youtube for", "youtube search"],
        action: ActionKind::SearchYoutube,
        target: None,
        description: "Search YouTube for specific content",
        category: Category::Media,
    },
    Command {
        id: "open-youtube",
        triggers: &["open youtube", "launch youtube", "youtube"],
        action: ActionKind::OpenApp,
        target: Some("youtube"),
        description: "Open YouTube application",
        category: Category::App,
    },
    Command {
        id: "flashlight-on",
        triggers: &["turn on flashlight", "flashlight on", "torch on"],
        action: ActionKind::FlashlightOn,
        target: None,
        description: "Turn on device flashlight",
        category: Category::System,
    },
    Command {
        id: "flashlight-off",
        triggers: &["turn off flashlight", "flashlight off", "torch off"],
        action: ActionKind::FlashlightOff,
        target: None,
        description: "Turn off device flashlight",
        category: Category::System,
    },
    Command {
        id: "brightness-dim",
        triggers: &["dim brightness", "reduce brightness", "make dimmer"],
        action: ActionKind::BrightnessDim,
        target: None,
        description: "Reduce screen brightness",
        category: Category::System,
    },
];

/// Phrases offered to the user as one-tap shortcuts
pub static SUGGESTIONS: &[&str] = &[
    "Open WhatsApp",
    "Search YouTube for cats",
    "Turn on flashlight",
    "What can you do?",
];

/// Look up a command by its identifier
pub fn find_command(id: &str) -> Option<&'static Command> {
    COMMANDS.iter().find(|cmd| cmd.id == id)
}
