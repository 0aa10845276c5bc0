//! Action execution - turns a matched command into a device side effect

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;

use crate::action::device::DeviceBridge;
use crate::core::error::Result;
use crate::intent::table::{ActionKind, Command};

/// Extra arguments extracted from the utterance, e.g. `query`
pub type ActionParams = BTreeMap<String, String>;

pub const WHATSAPP_URL: &str = "https://web.whatsapp.com";
pub const YOUTUBE_URL: &str = "https://youtube.com";
pub const YOUTUBE_SEARCH_URL: &str = "https://youtube.com/results?search_query=";

/// Query used when a search command carries none
pub const DEFAULT_SEARCH_QUERY: &str = "trending";

pub const MSG_UNKNOWN_COMMAND: &str = "Unknown command";
pub const MSG_EXECUTION_FAILED: &str = "Error executing command";

/// Runs actions against a device bridge; never fails outward
pub struct ActionExecutor {
    device: Arc<dyn DeviceBridge>,
}

impl ActionExecutor {
    pub fn new(device: Arc<dyn DeviceBridge>) -> Self {
        Self { device }
    }

    /// Execute an action by identifier
    ///
    /// # Arguments
    /// * `action_id` - Wire identifier such as `open_app`
    /// * `command` - The matched command, used to pick the app target
    /// * `params` - Arguments pulled from the utterance
    ///
    /// Device failures are logged and reported to the user as a generic
    /// notification. Nothing is returned.
    pub async fn execute(
        &self,
        action_id: &str,
        command: Option<&Command>,
        params: Option<&ActionParams>,
    ) {
        if let Err(e) = self.device.haptic_pulse().await {
            tracing::warn!("Haptic feedback failed: {}", e);
        }

        if let Err(e) = self.perform(action_id, command, params).await {
            tracing::error!("Error executing action {}: {}", action_id, e);
            if let Err(e) = self.device.notify(MSG_EXECUTION_FAILED).await {
                tracing::error!("Could not report action failure: {}", e);
            }
        }
    }

    async fn perform(
        &self,
        action_id: &str,
        command: Option<&Command>,
        params: Option<&ActionParams>,
    ) -> Result<()> {
        let action = match ActionKind::from_str(action_id) {
            Ok(action) => action,
            Err(_) => {
                tracing::warn!("Unknown action: {}", action_id);
                return self.device.notify(MSG_UNKNOWN_COMMAND).await;
            }
        };

        match action {
            ActionKind::OpenApp => match command.and_then(|c| c.target).and_then(app_url) {
                Some(url) => {
                    tracing::info!("Opening {}", url);
                    self.device.open_url(url).await
                }
                None => self.device.notify(MSG_UNKNOWN_COMMAND).await,
            },
            ActionKind::SearchYoutube => {
                let query = params
                    .and_then(|p| p.get("query"))
                    .map(String::as_str)
                    .unwrap_or(DEFAULT_SEARCH_QUERY);
                let url = search_url(query);
                tracing::info!("Searching YouTube: {}", url);
                self.device.open_url(&url).await
            }
            ActionKind::FlashlightOn => {
                self.device.notify("Flashlight turned on (simulated)").await
            }
            ActionKind::FlashlightOff => {
                self.device.notify("Flashlight turned off (simulated)").await
            }
            ActionKind::BrightnessDim => {
                self.device.notify("Brightness reduced (simulated)").await
            }
        }
    }
}

/// Landing page for an `open_app` target
fn app_url(target: &str) -> Option<&'static str> {
    match target {
        "whatsapp" => Some(WHATSAPP_URL),
        "youtube" => Some(YOUTUBE_URL),
        _ => None,
    }
}

/// YouTube results page for `query`, percent-encoded
pub fn search_url(query: &str) -> String {
    format!("{}{}", YOUTUBE_SEARCH_URL, urlencoding::encode(query))
}
