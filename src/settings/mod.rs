//! Application settings and their persistence
//!
//! Settings live as one JSON blob under [`SETTINGS_KEY`]. Stored values are
//! merged over the defaults, so old or partial blobs keep working.

pub mod store;

pub use store::{FileStore, KeyValueStore, MemoryStore};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::types::AiMode;

/// Key under which the settings blob is stored
pub const SETTINGS_KEY: &str = "barbraai-settings";

/// User-facing preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppSettings {
    pub dark_mode: bool,
    /// Display contrast in percent
    pub contrast: u32,
    pub voice_recognition: bool,
    pub ai_mode: AiMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            dark_mode: true,
            contrast: 100,
            voice_recognition: true,
            ai_mode: AiMode::Offline,
            api_key: None,
        }
    }
}

/// Partial update; `None` fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub dark_mode: Option<bool>,
    pub contrast: Option<u32>,
    pub voice_recognition: Option<bool>,
    pub ai_mode: Option<AiMode>,
    pub api_key: Option<String>,
}

impl AppSettings {
    /// Apply a patch; an empty `api_key` clears the stored key
    pub fn merge(&mut self, patch: SettingsPatch) {
        if let Some(v) = patch.dark_mode {
            self.dark_mode = v;
        }
        if let Some(v) = patch.contrast {
            self.contrast = v;
        }
        if let Some(v) = patch.voice_recognition {
            self.voice_recognition = v;
        }
        if let Some(v) = patch.ai_mode {
            self.ai_mode = v;
        }
        if let Some(key) = patch.api_key {
            self.api_key = if key.is_empty() { None } else { Some(key) };
        }
    }

    /// Overlay a stored blob on the defaults, one key at a time
    ///
    /// Unknown keys are ignored. A key whose value has the wrong type keeps
    /// its default; the other keys still apply.
    pub fn from_stored(blob: &Map<String, Value>) -> Self {
        let mut settings = Self::default();
        if let Some(v) = stored_field(blob, "darkMode") {
            settings.dark_mode = v;
        }
        if let Some(v) = stored_field(blob, "contrast") {
            settings.contrast = v;
        }
        if let Some(v) = stored_field(blob, "voiceRecognition") {
            settings.voice_recognition = v;
        }
        if let Some(mode) = stored_field::<String>(blob, "aiMode") {
            match mode.parse::<AiMode>() {
                Ok(mode) => settings.ai_mode = mode,
                Err(e) => tracing::warn!("Ignoring stored aiMode: {}", e),
            }
        }
        if let Some(key) = stored_field::<Option<String>>(blob, "apiKey").flatten() {
            settings.api_key = if key.is_empty() { None } else { Some(key) };
        }
        settings
    }
}

fn stored_field<T: DeserializeOwned>(blob: &Map<String, Value>, key: &str) -> Option<T> {
    let value = blob.get(key)?;
    match T::deserialize(value) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!("Ignoring stored {}: {}", key, e);
            None
        }
    }
}

/// Loads, updates and persists [`AppSettings`]
pub struct SettingsManager<S: KeyValueStore> {
    store: S,
    settings: AppSettings,
}

impl<S: KeyValueStore> SettingsManager<S> {
    /// Read stored settings, falling back to defaults on any problem
    pub async fn load(store: S) -> Self {
        let settings = match store.get(SETTINGS_KEY).await {
            Ok(Some(blob)) => match serde_json::from_str::<Map<String, Value>>(&blob) {
                Ok(stored) => AppSettings::from_stored(&stored),
                Err(e) => {
                    tracing::error!("Error loading settings: {}", e);
                    AppSettings::default()
                }
            },
            Ok(None) => AppSettings::default(),
            Err(e) => {
                tracing::error!("Error loading settings: {}", e);
                AppSettings::default()
            }
        };
        tracing::info!("Settings loaded (AI mode: {})", settings.ai_mode);

        Self { store, settings }
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    /// Merge `patch` and persist the result
    ///
    /// The in-memory settings change even if saving fails; the failure is
    /// only logged.
    pub async fn update(&mut self, patch: SettingsPatch) -> &AppSettings {
        self.settings.merge(patch);

        match serde_json::to_string(&self.settings) {
            Ok(blob) => {
                if let Err(e) = self.store.set(SETTINGS_KEY, &blob).await {
                    tracing::warn!("Error saving settings: {}", e);
                }
            }
            Err(e) => tracing::warn!("Error saving settings: {}", e),
        }

        &self.settings
    }
}
