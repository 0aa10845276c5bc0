//! Device capabilities the executor drives
//!
//! The executor never talks to the OS directly; it goes through a
//! [`DeviceBridge`]. [`SystemDevice`] is the desktop implementation,
//! [`RecordingDevice`] keeps a log of calls for headless hosts and tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::error::{AssistantError, Result};

/// Fire-and-forget platform capabilities
#[async_trait]
pub trait DeviceBridge: Send + Sync {
    /// Short confirmation pulse
    async fn haptic_pulse(&self) -> Result<()>;

    /// Open a web resource in the platform browser or app handler
    async fn open_url(&self, url: &str) -> Result<()>;

    /// Show a transient message to the user
    async fn notify(&self, text: &str) -> Result<()>;
}

/// Desktop bridge: platform URL opener, stdout notifications
#[derive(Debug, Default)]
pub struct SystemDevice;

impl SystemDevice {
    pub fn new() -> Self {
        Self
    }

    fn opener() -> (&'static str, &'static [&'static str]) {
        if cfg!(target_os = "macos") {
            ("open", &[])
        } else if cfg!(target_os = "windows") {
            ("cmd", &["/C", "start", ""])
        } else {
            ("xdg-open", &[])
        }
    }
}

#[async_trait]
impl DeviceBridge for SystemDevice {
    async fn haptic_pulse(&self) -> Result<()> {
        // no vibration motor on desktop
        tracing::debug!("haptic pulse");
        Ok(())
    }

    async fn open_url(&self, url: &str) -> Result<()> {
        let (program, args) = Self::opener();
        let status = tokio::process::Command::new(program)
            .args(args)
            .arg(url)
            .status()
            .await?;

        if !status.success() {
            return Err(AssistantError::Device(format!(
                "{} exited with {} opening {}",
                program, status, url
            )));
        }
        Ok(())
    }

    async fn notify(&self, text: &str) -> Result<()> {
        println!("[notice] {}", text);
        Ok(())
    }
}

/// One observed call on a [`RecordingDevice`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceEvent {
    Haptic,
    OpenUrl(String),
    Notify(String),
}

/// Bridge that records every call and can be told to fail
///
/// Failed calls are still recorded.
#[derive(Debug, Default)]
pub struct RecordingDevice {
    events: Mutex<Vec<DeviceEvent>>,
    fail_haptic: bool,
    fail_open: bool,
    fail_notify: bool,
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `haptic_pulse` return an error
    pub fn failing_haptic(mut self) -> Self {
        self.fail_haptic = true;
        self
    }

    /// Make `open_url` return an error
    pub fn failing_open(mut self) -> Self {
        self.fail_open = true;
        self
    }

    /// Make `notify` return an error
    pub fn failing_notify(mut self) -> Self {
        self.fail_notify = true;
        self
    }

    /// Snapshot of the calls seen so far
    pub fn events(&self) -> Vec<DeviceEvent> {
        self.lock().clone()
    }

    /// URLs passed to `open_url`, in call order
    pub fn opened(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|e| match e {
                DeviceEvent::OpenUrl(url) => Some(url.clone()),
                _ => None,
            })
            .collect()
    }

    /// Texts passed to `notify`, in call order
    pub fn notifications(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|e| match e {
                DeviceEvent::Notify(text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, event: DeviceEvent) {
        self.lock().push(event);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<DeviceEvent>> {
        // a poisoned log is still a usable log
        self.events.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl DeviceBridge for RecordingDevice {
    async fn haptic_pulse(&self) -> Result<()> {
        self.record(DeviceEvent::Haptic);
        if self.fail_haptic {
            return Err(AssistantError::Device("haptics unavailable".into()));
        }
        Ok(())
    }

    async fn open_url(&self, url: &str) -> Result<()> {
        self.record(DeviceEvent::OpenUrl(url.to_string()));
        if self.fail_open {
            return Err(AssistantError::Device(format!("cannot open {}", url)));
        }
        Ok(())
    }

    async fn notify(&self, text: &str) -> Result<()> {
        self.record(DeviceEvent::Notify(text.to_string()));
        if self.fail_notify {
            return Err(AssistantError::Device("notifications unavailable".into()));
        }
        Ok(())
    }
}
