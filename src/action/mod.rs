//! Device actions for matched commands

pub mod device;
pub mod executor;

pub use device::{DeviceBridge, DeviceEvent, RecordingDevice, SystemDevice};
pub use executor::{ActionExecutor, ActionParams};
