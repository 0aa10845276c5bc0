//! Intent recognition
//!
//! Free text -> normalize -> scan COMMANDS in order -> first trigger hit

pub mod matcher;
pub mod table;

pub use matcher::{match_command, match_intent, normalize, IntentMatch};
pub use table::{find_command, ActionKind, Category, Command, COMMANDS, SUGGESTIONS};
