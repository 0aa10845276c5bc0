//! Barbra - voice assistant command core

pub mod action;
pub mod command;
pub mod core;
pub mod intent;
pub mod llm;
pub mod settings;
pub mod speech;
