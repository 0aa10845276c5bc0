//! AI backends for free-form replies
//!
//! Unmatched input -> AiBackends::respond(mode) -> offline | cloud | local

pub mod backend;
pub mod client;

pub use backend::AiBackends;
pub use client::{ChatCompletionClient, OllamaClient};
