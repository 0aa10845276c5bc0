//! Command processing pipeline
//!
//! input -> Matcher -> ActionExecutor      -> AiResponse (with action)
//!                  \-> AiBackends(mode)   -> AiResponse

pub mod conversation;
pub mod processor;
pub mod response;

pub use conversation::Conversation;
pub use processor::CommandProcessor;
pub use response::{ActionDescriptor, AiResponse, ResponseKind};
