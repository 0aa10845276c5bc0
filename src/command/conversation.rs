//! Conversation loop on the caller side of the processor
//!
//! Records both sides of every exchange and guarantees a reply even if the
//! processor panics.

use std::panic::AssertUnwindSafe;

use futures::FutureExt;

use crate::command::processor::CommandProcessor;
use crate::command::response::AiResponse;
use crate::settings::AppSettings;
use crate::speech::SpeechRecognizer;

pub const MSG_PROCESSING_FAILED: &str = "Sorry, I encountered an error processing your command.";

/// Conversation history plus the processor answering into it
///
/// `submit` takes `&mut self`, so only one request is ever in flight.
pub struct Conversation {
    processor: CommandProcessor,
    history: Vec<AiResponse>,
}

impl Conversation {
    pub fn new(processor: CommandProcessor) -> Self {
        Self {
            processor,
            history: Vec::new(),
        }
    }

    pub fn history(&self) -> &[AiResponse] {
        &self.history
    }

    pub fn processor(&self) -> &CommandProcessor {
        &self.processor
    }

    /// Push the AI mode and key from settings into the processor
    pub fn apply_settings(&mut self, settings: &AppSettings) {
        self.processor
            .update_config(settings.ai_mode, settings.api_key.clone());
    }

    /// Submit one utterance
    ///
    /// Blank input is ignored and returns `None`. Otherwise a user record and
    /// an assistant record are appended and the latter is returned.
    pub async fn submit(&mut self, input: &str) -> Option<&AiResponse> {
        if input.trim().is_empty() {
            return None;
        }

        self.history.push(AiResponse::user(input));

        let reply = match AssertUnwindSafe(self.processor.process_command(input))
            .catch_unwind()
            .await
        {
            Ok(reply) => reply,
            Err(_) => {
                tracing::error!("Command processing panicked for input {:?}", input);
                AiResponse::ai(MSG_PROCESSING_FAILED)
            }
        };

        self.history.push(reply);
        self.history.last()
    }

    /// Submit the recognizer's transcript once it has finished listening
    ///
    /// The recognizer is reset after a submission so the same words are not
    /// sent twice.
    pub async fn submit_transcript(
        &mut self,
        recognizer: &mut dyn SpeechRecognizer,
    ) -> Option<&AiResponse> {
        if let Some(err) = recognizer.error() {
            tracing::warn!("Speech recognition error: {}", err);
        }

        let text = recognizer.finished_transcript()?.to_string();
        recognizer.reset();
        self.submit(&text).await
    }
}
