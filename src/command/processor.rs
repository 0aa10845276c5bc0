//! Command processing - intent match first, AI backend second

use crate::action::executor::{ActionExecutor, ActionParams};
use crate::command::response::{ActionDescriptor, AiResponse};
use crate::core::types::AiMode;
use crate::intent::matcher::{match_intent, normalize, trailing_text, IntentMatch};
use crate::intent::table::ActionKind;
use crate::llm::backend::AiBackends;

/// Turns one utterance into exactly one assistant response
///
/// Mode and credential are plain fields replaced through
/// [`CommandProcessor::update_config`]; each call reads them fresh.
pub struct CommandProcessor {
    executor: ActionExecutor,
    backends: AiBackends,
    mode: AiMode,
    credential: Option<String>,
}

impl CommandProcessor {
    /// New processor in offline mode with no credential
    pub fn new(executor: ActionExecutor, backends: AiBackends) -> Self {
        Self {
            executor,
            backends,
            mode: AiMode::Offline,
            credential: None,
        }
    }

    /// Replace the AI mode and credential used by subsequent calls
    ///
    /// An empty credential is stored as absent.
    pub fn update_config(&mut self, mode: AiMode, credential: Option<String>) {
        self.mode = mode;
        self.credential = credential.filter(|k| !k.trim().is_empty());
        tracing::debug!(
            "AI mode set to {} (credential {})",
            mode,
            if self.credential.is_some() { "set" } else { "unset" }
        );
    }

    pub fn mode(&self) -> AiMode {
        self.mode
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    /// Process one user utterance
    ///
    /// A matched intent runs its action and yields "Executed: ..." with an
    /// action descriptor. Anything else goes to the backend for the current
    /// mode. Never fails.
    pub async fn process_command(&self, input: &str) -> AiResponse {
        let normalized = normalize(input);

        if let Some(hit) = match_intent(&normalized) {
            tracing::debug!("Matched {} on \"{}\"", hit.command.id, hit.trigger);
            return self.run_intent(hit, &normalized).await;
        }

        self.backends
            .respond(self.mode, self.credential.as_deref(), input)
            .await
    }

    async fn run_intent(&self, hit: IntentMatch, normalized: &str) -> AiResponse {
        let command = hit.command;
        let params = extract_params(hit, normalized);
        let action_id = command.action.as_str();

        self.executor
            .execute(action_id, Some(command), params.as_ref())
            .await;
        tracing::info!("Executed {}", command.id);

        AiResponse::ai(format!("Executed: {}", command.description)).with_action(
            ActionDescriptor {
                action_type: action_id.to_string(),
                target: command.target.map(str::to_string),
                parameters: params,
            },
        )
    }
}

/// Arguments carried by the utterance itself
///
/// Only searches take one: the words after the trigger become `query`.
fn extract_params(hit: IntentMatch, normalized: &str) -> Option<ActionParams> {
    match hit.command.action {
        ActionKind::SearchYoutube => trailing_text(normalized, hit.trigger).map(|query| {
            let mut params = ActionParams::new();
            params.insert("query".to_string(), query);
            params
        }),
        _ => None,
    }
}
