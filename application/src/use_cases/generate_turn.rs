//! Generate Turn use case
//!
//! Produces one agent turn: stream a reply, split off the reasoning,
//! validate the clean answer and retry with a corrective prompt while
//! blocking issues remain. After the last retry the final attempt is
//! accepted as is.

use crate::cancellation::RunToken;
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::ProgressNotifier;
use duet_domain::{
    AgentConfig, DebatePromptTemplate, InteractionMode, Message, SplitResponse, Transcript,
    TranscriptEntry, TurnContext, TurnPromptInput, ValidationResult, split_thinking,
    validate_turn,
};
use duet_domain::core::string::truncate;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Retries after the first attempt (three attempts in total).
pub const MAX_TURN_RETRIES: usize = 2;

/// Input for one turn
#[derive(Debug, Clone, Copy)]
pub struct GenerateTurnInput<'a> {
    pub theme: &'a str,
    pub mode: InteractionMode,
    pub active: &'a AgentConfig,
    pub other: &'a AgentConfig,
    pub transcript: &'a Transcript,
    /// 1-based
    pub turn_number: usize,
}

impl<'a> GenerateTurnInput<'a> {
    fn prompt_input(&self) -> TurnPromptInput<'a> {
        TurnPromptInput {
            theme: self.theme,
            mode: self.mode,
            speaker: self.active,
            other: self.other,
            transcript: self.transcript,
            turn_number: self.turn_number,
        }
    }

    fn turn_context(&self) -> TurnContext<'a> {
        TurnContext {
            speaker: &self.active.name,
            other: &self.other.name,
            agent_prompt: &self.active.agent_prompt,
            transcript: self.transcript,
        }
    }
}

/// The accepted turn and how it got there
#[derive(Debug, Clone)]
pub struct GeneratedTurn {
    pub response: SplitResponse,
    /// Generation attempts made, 1 to `MAX_TURN_RETRIES + 1`
    pub attempts: usize,
    /// Blocking reasons still present on the accepted attempt
    pub unresolved: Vec<String>,
    /// Advisory warnings of the accepted attempt
    pub warnings: Vec<String>,
}

impl GeneratedTurn {
    /// Accepted despite blocking issues after all retries.
    pub fn is_best_effort(&self) -> bool {
        !self.unresolved.is_empty()
    }

    pub fn into_entry(self, author: impl Into<String>) -> TranscriptEntry {
        TranscriptEntry::new(author, self.response)
    }
}

/// Use case for generating one validated turn
pub struct GenerateTurnUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
}

impl<G: LlmGateway + 'static> GenerateTurnUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Generate a turn, pushing streaming updates to `progress` while
    /// `token` is current.
    pub async fn execute(
        &self,
        input: GenerateTurnInput<'_>,
        token: &RunToken,
        progress: &dyn ProgressNotifier,
    ) -> Result<GeneratedTurn, GatewayError> {
        let author = input.active.name.as_str();
        let prompt_input = input.prompt_input();

        let messages = DebatePromptTemplate::turn(&prompt_input);
        let mut response = self.stream(input.active, &messages, token, progress).await?;
        let mut validation = self.check(&input, &response, token, progress);

        let mut retries = 0;
        while validation.is_blocked() && retries < MAX_TURN_RETRIES {
            retries += 1;
            let reasons = validation.blocking_reasons();
            warn!(
                "{} failed validation, retry {}: {}",
                author,
                retries,
                reasons.join(", ")
            );
            if token.is_current() {
                progress.on_retry(author, retries, MAX_TURN_RETRIES, &reasons);
            }

            let messages =
                DebatePromptTemplate::retry(&prompt_input, &response.clean_text, &reasons);
            response = self.stream(input.active, &messages, token, progress).await?;
            validation = self.check(&input, &response, token, progress);
        }

        let unresolved = validation.blocking_reasons();
        if !unresolved.is_empty() {
            warn!(
                "{} still weak after retries: {}",
                author,
                unresolved.join(", ")
            );
        } else {
            debug!("{} turn {} accepted after {} attempt(s)", author, input.turn_number, retries + 1);
        }

        Ok(GeneratedTurn {
            response,
            attempts: retries + 1,
            unresolved,
            warnings: validation.warning_reasons(),
        })
    }

    async fn stream(
        &self,
        agent: &AgentConfig,
        messages: &[Message],
        token: &RunToken,
        progress: &dyn ProgressNotifier,
    ) -> Result<SplitResponse, GatewayError> {
        let author = agent.name.as_str();
        let mut on_update = |accumulated: &str, fragment: &str| {
            if token.is_current() {
                progress.on_stream_update(author, accumulated, fragment);
            }
        };

        info!("Streaming turn from {} ({})", author, agent.model_id);
        let raw = self
            .gateway
            .complete_streaming(&agent.model_id, messages, &mut on_update)
            .await?;
        let response = split_thinking(&raw);
        debug!("{} replied: {}", author, truncate(&response.clean_text, 120));
        Ok(response)
    }

    fn check(
        &self,
        input: &GenerateTurnInput<'_>,
        response: &SplitResponse,
        token: &RunToken,
        progress: &dyn ProgressNotifier,
    ) -> ValidationResult {
        let validation = validate_turn(&response.clean_text, input.turn_context());
        if !validation.warnings.is_empty() {
            let warnings = validation.warning_reasons();
            warn!("{} advisory: {}", input.active.name, warnings.join(", "));
            if token.is_current() {
                progress.on_advisory(&input.active.name, &warnings);
            }
        }
        validation
    }
}
