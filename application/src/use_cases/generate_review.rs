//! Generate Review use case
//!
//! Streams the reviewer's structured summary of the whole transcript.

use crate::cancellation::RunToken;
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::ProgressNotifier;
use duet_domain::{
    AgentConfig, DebatePromptTemplate, InteractionMode, SplitResponse, Transcript, split_thinking,
};
use std::sync::Arc;
use tracing::info;

/// Use case for the final review
pub struct GenerateReviewUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
}

impl<G: LlmGateway + 'static> GenerateReviewUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    pub async fn execute(
        &self,
        theme: &str,
        mode: InteractionMode,
        reviewer: &AgentConfig,
        transcript: &Transcript,
        token: &RunToken,
        progress: &dyn ProgressNotifier,
    ) -> Result<SplitResponse, GatewayError> {
        info!("Compiling final review with {}", reviewer.model_id);

        let messages = DebatePromptTemplate::final_review(theme, mode, reviewer, transcript);
        let author = reviewer.name.as_str();
        let mut on_update = |accumulated: &str, fragment: &str| {
            if token.is_current() {
                progress.on_stream_update(author, accumulated, fragment);
            }
        };

        let raw = self
            .gateway
            .complete_streaming(&reviewer.model_id, &messages, &mut on_update)
            .await?;
        Ok(split_thinking(&raw))
    }
}
