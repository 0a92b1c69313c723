//! Decide Extension use case
//!
//! Both debaters vote on how many more turns the discussion needs. The two
//! requests run concurrently and the reduction is order-independent.

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use duet_domain::{
    AgentConfig, DebatePromptTemplate, ExtensionOutcome, InteractionMode, Transcript,
    parse_proposed_turns, split_thinking,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Use case for the extension vote
pub struct DecideExtensionUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
}

impl<G: LlmGateway + 'static> DecideExtensionUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    pub async fn execute(
        &self,
        theme: &str,
        mode: InteractionMode,
        left: &AgentConfig,
        right: &AgentConfig,
        transcript: &Transcript,
    ) -> Result<ExtensionOutcome, GatewayError> {
        let (left_vote, right_vote) = tokio::try_join!(
            self.vote(theme, mode, left, transcript),
            self.vote(theme, mode, right, transcript),
        )?;

        let outcome = ExtensionOutcome::from_votes(left_vote, right_vote);
        info!("Outcome decided: {}", outcome);
        Ok(outcome)
    }

    async fn vote(
        &self,
        theme: &str,
        mode: InteractionMode,
        voter: &AgentConfig,
        transcript: &Transcript,
    ) -> Result<u32, GatewayError> {
        let messages = DebatePromptTemplate::extension_vote(theme, mode, voter, transcript);
        let raw = self.gateway.complete(&voter.model_id, &messages).await?;
        let vote = parse_proposed_turns(&split_thinking(&raw).clean_text);
        debug!("{} proposed {} more turns (raw: {:?})", voter.name, vote, raw);
        Ok(vote)
    }
}
