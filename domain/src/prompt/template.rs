//! Prompt templates for the debate flow
//!
//! Every builder returns a `[system, user]` message pair. The builders are
//! pure and deterministic: the same inputs always produce the same messages.

use crate::agent::{AgentConfig, parse_agent_prompt_tags};
use crate::debate::mode::InteractionMode;
use crate::debate::transcript::{NO_PRIOR_MESSAGE, NO_PRIOR_MESSAGES, Transcript};
use crate::session::entities::Message;

/// Shared ingredients of the turn and retry prompts.
#[derive(Debug, Clone, Copy)]
pub struct TurnPromptInput<'a> {
    pub theme: &'a str,
    pub mode: InteractionMode,
    pub speaker: &'a AgentConfig,
    pub other: &'a AgentConfig,
    pub transcript: &'a Transcript,
    /// 1-based number of the turn being generated
    pub turn_number: usize,
}

impl TurnPromptInput<'_> {
    fn other_last(&self) -> &str {
        self.transcript
            .last_by_author(&self.other.name)
            .filter(|text| !text.is_empty())
            .unwrap_or(NO_PRIOR_MESSAGE)
    }

    fn own_last(&self) -> &str {
        self.transcript
            .last_by_author(&self.speaker.name)
            .filter(|text| !text.is_empty())
            .unwrap_or(NO_PRIOR_MESSAGE)
    }

    fn window(&self) -> String {
        let window = self.transcript.render_window();
        if window.is_empty() {
            NO_PRIOR_MESSAGES.to_string()
        } else {
            window
        }
    }
}

/// Templates for generating prompts at each stage
pub struct DebatePromptTemplate;

impl DebatePromptTemplate {
    /// Turn-generation prompt.
    pub fn turn(input: &TurnPromptInput<'_>) -> Vec<Message> {
        let speaker = &input.speaker.name;
        let other = &input.other.name;

        let system = format!(
            "You are {speaker} in a live discussion with {other}. \
             Write like a natural conversation, not a template. \
             Avoid generic agreement and avoid setup phrases like 'let's begin'.{}{}",
            Self::mode_block(input.mode),
            Self::agent_prompt_block(&input.speaker.agent_prompt),
        );

        let user = format!(
            "Theme: {theme}\n\
             Mode: {mode}\n\
             Turn number: {turn}\n\
             Latest message from {other}: {other_last}\n\
             Your previous message: {own_last}\n\
             Recent transcript (last turns):\n\
             {window}\n\n\
             Reply directly to {other}. \
             Use 2-5 sentences, add a new angle, and end with a question to keep the discussion moving.",
            theme = input.theme,
            mode = input.mode,
            turn = input.turn_number,
            other_last = input.other_last(),
            own_last = input.own_last(),
            window = input.window(),
        );

        vec![Message::system(system), Message::user(user)]
    }

    /// Retry prompt for a turn that failed blocking validation.
    pub fn retry(input: &TurnPromptInput<'_>, rejected: &str, issues: &[String]) -> Vec<Message> {
        let speaker = &input.speaker.name;
        let other = &input.other.name;

        let system = format!(
            "You are {speaker}. Rewrite your previous answer as a better conversational reply to {other}. \
             No rigid headings, no setup phrases, no generic agreement-only text.{}{}",
            Self::mode_block(input.mode),
            Self::agent_prompt_block(&input.speaker.agent_prompt),
        );

        let user = format!(
            "Theme: {theme}\n\
             Mode: {mode}\n\
             Turn number: {turn}\n\
             Validation failures: {issues}\n\
             Your previous answer: {rejected}\n\
             Latest message from {other}: {other_last}\n\
             Recent transcript:\n\
             {window}\n\n\
             Now reply naturally to {other} in 2-5 sentences, reference a specific point, \
             add new reasoning, and end with a question.",
            theme = input.theme,
            mode = input.mode,
            turn = input.turn_number,
            issues = issues.join("; "),
            other_last = input.other_last(),
            window = input.window(),
        );

        vec![Message::system(system), Message::user(user)]
    }

    /// Extension-vote prompt. Carries the full transcript.
    pub fn extension_vote(
        theme: &str,
        mode: InteractionMode,
        voter: &AgentConfig,
        transcript: &Transcript,
    ) -> Vec<Message> {
        let system = format!(
            "You are {}. Decide whether the brainstorm needs extra turns. \
             Return only an integer from 0 to 10.{}{}",
            voter.name,
            Self::mode_block(mode),
            Self::agent_prompt_block(&voter.agent_prompt),
        );

        let user = format!(
            "Theme: {theme}\n\
             Mode: {mode}\n\
             Transcript:\n\
             {transcript}\n\n\
             How many additional turns are needed? Return only an integer.",
            transcript = transcript.render(),
        );

        vec![Message::system(system), Message::user(user)]
    }

    /// Final-review prompt. Carries the full transcript.
    pub fn final_review(
        theme: &str,
        mode: InteractionMode,
        reviewer: &AgentConfig,
        transcript: &Transcript,
    ) -> Vec<Message> {
        let system = format!(
            "You are {}, an expert facilitator. \
             Produce one structured, comprehensive review from the full discussion.{}{}",
            reviewer.name,
            Self::mode_block(mode),
            Self::agent_prompt_block(&reviewer.agent_prompt),
        );

        let user = format!(
            "Theme: {theme}\n\
             Mode: {mode}\n\n\
             Discussion transcript:\n\
             {transcript}\n\n\
             Create a final review with sections: Summary, Key Agreements, Key Disagreements, Risks, Actionable Plan.",
            transcript = transcript.render(),
        );

        vec![Message::system(system), Message::user(user)]
    }

    fn mode_block(mode: InteractionMode) -> String {
        format!("\nInteraction mode: {}", mode.guidance())
    }

    fn agent_prompt_block(agent_prompt: &str) -> String {
        let tags = parse_agent_prompt_tags(agent_prompt);
        if tags.is_empty() {
            String::new()
        } else {
            format!("\nAgent prompt instructions: {}", tags.join(" | "))
        }
    }
}
