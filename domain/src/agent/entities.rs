//! Agent entities

use crate::core::model::ModelId;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LEFT_NAME: &str = "Left Analyst";
pub const DEFAULT_RIGHT_NAME: &str = "Right Analyst";
pub const DEFAULT_REVIEW_NAME: &str = "Reviewer";

/// Which debater is speaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// The side that speaks the turn following `total_turns` completed turns.
    ///
    /// Even counts belong to the left speaker.
    pub fn for_turn(total_turns: usize) -> Self {
        if total_turns % 2 == 0 {
            Side::Left
        } else {
            Side::Right
        }
    }

    pub fn other(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration of one participating agent (Value Object)
///
/// Immutable for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentConfig {
    /// Display name used as transcript author
    pub name: String,
    /// Free-text instructions, delimited by `;`, `,` or newlines
    #[serde(default)]
    pub agent_prompt: String,
    /// Model that generates this agent's turns
    pub model_id: ModelId,
}

impl AgentConfig {
    pub fn new(name: impl Into<String>, model_id: impl Into<ModelId>) -> Self {
        Self {
            name: name.into(),
            agent_prompt: String::new(),
            model_id: model_id.into(),
        }
    }

    pub fn with_agent_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.agent_prompt = prompt.into().trim().to_string();
        self
    }

    /// Default left debater
    pub fn left(model_id: impl Into<ModelId>) -> Self {
        Self::new(DEFAULT_LEFT_NAME, model_id)
    }

    /// Default right debater
    pub fn right(model_id: impl Into<ModelId>) -> Self {
        Self::new(DEFAULT_RIGHT_NAME, model_id)
    }

    /// Default reviewer
    pub fn reviewer(model_id: impl Into<ModelId>) -> Self {
        Self::new(DEFAULT_REVIEW_NAME, model_id)
    }
}
