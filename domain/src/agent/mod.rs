//! Participating agents.
//!
//! An agent is a display name, a free-text agent prompt and the model
//! that speaks for it. A run has a left and a right debater plus a
//! reviewer that writes the final summary.

pub mod entities;
pub mod tags;

pub use entities::{
    AgentConfig, DEFAULT_LEFT_NAME, DEFAULT_REVIEW_NAME, DEFAULT_RIGHT_NAME, Side,
};
pub use tags::{MAX_AGENT_PROMPT_TAGS, parse_agent_prompt_tags};
