//! Interaction mode

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// How the two agents should engage with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionMode {
    /// Challenge assumptions and compare alternatives
    Debate,
    /// Combine ideas and converge on next steps
    Collaboration,
    /// Free exploration
    #[default]
    Open,
}

impl InteractionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionMode::Debate => "debate",
            InteractionMode::Collaboration => "collaboration",
            InteractionMode::Open => "open",
        }
    }

    /// Fixed guidance appended to every system prompt.
    pub fn guidance(&self) -> &'static str {
        match self {
            InteractionMode::Debate => {
                "Debate mode: respectfully challenge weak assumptions and compare alternatives."
            }
            InteractionMode::Collaboration => {
                "Collaboration mode: align, combine ideas, and converge on practical next steps."
            }
            InteractionMode::Open => {
                "Open mode: explore the topic freely while still responding directly to each other."
            }
        }
    }
}

impl std::fmt::Display for InteractionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for InteractionMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debate" => Ok(InteractionMode::Debate),
            "collaboration" | "collab" => Ok(InteractionMode::Collaboration),
            "open" => Ok(InteractionMode::Open),
            other => Err(DomainError::UnknownInteractionMode(other.to_string())),
        }
    }
}
