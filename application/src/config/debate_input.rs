//! Input of one debate run.

use duet_domain::{AgentConfig, DomainError, InteractionMode};
use serde::{Deserialize, Serialize};

/// Everything a run needs, built by the caller from config and flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunDebateInput {
    pub theme: String,
    pub interaction_mode: InteractionMode,
    /// Length of the first block, raised to 1 when zero
    pub initial_turns: usize,
    pub max_extensions: usize,
    pub review_enabled: bool,
    pub left: AgentConfig,
    pub right: AgentConfig,
    pub review: AgentConfig,
}

impl RunDebateInput {
    pub const DEFAULT_INITIAL_TURNS: usize = 4;
    pub const DEFAULT_MAX_EXTENSIONS: usize = 2;

    /// Create an input with default counters. The reviewer uses the left model.
    pub fn new(theme: impl Into<String>, left: AgentConfig, right: AgentConfig) -> Self {
        let review = AgentConfig::reviewer(left.model_id.clone());
        Self {
            theme: theme.into().trim().to_string(),
            interaction_mode: InteractionMode::default(),
            initial_turns: Self::DEFAULT_INITIAL_TURNS,
            max_extensions: Self::DEFAULT_MAX_EXTENSIONS,
            review_enabled: true,
            left,
            right,
            review,
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_mode(mut self, mode: InteractionMode) -> Self {
        self.interaction_mode = mode;
        self
    }

    pub fn with_initial_turns(mut self, turns: usize) -> Self {
        self.initial_turns = turns;
        self
    }

    pub fn with_max_extensions(mut self, max: usize) -> Self {
        self.max_extensions = max;
        self
    }

    pub fn with_review(mut self, review: AgentConfig) -> Self {
        self.review = review;
        self
    }

    pub fn without_review(mut self) -> Self {
        self.review_enabled = false;
        self
    }

    /// Reject inputs a run cannot start with.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.theme.trim().is_empty() {
            return Err(DomainError::EmptyTheme);
        }
        if self.left.model_id.is_empty() {
            return Err(DomainError::EmptyModel(self.left.name.clone()));
        }
        if self.right.model_id.is_empty() {
            return Err(DomainError::EmptyModel(self.right.name.clone()));
        }
        if self.review_enabled && self.review.model_id.is_empty() {
            return Err(DomainError::EmptyModel(self.review.name.clone()));
        }
        if self.left.name == self.right.name {
            return Err(DomainError::InvalidConfiguration(format!(
                "both agents are named '{}'",
                self.left.name
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> RunDebateInput {
        RunDebateInput::new(
            "  Remote work  ",
            AgentConfig::left("gemma3:1b"),
            AgentConfig::right("qwen3:4b"),
        )
    }

    #[test]
    fn test_defaults() {
        let input = input();
        assert_eq!(input.theme, "Remote work");
        assert_eq!(input.interaction_mode, InteractionMode::Open);
        assert!(input.review_enabled);
        assert_eq!(input.review.name, "Reviewer");
        assert_eq!(input.review.model_id.as_str(), "gemma3:1b");
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_empty_theme_rejected() {
        let mut input = input();
        input.theme = "   ".to_string();
        assert_eq!(input.validate(), Err(DomainError::EmptyTheme));
    }

    #[test]
    fn test_empty_review_model_only_matters_when_enabled() {
        let input = input().with_review(AgentConfig::reviewer(""));
        assert!(matches!(input.validate(), Err(DomainError::EmptyModel(_))));
        assert!(input.without_review().validate().is_ok());
    }

    #[test]
    fn test_same_names_rejected() {
        let input = RunDebateInput::new(
            "t",
            AgentConfig::new("Same", "m"),
            AgentConfig::new("Same", "m"),
        );
        assert!(matches!(
            input.validate(),
            Err(DomainError::InvalidConfiguration(_))
        ));
    }
}
