//! Agent configuration from TOML (`[agents.left]`, `[agents.right]`, `[agents.review]`)

use duet_domain::agent::{DEFAULT_LEFT_NAME, DEFAULT_REVIEW_NAME, DEFAULT_RIGHT_NAME};
use duet_domain::{AgentConfig, ModelId};
use serde::{Deserialize, Serialize};

/// One agent. Unset fields fall back to the role's defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentConfig {
    /// Display name
    pub name: Option<String>,
    /// Free-form prompt, split into at most five tags
    pub prompt: String,
    /// Ollama model tag
    pub model: Option<String>,
}

impl FileAgentConfig {
    fn to_agent(&self, default_name: &str, fallback_model: ModelId) -> AgentConfig {
        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(default_name);
        let model = self.model.as_deref().map(ModelId::new).unwrap_or(fallback_model);
        AgentConfig::new(name, model).with_agent_prompt(self.prompt.trim())
    }

    /// `true` when a model is set but blank
    pub fn has_empty_model(&self) -> bool {
        self.model.as_deref().is_some_and(|m| m.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentsConfig {
    pub left: FileAgentConfig,
    pub right: FileAgentConfig,
    pub review: FileAgentConfig,
}

impl FileAgentsConfig {
    pub fn left_agent(&self) -> AgentConfig {
        self.left.to_agent(DEFAULT_LEFT_NAME, ModelId::default())
    }

    pub fn right_agent(&self) -> AgentConfig {
        self.right.to_agent(DEFAULT_RIGHT_NAME, ModelId::default())
    }

    /// The reviewer falls back to the left agent's model.
    pub fn review_agent(&self) -> AgentConfig {
        self.review
            .to_agent(DEFAULT_REVIEW_NAME, self.left_agent().model_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let agents = FileAgentsConfig::default();
        assert_eq!(agents.left_agent().name, DEFAULT_LEFT_NAME);
        assert_eq!(agents.right_agent().name, DEFAULT_RIGHT_NAME);
        assert_eq!(agents.review_agent().name, DEFAULT_REVIEW_NAME);
        assert_eq!(agents.left_agent().model_id, ModelId::default());
    }

    #[test]
    fn test_review_model_follows_left() {
        let agents: FileAgentsConfig = toml::from_str(
            r#"
[left]
name = "Optimist"
model = "qwen3:4b"
prompt = "upbeat, concrete"

[review]
name = "  "
"#,
        )
        .unwrap();

        let left = agents.left_agent();
        assert_eq!(left.name, "Optimist");
        assert_eq!(left.agent_prompt, "upbeat, concrete");

        let review = agents.review_agent();
        assert_eq!(review.model_id, ModelId::new("qwen3:4b"));
        assert_eq!(review.name, DEFAULT_REVIEW_NAME);
    }

    #[test]
    fn test_empty_model_detected() {
        let agent = FileAgentConfig {
            model: Some(" ".to_string()),
            ..Default::default()
        };
        assert!(agent.has_empty_model());
        assert!(!FileAgentConfig::default().has_empty_model());
    }
}
