//! Raw TOML configuration data types
//!
//! These structs mirror the TOML file. They deserialize directly and use
//! domain types where a closed set of values exists.

mod agents;
mod debate;
mod logging;
mod ollama;
mod output;
mod persistence;

pub use agents::{FileAgentConfig, FileAgentsConfig};
pub use debate::FileDebateConfig;
pub use logging::FileLoggingConfig;
pub use ollama::FileOllamaConfig;
pub use output::FileOutputConfig;
pub use persistence::FilePersistenceConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Problems found by [`FileConfig::validate`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("agents.{0}.model cannot be empty")]
    EmptyModelName(&'static str),

    #[error("debate.initial_turns is 0; the first block will still run one turn")]
    ZeroInitialTurns,

    #[error("{0}.base_url cannot be empty")]
    EmptyBaseUrl(&'static str),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub ollama: FileOllamaConfig,
    pub persistence: FilePersistenceConfig,
    pub debate: FileDebateConfig,
    pub agents: FileAgentsConfig,
    pub output: FileOutputConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration, returning every issue found.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        for (role, agent) in [
            ("left", &self.agents.left),
            ("right", &self.agents.right),
            ("review", &self.agents.review),
        ] {
            if agent.has_empty_model() {
                issues.push(ConfigValidationError::EmptyModelName(role));
            }
        }

        if self.debate.initial_turns == 0 {
            issues.push(ConfigValidationError::ZeroInitialTurns);
        }

        if self.ollama.base_url.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyBaseUrl("ollama"));
        }
        if self.persistence.enabled && self.persistence.base_url.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyBaseUrl("persistence"));
        }

        issues
    }
}
