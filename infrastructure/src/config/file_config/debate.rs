//! Run settings from TOML (`[debate]` section)

use duet_application::RunDebateInput;
use duet_domain::InteractionMode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDebateConfig {
    /// "debate", "collaboration" or "open"
    pub interaction_mode: InteractionMode,
    /// Turns in the first block
    pub initial_turns: usize,
    /// Upper bound on extension blocks
    pub max_extensions: usize,
    /// Run the final review after a completed discussion
    pub review_enabled: bool,
}

impl Default for FileDebateConfig {
    fn default() -> Self {
        Self {
            interaction_mode: InteractionMode::default(),
            initial_turns: RunDebateInput::DEFAULT_INITIAL_TURNS,
            max_extensions: RunDebateInput::DEFAULT_MAX_EXTENSIONS,
            review_enabled: true,
        }
    }
}
