//! Run history configuration from TOML (`[persistence]` section)

use crate::persistence::DEFAULT_RUN_STORE_URL;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePersistenceConfig {
    /// Record runs in the run-history service
    pub enabled: bool,
    /// Base URL of the run-history service
    pub base_url: String,
}

impl Default for FilePersistenceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: DEFAULT_RUN_STORE_URL.to_string(),
        }
    }
}
