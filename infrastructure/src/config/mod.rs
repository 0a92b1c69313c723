//! Configuration file loading for duet
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./duet.toml` or `./.duet.toml`
//! 3. Global: `$XDG_CONFIG_HOME/duet/config.toml`
//! 4. Environment: `DUET_<SECTION>__<KEY>`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAgentConfig, FileAgentsConfig, FileConfig, FileDebateConfig,
    FileLoggingConfig, FileOllamaConfig, FileOutputConfig, FilePersistenceConfig,
};
pub use loader::ConfigLoader;
