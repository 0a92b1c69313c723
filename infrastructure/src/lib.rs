//! Infrastructure layer for duet
//!
//! Adapters implementing the ports defined in the application layer: the
//! Ollama gateway, the run-history client, run export files, the JSONL
//! conversation log and configuration file loading.

pub mod config;
pub mod export;
pub mod logging;
pub mod ollama;
pub mod persistence;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileAgentConfig, FileAgentsConfig, FileConfig,
    FileDebateConfig, FileLoggingConfig, FileOllamaConfig, FileOutputConfig,
    FilePersistenceConfig,
};
pub use export::{ExportError, RunExportWriter};
pub use logging::JsonlConversationLogger;
pub use ollama::{DEFAULT_OLLAMA_URL, OllamaError, OllamaGateway};
pub use persistence::{DEFAULT_RUN_STORE_URL, HttpRunStore};
