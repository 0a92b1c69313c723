//! Presentation layer for duet
//!
//! This crate contains CLI definitions, output formatters and progress
//! reporters.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, ModeArg, OutputFormat};
pub use output::console::{ConsoleFormatter, NO_MODELS_HINT};
pub use progress::reporter::{ProgressReporter, SimpleProgress, retry_marker};
