//! Prompt construction for every model call in a run.

pub mod template;

pub use template::{DebatePromptTemplate, TurnPromptInput};
