//! Domain layer for duet
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Run
//!
//! Two agents (left and right) take alternating turns on a theme. Turns come
//! in blocks; after each block both agents vote on how many more turns the
//! discussion needs. An optional reviewer summarizes the transcript at the end.
//!
//! ## Turn quality
//!
//! - **Reasoning split**: `<think>` sections are separated from the answer
//! - **Validation**: blocking issues trigger a retry, advisories are only shown
//!
//! Everything here is pure and synchronous. Model calls, persistence and
//! terminal output live in the outer layers.

pub mod agent;
pub mod core;
pub mod debate;
pub mod prompt;
pub mod session;
pub mod text;
pub mod validation;

// Re-export commonly used types
pub use agent::{AgentConfig, Side, parse_agent_prompt_tags};
pub use core::{error::DomainError, model::ModelId, output_format::OutputFormat};
pub use debate::{
    ExtensionOutcome, InteractionMode, RunExport, RunState, RunStatus, Transcript,
    TranscriptEntry, parse_proposed_turns,
};
pub use prompt::{DebatePromptTemplate, TurnPromptInput};
pub use session::{Message, Role, SplitResponse, split_thinking};
pub use validation::{Severity, TurnContext, TurnIssue, ValidationResult, validate_turn};
