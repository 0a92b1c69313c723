//! Application layer for duet
//!
//! This crate contains use cases, port definitions, run cancellation, and
//! application configuration. It depends only on the domain layer.

pub mod cancellation;
pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use cancellation::{RunToken, RunTokenSource};
pub use config::RunDebateInput;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{GatewayError, LlmGateway, UpdateSink},
    progress::{NoProgress, ProgressNotifier},
    run_store::{
        MessageKind, NewMessage, NoRunStore, PersistenceError, RunId, RunPatch, RunStore,
        RunSummary, StoredMessage, StoredRun,
    },
};
pub use use_cases::decide_extension::DecideExtensionUseCase;
pub use use_cases::generate_review::GenerateReviewUseCase;
pub use use_cases::generate_turn::{
    GenerateTurnInput, GenerateTurnUseCase, GeneratedTurn, MAX_TURN_RETRIES,
};
pub use use_cases::run_debate::{RunDebateError, RunDebateOutput, RunDebateUseCase, RunOutcome};
