//! LLM Gateway port
//!
//! Defines the interface for communicating with the completion service.

use async_trait::async_trait;
use duet_domain::{Message, ModelId};
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Non-success HTTP status from the completion or catalog endpoint
    #[error("Remote service error ({status}): {body}")]
    RemoteService { status: u16, body: String },

    /// The service reported an error inside the response stream
    #[error("Remote generation error: {0}")]
    RemoteGeneration(String),

    #[error("Streaming is not supported by this gateway")]
    StreamingUnsupported,

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Receives `(accumulated_text, fragment)` for every streamed fragment.
pub type UpdateSink<'a> = &'a mut (dyn FnMut(&str, &str) + Send);

/// Gateway for LLM communication
///
/// This port defines how the application layer talks to the completion
/// service. Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Request a whole answer in one response.
    async fn complete(&self, model: &ModelId, messages: &[Message])
    -> Result<String, GatewayError>;

    /// Request an incremental answer.
    ///
    /// `on_update` is called once per fragment with the text accumulated so
    /// far. The returned text is the full answer, trimmed. An in-stream error
    /// discards everything accumulated.
    ///
    /// The default implementation reports [`GatewayError::StreamingUnsupported`].
    async fn complete_streaming(
        &self,
        _model: &ModelId,
        _messages: &[Message],
        _on_update: UpdateSink<'_>,
    ) -> Result<String, GatewayError> {
        Err(GatewayError::StreamingUnsupported)
    }

    /// Models installed on the service, deduplicated and sorted.
    async fn available_models(&self) -> Result<Vec<ModelId>, GatewayError>;
}
