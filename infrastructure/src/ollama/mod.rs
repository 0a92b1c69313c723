//! Ollama adapter
//!
//! Implements [`LlmGateway`](duet_application::LlmGateway) over the Ollama
//! HTTP API: single-shot chat, NDJSON streaming chat and model listing.

pub mod error;
pub mod gateway;
pub mod ndjson;
pub mod protocol;

pub use error::OllamaError;
pub use gateway::{DEFAULT_OLLAMA_URL, OllamaGateway};
