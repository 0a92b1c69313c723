//! Error types for the Ollama adapter

use duet_application::GatewayError;
use thiserror::Error;

/// Result type alias for Ollama operations
pub type Result<T> = std::result::Result<T, OllamaError>;

/// Errors that can occur when talking to an Ollama server
#[derive(Error, Debug)]
pub enum OllamaError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Ollama error ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("Stream read failed: {0}")]
    Stream(String),

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<OllamaError> for GatewayError {
    fn from(e: OllamaError) -> Self {
        match e {
            OllamaError::Status { status, body } => GatewayError::RemoteService { status, body },
            OllamaError::Generation(message) => GatewayError::RemoteGeneration(message),
            OllamaError::Http(e) if e.is_decode() => GatewayError::InvalidResponse(e.to_string()),
            OllamaError::Http(e) => GatewayError::Connection(e.to_string()),
            OllamaError::Stream(message) => GatewayError::Connection(message),
            OllamaError::Parse(e) => GatewayError::InvalidResponse(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_to_gateway_taxonomy() {
        let status: GatewayError = OllamaError::Status {
            status: 404,
            body: "model 'x' not found".to_string(),
        }
        .into();
        assert_eq!(
            status,
            GatewayError::RemoteService {
                status: 404,
                body: "model 'x' not found".to_string()
            }
        );

        let generation: GatewayError = OllamaError::Generation("out of memory".to_string()).into();
        assert_eq!(
            generation,
            GatewayError::RemoteGeneration("out of memory".to_string())
        );
    }
}
