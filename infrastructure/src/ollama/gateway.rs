//! Ollama LLM Gateway implementation

use super::error::{OllamaError, Result};
use super::ndjson::decode_chat_stream;
use super::protocol::{ChatRequest, ChatResponse, TagsResponse};
use async_trait::async_trait;
use duet_application::{GatewayError, LlmGateway, UpdateSink};
use duet_domain::{Message, ModelId};
use tracing::{debug, info};

/// Address of a default local Ollama install.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// LLM Gateway talking to an Ollama server over HTTP
#[derive(Debug, Clone)]
pub struct OllamaGateway {
    client: reqwest::Client,
    base_url: String,
}

impl OllamaGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a gateway sharing an existing HTTP client
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        info!("OllamaGateway targeting {}", base_url);
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_chat(&self, request: &ChatRequest<'_>) -> Result<reqwest::Response> {
        let response = self
            .client
            .post(self.endpoint("/api/chat"))
            .json(request)
            .send()
            .await?;
        ensure_success(response).await
    }

    async fn chat(&self, model: &ModelId, messages: &[Message]) -> Result<String> {
        debug!("Chat request to {} ({} messages)", model, messages.len());
        let response = self
            .post_chat(&ChatRequest::new(model, messages, false))
            .await?;
        let body: ChatResponse = serde_json::from_slice(&response.bytes().await?)?;
        if let Some(error) = body.error_message() {
            return Err(OllamaError::Generation(error));
        }
        Ok(body.content().trim().to_string())
    }

    async fn chat_stream(
        &self,
        model: &ModelId,
        messages: &[Message],
        on_update: UpdateSink<'_>,
    ) -> Result<String> {
        debug!("Streaming chat request to {} ({} messages)", model, messages.len());
        let response = self
            .post_chat(&ChatRequest::new(model, messages, true))
            .await?;
        decode_chat_stream(Box::pin(response.bytes_stream()), on_update).await
    }

    async fn tags(&self) -> Result<Vec<ModelId>> {
        let response = self.client.get(self.endpoint("/api/tags")).send().await?;
        let response = ensure_success(response).await?;
        let tags: TagsResponse = serde_json::from_slice(&response.bytes().await?)?;
        Ok(tags.model_ids())
    }
}

impl Default for OllamaGateway {
    fn default() -> Self {
        Self::new(DEFAULT_OLLAMA_URL)
    }
}

/// Turn a non-success status into [`OllamaError::Status`] carrying the body.
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(OllamaError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl LlmGateway for OllamaGateway {
    async fn complete(
        &self,
        model: &ModelId,
        messages: &[Message],
    ) -> std::result::Result<String, GatewayError> {
        Ok(self.chat(model, messages).await?)
    }

    async fn complete_streaming(
        &self,
        model: &ModelId,
        messages: &[Message],
        on_update: UpdateSink<'_>,
    ) -> std::result::Result<String, GatewayError> {
        Ok(self.chat_stream(model, messages, on_update).await?)
    }

    async fn available_models(&self) -> std::result::Result<Vec<ModelId>, GatewayError> {
        Ok(self.tags().await?)
    }
}
