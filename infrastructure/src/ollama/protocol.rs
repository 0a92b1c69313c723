//! Wire types of the Ollama HTTP API.
//!
//! - `POST /api/chat` with `stream: false` returns one [`ChatResponse`]
//! - `POST /api/chat` with `stream: true` returns newline-delimited
//!   [`ChatResponse`] objects, or an object carrying `error`
//! - `GET /api/tags` returns the installed models

use duet_domain::{Message, ModelId};
use serde::{Deserialize, Serialize};

/// Request body of `/api/chat`
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [Message],
    pub stream: bool,
}

impl<'a> ChatRequest<'a> {
    pub fn new(model: &'a ModelId, messages: &'a [Message], stream: bool) -> Self {
        Self {
            model: model.as_str(),
            messages,
            stream,
        }
    }
}

/// One response object (whole answer or one stream line)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub message: Option<ChatMessage>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
    #[serde(default)]
    pub done: bool,
}

impl ChatResponse {
    /// Text carried by this object, empty when absent.
    pub fn content(&self) -> &str {
        self.message
            .as_ref()
            .map(|m| m.content.as_str())
            .unwrap_or("")
    }

    /// Error reported by the server, if any.
    ///
    /// Falsy values (`null`, `false`, `""`) are not errors.
    pub fn error_message(&self) -> Option<String> {
        match self.error.as_ref()? {
            serde_json::Value::Null | serde_json::Value::Bool(false) => None,
            serde_json::Value::String(s) if s.is_empty() => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub content: String,
}

/// Response of `/api/tags`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagsResponse {
    #[serde(default)]
    pub models: Vec<TagEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

impl TagsResponse {
    /// Distinct model names (`name`, else `model`), sorted.
    pub fn model_ids(self) -> Vec<ModelId> {
        let mut names: Vec<String> = self
            .models
            .into_iter()
            .filter_map(|entry| entry.name.or(entry.model))
            .filter(|name| !name.is_empty())
            .collect();
        names.sort();
        names.dedup();
        names.into_iter().map(ModelId::from).collect()
    }
}
