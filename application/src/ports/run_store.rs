//! Run store port
//!
//! Contract of the run-history service. The orchestration records runs
//! through it on a best-effort basis: every failure is logged and the run
//! carries on, so a missing service degrades to export-only.

use async_trait::async_trait;
use duet_domain::{AgentConfig, RunExport};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier assigned by the run-history service.
pub type RunId = i64;

/// Errors that can occur while talking to the run-history service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    #[error("Run history service unreachable: {0}")]
    Unreachable(String),

    #[error("Run history service rejected the request ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("Run {0} not found")]
    NotFound(RunId),

    #[error("Invalid response from run history service: {0}")]
    InvalidResponse(String),

    #[error("Run history is disabled")]
    Disabled,
}

/// Kind of a stored transcript message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Agent,
    Review,
}

/// One message appended to a stored run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    /// 1-based turn number; the review uses the turn count it follows
    pub turn_index: usize,
    pub message_type: MessageKind,
    pub author: String,
    pub raw_text: String,
    pub thinking_text: String,
    pub answer_text: String,
}

/// Partial update of a stored run. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_turns: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions_used: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_outcome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_review: Option<String>,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<String>,
}

/// Row of the run list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub id: RunId,
    pub created_at: String,
    pub exported_at: String,
    pub theme: String,
    pub interaction_mode: String,
    pub total_turns: usize,
    pub completed: bool,
}

/// Transcript message as stored by the service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredMessage {
    pub turn_index: usize,
    pub message_type: MessageKind,
    pub author: String,
    #[serde(default)]
    pub raw_text: String,
    #[serde(default)]
    pub thinking_text: String,
    #[serde(default)]
    pub text: String,
}

/// A full stored run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRun {
    pub id: RunId,
    pub exported_at: String,
    pub created_at: String,
    pub theme: String,
    pub interaction_mode: String,
    pub initial_turns: usize,
    pub max_extensions: usize,
    pub total_turns: usize,
    pub extensions_used: usize,
    #[serde(default)]
    pub last_outcome: Option<String>,
    pub review_enabled: bool,
    #[serde(default)]
    pub final_review: String,
    pub completed: bool,
    #[serde(default)]
    pub finished_at: Option<String>,
    pub left_agent: AgentConfig,
    pub right_agent: AgentConfig,
    pub review_agent: AgentConfig,
    #[serde(default)]
    pub transcript: Vec<StoredMessage>,
}

/// Store for run history
#[async_trait]
pub trait RunStore: Send + Sync {
    /// Register a new run from its configuration snapshot.
    async fn start_run(&self, run: &RunExport) -> Result<RunId, PersistenceError>;

    async fn append_message(&self, id: RunId, message: &NewMessage)
    -> Result<(), PersistenceError>;

    async fn patch_run(&self, id: RunId, patch: &RunPatch) -> Result<(), PersistenceError>;

    /// Most recent runs first.
    async fn list_runs(&self) -> Result<Vec<RunSummary>, PersistenceError>;

    async fn get_run(&self, id: RunId) -> Result<StoredRun, PersistenceError>;
}

/// Store used when run history is turned off
pub struct NoRunStore;

#[async_trait]
impl RunStore for NoRunStore {
    async fn start_run(&self, _run: &RunExport) -> Result<RunId, PersistenceError> {
        Err(PersistenceError::Disabled)
    }

    async fn append_message(
        &self,
        _id: RunId,
        _message: &NewMessage,
    ) -> Result<(), PersistenceError> {
        Err(PersistenceError::Disabled)
    }

    async fn patch_run(&self, _id: RunId, _patch: &RunPatch) -> Result<(), PersistenceError> {
        Err(PersistenceError::Disabled)
    }

    async fn list_runs(&self) -> Result<Vec<RunSummary>, PersistenceError> {
        Err(PersistenceError::Disabled)
    }

    async fn get_run(&self, _id: RunId) -> Result<StoredRun, PersistenceError> {
        Err(PersistenceError::Disabled)
    }
}
