//! Run export snapshot

use super::extension::ExtensionOutcome;
use super::mode::InteractionMode;
use super::transcript::TranscriptEntry;
use crate::agent::AgentConfig;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// `lastOutcome` value when no extension vote happened.
pub const NO_OUTCOME: &str = "-";

/// Exportable record of a finished, stopped or failed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunExport {
    pub exported_at: String,
    pub theme: String,
    pub interaction_mode: InteractionMode,
    pub initial_turns: usize,
    pub max_extensions: usize,
    pub total_turns: usize,
    pub extensions_used: usize,
    pub last_outcome: String,
    pub left_agent: AgentConfig,
    pub right_agent: AgentConfig,
    pub review_enabled: bool,
    pub review_agent: AgentConfig,
    pub transcript: Vec<TranscriptEntry>,
    pub final_review: String,
}

impl RunExport {
    /// Render a vote outcome the way `lastOutcome` stores it.
    pub fn outcome_label(outcome: Option<&ExtensionOutcome>) -> String {
        outcome
            .map(|o| o.to_string())
            .unwrap_or_else(|| NO_OUTCOME.to_string())
    }

    /// ISO-8601 timestamp with millisecond precision.
    pub fn timestamp(at: DateTime<Utc>) -> String {
        at.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Default download name, e.g. `ollama-debate-2026-10-17T09-30-00-000Z.json`.
    pub fn file_name(&self) -> String {
        let stamp = self.exported_at.replace([':', '.'], "-");
        format!("ollama-debate-{}.json", stamp)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
