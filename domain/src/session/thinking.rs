//! Think/answer splitting.
//!
//! Reasoning models wrap their internal reasoning in `<think>...</think>`
//! segments. The transcript keeps three views of every output: the raw
//! text exactly as produced, the clean answer with every segment removed,
//! and the extracted reasoning.
//!
//! Pairing policy: each start marker is closed by the first end marker
//! after it. A start marker with no end marker, and any stray end marker,
//! is left in the clean text as ordinary content. Markers are matched
//! ASCII-case-insensitively.

use crate::core::string::collapse_blank_lines;
use serde::{Deserialize, Serialize};

pub const THINK_START: &str = "<think>";
pub const THINK_END: &str = "</think>";

/// The three views of one model output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitResponse {
    /// Literal model output
    pub raw_text: String,
    /// Output with reasoning segments removed, blank lines collapsed, trimmed
    pub clean_text: String,
    /// Trimmed reasoning segments joined by a blank line
    pub thinking_text: String,
}

/// Split raw model output into clean answer and reasoning.
pub fn split_thinking(raw: &str) -> SplitResponse {
    // ASCII lowercasing keeps byte offsets aligned with `raw`.
    let lower = raw.to_ascii_lowercase();

    let mut clean = String::with_capacity(raw.len());
    let mut segments: Vec<&str> = Vec::new();
    let mut cursor = 0usize;

    while let Some(rel_start) = lower[cursor..].find(THINK_START) {
        let start = cursor + rel_start;
        let body_start = start + THINK_START.len();
        let Some(rel_end) = lower[body_start..].find(THINK_END) else {
            break;
        };
        let body_end = body_start + rel_end;

        clean.push_str(&raw[cursor..start]);
        segments.push(raw[body_start..body_end].trim());
        cursor = body_end + THINK_END.len();
    }
    clean.push_str(&raw[cursor..]);

    let thinking_text = segments
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");

    SplitResponse {
        raw_text: raw.to_string(),
        clean_text: collapse_blank_lines(&clean).trim().to_string(),
        thinking_text,
    }
}
