//! Transcript entity

use crate::session::thinking::SplitResponse;
use serde::{Deserialize, Serialize};

/// Number of trailing entries shown in turn prompts.
pub const RECENT_WINDOW: usize = 6;

/// Placeholder when a speaker has not spoken yet.
pub const NO_PRIOR_MESSAGE: &str = "(No prior message yet)";

/// Placeholder when the transcript is empty.
pub const NO_PRIOR_MESSAGES: &str = "(No prior messages)";

/// One accepted agent turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptEntry {
    pub author: String,
    /// Clean answer
    pub text: String,
    /// Full model output including reasoning markup
    pub raw_text: String,
    /// Extracted reasoning, possibly empty
    #[serde(default)]
    pub thinking_text: String,
}

impl TranscriptEntry {
    pub fn new(author: impl Into<String>, split: SplitResponse) -> Self {
        Self {
            author: author.into(),
            text: split.clean_text,
            raw_text: split.raw_text,
            thinking_text: split.thinking_text,
        }
    }
}

/// Append-only ordered sequence of accepted turns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: TranscriptEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Latest clean text written by `author`, if any.
    pub fn last_by_author(&self, author: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.author == author)
            .map(|e| e.text.as_str())
    }

    /// The last `n` clean texts written by `author`, oldest first.
    pub fn recent_by_author(&self, author: &str, n: usize) -> Vec<&str> {
        let mut recent: Vec<&str> = self
            .entries
            .iter()
            .rev()
            .filter(|e| e.author == author)
            .take(n)
            .map(|e| e.text.as_str())
            .collect();
        recent.reverse();
        recent
    }

    /// Whole transcript as `"{n}. {author}: {text}"` lines.
    pub fn render(&self) -> String {
        Self::render_entries(&self.entries)
    }

    /// The last [`RECENT_WINDOW`] entries, numbered from 1 within the window.
    pub fn render_window(&self) -> String {
        let start = self.entries.len().saturating_sub(RECENT_WINDOW);
        Self::render_entries(&self.entries[start..])
    }

    fn render_entries(entries: &[TranscriptEntry]) -> String {
        entries
            .iter()
            .enumerate()
            .map(|(i, e)| format!("{}. {}: {}", i + 1, e.author, e.text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a TranscriptEntry;
    type IntoIter = std::slice::Iter<'a, TranscriptEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
