//! Run state machine

use super::mode::InteractionMode;
use serde::{Deserialize, Serialize};

/// Externally visible status of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    Idle,
    Running,
    /// A debater turn is being generated
    Streaming(String),
    /// Both agents are voting on extra turns
    Evaluating,
    StreamingReview,
    Completed,
    /// The run was superseded or stopped by the user
    Stopped,
    Errored,
}

impl RunStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunStatus::Completed | RunStatus::Stopped | RunStatus::Errored
        )
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunStatus::Idle => write!(f, "Idle"),
            RunStatus::Running => write!(f, "Running"),
            RunStatus::Streaming(name) => write!(f, "Streaming {}", name),
            RunStatus::Evaluating => write!(f, "Evaluating outcome"),
            RunStatus::StreamingReview => write!(f, "Streaming final review"),
            RunStatus::Completed => write!(f, "Completed"),
            RunStatus::Stopped => write!(f, "Stopped"),
            RunStatus::Errored => write!(f, "Error"),
        }
    }
}

/// Counters of one run (Entity)
///
/// Owned by the orchestration loop. `turns_this_block` is always at least
/// one and `extensions_used` never exceeds `max_extensions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    pub theme: String,
    pub interaction_mode: InteractionMode,
    turns_this_block: usize,
    total_turns: usize,
    extensions_used: usize,
    max_extensions: usize,
    completed: bool,
}

impl RunState {
    pub fn new(
        theme: impl Into<String>,
        interaction_mode: InteractionMode,
        initial_turns: usize,
        max_extensions: usize,
    ) -> Self {
        Self {
            theme: theme.into(),
            interaction_mode,
            turns_this_block: initial_turns.max(1),
            total_turns: 0,
            extensions_used: 0,
            max_extensions,
            completed: false,
        }
    }

    pub fn turns_this_block(&self) -> usize {
        self.turns_this_block
    }

    pub fn total_turns(&self) -> usize {
        self.total_turns
    }

    pub fn extensions_used(&self) -> usize {
        self.extensions_used
    }

    pub fn max_extensions(&self) -> usize {
        self.max_extensions
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// 1-based number of the turn about to be generated.
    pub fn next_turn_number(&self) -> usize {
        self.total_turns + 1
    }

    pub fn record_turn(&mut self) {
        self.total_turns += 1;
    }

    pub fn extensions_exhausted(&self) -> bool {
        self.extensions_used >= self.max_extensions
    }

    /// Apply an extension vote.
    ///
    /// Returns `true` when another block should run. A zero vote or an
    /// exhausted budget ends the loop; the caller marks the run completed
    /// once the review is done.
    pub fn apply_extension(&mut self, decided: usize) -> bool {
        if decided == 0 || self.extensions_exhausted() {
            return false;
        }
        self.extensions_used += 1;
        self.turns_this_block = decided;
        true
    }

    pub fn mark_completed(&mut self) {
        self.completed = true;
    }
}
