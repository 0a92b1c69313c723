//! Progress notification port
//!
//! Defines the interface for reporting what a debate run is doing.
//! The orchestration only calls these while its run token is current, so
//! implementations never see updates from a superseded run.

use duet_domain::{ExtensionOutcome, RunStatus, Side, SplitResponse, TranscriptEntry};

/// Callback for progress updates during a debate run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, web UI, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called whenever the run status changes
    fn on_status(&self, status: &RunStatus);

    /// Called for system lines (run header, outcome decisions, stop/error notices)
    fn on_notice(&self, author: &str, text: &str);

    // ==================== Turn Callbacks ====================

    /// Called before the first attempt of a turn
    fn on_turn_start(&self, _side: Side, _author: &str, _turn_number: usize) {}

    /// Called for each streamed fragment of the current turn or review.
    fn on_stream_update(&self, _author: &str, _accumulated: &str, _fragment: &str) {}

    /// Called before each retry stream of a turn that failed validation
    fn on_retry(&self, _author: &str, _attempt: usize, _max_retries: usize, _reasons: &[String]) {}

    /// Called when an attempt produced advisory warnings
    fn on_advisory(&self, _author: &str, _warnings: &[String]) {}

    /// Called once the turn has been appended to the transcript
    fn on_turn_complete(&self, _entry: &TranscriptEntry, _total_turns: usize) {}

    // ==================== Block Callbacks ====================

    /// Called when a block of turns starts
    fn on_block_start(&self, _turns: usize) {}

    /// Called after both agents voted on extra turns
    fn on_outcome(&self, _outcome: &ExtensionOutcome, _extensions_used: usize) {}

    // ==================== Review Callbacks ====================

    fn on_review_start(&self, _reviewer: &str) {}

    fn on_review_complete(&self, _review: &SplitResponse) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_status(&self, _status: &RunStatus) {}
    fn on_notice(&self, _author: &str, _text: &str) {}
}
