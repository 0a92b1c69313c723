//! Debate domain
//!
//! A run alternates turns between two agents in blocks. After each block
//! both agents vote on how many extra turns are needed; the rounded-up
//! average becomes the next block length until the vote reaches zero or the
//! extension budget is spent. A reviewer may then summarize the transcript.
//!
//! ```text
//! Idle ──▶ Running ──▶ Streaming <speaker> ──┐
//!             ▲                               │ block done
//!             └──── Evaluating outcome ◀──────┘
//!                         │ decided = 0 / budget spent
//!                         ▼
//!          Streaming final review ──▶ Completed
//!
//!  any state ──▶ Stopped (run superseded) | Error (transport failure)
//! ```

pub mod export;
pub mod extension;
pub mod mode;
pub mod state;
pub mod transcript;

pub use export::{NO_OUTCOME, RunExport};
pub use extension::{ExtensionOutcome, MAX_PROPOSED_TURNS, parse_proposed_turns};
pub use mode::InteractionMode;
pub use state::{RunState, RunStatus};
pub use transcript::{
    NO_PRIOR_MESSAGE, NO_PRIOR_MESSAGES, RECENT_WINDOW, Transcript, TranscriptEntry,
};
