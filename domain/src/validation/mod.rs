//! Turn quality validation.
//!
//! Every candidate turn runs through a small battery of heuristics before
//! it is accepted into the transcript:
//!
//! | Check | Severity |
//! |-------|----------|
//! | empty reply (short-circuits) | Blocking |
//! | shorter than 50 characters | Blocking |
//! | readiness/opening boilerplate | Blocking |
//! | near-duplicate of the speaker's last two turns | Blocking |
//! | no keyword from the other speaker's latest point | Advisory |
//! | no keyword from the agent prompt tags | Advisory |
//!
//! Blocking issues trigger a bounded retry; advisories are only reported.

pub mod issue;
pub mod validator;

pub use issue::{Severity, TurnIssue, ValidationResult};
pub use validator::{
    BOILERPLATE_MAX_LEN, MIN_REPLY_LEN, TurnContext, is_low_value_turn, is_near_duplicate,
    validate_turn, validate_turn_output,
};
