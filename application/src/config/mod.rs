//! Application-level configuration.
//!
//! - [`RunDebateInput`] — an already-validated description of one run

pub mod debate_input;

pub use debate_input::RunDebateInput;
