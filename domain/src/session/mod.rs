//! Session domain: chat messages exchanged with a completion endpoint and
//! post-processing of what comes back.

pub mod entities;
pub mod thinking;

pub use entities::{Message, Role};
pub use thinking::{SplitResponse, THINK_END, THINK_START, split_thinking};
