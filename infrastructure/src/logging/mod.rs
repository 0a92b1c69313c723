//! Conversation logging
//!
//! Provides [`JsonlConversationLogger`], implementing the
//! [`ConversationLogger`](duet_application::ConversationLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlConversationLogger;
