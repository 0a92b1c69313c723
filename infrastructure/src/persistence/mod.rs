//! Run history persistence
//!
//! Client for the run-history HTTP service that stores runs and their
//! transcripts.

pub mod http_store;

pub use http_store::{DEFAULT_RUN_STORE_URL, HttpRunStore};
