//! Core domain concepts shared across all subdomains.
//!
//! - [`model::ModelId`] — identifier of a locally hosted model (e.g. `gemma3:1b`)
//! - [`error::DomainError`] — domain-level errors
//! - [`output_format::OutputFormat`] — how a finished run is presented
//! - [`string`] — small string helpers used for log previews

pub mod error;
pub mod model;
pub mod output_format;
pub mod string;
