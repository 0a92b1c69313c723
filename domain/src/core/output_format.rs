//! Output format value object

use serde::{Deserialize, Serialize};

/// How a finished run is presented
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Stream every turn live, then print the run summary (default)
    #[default]
    Full,
    /// Only the run summary and final review
    Review,
    /// The run export as JSON
    Json,
}
