//! Run export files

mod writer;

pub use writer::{ExportError, RunExportWriter};
