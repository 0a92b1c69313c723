//! Writes a [`RunExport`] as pretty-printed JSON.

use duet_domain::RunExport;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to serialize run export: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Export destination: a directory using the default file name, or a fixed path.
#[derive(Debug, Clone)]
pub enum RunExportWriter {
    Directory(PathBuf),
    File(PathBuf),
}

impl RunExportWriter {
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self::Directory(dir.into())
    }

    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// Where `export` would be written.
    pub fn target(&self, export: &RunExport) -> PathBuf {
        match self {
            Self::Directory(dir) => dir.join(export.file_name()),
            Self::File(path) => path.clone(),
        }
    }

    /// Write the export, creating missing parent directories.
    pub fn write(&self, export: &RunExport) -> Result<PathBuf, ExportError> {
        let path = self.target(export);
        let json = export.to_json_pretty()?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| io_error(parent, source))?;
        }
        std::fs::write(&path, json).map_err(|source| io_error(&path, source))?;

        info!("Run exported to {}", path.display());
        Ok(path)
    }
}

fn io_error(path: &Path, source: std::io::Error) -> ExportError {
    ExportError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duet_domain::{AgentConfig, InteractionMode};

    fn sample() -> RunExport {
        RunExport {
            exported_at: "2026-10-17T09:30:00.000Z".to_string(),
            theme: "Four-day work week".to_string(),
            interaction_mode: InteractionMode::Collaboration,
            initial_turns: 2,
            max_extensions: 1,
            total_turns: 0,
            extensions_used: 0,
            last_outcome: "-".to_string(),
            left_agent: AgentConfig::left("gemma3:1b"),
            right_agent: AgentConfig::right("qwen3:1.7b"),
            review_enabled: true,
            review_agent: AgentConfig::reviewer("gemma3:1b"),
            transcript: Vec::new(),
            final_review: String::new(),
        }
    }

    #[test]
    fn test_directory_uses_default_name() {
        let dir = tempfile::tempdir().unwrap();
        let writer = RunExportWriter::in_dir(dir.path().join("exports"));

        let path = writer.write(&sample()).unwrap();

        assert_eq!(
            path.file_name().unwrap(),
            "ollama-debate-2026-10-17T09-30-00-000Z.json"
        );
        let back: RunExport =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_explicit_file_is_pretty_printed() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("run.json");

        let path = RunExportWriter::at_path(&target).write(&sample()).unwrap();

        assert_eq!(path, target);
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\n  \"theme\": \"Four-day work week\""));
    }

    #[test]
    fn test_write_error_names_path() {
        let dir = tempfile::tempdir().unwrap();
        // The target is an existing directory, which cannot be written as a file.
        let err = RunExportWriter::at_path(dir.path()).write(&sample()).unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
    }
}
