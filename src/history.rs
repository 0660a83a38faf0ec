//! Caller-owned record of finished transforms.
//!
//! The engine never reads this log. Callers that want a "recent conversions"
//! list record each result here and persist it as JSON lines.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::algorithm::{AlgorithmId, Direction};
use crate::core::request::TransformRequest;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("cannot access history file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("history file line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot serialize history entry: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// One successful transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub algorithm: AlgorithmId,
    pub direction: Direction,
    pub input: String,
    pub output: String,
}

/// Append-only list of [`LogEntry`] values.
#[derive(Debug, Clone, Default)]
pub struct TransformLog {
    entries: Vec<LogEntry>,
}

impl TransformLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a request together with the output the engine returned for it.
    pub fn record(&mut self, request: &TransformRequest, output: &str) -> &LogEntry {
        self.entries.push(LogEntry {
            timestamp: Utc::now(),
            algorithm: request.algorithm,
            direction: request.direction,
            input: request.text.clone(),
            output: output.to_string(),
        });
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// The last `n` entries, oldest first.
    pub fn latest(&self, n: usize) -> &[LogEntry] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends every entry to `path` as JSON lines, creating the file if needed.
    pub fn append_to_file(&self, path: &Path) -> Result<(), HistoryError> {
        let mut buffer = String::new();
        for entry in &self.entries {
            buffer.push_str(&serde_json::to_string(entry)?);
            buffer.push('\n');
        }

        let io_error = |source| HistoryError::Io {
            path: path.to_path_buf(),
            source,
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(io_error)?;
        file.write_all(buffer.as_bytes()).map_err(io_error)?;

        log::debug!("appended {} history entries to {:?}", self.entries.len(), path);
        Ok(())
    }

    /// Reads a JSON-lines file. Blank lines are skipped.
    pub fn load(path: &Path) -> Result<Self, HistoryError> {
        let content = fs::read_to_string(path).map_err(|source| HistoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut entries = Vec::new();
        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let entry = serde_json::from_str(line).map_err(|source| HistoryError::Parse {
                line: index + 1,
                source,
            })?;
            entries.push(entry);
        }

        Ok(Self { entries })
    }
}
