use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::io::recovery::atomic_write;
use crate::model::task::{Task, normalize_tags};

/// File name of the task store, relative to the working directory
pub const TASKS_FILE: &str = "tasks.json";

/// Error type for task file I/O
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("{path}: task id {id:?} is not a usable number")]
    InvalidId { path: PathBuf, id: String },
    #[error("{path}: task {id:?} has a blank title")]
    BlankTitle { path: PathBuf, id: String },
    #[error("{path}: task id {id:?} appears more than once")]
    DuplicateId { path: PathBuf, id: String },
    #[error("could not serialize tasks: {0}")]
    SerializeError(#[from] serde_json::Error),
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl StorageError {
    /// True when the file was read but its contents were rejected
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            StorageError::ParseError { .. }
                | StorageError::InvalidId { .. }
                | StorageError::BlankTitle { .. }
                | StorageError::DuplicateId { .. }
        )
    }
}

/// Render the task list as the on-disk JSON document
pub fn serialize_tasks(tasks: &[Task]) -> Result<String, StorageError> {
    let mut content = serde_json::to_string_pretty(tasks)?;
    content.push('\n');
    Ok(content)
}

/// Parse the on-disk JSON document. All-or-nothing: one bad record rejects
/// the whole file.
pub fn parse_tasks(path: &Path, content: &str) -> Result<Vec<Task>, StorageError> {
    let mut tasks: Vec<Task> =
        serde_json::from_str(content).map_err(|e| StorageError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

    let mut seen = HashSet::new();
    for task in &mut tasks {
        // Every id must leave room for a successor
        if task.numeric_id().and_then(|n| n.checked_add(1)).is_none() {
            return Err(StorageError::InvalidId {
                path: path.to_path_buf(),
                id: task.id.clone(),
            });
        }
        if !seen.insert(task.id.clone()) {
            return Err(StorageError::DuplicateId {
                path: path.to_path_buf(),
                id: task.id.clone(),
            });
        }
        if task.title.trim().is_empty() {
            return Err(StorageError::BlankTitle {
                path: path.to_path_buf(),
                id: task.id.clone(),
            });
        }
        task.tags = normalize_tags(std::mem::take(&mut task.tags));
    }

    Ok(tasks)
}

/// Save every task to `path`, replacing prior contents atomically
pub fn save_tasks(path: &Path, tasks: &[Task]) -> Result<(), StorageError> {
    let content = serialize_tasks(tasks)?;
    atomic_write(path, content.as_bytes()).map_err(|e| StorageError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load tasks from `path`. A missing file is "no prior data", not an error.
pub fn load_tasks(path: &Path) -> Result<Vec<Task>, StorageError> {
    match fs::read_to_string(path) {
        Ok(content) => parse_tasks(path, &content),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(StorageError::ReadError {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
