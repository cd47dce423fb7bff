use std::fs;
use std::path::{Path, PathBuf};

use crate::io::recovery::{RecoveryCategory, RecoveryEntry, log_recovery};
use crate::io::store_io::{StorageError, load_tasks, save_tasks, serialize_tasks};
use crate::model::task::{Priority, Task};

/// Sole owner of the canonical task collection and of id allocation.
///
/// Every mutation is written through to disk. Storage failures never undo
/// an in-memory change; they are logged to the recovery log and kept as a
/// pending warning for the UI.
#[derive(Debug)]
pub struct TaskStore {
    path: PathBuf,
    tasks: Vec<Task>,
    next_id: u64,
    warning: Option<StorageError>,
}

impl TaskStore {
    /// Load the store from `path`, degrading to an empty collection when the
    /// file cannot be trusted.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (tasks, warning) = match load_tasks(&path) {
            Ok(tasks) => (tasks, None),
            Err(e) => {
                log_rejected_file(&path, &e);
                (Vec::new(), Some(e))
            }
        };
        let next_id = tasks
            .iter()
            .filter_map(Task::numeric_id)
            .max()
            // parse_tasks rejects ids without a successor
            .map_or(0, |max| max.saturating_add(1));
        TaskStore {
            path,
            tasks,
            next_id,
            warning,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read-only view of the canonical collection, in insertion order
    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// The id the next `create` will assign
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Append a new task and persist. The caller guarantees a non-empty title.
    /// Returns `None` once the id space is used up; an id is only handed out
    /// if it has a successor, matching what `parse_tasks` accepts.
    pub fn create(&mut self, title: &str, priority: Priority, tags: Vec<String>) -> Option<&Task> {
        let following = self.next_id.checked_add(1)?;
        let id = self.next_id.to_string();
        self.next_id = following;
        self.tasks
            .push(Task::new(id, title.to_string(), priority, tags));
        self.persist();
        self.tasks.last()
    }

    /// Flip `completed` on the task with `id`. Returns the new value, or
    /// `None` (and touches nothing) if no such task exists.
    pub fn toggle_complete(&mut self, id: &str) -> Option<bool> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.completed = !task.completed;
        let completed = task.completed;
        self.persist();
        Some(completed)
    }

    /// Remove the task with `id`, keeping the order of the rest. Returns the
    /// removed task; absent ids are a no-op.
    pub fn delete(&mut self, id: &str) -> Option<Task> {
        let idx = self.tasks.iter().position(|t| t.id == id)?;
        let removed = self.tasks.remove(idx);
        self.persist();
        Some(removed)
    }

    /// Take the pending storage warning, if any
    pub fn take_warning(&mut self) -> Option<StorageError> {
        self.warning.take()
    }

    pub fn warning(&self) -> Option<&StorageError> {
        self.warning.as_ref()
    }

    fn persist(&mut self) {
        match save_tasks(&self.path, &self.tasks) {
            Ok(()) => self.warning = None,
            Err(e) => {
                log_failed_write(&self.path, &self.tasks, &e);
                self.warning = Some(e);
            }
        }
    }
}

fn data_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Keep a copy of a rejected task file so degrading to empty loses nothing
fn log_rejected_file(path: &Path, err: &StorageError) {
    let body = if err.is_corruption() {
        fs::read_to_string(path).unwrap_or_default()
    } else {
        String::new()
    };
    log_recovery(
        data_dir(path),
        RecoveryEntry::new(RecoveryCategory::Parser, "task file rejected, starting empty")
            .field("Source", file_label(path))
            .field("Error", err.to_string())
            .body(body),
    );
}

/// Record the content a failed save was trying to write
fn log_failed_write(path: &Path, tasks: &[Task], err: &StorageError) {
    let body = serialize_tasks(tasks).unwrap_or_default();
    log_recovery(
        data_dir(path),
        RecoveryEntry::new(RecoveryCategory::Write, "task file write failed")
            .field("Target", file_label(path))
            .field("Error", err.to_string())
            .body(body),
    );
}
