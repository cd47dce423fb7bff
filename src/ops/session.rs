use std::path::PathBuf;

use crate::io::store_io::StorageError;
use crate::model::task::{Priority, Task, normalize_tags};
use crate::ops::filter;
use crate::ops::selection::{Selection, SelectionTracker};
use crate::ops::task_store::TaskStore;

/// The task store, the search filter and the selection, kept in step.
///
/// Every event runs to completion: mutate, persist, recompute the filtered
/// view, reconcile the selection. The UI only reads back the resulting
/// view and selection.
#[derive(Debug)]
pub struct Session {
    store: TaskStore,
    filter_text: String,
    selection: SelectionTracker,
}

impl Session {
    /// Load the task file at `path` and select the first task, if any
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Session::with_store(TaskStore::load(path))
    }

    pub fn with_store(store: TaskStore) -> Self {
        let mut session = Session {
            store,
            filter_text: String::new(),
            selection: SelectionTracker::new(),
        };
        session.refresh(None);
        session
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    pub fn selection(&self) -> &Selection {
        self.selection.state()
    }

    // -----------------------------------------------------------------------
    // Read side
    // -----------------------------------------------------------------------

    /// Tasks matching the current filter, in canonical order
    pub fn current_filtered_view(&self) -> Vec<&Task> {
        filter::apply(self.store.all(), &self.filter_text)
    }

    /// The selected task
    pub fn current_selection(&self) -> Option<&Task> {
        self.selection.current().and_then(|id| self.store.get(id))
    }

    /// Row of the selected task within the filtered view
    pub fn selected_position(&self) -> Option<usize> {
        self.selection.position_in(&self.current_filtered_view())
    }

    /// Take the last storage problem, for display as a transient status
    pub fn take_storage_warning(&mut self) -> Option<StorageError> {
        self.store.take_warning()
    }

    // -----------------------------------------------------------------------
    // Events
    // -----------------------------------------------------------------------

    /// Create a task from form input. A blank title is refused (`None`), as
    /// is any create once the id space is exhausted.
    pub fn on_create_requested(
        &mut self,
        title: &str,
        priority_text: &str,
        tags: Vec<String>,
    ) -> Option<Task> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        let priority = Priority::coerce(priority_text);
        let task = self
            .store
            .create(title, priority, normalize_tags(tags))?
            .clone();
        self.refresh(None);
        Some(task)
    }

    /// Toggle completion of the task with `id`. Unknown ids are ignored.
    pub fn on_toggle_requested(&mut self, id: &str) -> Option<bool> {
        let completed = self.store.toggle_complete(id)?;
        self.refresh(None);
        Some(completed)
    }

    /// Delete the task with `id`. Unknown ids are ignored.
    pub fn on_delete_requested(&mut self, id: &str) -> Option<Task> {
        let former_position = if self.selection.current() == Some(id) {
            self.selected_position()
        } else {
            None
        };
        let removed = self.store.delete(id)?;
        self.refresh(former_position);
        Some(removed)
    }

    /// Replace the search text wholesale
    pub fn on_filter_text_changed(&mut self, text: &str) {
        if self.filter_text == text {
            return;
        }
        self.filter_text = text.to_string();
        self.refresh(None);
    }

    pub fn on_filter_cleared(&mut self) {
        self.on_filter_text_changed("");
    }

    /// Move the selection to row `position` of the filtered view
    pub fn on_selection_moved(&mut self, position: usize) -> bool {
        let view = filter::apply(self.store.all(), &self.filter_text);
        self.selection.select_position(&view, position)
    }

    /// Select a task by id if it is visible
    pub fn select_id(&mut self, id: &str) -> bool {
        let view = filter::apply(self.store.all(), &self.filter_text);
        self.selection.select_id(&view, id)
    }

    fn refresh(&mut self, former_position: Option<usize>) {
        let view = filter::apply(self.store.all(), &self.filter_text);
        self.selection.reconcile_from(&view, former_position);
    }
}
