use crate::model::task::Task;

/// The current task, tracked by identity rather than by row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    /// Nothing selectable
    #[default]
    Empty,
    /// The task with this id is current
    Selected(String),
}

/// Keeps one selected task consistent with a changing filtered view.
///
/// Positions are only ever inputs (a cursor moved to row N) or outputs (the
/// row to highlight). The stored state is always an id, so inserting or
/// removing rows above the selection never re-points it.
#[derive(Debug, Clone, Default)]
pub struct SelectionTracker {
    state: Selection,
}

impl SelectionTracker {
    pub fn new() -> Self {
        SelectionTracker::default()
    }

    pub fn state(&self) -> &Selection {
        &self.state
    }

    /// Id of the selected task
    pub fn current(&self) -> Option<&str> {
        match &self.state {
            Selection::Empty => None,
            Selection::Selected(id) => Some(id),
        }
    }

    /// Row of the selected task in `view`
    pub fn position_in(&self, view: &[&Task]) -> Option<usize> {
        let id = self.current()?;
        view.iter().position(|t| t.id == id)
    }

    /// Resolve against a recomputed view: keep the id if it is still shown,
    /// otherwise fall back to the first row, or Empty if there are no rows.
    pub fn reconcile(&mut self, view: &[&Task]) {
        self.reconcile_from(view, None);
    }

    /// Like `reconcile`, but when the selected task has vanished prefer the
    /// task now sitting at `former_position` (the row it used to occupy).
    pub fn reconcile_from(&mut self, view: &[&Task], former_position: Option<usize>) {
        if self.position_in(view).is_some() {
            return;
        }
        let fallback = former_position
            .and_then(|pos| view.get(pos))
            .or_else(|| view.first());
        self.state = match fallback {
            Some(task) => Selection::Selected(task.id.clone()),
            None => Selection::Empty,
        };
    }

    /// Select the task at `position` in `view`. Out-of-range positions are ignored.
    pub fn select_position(&mut self, view: &[&Task], position: usize) -> bool {
        match view.get(position) {
            Some(task) => {
                self.state = Selection::Selected(task.id.clone());
                true
            }
            None => false,
        }
    }

    /// Select the task with `id` if it is part of `view`.
    pub fn select_id(&mut self, view: &[&Task], id: &str) -> bool {
        if view.iter().any(|t| t.id == id) {
            self.state = Selection::Selected(id.to_string());
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.state = Selection::Empty;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::Priority;

    fn tasks(ids: &[&str]) -> Vec<Task> {
        ids.iter()
            .map(|id| Task::new(id.to_string(), format!("task {id}"), Priority::Normal, vec![]))
            .collect()
    }

    fn view(tasks: &[Task]) -> Vec<&Task> {
        tasks.iter().collect()
    }

    fn selected(id: &str) -> Selection {
        Selection::Selected(id.to_string())
    }

    #[test]
    fn starts_empty() {
        let tracker = SelectionTracker::new();
        assert_eq!(tracker.state(), &Selection::Empty);
        assert!(tracker.current().is_none());
    }

    #[test]
    fn empty_to_selected_picks_first_row() {
        let all = tasks(&["0", "1"]);
        let mut tracker = SelectionTracker::new();
        tracker.reconcile(&view(&all));
        assert_eq!(tracker.state(), &selected("0"));
    }

    #[test]
    fn empty_view_stays_empty() {
        let mut tracker = SelectionTracker::new();
        tracker.reconcile(&[]);
        assert_eq!(tracker.state(), &Selection::Empty);
    }

    #[test]
    fn identity_survives_removal_above() {
        let all = tasks(&["a", "b", "c"]);
        let mut tracker = SelectionTracker::new();
        assert!(tracker.select_position(&view(&all), 1));
        assert_eq!(tracker.current(), Some("b"));

        let after = tasks(&["b", "c"]);
        tracker.reconcile(&view(&after));
        assert_eq!(tracker.current(), Some("b"));
        assert_eq!(tracker.position_in(&view(&after)), Some(0));
    }

    #[test]
    fn identity_survives_insertion_above() {
        let all = tasks(&["a", "b"]);
        let mut tracker = SelectionTracker::new();
        tracker.select_id(&view(&all), "b");
        let after = tasks(&["z", "a", "b"]);
        tracker.reconcile(&view(&after));
        assert_eq!(tracker.current(), Some("b"));
        assert_eq!(tracker.position_in(&view(&after)), Some(2));
    }

    #[test]
    fn vanished_id_falls_back_to_first() {
        let all = tasks(&["a", "b", "c"]);
        let mut tracker = SelectionTracker::new();
        tracker.select_id(&view(&all), "c");
        let filtered = tasks(&["a", "b"]);
        tracker.reconcile(&view(&filtered));
        assert_eq!(tracker.current(), Some("a"));
    }

    #[test]
    fn vanished_id_prefers_former_position() {
        let after = tasks(&["a", "c", "d"]);
        let mut tracker = SelectionTracker::new();
        tracker.select_id(&view(&tasks(&["a", "b", "c", "d"])), "b");
        tracker.reconcile_from(&view(&after), Some(1));
        assert_eq!(tracker.current(), Some("c"));
    }

    #[test]
    fn former_position_past_end_falls_back_to_first() {
        let mut tracker = SelectionTracker::new();
        tracker.select_id(&view(&tasks(&["a", "b"])), "b");
        tracker.reconcile_from(&view(&tasks(&["a"])), Some(1));
        assert_eq!(tracker.current(), Some("a"));
    }

    #[test]
    fn becomes_empty_when_view_empties() {
        let all = tasks(&["a"]);
        let mut tracker = SelectionTracker::new();
        tracker.reconcile(&view(&all));
        tracker.reconcile_from(&[], Some(0));
        assert_eq!(tracker.state(), &Selection::Empty);
    }

    #[test]
    fn present_id_ignores_former_position() {
        let all = tasks(&["a", "b", "c"]);
        let mut tracker = SelectionTracker::new();
        tracker.select_id(&view(&all), "c");
        tracker.reconcile_from(&view(&all), Some(0));
        assert_eq!(tracker.current(), Some("c"));
    }

    #[test]
    fn select_position_out_of_range_is_ignored() {
        let all = tasks(&["a"]);
        let mut tracker = SelectionTracker::new();
        tracker.reconcile(&view(&all));
        assert!(!tracker.select_position(&view(&all), 5));
        assert_eq!(tracker.current(), Some("a"));
    }

    #[test]
    fn select_id_outside_view_is_ignored() {
        let all = tasks(&["a", "b"]);
        let mut tracker = SelectionTracker::new();
        tracker.reconcile(&view(&all));
        assert!(!tracker.select_id(&view(&all[..1]), "b"));
        assert_eq!(tracker.current(), Some("a"));
    }

    #[test]
    fn clear_resets_to_empty() {
        let all = tasks(&["a"]);
        let mut tracker = SelectionTracker::new();
        tracker.reconcile(&view(&all));
        tracker.clear();
        assert_eq!(tracker.state(), &Selection::Empty);
    }
}
