use crate::model::task::Task;

/// Project the canonical collection onto the tasks matching `filter_text`.
///
/// An empty filter passes every task through. Otherwise a task matches when
/// the filter is a case-insensitive substring of its title or of any of its
/// tags. Original order is kept; there is no ranking.
pub fn apply<'a>(tasks: &'a [Task], filter_text: &str) -> Vec<&'a Task> {
    if filter_text.is_empty() {
        return tasks.iter().collect();
    }
    let needle = filter_text.to_lowercase();
    tasks.iter().filter(|t| matches(t, &needle)).collect()
}

/// `needle` must already be lowercase
fn matches(task: &Task, needle: &str) -> bool {
    task.title.to_lowercase().contains(needle)
        || task.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::Priority;
    use insta::assert_debug_snapshot;

    fn task(id: &str, title: &str, tags: &[&str]) -> Task {
        Task::new(
            id.into(),
            title.into(),
            Priority::Normal,
            tags.iter().map(|t| t.to_string()).collect(),
        )
    }

    fn sample() -> Vec<Task> {
        vec![
            task("0", "Buy milk", &[]),
            task("1", "Write report", &["work"]),
            task("2", "Call mom", &["Family", "phone"]),
            task("3", "Homework review", &[]),
        ]
    }

    fn ids<'a>(view: &[&'a Task]) -> Vec<&'a str> {
        view.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn empty_filter_returns_everything_in_order() {
        let tasks = sample();
        let view = apply(&tasks, "");
        assert_eq!(view.len(), tasks.len());
        for (shown, original) in view.iter().zip(tasks.iter()) {
            assert!(std::ptr::eq(*shown, original));
        }
    }

    #[test]
    fn matches_tags_and_titles_in_original_order() {
        let tasks = sample();
        assert_debug_snapshot!(ids(&apply(&tasks, "work")), @r#"
        [
            "1",
            "3",
        ]
        "#);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let tasks = sample();
        assert_eq!(ids(&apply(&tasks, "MILK")), vec!["0"]);
        assert_eq!(ids(&apply(&tasks, "family")), vec!["2"]);
    }

    #[test]
    fn substring_inside_tag() {
        let tasks = sample();
        assert_eq!(ids(&apply(&tasks, "hon")), vec!["2"]);
    }

    #[test]
    fn no_match_is_empty() {
        let tasks = sample();
        assert!(apply(&tasks, "zebra").is_empty());
    }

    #[test]
    fn whitespace_is_significant() {
        let tasks = sample();
        assert_eq!(ids(&apply(&tasks, "y m")), vec!["0"]);
        assert!(apply(&tasks, " milk ").is_empty());
    }

    #[test]
    fn empty_collection() {
        assert!(apply(&[], "x").is_empty());
        assert!(apply(&[], "").is_empty());
    }
}
