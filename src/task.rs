//! Task data structure and its fixed textual representation.
//!
//! This module defines the core `Task` struct that represents a single
//! to-do item, along with the row format used everywhere a task is shown
//! as text.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single to-do item.
///
/// The serialized field names (`task_id`, `title`, `completed`) are the
/// on-disk contract; files written by earlier runs must keep loading, so
/// they are never renamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "task_id")]
    pub id: u64,
    pub title: String,
    pub completed: bool,
}

impl Task {
    /// Create an incomplete task with the given id and title.
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Task {
            id,
            title: title.into(),
            completed: false,
        }
    }

    pub fn mark_complete(&mut self) {
        self.completed = true;
    }

    pub fn mark_uncomplete(&mut self) {
        self.completed = false;
    }

    /// Status label used in the rendered row.
    pub fn status_label(&self) -> &'static str {
        if self.completed {
            "Complete"
        } else {
            "Incomplete"
        }
    }
}

/// The row format shown in the list view and by `todo list`.
impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Title: {}, Status: {}",
            self.id,
            self.title,
            self.status_label()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_is_incomplete() {
        let task = Task::new(1, "Buy milk");
        assert_eq!(task.id, 1);
        assert_eq!(task.title, "Buy milk");
        assert!(!task.completed);
    }

    #[test]
    fn row_format_is_fixed() {
        let mut task = Task::new(3, "Buy milk");
        assert_eq!(task.to_string(), "ID: 3, Title: Buy milk, Status: Incomplete");
        task.mark_complete();
        assert_eq!(task.to_string(), "ID: 3, Title: Buy milk, Status: Complete");
    }

    #[test]
    fn serialized_field_names_are_stable() {
        let task = Task::new(7, "Pay rent");
        let value = serde_json::to_value(&task).unwrap();
        let obj = value.as_object().unwrap();
        assert!(obj.contains_key("task_id"));
        assert!(obj.contains_key("title"));
        assert!(obj.contains_key("completed"));
        assert_eq!(obj.len(), 3);
    }

    #[test]
    fn deserializes_prior_run_output() {
        let task: Task =
            serde_json::from_str(r#"{"task_id": 2, "title": "Pay rent", "completed": true}"#)
                .unwrap();
        assert_eq!(task.id, 2);
        assert!(task.completed);
    }
}
