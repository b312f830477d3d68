//! Inputs for creating and partially updating tasks.

use chrono::NaiveDate;

use crate::categories::Categories;
use crate::task::{Priority, Task};

// =============================================================================
// NewTask
// =============================================================================

/// Fields supplied when a task is created.
///
/// `completed` and `priority` stay optional so that the store decides the
/// defaults (`false` and [`Priority::Medium`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
    pub due_date: Option<NaiveDate>,
    pub categories: Categories,
}

impl NewTask {
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            completed: None,
            priority: None,
            due_date: None,
            categories: Categories::default(),
        }
    }

    #[must_use]
    pub fn completed(&self) -> bool {
        self.completed.unwrap_or(false)
    }

    #[must_use]
    pub fn priority(&self) -> Priority {
        self.priority.unwrap_or_default()
    }
}

// =============================================================================
// TaskPatch
// =============================================================================

/// A partial update: every `Some` field replaces the stored value, every
/// `None` keeps it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
    pub due_date: Option<NaiveDate>,
    pub categories: Option<Categories>,
}

impl TaskPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merges the patch into `task`. Identity and creation time are untouched.
    #[must_use]
    pub fn apply_to(self, task: Task) -> Task {
        Task {
            title: self.title.unwrap_or(task.title),
            description: self.description.unwrap_or(task.description),
            completed: self.completed.unwrap_or(task.completed),
            priority: self.priority.unwrap_or(task.priority),
            due_date: self.due_date.or(task.due_date),
            categories: self.categories.unwrap_or(task.categories),
            ..task
        }
    }
}
