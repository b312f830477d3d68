//! Create/edit form model.

use chrono::NaiveDate;
use serde::Serialize;
use todo_domain::{Categories, Priority, Task, TitleError, validate_title};

/// Category labels offered as checkboxes on the form.
pub const CATEGORY_CHOICES: [&str; 5] = ["Work", "Personal", "Urgent", "Home", "Other"];

/// Validated form contents, sent as the request body for create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    pub categories: Vec<String>,
}

/// Editable state of the task form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    /// Only shown when editing; new tasks start incomplete.
    pub completed: bool,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    pub categories: Categories,
}

impl TaskForm {
    /// Blank form for a new task, due `today`.
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            completed: false,
            priority: Priority::Medium,
            due_date: Some(today),
            categories: Categories::default(),
        }
    }

    /// Form pre-filled from an existing task.
    #[must_use]
    pub fn for_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            completed: task.completed,
            priority: task.priority,
            due_date: task.due_date,
            categories: task.categories.clone(),
        }
    }

    pub fn toggle_category(&mut self, label: &str) {
        self.categories.toggle(label);
    }

    /// # Errors
    ///
    /// Returns the [`TitleError`] when the title is blank or contains
    /// anything other than ASCII letters, digits and whitespace.
    pub fn validate(&self) -> Result<TaskDraft, TitleError> {
        validate_title(&self.title)?;

        Ok(TaskDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            completed: self.completed,
            priority: self.priority,
            due_date: self.due_date,
            categories: self.categories.labels().to_vec(),
        })
    }
}
