//! Request and response bodies.
//!
//! Requests carry `categories` as a JSON list and `priority`/`dueDate` as
//! strings, so that empty strings can be told apart from real values.
//! Responses carry `categories` as the stored comma-delimited string.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use todo_domain::{Categories, NewTask, Priority, Task, TaskId, TaskPatch};

use crate::errors::ApiErrorResponse;

// =============================================================================
// Requests
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
}

/// Partial update. Absent, `null` and (for `title`, `priority`, `dueDate`)
/// empty-string fields all mean "keep the stored value".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToggleTaskRequest {
    #[serde(default)]
    pub completed: Option<bool>,
}

fn supplied(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

fn parse_priority(value: Option<String>) -> Result<Option<Priority>, ApiErrorResponse> {
    supplied(value)
        .map(|text| {
            text.parse::<Priority>()
                .map_err(|error| ApiErrorResponse::bad_request(error.to_string()))
        })
        .transpose()
}

/// Accepts `YYYY-MM-DD`, or an RFC 3339 timestamp whose date part is kept.
fn parse_due_date(value: Option<String>) -> Result<Option<NaiveDate>, ApiErrorResponse> {
    supplied(value)
        .map(|text| {
            let text = text.trim();
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .or_else(|_| DateTime::parse_from_rfc3339(text).map(|moment| moment.date_naive()))
                .map_err(|_| {
                    ApiErrorResponse::bad_request(format!(
                        "Invalid dueDate '{text}', expected YYYY-MM-DD"
                    ))
                })
        })
        .transpose()
}

impl CreateTaskRequest {
    /// # Errors
    ///
    /// 400 when the title is missing or blank, or when `priority`/`dueDate`
    /// do not parse.
    pub fn into_new_task(self) -> Result<NewTask, ApiErrorResponse> {
        let title = supplied(self.title)
            .ok_or_else(|| ApiErrorResponse::bad_request("Title is required"))?;

        Ok(NewTask {
            title,
            description: self.description.unwrap_or_default(),
            completed: self.completed,
            priority: parse_priority(self.priority)?,
            due_date: parse_due_date(self.due_date)?,
            categories: self.categories.map(Categories::new).unwrap_or_default(),
        })
    }
}

impl UpdateTaskRequest {
    /// # Errors
    ///
    /// 400 when a supplied `priority` or `dueDate` does not parse.
    pub fn into_patch(self) -> Result<TaskPatch, ApiErrorResponse> {
        Ok(TaskPatch {
            title: supplied(self.title),
            description: self.description,
            completed: self.completed,
            priority: parse_priority(self.priority)?,
            due_date: parse_due_date(self.due_date)?,
            categories: self.categories.map(Categories::new),
        })
    }
}

impl ToggleTaskRequest {
    /// # Errors
    ///
    /// 400 when `completed` is absent.
    pub fn completed(&self) -> Result<bool, ApiErrorResponse> {
        self.completed
            .ok_or_else(|| ApiErrorResponse::bad_request("Completed status is required"))
    }
}

// =============================================================================
// Responses
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    pub categories: Option<String>,
    pub created_at: String,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            description: task.description.clone(),
            completed: task.completed,
            priority: task.priority,
            due_date: task.due_date,
            categories: task.categories.encode(),
            created_at: task.created_at.to_rfc3339(),
        }
    }
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self::from(&task)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteTaskResponse {
    pub message: String,
}

impl Default for DeleteTaskResponse {
    fn default() -> Self {
        Self {
            message: "Task deleted successfully".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}
