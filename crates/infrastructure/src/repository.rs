//! Task repository port and its error type.

use futures::future::BoxFuture;
use thiserror::Error;
use todo_domain::{NewTask, Task, TaskId, TaskPatch};

// =============================================================================
// RepositoryError
// =============================================================================

/// Failures raised by a storage adapter.
///
/// "Not found" is not an error here: lookups return `Option` and deletes
/// return `bool`, so callers decide how to report a missing task.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Connectivity or query failure.
    #[error("Database error: {0}")]
    Database(String),

    /// A stored row could not be turned back into a [`Task`].
    #[error("Corrupted row: {0}")]
    Corrupted(String),
}

/// Deferred storage effect. Nothing touches the store until it is awaited.
pub type RepositoryFuture<T> = BoxFuture<'static, Result<T, RepositoryError>>;

// =============================================================================
// TaskRepository
// =============================================================================

/// Access to the single task table.
///
/// Read-then-write operations (`update`, `set_completed`) are not atomic:
/// a concurrent delete between the two statements surfaces as `Ok(None)`.
pub trait TaskRepository: Send + Sync {
    /// All tasks, newest first.
    fn list_all(&self) -> RepositoryFuture<Vec<Task>>;

    fn find_by_id(&self, id: TaskId) -> RepositoryFuture<Option<Task>>;

    /// Persists a new task, assigning `id` and `created_at` and applying the
    /// defaults for omitted fields. Returns the stored row.
    fn insert(&self, new_task: NewTask) -> RepositoryFuture<Task>;

    /// Applies a partial update. `Ok(None)` when `id` does not exist.
    fn update(&self, id: TaskId, patch: TaskPatch) -> RepositoryFuture<Option<Task>>;

    /// Sets only the completed flag. `Ok(None)` when `id` does not exist.
    fn set_completed(&self, id: TaskId, completed: bool) -> RepositoryFuture<Option<Task>>;

    /// Removes the task, reporting whether a row existed.
    fn delete(&self, id: TaskId) -> RepositoryFuture<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(RepositoryError::Database("connection refused".to_string()), "Database error: connection refused")]
    #[case(RepositoryError::Corrupted("priority 'x'".to_string()), "Corrupted row: priority 'x'")]
    fn display_messages(#[case] error: RepositoryError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }
}
