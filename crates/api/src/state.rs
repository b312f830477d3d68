//! Shared handler state.

use std::sync::Arc;

use todo_infrastructure::{InMemoryTaskRepository, TaskRepository};

/// Uses a trait object so the backend can be chosen at runtime by
/// `RepositoryFactory`.
#[derive(Clone)]
pub struct AppState {
    pub task_repository: Arc<dyn TaskRepository>,
}

impl AppState {
    #[must_use]
    pub fn new(task_repository: Arc<dyn TaskRepository>) -> Self {
        Self { task_repository }
    }

    /// State backed by a fresh in-memory repository.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryTaskRepository::new()))
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("AppState")
            .field("task_repository", &"<dyn TaskRepository>")
            .finish()
    }
}
