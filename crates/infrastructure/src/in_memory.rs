//! In-memory task repository.
//!
//! Mirrors the MySQL adapter's semantics (auto-increment ids starting at 1,
//! defaults on insert, newest-first listing) without a database. Used when
//! `STORAGE_MODE=in_memory` and throughout the test suites.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use futures::FutureExt;
use tokio::sync::RwLock;
use todo_domain::{NewTask, Task, TaskId, TaskPatch};

use crate::repository::{RepositoryFuture, TaskRepository};

#[derive(Debug)]
struct InMemoryState {
    next_id: i64,
    tasks: BTreeMap<TaskId, Task>,
}

impl Default for InMemoryState {
    fn default() -> Self {
        Self {
            next_id: 1,
            tasks: BTreeMap::new(),
        }
    }
}

/// Task storage held in process memory. Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryState>>,
}

impl InMemoryTaskRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(left: &Task, right: &Task) -> std::cmp::Ordering {
    right
        .created_at
        .cmp(&left.created_at)
        .then_with(|| right.id.cmp(&left.id))
}

impl TaskRepository for InMemoryTaskRepository {
    fn list_all(&self) -> RepositoryFuture<Vec<Task>> {
        let state = Arc::clone(&self.state);
        async move {
            let guard = state.read().await;
            let mut tasks: Vec<Task> = guard.tasks.values().cloned().collect();
            tasks.sort_by(newest_first);
            Ok(tasks)
        }
        .boxed()
    }

    fn find_by_id(&self, id: TaskId) -> RepositoryFuture<Option<Task>> {
        let state = Arc::clone(&self.state);
        async move { Ok(state.read().await.tasks.get(&id).cloned()) }.boxed()
    }

    fn insert(&self, new_task: NewTask) -> RepositoryFuture<Task> {
        let state = Arc::clone(&self.state);
        async move {
            let mut guard = state.write().await;
            let id = TaskId::new(guard.next_id);
            guard.next_id += 1;

            let task = Task {
                id,
                completed: new_task.completed(),
                priority: new_task.priority(),
                title: new_task.title,
                description: new_task.description,
                due_date: new_task.due_date,
                categories: new_task.categories,
                created_at: Utc::now(),
            };
            guard.tasks.insert(id, task.clone());
            Ok(task)
        }
        .boxed()
    }

    fn update(&self, id: TaskId, patch: TaskPatch) -> RepositoryFuture<Option<Task>> {
        let state = Arc::clone(&self.state);
        async move {
            let mut guard = state.write().await;
            let Some(existing) = guard.tasks.remove(&id) else {
                return Ok(None);
            };
            let updated = patch.apply_to(existing);
            guard.tasks.insert(id, updated.clone());
            Ok(Some(updated))
        }
        .boxed()
    }

    fn set_completed(&self, id: TaskId, completed: bool) -> RepositoryFuture<Option<Task>> {
        let state = Arc::clone(&self.state);
        async move {
            let mut guard = state.write().await;
            Ok(guard.tasks.get_mut(&id).map(|task| {
                task.completed = completed;
                task.clone()
            }))
        }
        .boxed()
    }

    fn delete(&self, id: TaskId) -> RepositoryFuture<bool> {
        let state = Arc::clone(&self.state);
        async move { Ok(state.write().await.tasks.remove(&id).is_some()) }.boxed()
    }
}
