//! MySQL implementation of [`TaskRepository`].

use chrono::{DateTime, NaiveDate, Utc};
use futures::FutureExt;
use sqlx::MySqlPool;
use todo_domain::{Categories, NewTask, Priority, Task, TaskId, TaskPatch};

use crate::repository::{RepositoryError, RepositoryFuture, TaskRepository};

// =============================================================================
// Row mapping
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct TaskRow {
    id: i64,
    title: String,
    description: String,
    completed: bool,
    priority: String,
    due_date: Option<NaiveDate>,
    categories: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<TaskRow> for Task {
    type Error = RepositoryError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let priority: Priority = row.priority.parse().map_err(|error| {
            RepositoryError::Corrupted(format!("task {}: {error}", row.id))
        })?;

        Ok(Self {
            id: TaskId::new(row.id),
            title: row.title,
            description: row.description,
            completed: row.completed,
            priority,
            due_date: row.due_date,
            categories: Categories::decode_optional(row.categories.as_deref()),
            created_at: row.created_at,
        })
    }
}

fn database_error(operation: &'static str) -> impl FnOnce(sqlx::Error) -> RepositoryError {
    move |error| {
        tracing::error!(operation, "Task query failed: {}", error);
        RepositoryError::Database(error.to_string())
    }
}

async fn fetch_by_id(pool: &MySqlPool, id: TaskId) -> Result<Option<Task>, RepositoryError> {
    // ENUM columns are cast so they decode as plain strings.
    sqlx::query_as::<_, TaskRow>(
        r"
        SELECT id, title, description, completed, CAST(priority AS CHAR) AS priority,
               due_date, categories, created_at
        FROM tasks
        WHERE id = ?
        ",
    )
    .bind(id.value())
    .fetch_optional(pool)
    .await
    .map_err(database_error("find_by_id"))?
    .map(Task::try_from)
    .transpose()
}

// =============================================================================
// MySqlTaskRepository
// =============================================================================

/// Task storage backed by the `tasks` table.
///
/// Every operation clones the pool handle into its future, so the returned
/// effect is `'static` and nothing runs until it is awaited.
#[derive(Debug, Clone)]
pub struct MySqlTaskRepository {
    pool: MySqlPool,
}

impl MySqlTaskRepository {
    #[must_use]
    pub const fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub const fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

impl TaskRepository for MySqlTaskRepository {
    fn list_all(&self) -> RepositoryFuture<Vec<Task>> {
        let pool = self.pool.clone();
        async move {
            sqlx::query_as::<_, TaskRow>(
                r"
                SELECT id, title, description, completed, CAST(priority AS CHAR) AS priority,
                       due_date, categories, created_at
                FROM tasks
                ORDER BY created_at DESC, id DESC
                ",
            )
            .fetch_all(&pool)
            .await
            .map_err(database_error("list_all"))?
            .into_iter()
            .map(Task::try_from)
            .collect()
        }
        .boxed()
    }

    fn find_by_id(&self, id: TaskId) -> RepositoryFuture<Option<Task>> {
        let pool = self.pool.clone();
        async move { fetch_by_id(&pool, id).await }.boxed()
    }

    fn insert(&self, new_task: NewTask) -> RepositoryFuture<Task> {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(
                r"
                INSERT INTO tasks (title, description, completed, priority, due_date, categories)
                VALUES (?, ?, ?, ?, ?, ?)
                ",
            )
            .bind(&new_task.title)
            .bind(&new_task.description)
            .bind(new_task.completed())
            .bind(new_task.priority().as_str())
            .bind(new_task.due_date)
            .bind(new_task.categories.encode())
            .execute(&pool)
            .await
            .map_err(database_error("insert"))?;

            let id = i64::try_from(result.last_insert_id())
                .map(TaskId::new)
                .map_err(|error| RepositoryError::Database(error.to_string()))?;

            fetch_by_id(&pool, id).await?.ok_or_else(|| {
                RepositoryError::Database(format!("inserted task {id} could not be read back"))
            })
        }
        .boxed()
    }

    fn update(&self, id: TaskId, patch: TaskPatch) -> RepositoryFuture<Option<Task>> {
        let pool = self.pool.clone();
        async move {
            let Some(existing) = fetch_by_id(&pool, id).await? else {
                return Ok(None);
            };
            let merged = patch.apply_to(existing);

            sqlx::query(
                r"
                UPDATE tasks
                SET title = ?, description = ?, completed = ?, priority = ?,
                    due_date = ?, categories = ?
                WHERE id = ?
                ",
            )
            .bind(&merged.title)
            .bind(&merged.description)
            .bind(merged.completed)
            .bind(merged.priority.as_str())
            .bind(merged.due_date)
            .bind(merged.categories.encode())
            .bind(id.value())
            .execute(&pool)
            .await
            .map_err(database_error("update"))?;

            fetch_by_id(&pool, id).await
        }
        .boxed()
    }

    fn set_completed(&self, id: TaskId, completed: bool) -> RepositoryFuture<Option<Task>> {
        let pool = self.pool.clone();
        async move {
            sqlx::query("UPDATE tasks SET completed = ? WHERE id = ?")
                .bind(completed)
                .bind(id.value())
                .execute(&pool)
                .await
                .map_err(database_error("set_completed"))?;

            fetch_by_id(&pool, id).await
        }
        .boxed()
    }

    fn delete(&self, id: TaskId) -> RepositoryFuture<bool> {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
                .bind(id.value())
                .execute(&pool)
                .await
                .map_err(database_error("delete"))?;

            Ok(result.rows_affected() > 0)
        }
        .boxed()
    }
}
