//! Task endpoint handlers.
//!
//! | Method | Path | Success |
//! |--------|------|---------|
//! | GET | `/tasks` | 200, every task, newest first |
//! | GET | `/tasks/{id}` | 200 |
//! | POST | `/tasks` | 201 |
//! | PUT | `/tasks/{id}` | 200, partial update |
//! | PATCH | `/tasks/{id}/toggle` | 200 |
//! | DELETE | `/tasks/{id}` | 200, confirmation message |

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;
use todo_domain::TaskId;

use crate::dto::{
    CreateTaskRequest, DeleteTaskResponse, HealthResponse, TaskResponse, ToggleTaskRequest,
    UpdateTaskRequest,
};
use crate::errors::ApiErrorResponse;
use crate::state::AppState;

type HandlerResult<T> = Result<T, ApiErrorResponse>;

#[derive(Debug, Deserialize)]
pub struct TaskPath {
    pub id: TaskId,
}

pub async fn list_tasks(State(state): State<AppState>) -> HandlerResult<Json<Vec<TaskResponse>>> {
    let tasks = state.task_repository.list_all().await?;
    Ok(Json(tasks.iter().map(TaskResponse::from).collect()))
}

pub async fn get_task(
    State(state): State<AppState>,
    Path(TaskPath { id }): Path<TaskPath>,
) -> HandlerResult<Json<TaskResponse>> {
    let task = state
        .task_repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiErrorResponse::task_not_found(id))?;
    Ok(Json(TaskResponse::from(task)))
}

pub async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> HandlerResult<(StatusCode, Json<TaskResponse>)> {
    let Json(request) = payload?;
    let new_task = request.into_new_task()?;

    let task = state.task_repository.insert(new_task).await?;
    tracing::debug!(task_id = %task.id, "Task created");

    Ok((StatusCode::CREATED, Json(TaskResponse::from(task))))
}

pub async fn update_task(
    State(state): State<AppState>,
    Path(TaskPath { id }): Path<TaskPath>,
    payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> HandlerResult<Json<TaskResponse>> {
    let Json(request) = payload?;
    let patch = request.into_patch()?;

    let task = state
        .task_repository
        .update(id, patch)
        .await?
        .ok_or_else(|| ApiErrorResponse::task_not_found(id))?;
    tracing::debug!(task_id = %id, "Task updated");

    Ok(Json(TaskResponse::from(task)))
}

pub async fn toggle_task(
    State(state): State<AppState>,
    Path(TaskPath { id }): Path<TaskPath>,
    payload: Result<Json<ToggleTaskRequest>, JsonRejection>,
) -> HandlerResult<Json<TaskResponse>> {
    let Json(request) = payload?;
    let completed = request.completed()?;

    let task = state
        .task_repository
        .set_completed(id, completed)
        .await?
        .ok_or_else(|| ApiErrorResponse::task_not_found(id))?;
    tracing::debug!(task_id = %id, completed, "Task toggled");

    Ok(Json(TaskResponse::from(task)))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(TaskPath { id }): Path<TaskPath>,
) -> HandlerResult<Json<DeleteTaskResponse>> {
    if !state.task_repository.delete(id).await? {
        return Err(ApiErrorResponse::task_not_found(id));
    }
    tracing::debug!(task_id = %id, "Task deleted");

    Ok(Json(DeleteTaskResponse::default()))
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}
