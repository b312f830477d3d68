#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use futures::FutureExt;
use http_body_util::BodyExt;
use serde_json::Value;
use todo_api::config::ApiConfig;
use todo_api::routes::create_router;
use todo_api::state::AppState;
use todo_domain::{NewTask, Task, TaskId, TaskPatch};
use todo_infrastructure::{RepositoryError, RepositoryFuture, TaskRepository};
use tower::ServiceExt;

pub fn create_test_app() -> Router {
    create_router(AppState::in_memory(), &ApiConfig::default())
}

/// Router whose store fails every call.
pub fn create_failing_app() -> Router {
    create_router(
        AppState::new(Arc::new(FailingTaskRepository)),
        &ApiConfig::default(),
    )
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

pub async fn send_raw(app: &Router, method: Method, uri: &str, body: &str) -> StatusCode {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap().status()
}

pub struct FailingTaskRepository;

fn failure<T: Send + 'static>() -> RepositoryFuture<T> {
    async { Err(RepositoryError::Database("connection refused".to_string())) }.boxed()
}

impl TaskRepository for FailingTaskRepository {
    fn list_all(&self) -> RepositoryFuture<Vec<Task>> {
        failure()
    }

    fn find_by_id(&self, _id: TaskId) -> RepositoryFuture<Option<Task>> {
        failure()
    }

    fn insert(&self, _new_task: NewTask) -> RepositoryFuture<Task> {
        failure()
    }

    fn update(&self, _id: TaskId, _patch: TaskPatch) -> RepositoryFuture<Option<Task>> {
        failure()
    }

    fn set_completed(&self, _id: TaskId, _completed: bool) -> RepositoryFuture<Option<Task>> {
        failure()
    }

    fn delete(&self, _id: TaskId) -> RepositoryFuture<bool> {
        failure()
    }
}
