//! Data gateway to the task API.
//!
//! Each call reports failure through a sentinel instead of an error:
//! `Vec::new()` for the list, `None` for single-task calls and `false` for
//! delete. Causes are logged here and not surfaced to callers.

use std::future::Future;

use reqwest::RequestBuilder;
use serde::Serialize;
use serde::de::{DeserializeOwned, IgnoredAny};
use todo_domain::{Task, TaskId};

use crate::config::GatewayConfig;
use crate::form::TaskDraft;

/// One method per task endpoint.
pub trait TaskGateway {
    fn list_tasks(&self) -> impl Future<Output = Vec<Task>> + Send;

    fn get_task(&self, id: TaskId) -> impl Future<Output = Option<Task>> + Send;

    fn create_task(&self, draft: &TaskDraft) -> impl Future<Output = Option<Task>> + Send;

    fn update_task(
        &self,
        id: TaskId,
        draft: &TaskDraft,
    ) -> impl Future<Output = Option<Task>> + Send;

    fn toggle_task(&self, id: TaskId, completed: bool) -> impl Future<Output = Option<Task>> + Send;

    fn delete_task(&self, id: TaskId) -> impl Future<Output = bool> + Send;
}

#[derive(Serialize)]
struct ToggleBody {
    completed: bool,
}

/// [`TaskGateway`] over HTTP with `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTaskGateway {
    client: reqwest::Client,
    config: GatewayConfig,
}

impl HttpTaskGateway {
    #[must_use]
    pub fn new(config: GatewayConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    #[must_use]
    pub const fn with_client(client: reqwest::Client, config: GatewayConfig) -> Self {
        Self { client, config }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url)
    }

    /// Sends the request and decodes a 2xx JSON body; `None` on any failure.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        operation: &'static str,
    ) -> Option<T> {
        let request = match self.config.timeout {
            Some(timeout) => request.timeout(timeout),
            None => request,
        };

        let response = match request.send().await {
            Ok(response) => response,
            Err(error) => {
                tracing::error!(
                    operation,
                    timeout = error.is_timeout(),
                    connect = error.is_connect(),
                    "Request failed: {}",
                    error
                );
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::error!(operation, %status, "Request rejected");
            return None;
        }

        match response.json::<T>().await {
            Ok(body) => Some(body),
            Err(error) => {
                tracing::error!(operation, "Response could not be decoded: {}", error);
                None
            }
        }
    }
}

impl TaskGateway for HttpTaskGateway {
    async fn list_tasks(&self) -> Vec<Task> {
        self.execute(self.client.get(self.url("/tasks")), "list_tasks")
            .await
            .unwrap_or_default()
    }

    async fn get_task(&self, id: TaskId) -> Option<Task> {
        self.execute(self.client.get(self.url(&format!("/tasks/{id}"))), "get_task")
            .await
    }

    async fn create_task(&self, draft: &TaskDraft) -> Option<Task> {
        self.execute(self.client.post(self.url("/tasks")).json(draft), "create_task")
            .await
    }

    async fn update_task(&self, id: TaskId, draft: &TaskDraft) -> Option<Task> {
        self.execute(
            self.client.put(self.url(&format!("/tasks/{id}"))).json(draft),
            "update_task",
        )
        .await
    }

    async fn toggle_task(&self, id: TaskId, completed: bool) -> Option<Task> {
        self.execute(
            self.client
                .patch(self.url(&format!("/tasks/{id}/toggle")))
                .json(&ToggleBody { completed }),
            "toggle_task",
        )
        .await
    }

    async fn delete_task(&self, id: TaskId) -> bool {
        self.execute::<IgnoredAny>(
            self.client.delete(self.url(&format!("/tasks/{id}"))),
            "delete_task",
        )
        .await
        .is_some()
    }
}
