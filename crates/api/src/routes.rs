//! Router assembly.

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, patch};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers;
use crate::state::AppState;

/// Builds the application router: task routes under `config.base_path`,
/// request tracing and CORS for the configured origin.
pub fn create_router(state: AppState, config: &ApiConfig) -> Router {
    let api = Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/tasks",
            get(handlers::list_tasks).post(handlers::create_task),
        )
        .route(
            "/tasks/{id}",
            get(handlers::get_task)
                .put(handlers::update_task)
                .delete(handlers::delete_task),
        )
        .route("/tasks/{id}/toggle", patch(handlers::toggle_task));

    let router = if config.base_path.is_empty() {
        Router::new().merge(api)
    } else {
        Router::new().nest(&config.base_path, api)
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer(&config.allowed_origin))
        .with_state(state)
}

fn create_cors_layer(allowed_origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    match HeaderValue::from_str(allowed_origin) {
        Ok(origin) => layer.allow_origin([origin]),
        Err(error) => {
            tracing::warn!(allowed_origin, "Ignoring invalid CORS origin: {}", error);
            layer
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use rstest::rstest;
    use tower::ServiceExt;

    #[rstest]
    #[tokio::test]
    async fn health_is_served_under_base_path() {
        let app = create_router(AppState::in_memory(), &ApiConfig::default());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "healthy");
    }

    #[rstest]
    #[tokio::test]
    async fn empty_base_path_serves_at_root() {
        let config = ApiConfig {
            base_path: String::new(),
            ..ApiConfig::default()
        };
        let app = create_router(AppState::in_memory(), &config);

        let response = app
            .oneshot(Request::builder().uri("/tasks").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[rstest]
    #[tokio::test]
    async fn cors_allows_configured_origin() {
        let app = create_router(AppState::in_memory(), &ApiConfig::default());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/tasks")
                    .header(header::ORIGIN, "http://localhost:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static("http://localhost:5173"))
        );
    }

    #[rstest]
    #[tokio::test]
    async fn cors_ignores_other_origins() {
        let app = create_router(AppState::in_memory(), &ApiConfig::default());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/tasks")
                    .header(header::ORIGIN, "http://evil.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none()
        );
    }
}
