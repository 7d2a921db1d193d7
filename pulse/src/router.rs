use std::future::ready;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::health::HealthChecker;

pub fn router(checker: Arc<HealthChecker>, export_prometheus: bool) -> Router {
    let status_router = Router::new()
        .route("/_liveness", get(|| ready(StatusCode::OK)))
        .route(
            "/_readiness",
            get(move || {
                let checker = checker.clone();
                async move { checker.status().await }
            }),
        );

    let router = Router::new()
        .route("/", get(index))
        .merge(status_router)
        .layer(TraceLayer::new_for_http());

    if export_prometheus {
        let recorder_handle = setup_metrics_recorder();
        router.route("/metrics", get(move || ready(recorder_handle.render())))
    } else {
        router
    }
}

async fn index() -> Json<serde_json::Value> {
    Json(json!({ "message": "Hello, World!" }))
}

fn setup_metrics_recorder() -> PrometheusHandle {
    PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install prometheus recorder")
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[tokio::test]
    async fn index_returns_hello_world() {
        let app = router(Arc::new(HealthChecker::new()), false);
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["message"], "Hello, World!");
    }

    #[tokio::test]
    async fn liveness_is_always_ok() {
        let app = router(Arc::new(HealthChecker::new()), false);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/_liveness")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn readiness_reflects_component_health() {
        let checker = HealthChecker::new()
            .register("db", || async { Ok(()) })
            .register("cache", || async { Err(anyhow!("down")) });
        let app = router(Arc::new(checker), false);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/_readiness")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["db"]["status"], "up");
        assert_eq!(value["cache"]["status"], "down");
    }
}
