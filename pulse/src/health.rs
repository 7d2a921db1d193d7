//! Named health checks aggregated into one readiness response.
//!
//! Each registered check answers "is this dependency reachable" under its own
//! deadline; the aggregate is healthy only if every component is.

use std::collections::BTreeMap;
use std::future::Future;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use futures::future::BoxFuture;
use serde::Serialize;

type CheckFn = Box<dyn Fn() -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync>;

#[derive(Default)]
pub struct HealthChecker {
    checks: Vec<(String, CheckFn)>,
}

impl HealthChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F, Fut>(mut self, name: &str, check: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.checks
            .push((name.to_string(), Box::new(move || Box::pin(check()))));
        self
    }

    pub async fn status(&self) -> HealthStatus {
        let mut components = BTreeMap::new();
        let mut healthy = true;
        for (name, check) in &self.checks {
            let component = match check().await {
                Ok(()) => ComponentHealth {
                    status: "up",
                    error: None,
                },
                Err(err) => {
                    healthy = false;
                    ComponentHealth {
                        status: "down",
                        error: Some(format!("{err:#}")),
                    }
                }
            };
            components.insert(name.clone(), component);
        }
        HealthStatus {
            healthy,
            components,
        }
    }
}

#[derive(Serialize)]
pub struct ComponentHealth {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub struct HealthStatus {
    pub healthy: bool,
    pub components: BTreeMap<String, ComponentHealth>,
}

impl IntoResponse for HealthStatus {
    fn into_response(self) -> Response {
        let code = if self.healthy {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        };
        (code, Json(self.components)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[tokio::test]
    async fn all_up_is_healthy() {
        let checker = HealthChecker::new()
            .register("db", || async { Ok(()) })
            .register("cache", || async { Ok(()) });

        let status = checker.status().await;
        assert!(status.healthy);
        assert_eq!(status.components["db"].status, "up");
        assert_eq!(status.components["cache"].status, "up");
    }

    #[tokio::test]
    async fn one_down_component_fails_the_aggregate() {
        let checker = HealthChecker::new()
            .register("db", || async { Ok(()) })
            .register("cache", || async { Err(anyhow!("connection refused")) });

        let status = checker.status().await;
        assert!(!status.healthy);
        assert_eq!(status.components["db"].status, "up");
        assert_eq!(status.components["cache"].status, "down");
        assert!(status.components["cache"]
            .error
            .as_deref()
            .unwrap()
            .contains("connection refused"));
    }
}
