//! Health check endpoints with liveness/readiness probes.
//!
//! | Path               | Description                                |
//! |--------------------|--------------------------------------------|
//! | `GET /health`      | Aggregated status, 200 if UP, 503 if DOWN  |
//! | `GET /health/live` | Liveness probe, always 200                 |
//! | `GET /health/ready`| Readiness probe, 200 if all checks pass    |

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

/// Result of a single health check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Up,
    Down(String),
}

impl HealthStatus {
    pub fn is_up(&self) -> bool {
        matches!(self, HealthStatus::Up)
    }
}

/// A named health indicator (database, cache, upstream...).
pub trait HealthIndicator: Send + Sync + 'static {
    fn name(&self) -> &str;

    fn check(&self) -> impl Future<Output = HealthStatus> + Send;

    /// Whether this check affects the readiness probe (default: `true`).
    fn affects_readiness(&self) -> bool {
        true
    }
}

/// Object-safe wrapper for [`HealthIndicator`].
trait ErasedIndicator: Send + Sync + 'static {
    fn name(&self) -> &str;
    fn check(&self) -> Pin<Box<dyn Future<Output = HealthStatus> + Send + '_>>;
    fn affects_readiness(&self) -> bool;
}

impl<T: HealthIndicator> ErasedIndicator for T {
    fn name(&self) -> &str {
        HealthIndicator::name(self)
    }

    fn check(&self) -> Pin<Box<dyn Future<Output = HealthStatus> + Send + '_>> {
        Box::pin(HealthIndicator::check(self))
    }

    fn affects_readiness(&self) -> bool {
        HealthIndicator::affects_readiness(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthCheckStatus {
    Up,
    Down,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthCheckStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: HealthCheckStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub checks: Vec<HealthCheck>,
    pub uptime_seconds: u64,
}

/// Builder for assembling health checks into a router.
#[derive(Default)]
pub struct HealthBuilder {
    checks: Vec<Box<dyn ErasedIndicator>>,
}

impl HealthBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a health check.
    pub fn check<H: HealthIndicator>(mut self, indicator: H) -> Self {
        self.checks.push(Box::new(indicator));
        self
    }

    pub fn build(self) -> HealthState {
        HealthState {
            checks: self.checks,
            start_time: Instant::now(),
        }
    }

    /// Build the `/health` routes, ready to merge into a service router.
    pub fn into_router(self) -> Router {
        let state = Arc::new(self.build());
        Router::new()
            .route("/health", get(health_handler))
            .route("/health/live", get(liveness_handler))
            .route("/health/ready", get(readiness_handler))
            .with_state(state)
    }
}

pub struct HealthState {
    checks: Vec<Box<dyn ErasedIndicator>>,
    start_time: Instant,
}

impl HealthState {
    /// Run the registered checks. With `readiness_only`, checks that do not
    /// affect readiness are skipped.
    pub async fn aggregate(&self, readiness_only: bool) -> HealthResponse {
        let mut checks = Vec::with_capacity(self.checks.len());
        let mut all_up = true;

        for indicator in &self.checks {
            if readiness_only && !indicator.affects_readiness() {
                continue;
            }
            let start = Instant::now();
            let status = indicator.check().await;
            let duration_ms = start.elapsed().as_millis() as u64;

            let (check_status, reason) = match status {
                HealthStatus::Up => (HealthCheckStatus::Up, None),
                HealthStatus::Down(reason) => {
                    all_up = false;
                    tracing::warn!(check = indicator.name(), %reason, "Health check failed");
                    (HealthCheckStatus::Down, Some(reason))
                }
            };
            checks.push(HealthCheck {
                name: indicator.name().to_string(),
                status: check_status,
                reason,
                duration_ms,
            });
        }

        HealthResponse {
            status: if all_up {
                HealthCheckStatus::Up
            } else {
                HealthCheckStatus::Down
            },
            checks,
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }
}

fn to_response(response: HealthResponse) -> impl IntoResponse {
    let status_code = match response.status {
        HealthCheckStatus::Up => StatusCode::OK,
        HealthCheckStatus::Down => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status_code, Json(response))
}

async fn health_handler(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    to_response(state.aggregate(false).await)
}

async fn liveness_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

async fn readiness_handler(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    to_response(state.aggregate(true).await)
}
