use std::future::Future;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use mercato_core::health::{HealthBuilder, HealthCheckStatus, HealthIndicator, HealthStatus};
use tower::ServiceExt;

struct AlwaysUp;
impl HealthIndicator for AlwaysUp {
    fn name(&self) -> &str {
        "up-check"
    }
    fn check(&self) -> impl Future<Output = HealthStatus> + Send {
        async { HealthStatus::Up }
    }
}

struct DiskWarning;
impl HealthIndicator for DiskWarning {
    fn name(&self) -> &str {
        "disk"
    }
    fn check(&self) -> impl Future<Output = HealthStatus> + Send {
        async { HealthStatus::Down("disk almost full".into()) }
    }
    fn affects_readiness(&self) -> bool {
        false
    }
}

#[tokio::test]
async fn aggregate_reports_down_when_any_check_fails() {
    let state = HealthBuilder::new().check(AlwaysUp).check(DiskWarning).build();
    let response = state.aggregate(false).await;
    assert_eq!(response.status, HealthCheckStatus::Down);
    assert_eq!(response.checks.len(), 2);
}

#[tokio::test]
async fn readiness_ignores_liveness_only_checks() {
    let state = HealthBuilder::new().check(AlwaysUp).check(DiskWarning).build();
    let response = state.aggregate(true).await;
    assert_eq!(response.status, HealthCheckStatus::Up);
    assert_eq!(response.checks.len(), 1);
}

#[tokio::test]
async fn health_routes_map_status_codes() {
    let router = HealthBuilder::new().check(AlwaysUp).check(DiskWarning).into_router();

    let health = router
        .clone()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(health.status(), StatusCode::SERVICE_UNAVAILABLE);

    let ready = router
        .clone()
        .oneshot(Request::get("/health/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(ready.status(), StatusCode::OK);

    let live = router
        .oneshot(Request::get("/health/live").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(live.status(), StatusCode::OK);
}
