use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use mercato_core::HttpError;

async fn body_json(err: HttpError) -> (StatusCode, serde_json::Value) {
    let resp = err.into_response();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn not_found_renders_error_body() {
    let (status, body) = body_json(HttpError::NotFound("Product 7 not found".into())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Product 7 not found");
}

#[tokio::test]
async fn service_unavailable_is_503() {
    let (status, body) =
        body_json(HttpError::ServiceUnavailable("cart service unavailable".into())).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "cart service unavailable");
}

#[test]
fn from_status_round_trips_known_codes() {
    let err = HttpError::from_status(StatusCode::CONFLICT, "Insufficient stock");
    assert!(matches!(err, HttpError::Conflict(ref m) if m == "Insufficient stock"));
    assert_eq!(err.status(), StatusCode::CONFLICT);

    let teapot = HttpError::from_status(StatusCode::IM_A_TEAPOT, "short and stout");
    assert_eq!(teapot.status(), StatusCode::IM_A_TEAPOT);
}
