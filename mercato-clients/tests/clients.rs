use std::collections::HashMap;
use std::time::Duration;

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use mercato_clients::{OrderClient, OrderStatus, ProductClient, ShopClient, StockChange};
use mercato_core::{HttpError, ServiceClient};
use mercato_test::spawn_router;
use serde_json::{json, Value};

fn client(service: &'static str, base_url: &str) -> ServiceClient {
    ServiceClient::new(service, base_url, Duration::from_secs(2))
}

async fn product_stub() -> String {
    let router = Router::new()
        .route(
            "/products/{id}",
            get(|Path(id): Path<i64>| async move {
                if id == 1 {
                    Ok(Json(json!({
                        "id": 1, "shop_id": 7, "name": "Kettle", "category": "kitchen",
                        "price": 24.5, "stock": 3, "description": "Steel"
                    })))
                } else {
                    Err((StatusCode::NOT_FOUND, Json(json!({"error": "Product not found"}))))
                }
            }),
        )
        .route(
            "/internal/products/{id}/availability",
            get(|Path(id): Path<i64>, Query(q): Query<HashMap<String, i64>>| async move {
                let quantity = q.get("quantity").copied().unwrap_or(0);
                Json(json!({"product_id": id, "available": quantity <= 3, "stock": 3}))
            }),
        )
        .route(
            "/internal/products/{id}/stock/decrease",
            post(|Json(change): Json<StockChange>| async move {
                if change.quantity > 3 {
                    Err((StatusCode::CONFLICT, Json(json!({"error": "Insufficient stock"}))))
                } else {
                    Ok(StatusCode::NO_CONTENT)
                }
            }),
        );
    spawn_router(router).await
}

#[tokio::test]
async fn product_client_decodes_and_ignores_extra_fields() {
    let products = ProductClient::new(client("product", &product_stub().await));
    let product = products.get_product(1).await.unwrap();
    assert_eq!(product.name, "Kettle");
    assert_eq!(product.shop_id, 7);
}

#[tokio::test]
async fn upstream_4xx_is_relayed_with_message() {
    let products = ProductClient::new(client("product", &product_stub().await));
    match products.get_product(2).await {
        Err(HttpError::NotFound(msg)) => assert_eq!(msg, "Product not found"),
        other => panic!("expected NotFound, got {other:?}"),
    }
    match products.decrease_stock(1, 10).await {
        Err(HttpError::Conflict(msg)) => assert_eq!(msg, "Insufficient stock"),
        other => panic!("expected Conflict, got {other:?}"),
    }
    products.decrease_stock(1, 2).await.unwrap();
}

#[tokio::test]
async fn availability_sends_quantity_query() {
    let products = ProductClient::new(client("product", &product_stub().await));
    assert!(products.check_availability(1, 2).await.unwrap().available);
    assert!(!products.check_availability(1, 5).await.unwrap().available);
}

#[tokio::test]
async fn unreachable_upstream_is_service_unavailable() {
    let shops = ShopClient::new(client("shop", "http://127.0.0.1:1"));
    match shops.get_shop(1).await {
        Err(HttpError::ServiceUnavailable(msg)) => assert_eq!(msg, "shop service unavailable"),
        other => panic!("expected ServiceUnavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn upstream_5xx_is_service_unavailable() {
    let router = Router::new().route(
        "/internal/orders/{id}",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let orders = OrderClient::new(client("order", &spawn_router(router).await));
    let err = orders.get_order(1).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn order_status_update_round_trip() {
    let router = Router::new().route(
        "/internal/orders/{id}/status",
        axum::routing::put(|Path(id): Path<i64>, Json(body): Json<Value>| async move {
            Json(json!({
                "id": id, "user_id": 4, "status": body["status"], "subtotal": 10.0,
                "discount": 0.0, "total": 10.0, "promo_code": null, "items": []
            }))
        }),
    );
    let orders = OrderClient::new(client("order", &spawn_router(router).await));
    let order = orders.update_status(9, OrderStatus::Paid).await.unwrap();
    assert_eq!(order.id, 9);
    assert_eq!(order.status, OrderStatus::Paid);
}
