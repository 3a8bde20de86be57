use std::time::Duration;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use mercato_cart::{app, CartState, SCHEMA};
use mercato_clients::ProductClient;
use mercato_core::ServiceClient;
use mercato_security::{CurrentUser, Role};
use mercato_test::{memory_pool, spawn_router, TestApp};
use serde_json::json;

/// Product 1: 12.50 with 5 in stock; product 2: 3.00 with 100 in stock.
async fn product_stub() -> String {
    let router = Router::new().route(
        "/products/{id}",
        get(|Path(id): Path<i64>| async move {
            let (name, price, stock) = match id {
                1 => ("Teapot", 12.5, 5),
                2 => ("Mug", 3.0, 100),
                _ => return Err((StatusCode::NOT_FOUND, Json(json!({"error": "Product not found"})))),
            };
            Ok(Json(json!({
                "id": id, "shop_id": 1, "name": name, "category": "kitchen",
                "price": price, "stock": stock
            })))
        }),
    );
    spawn_router(router).await
}

async fn setup() -> TestApp {
    let pool = memory_pool(SCHEMA).await;
    let products = ProductClient::new(ServiceClient::new(
        "product",
        product_stub().await,
        Duration::from_secs(2),
    ));
    TestApp::new(app(CartState::new(pool, products)))
}

fn customer() -> CurrentUser {
    CurrentUser::new(7, "c@example.com", vec![Role::Customer])
}

async fn add(app: &TestApp, product_id: i64, quantity: i64) -> mercato_test::TestResponse {
    app.post("/carts/me/items")
        .as_user(&customer())
        .json(&json!({"product_id": product_id, "quantity": quantity}))
        .send()
        .await
}

#[tokio::test]
async fn empty_cart_is_returned_for_new_users() {
    let app = setup().await;
    app.get("/carts/me")
        .as_user(&customer())
        .send()
        .await
        .assert_ok()
        .assert_json_path("items.len()", 0)
        .assert_json_path("total", 0.0);
}

#[tokio::test]
async fn adding_merges_lines_and_prices_them() {
    let app = setup().await;
    add(&app, 1, 2).await.assert_ok();
    add(&app, 2, 3).await.assert_ok();
    add(&app, 1, 1)
        .await
        .assert_ok()
        .assert_json_path("items.len()", 2)
        .assert_json_path("items[0].quantity", 3)
        .assert_json_path("items[0].line_total", 37.5)
        .assert_json_path("subtotal", 46.5);
}

#[tokio::test]
async fn quantity_above_stock_is_rejected() {
    let app = setup().await;
    add(&app, 1, 4).await.assert_ok();
    add(&app, 1, 2).await.assert_bad_request();
    add(&app, 99, 1).await.assert_not_found();
}

#[tokio::test]
async fn update_to_zero_removes_line() {
    let app = setup().await;
    add(&app, 1, 2).await.assert_ok();
    app.put("/carts/me/items/1")
        .as_user(&customer())
        .json(&json!({"quantity": 0}))
        .send()
        .await
        .assert_ok()
        .assert_json_path("items.len()", 0);
    app.delete("/carts/me/items/1")
        .as_user(&customer())
        .send()
        .await
        .assert_not_found();
}

#[tokio::test]
async fn promotion_is_applied_and_dropped_on_item_change() {
    let app = setup().await;
    add(&app, 1, 2).await.assert_ok();

    app.put("/internal/carts/7/promotion")
        .json(&json!({"promo_code": "SPRING", "discount": 5.0}))
        .send()
        .await
        .assert_ok()
        .assert_json_path("promo_code", "SPRING")
        .assert_json_path("total", 20.0);

    add(&app, 2, 1)
        .await
        .assert_ok()
        .assert_json_path("promo_code", serde_json::Value::Null)
        .assert_json_path("discount", 0.0);
}

#[tokio::test]
async fn promotion_on_empty_cart_is_rejected() {
    let app = setup().await;
    app.put("/internal/carts/7/promotion")
        .json(&json!({"promo_code": "SPRING", "discount": 5.0}))
        .send()
        .await
        .assert_bad_request();
}

#[tokio::test]
async fn clearing_cart_and_promotion() {
    let app = setup().await;
    add(&app, 1, 1).await.assert_ok();
    app.put("/internal/carts/7/promotion")
        .json(&json!({"promo_code": "SPRING", "discount": 2.5}))
        .send()
        .await
        .assert_ok();
    app.delete("/carts/me/promotion")
        .as_user(&customer())
        .send()
        .await
        .assert_ok()
        .assert_json_path("discount", 0.0);

    app.delete("/internal/carts/7").send().await.assert_no_content();
    app.get("/internal/carts/7")
        .send()
        .await
        .assert_ok()
        .assert_json_path("items.len()", 0);
}
