use std::sync::Arc;
use std::time::Duration;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use mercato_cache::{CacheAside, InMemoryStore};
use mercato_clients::ShopClient;
use mercato_core::ServiceClient;
use mercato_product::{app, ProductState, SCHEMA};
use mercato_security::{CurrentUser, Role};
use mercato_test::{memory_pool, spawn_router, TestApp};
use serde_json::json;
use sqlx::SqlitePool;

/// Shop 1 belongs to user 10; every other shop id is unknown.
async fn shop_stub() -> String {
    let router = Router::new().route(
        "/internal/shops/{id}",
        get(|Path(id): Path<i64>| async move {
            if id == 1 {
                Ok(Json(json!({"id": 1, "owner_id": 10, "name": "Pottery"})))
            } else {
                Err((StatusCode::NOT_FOUND, Json(json!({"error": "Shop not found"}))))
            }
        }),
    );
    spawn_router(router).await
}

async fn setup() -> (TestApp, SqlitePool) {
    let pool = memory_pool(SCHEMA).await;
    let shops = ShopClient::new(ServiceClient::new("shop", shop_stub().await, Duration::from_secs(2)));
    let cache = CacheAside::new(Arc::new(InMemoryStore::new()), "product", Duration::from_secs(60));
    (TestApp::new(app(ProductState::new(pool.clone(), shops, cache))), pool)
}

fn owner() -> CurrentUser {
    CurrentUser::new(10, "owner@example.com", vec![Role::Seller])
}

async fn create(app: &TestApp, name: &str, category: &str, stock: i64) -> i64 {
    app.post("/products")
        .as_user(&owner())
        .json(&json!({
            "shop_id": 1, "name": name, "category": category, "price": 12.5, "stock": stock
        }))
        .send()
        .await
        .assert_created()
        .json_path("id")
}

#[tokio::test]
async fn seller_creates_product_in_own_shop() {
    let (app, _) = setup().await;
    let id = create(&app, "Teapot", "kitchen", 4).await;
    app.get(&format!("/products/{id}"))
        .send()
        .await
        .assert_ok()
        .assert_json_path("name", "Teapot")
        .assert_json_path("stock", 4);
}

#[tokio::test]
async fn creating_in_foreign_or_unknown_shop_fails() {
    let (app, _) = setup().await;
    let other = CurrentUser::new(11, "other@example.com", vec![Role::Seller]);
    let body = json!({"shop_id": 1, "name": "Mug", "category": "kitchen", "price": 3.0, "stock": 1});
    app.post("/products").as_user(&other).json(&body).send().await.assert_forbidden();

    let body = json!({"shop_id": 2, "name": "Mug", "category": "kitchen", "price": 3.0, "stock": 1});
    app.post("/products").as_user(&owner()).json(&body).send().await.assert_not_found();

    let body = json!({"shop_id": 1, "name": "Mug", "category": "kitchen", "price": -1.0, "stock": 1});
    app.post("/products").as_user(&owner()).json(&body).send().await.assert_bad_request();
}

#[tokio::test]
async fn listing_filters_by_category_and_name() {
    let (app, _) = setup().await;
    create(&app, "Teapot", "kitchen", 4).await;
    create(&app, "Tea towel", "textiles", 9).await;
    create(&app, "Vase", "decor", 2).await;

    app.get("/products?category=kitchen")
        .send()
        .await
        .assert_ok()
        .assert_json_path("total_elements", 1);
    app.get("/products?q=TEA&size=1")
        .send()
        .await
        .assert_ok()
        .assert_json_path("total_elements", 2)
        .assert_json_path("content.len()", 1);
    app.get("/products?shop_id=1")
        .send()
        .await
        .assert_ok()
        .assert_json_path("total_elements", 3);
}

#[tokio::test]
async fn reads_are_cached_until_stock_changes() {
    let (app, pool) = setup().await;
    let id = create(&app, "Teapot", "kitchen", 4).await;
    let path = format!("/products/{id}");
    app.get(&path).send().await.assert_ok();

    // A write that bypasses the service is invisible while cached.
    sqlx::query("UPDATE products SET name = 'Renamed' WHERE id = ?")
        .bind(id)
        .execute(&pool)
        .await
        .unwrap();
    app.get(&path).send().await.assert_json_path("name", "Teapot");

    app.post(&format!("/internal/products/{id}/stock/decrease"))
        .json(&json!({"quantity": 1}))
        .send()
        .await
        .assert_no_content();
    app.get(&path)
        .send()
        .await
        .assert_json_path("name", "Renamed")
        .assert_json_path("stock", 3);
}

#[tokio::test]
async fn stock_decrease_is_conditional() {
    let (app, _) = setup().await;
    let id = create(&app, "Teapot", "kitchen", 2).await;

    app.get(&format!("/internal/products/{id}/availability?quantity=3"))
        .send()
        .await
        .assert_ok()
        .assert_json_path("available", false)
        .assert_json_path("stock", 2);

    app.post(&format!("/internal/products/{id}/stock/decrease"))
        .json(&json!({"quantity": 3}))
        .send()
        .await
        .assert_conflict();
    app.post("/internal/products/999/stock/decrease")
        .json(&json!({"quantity": 1}))
        .send()
        .await
        .assert_not_found();
    app.post(&format!("/internal/products/{id}/stock/increase"))
        .json(&json!({"quantity": 5}))
        .send()
        .await
        .assert_no_content();
    app.get(&format!("/internal/products/{id}/availability?quantity=3"))
        .send()
        .await
        .assert_json_path("available", true);
}

#[tokio::test]
async fn update_and_delete_evict_cache() {
    let (app, _) = setup().await;
    let id = create(&app, "Teapot", "kitchen", 2).await;
    let path = format!("/products/{id}");
    app.get(&path).send().await.assert_ok();

    app.put(&path)
        .as_user(&owner())
        .json(&json!({"name": "Kettle", "category": "kitchen", "price": 30.0, "stock": 2}))
        .send()
        .await
        .assert_ok();
    app.get(&path).send().await.assert_json_path("name", "Kettle");

    app.delete(&path).as_user(&owner()).send().await.assert_no_content();
    app.get(&path).send().await.assert_not_found();
}
