use std::time::Duration;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use mercato_clients::ProductClient;
use mercato_core::ServiceClient;
use mercato_review::{app, ReviewState, SCHEMA};
use mercato_security::{CurrentUser, Role};
use mercato_test::{memory_pool, spawn_router, TestApp, TestResponse};
use serde_json::{json, Value};

async fn product(Path(id): Path<i64>) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if id > 2 {
        return Err((StatusCode::NOT_FOUND, Json(json!({"error": "Product not found"}))));
    }
    Ok(Json(json!({
        "id": id, "shop_id": 1, "name": "Teapot", "category": "kitchen", "price": 10.0, "stock": 3
    })))
}

async fn setup() -> TestApp {
    let url = spawn_router(Router::new().route("/products/{id}", get(product))).await;
    let products = ProductClient::new(ServiceClient::new("product", url, Duration::from_secs(2)));
    let pool = memory_pool(SCHEMA).await;
    TestApp::new(app(ReviewState::new(pool, products)))
}

fn customer(id: i64) -> CurrentUser {
    CurrentUser::new(id, format!("c{id}@example.com"), vec![Role::Customer])
}

fn admin() -> CurrentUser {
    CurrentUser::new(1, "admin@example.com", vec![Role::Admin])
}

async fn review(app: &TestApp, user: i64, product_id: i64, rating: i64) -> TestResponse {
    app.post("/reviews")
        .as_user(&customer(user))
        .json(&json!({"product_id": product_id, "rating": rating, "comment": "  Pours well  "}))
        .send()
        .await
}

#[tokio::test]
async fn one_review_per_user_and_product() {
    let app = setup().await;

    review(&app, 7, 1, 4)
        .await
        .assert_created()
        .assert_json_path("rating", 4)
        .assert_json_path("comment", "Pours well")
        .assert_json_path("user_id", 7);
    review(&app, 7, 1, 5).await.assert_conflict();
    review(&app, 7, 2, 5).await.assert_created();
    review(&app, 8, 1, 2).await.assert_created();
}

#[tokio::test]
async fn review_requires_existing_product_and_valid_rating() {
    let app = setup().await;

    review(&app, 7, 99, 4).await.assert_not_found();
    review(&app, 7, 1, 0).await.assert_bad_request();
    review(&app, 7, 1, 6).await.assert_bad_request();
    app.post("/reviews")
        .as_user(&customer(7))
        .json(&json!({"product_id": 1, "rating": 3, "comment": "x".repeat(2001)}))
        .send()
        .await
        .assert_bad_request();
    app.post("/reviews")
        .json(&json!({"product_id": 1, "rating": 3}))
        .send()
        .await
        .assert_unauthorized();
}

#[tokio::test]
async fn product_reviews_are_public_and_newest_first() {
    let app = setup().await;
    for user in 7..10 {
        review(&app, user, 1, 5).await.assert_created();
    }

    app.get("/reviews/product/1?size=2")
        .send()
        .await
        .assert_ok()
        .assert_json_path("total_elements", 3)
        .assert_json_path("total_pages", 2)
        .assert_json_path("content.len()", 2)
        .assert_json_path("content[0].user_id", 9)
        .assert_json_path("content[1].user_id", 8);
}

#[tokio::test]
async fn summary_averages_ratings() {
    let app = setup().await;

    app.get("/reviews/product/1/summary")
        .send()
        .await
        .assert_ok()
        .assert_json_path("average_rating", 0.0)
        .assert_json_path("review_count", 0);

    review(&app, 7, 1, 5).await.assert_created();
    review(&app, 8, 1, 4).await.assert_created();
    review(&app, 9, 1, 2).await.assert_created();

    app.get("/reviews/product/1/summary")
        .send()
        .await
        .assert_ok()
        .assert_json_path("product_id", 1)
        .assert_json_path("average_rating", 3.67)
        .assert_json_path("review_count", 3);
}

#[tokio::test]
async fn only_the_author_edits_and_admin_may_delete() {
    let app = setup().await;
    let id: i64 = review(&app, 7, 1, 3).await.assert_created().json_path("id");
    let path = format!("/reviews/{id}");
    let edit = json!({"rating": 1, "comment": "Cracked"});

    app.put(&path).as_user(&customer(8)).json(&edit).send().await.assert_forbidden();
    app.put(&path).as_user(&admin()).json(&edit).send().await.assert_forbidden();
    app.put(&path)
        .as_user(&customer(7))
        .json(&edit)
        .send()
        .await
        .assert_ok()
        .assert_json_path("rating", 1)
        .assert_json_path("comment", "Cracked");

    app.delete(&path).as_user(&customer(8)).send().await.assert_forbidden();
    app.delete(&path).as_user(&admin()).send().await.assert_no_content();
    app.delete(&path).as_user(&admin()).send().await.assert_not_found();
}
