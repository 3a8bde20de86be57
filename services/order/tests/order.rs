use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use mercato_clients::{CartClient, NotificationClient, ProductClient, StockChange};
use mercato_core::ServiceClient;
use mercato_order::state::OrderClients;
use mercato_order::{app, OrderState, SCHEMA};
use mercato_security::{CurrentUser, Role};
use mercato_test::{memory_pool, spawn_router, TestApp};
use serde_json::{json, Value};

/// Cart, product and notification services in one stub.
#[derive(Clone, Default)]
struct Upstream {
    stock: Arc<Mutex<HashMap<i64, i64>>>,
    broken_stock: Arc<Mutex<HashSet<i64>>>,
    cart_cleared: Arc<AtomicBool>,
    notifications: Arc<Mutex<Vec<Value>>>,
}

impl Upstream {
    fn stock_of(&self, product_id: i64) -> i64 {
        self.stock.lock().unwrap()[&product_id]
    }

    fn kinds(&self) -> Vec<String> {
        self.notifications
            .lock()
            .unwrap()
            .iter()
            .map(|n| n["kind"].as_str().unwrap_or_default().to_string())
            .collect()
    }
}

async fn cart(Path(user_id): Path<i64>) -> Json<Value> {
    if user_id != 7 {
        return Json(json!({
            "user_id": user_id, "items": [], "subtotal": 0.0,
            "promo_code": null, "discount": 0.0, "total": 0.0
        }));
    }
    Json(json!({
        "user_id": 7,
        "items": [
            {"product_id": 1, "product_name": "Teapot", "unit_price": 10.0, "quantity": 2, "line_total": 20.0},
            {"product_id": 2, "product_name": "Mug", "unit_price": 5.0, "quantity": 1, "line_total": 5.0}
        ],
        "subtotal": 25.0, "promo_code": "SPRING", "discount": 5.0, "total": 20.0
    }))
}

async fn spawn_upstream(upstream: Upstream) -> String {
    upstream.stock.lock().unwrap().extend([(1, 5), (2, 5)]);
    let router = Router::new()
        .route(
            "/internal/carts/{user_id}",
            get(cart).delete(|State(up): State<Upstream>| async move {
                up.cart_cleared.store(true, Ordering::SeqCst);
                StatusCode::NO_CONTENT
            }),
        )
        .route(
            "/internal/products/{id}/availability",
            get(
                |State(up): State<Upstream>, Path(id): Path<i64>, Query(q): Query<HashMap<String, i64>>| async move {
                    let stock = up.stock_of(id);
                    Json(json!({"product_id": id, "available": stock >= q["quantity"], "stock": stock}))
                },
            ),
        )
        .route(
            "/internal/products/{id}/stock/decrease",
            post(
                |State(up): State<Upstream>, Path(id): Path<i64>, Json(c): Json<StockChange>| async move {
                    let mut stock = up.stock.lock().unwrap();
                    let current = stock[&id];
                    if up.broken_stock.lock().unwrap().contains(&id) || current < c.quantity {
                        return Err((StatusCode::CONFLICT, Json(json!({"error": "Insufficient stock"}))));
                    }
                    stock.insert(id, current - c.quantity);
                    Ok(StatusCode::NO_CONTENT)
                },
            ),
        )
        .route(
            "/internal/products/{id}/stock/increase",
            post(
                |State(up): State<Upstream>, Path(id): Path<i64>, Json(c): Json<StockChange>| async move {
                    *up.stock.lock().unwrap().entry(id).or_default() += c.quantity;
                    StatusCode::NO_CONTENT
                },
            ),
        )
        .route(
            "/internal/notifications",
            post(|State(up): State<Upstream>, Json(body): Json<Value>| async move {
                up.notifications.lock().unwrap().push(body);
                StatusCode::CREATED
            }),
        )
        .with_state(upstream);
    spawn_router(router).await
}

async fn setup() -> (TestApp, Upstream) {
    let upstream = Upstream::default();
    let url = spawn_upstream(upstream.clone()).await;
    let client = |name| ServiceClient::new(name, url.clone(), Duration::from_secs(2));
    let clients = OrderClients {
        carts: CartClient::new(client("cart")),
        products: ProductClient::new(client("product")),
        notifications: NotificationClient::new(client("notification")),
    };
    let pool = memory_pool(SCHEMA).await;
    (TestApp::new(app(OrderState::new(pool, clients))), upstream)
}

fn customer(id: i64) -> CurrentUser {
    CurrentUser::new(id, format!("c{id}@example.com"), vec![Role::Customer])
}

fn admin() -> CurrentUser {
    CurrentUser::new(1, "admin@example.com", vec![Role::Admin])
}

async fn place(app: &TestApp) -> mercato_test::TestResponse {
    app.post("/orders")
        .as_user(&customer(7))
        .json(&json!({"shipping_address": "1 Harbour Road, Leith"}))
        .send()
        .await
}

#[tokio::test]
async fn checkout_creates_pending_order_and_takes_stock() {
    let (app, upstream) = setup().await;
    let resp = place(&app)
        .await
        .assert_created()
        .assert_json_path("status", "PENDING")
        .assert_json_path("items.len()", 2)
        .assert_json_path("subtotal", 25.0)
        .assert_json_path("discount", 5.0)
        .assert_json_path("total", 20.0)
        .assert_json_path("promo_code", "SPRING");
    let id: i64 = resp.json_path("id");

    assert_eq!(upstream.stock_of(1), 3);
    assert_eq!(upstream.stock_of(2), 4);
    assert!(upstream.cart_cleared.load(Ordering::SeqCst));
    assert_eq!(upstream.kinds(), vec!["ORDER_CREATED"]);

    app.get(&format!("/orders/{id}"))
        .as_user(&customer(7))
        .send()
        .await
        .assert_ok();
    app.get(&format!("/orders/{id}"))
        .as_user(&customer(8))
        .send()
        .await
        .assert_forbidden();
}

#[tokio::test]
async fn empty_cart_cannot_be_checked_out() {
    let (app, _) = setup().await;
    app.post("/orders")
        .as_user(&customer(8))
        .json(&json!({"shipping_address": "1 Harbour Road, Leith"}))
        .send()
        .await
        .assert_bad_request();
}

#[tokio::test]
async fn unavailable_stock_rejects_before_writing() {
    let (app, upstream) = setup().await;
    upstream.stock.lock().unwrap().insert(1, 1);
    place(&app).await.assert_conflict();
    app.get("/orders")
        .as_user(&admin())
        .send()
        .await
        .assert_ok()
        .assert_json_path("total_elements", 0);
}

#[tokio::test]
async fn failed_reservation_restocks_and_cancels() {
    let (app, upstream) = setup().await;
    upstream.broken_stock.lock().unwrap().insert(2);

    place(&app).await.assert_conflict();

    assert_eq!(upstream.stock_of(1), 5);
    assert!(!upstream.cart_cleared.load(Ordering::SeqCst));
    app.get("/orders?status=CANCELLED")
        .as_user(&admin())
        .send()
        .await
        .assert_ok()
        .assert_json_path("total_elements", 1);
}

#[tokio::test]
async fn owner_cancel_restocks_once() {
    let (app, upstream) = setup().await;
    let id: i64 = place(&app).await.assert_created().json_path("id");
    let path = format!("/orders/{id}/cancel");

    app.post(&path)
        .as_user(&customer(8))
        .send()
        .await
        .assert_forbidden();
    app.post(&path)
        .as_user(&customer(7))
        .send()
        .await
        .assert_ok()
        .assert_json_path("status", "CANCELLED");
    assert_eq!(upstream.stock_of(1), 5);
    assert_eq!(upstream.stock_of(2), 5);

    app.post(&path)
        .as_user(&customer(7))
        .send()
        .await
        .assert_conflict();
    assert_eq!(upstream.stock_of(1), 5);
}

#[tokio::test]
async fn status_machine_is_enforced() {
    let (app, upstream) = setup().await;
    let id: i64 = place(&app).await.assert_created().json_path("id");
    let path = format!("/orders/{id}/status");
    let set = |status: &'static str| {
        app.put(&path)
            .as_user(&admin())
            .json(&json!({"status": status}))
    };

    set("SHIPPED").send().await.assert_conflict();
    set("PAID").send().await.assert_ok();
    set("SHIPPED").send().await.assert_ok();
    set("CANCELLED").send().await.assert_conflict();
    set("DELIVERED")
        .send()
        .await
        .assert_ok()
        .assert_json_path("status", "DELIVERED");

    app.put(&path)
        .as_user(&customer(7))
        .json(&json!({"status": "PAID"}))
        .send()
        .await
        .assert_forbidden();
    assert_eq!(
        upstream.kinds(),
        vec!["ORDER_CREATED", "ORDER_STATUS_CHANGED", "ORDER_STATUS_CHANGED", "ORDER_STATUS_CHANGED"]
    );
}

#[tokio::test]
async fn listings_and_internal_endpoints() {
    let (app, _) = setup().await;
    let id: i64 = place(&app).await.assert_created().json_path("id");

    app.get("/orders/me")
        .as_user(&customer(7))
        .send()
        .await
        .assert_ok()
        .assert_json_path("total_elements", 1);
    app.get("/orders/me")
        .as_user(&customer(8))
        .send()
        .await
        .assert_json_path("total_elements", 0);
    app.get("/orders").as_user(&customer(7)).send().await.assert_forbidden();

    app.get(&format!("/internal/orders/{id}"))
        .send()
        .await
        .assert_ok()
        .assert_json_path("user_id", 7);
    app.put(&format!("/internal/orders/{id}/status"))
        .json(&json!({"status": "PAID"}))
        .send()
        .await
        .assert_ok()
        .assert_json_path("status", "PAID");
}
