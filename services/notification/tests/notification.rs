use mercato_notification::{app, NotificationState, SCHEMA};
use mercato_security::{CurrentUser, Role};
use mercato_test::{memory_pool, TestApp};
use serde_json::json;

async fn setup() -> TestApp {
    let pool = memory_pool(SCHEMA).await;
    TestApp::new(app(NotificationState::new(pool)))
}

fn user(id: i64) -> CurrentUser {
    CurrentUser::new(id, format!("u{id}@example.com"), vec![Role::Customer])
}

async fn send(app: &TestApp, user_id: i64, kind: &str) -> i64 {
    app.post("/internal/notifications")
        .json(&json!({
            "user_id": user_id,
            "kind": kind,
            "title": "Order placed",
            "message": "Your order #1 has been placed."
        }))
        .send()
        .await
        .assert_created()
        .assert_json_path("read", false)
        .json_path("id")
}

#[tokio::test]
async fn internal_endpoint_validates_the_message() {
    let app = setup().await;

    app.post("/internal/notifications")
        .json(&json!({"user_id": 7, "kind": "SPAM", "title": "x", "message": "y"}))
        .send()
        .await
        .assert_bad_request();
    app.post("/internal/notifications")
        .json(&json!({"user_id": 7, "kind": "GENERAL", "title": "", "message": "y"}))
        .send()
        .await
        .assert_bad_request();
}

#[tokio::test]
async fn inbox_lists_only_the_callers_notifications() {
    let app = setup().await;
    send(&app, 7, "ORDER_CREATED").await;
    send(&app, 7, "PAYMENT_COMPLETED").await;
    send(&app, 8, "GENERAL").await;

    app.get("/notifications/me")
        .as_user(&user(7))
        .send()
        .await
        .assert_ok()
        .assert_json_path("total_elements", 2)
        .assert_json_path("content[0].kind", "PAYMENT_COMPLETED")
        .assert_json_path("content[1].kind", "ORDER_CREATED");

    app.get("/notifications/me").send().await.assert_unauthorized();
}

#[tokio::test]
async fn reading_updates_unread_count_and_filter() {
    let app = setup().await;
    let first = send(&app, 7, "ORDER_CREATED").await;
    send(&app, 7, "ORDER_STATUS_CHANGED").await;
    send(&app, 7, "GENERAL").await;
    let me = user(7);

    app.get("/notifications/me/unread-count")
        .as_user(&me)
        .send()
        .await
        .assert_ok()
        .assert_json_path("count", 3);

    app.put(&format!("/notifications/{first}/read"))
        .as_user(&me)
        .send()
        .await
        .assert_ok()
        .assert_json_path("read", true);

    app.get("/notifications/me?unread_only=true")
        .as_user(&me)
        .send()
        .await
        .assert_ok()
        .assert_json_path("total_elements", 2);

    app.put("/notifications/me/read-all")
        .as_user(&me)
        .send()
        .await
        .assert_ok()
        .assert_json_path("updated", 2);
    app.get("/notifications/me/unread-count")
        .as_user(&me)
        .send()
        .await
        .assert_json_path("count", 0);
    app.get("/notifications/me")
        .as_user(&me)
        .send()
        .await
        .assert_json_path("total_elements", 3);
}

#[tokio::test]
async fn other_users_notifications_are_not_found() {
    let app = setup().await;
    let id = send(&app, 7, "GENERAL").await;
    let path = format!("/notifications/{id}");

    app.put(&format!("{path}/read")).as_user(&user(8)).send().await.assert_not_found();
    app.delete(&path).as_user(&user(8)).send().await.assert_not_found();
    app.get(&path).as_user(&user(8)).send().await.assert_not_found();

    app.get(&path).as_user(&user(7)).send().await.assert_ok();
    app.delete(&path).as_user(&user(7)).send().await.assert_no_content();
    app.get(&path).as_user(&user(7)).send().await.assert_not_found();
}
