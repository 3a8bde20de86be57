use mercato_auth::{app, AuthState, SCHEMA};
use mercato_security::{CurrentUser, JwtConfig, JwtValidator, Role};
use mercato_test::{memory_pool, TestApp, TestJwt};
use serde_json::json;

async fn setup() -> TestApp {
    let pool = memory_pool(SCHEMA).await;
    TestApp::new(app(AuthState::new(pool, JwtConfig::new(TestJwt::SECRET))))
}

async fn register(app: &TestApp, email: &str) -> i64 {
    app.post("/auth/register")
        .json(&json!({"email": email, "password": "s3cret-pass", "full_name": "Ada"}))
        .send()
        .await
        .assert_created()
        .json_path("id")
}

async fn login(app: &TestApp, email: &str) -> (String, String) {
    let resp = app
        .post("/auth/login")
        .json(&json!({"email": email, "password": "s3cret-pass"}))
        .send()
        .await
        .assert_ok()
        .assert_json_path("token_type", "Bearer");
    (resp.json_path("access_token"), resp.json_path("refresh_token"))
}

#[tokio::test]
async fn register_then_login_issues_valid_access_token() {
    let app = setup().await;
    let id = register(&app, "ada@example.com").await;
    let (access, refresh) = login(&app, "ADA@example.com").await;

    let claims = JwtValidator::new(&JwtConfig::new(TestJwt::SECRET))
        .validate(&access)
        .unwrap();
    assert_eq!(claims.sub, id.to_string());
    assert_eq!(claims.roles, vec![Role::Customer]);
    assert_eq!(refresh.len(), 43);
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let app = setup().await;
    register(&app, "ada@example.com").await;
    app.post("/auth/register")
        .json(&json!({"email": "ada@example.com", "password": "another-pass", "full_name": "Ada"}))
        .send()
        .await
        .assert_conflict();
}

#[tokio::test]
async fn admin_cannot_self_register_and_short_password_is_rejected() {
    let app = setup().await;
    app.post("/auth/register")
        .json(&json!({"email": "root@example.com", "password": "s3cret-pass", "full_name": "Root", "role": "ADMIN"}))
        .send()
        .await
        .assert_bad_request();
    app.post("/auth/register")
        .json(&json!({"email": "bob@example.com", "password": "short", "full_name": "Bob"}))
        .send()
        .await
        .assert_bad_request()
        .assert_json_path("details[0].field", "password");
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let app = setup().await;
    register(&app, "ada@example.com").await;
    app.post("/auth/login")
        .json(&json!({"email": "ada@example.com", "password": "wrong-pass"}))
        .send()
        .await
        .assert_unauthorized();
}

#[tokio::test]
async fn refresh_rotates_and_revokes_old_token() {
    let app = setup().await;
    register(&app, "ada@example.com").await;
    let (_, refresh) = login(&app, "ada@example.com").await;

    let next: String = app
        .post("/auth/refresh")
        .json(&json!({"refresh_token": refresh}))
        .send()
        .await
        .assert_ok()
        .json_path("refresh_token");
    assert_ne!(next, refresh);

    app.post("/auth/refresh")
        .json(&json!({"refresh_token": refresh}))
        .send()
        .await
        .assert_unauthorized();
}

#[tokio::test]
async fn logout_is_idempotent() {
    let app = setup().await;
    register(&app, "ada@example.com").await;
    let (_, refresh) = login(&app, "ada@example.com").await;

    for _ in 0..2 {
        app.post("/auth/logout")
            .json(&json!({"refresh_token": refresh}))
            .send()
            .await
            .assert_no_content();
    }
    app.post("/auth/refresh")
        .json(&json!({"refresh_token": refresh}))
        .send()
        .await
        .assert_unauthorized();
}

#[tokio::test]
async fn me_requires_identity() {
    let app = setup().await;
    let id = register(&app, "ada@example.com").await;
    app.get("/auth/me").send().await.assert_unauthorized();
    app.get("/auth/me")
        .as_user(&CurrentUser::new(id, "ada@example.com", vec![Role::Customer]))
        .send()
        .await
        .assert_ok()
        .assert_json_path("email", "ada@example.com");
}

#[tokio::test]
async fn user_administration_is_admin_only() {
    let app = setup().await;
    let id = register(&app, "ada@example.com").await;
    let admin = CurrentUser::new(999, "admin@example.com", vec![Role::Admin]);
    let customer = CurrentUser::new(id, "ada@example.com", vec![Role::Customer]);

    app.get("/auth/users").as_user(&customer).send().await.assert_forbidden();
    app.get("/auth/users?size=5")
        .as_user(&admin)
        .send()
        .await
        .assert_ok()
        .assert_json_path("total_elements", 1)
        .assert_json_path("size", 5);

    app.put(&format!("/auth/users/{id}/role"))
        .as_user(&admin)
        .json(&json!({"role": "SELLER"}))
        .send()
        .await
        .assert_ok()
        .assert_json_path("role", "SELLER");
    app.put("/auth/users/12345/role")
        .as_user(&admin)
        .json(&json!({"role": "SELLER"}))
        .send()
        .await
        .assert_not_found();
}
