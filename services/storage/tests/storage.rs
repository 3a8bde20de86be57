use mercato_security::{CurrentUser, Role};
use mercato_storage::{app, StorageSettings, StorageState, SCHEMA};
use mercato_test::{memory_pool, TestApp, TestResponse};
use tempfile::TempDir;

async fn setup(max_bytes: u64) -> (TestApp, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let settings = StorageSettings {
        root: dir.path().to_path_buf(),
        max_bytes,
    };
    let pool = memory_pool(SCHEMA).await;
    let state = StorageState::new(pool, settings).await.unwrap();
    (TestApp::new(app(state)), dir)
}

fn user(id: i64) -> CurrentUser {
    CurrentUser::new(id, format!("u{id}@example.com"), vec![Role::Seller])
}

fn admin() -> CurrentUser {
    CurrentUser::new(1, "admin@example.com", vec![Role::Admin])
}

async fn upload(app: &TestApp, owner: i64, name: &str, content_type: &str, data: &[u8]) -> TestResponse {
    app.post("/files")
        .as_user(&user(owner))
        .multipart_file("file", name, content_type, data)
        .send()
        .await
}

#[tokio::test]
async fn upload_then_download_inline() {
    let (app, dir) = setup(1024).await;

    let resp = upload(&app, 7, "teapot.png", "image/png", b"\x89PNG-bytes")
        .await
        .assert_created()
        .assert_json_path("owner_id", 7)
        .assert_json_path("original_name", "teapot.png")
        .assert_json_path("content_type", "image/png")
        .assert_json_path("size", 10);
    let id: String = resp.json_path("id");
    assert!(dir.path().join(&id).exists());

    let file = app.get(&format!("/files/{id}")).send().await.assert_ok();
    assert_eq!(file.header("content-type"), Some("image/png"));
    assert_eq!(file.header("content-disposition"), Some("inline; filename=\"teapot.png\""));
    assert_eq!(&file.body[..], b"\x89PNG-bytes");

    app.get(&format!("/files/{id}/metadata"))
        .as_user(&user(8))
        .send()
        .await
        .assert_ok()
        .assert_json_path("id", id.as_str());
}

#[tokio::test]
async fn empty_and_oversized_uploads_are_rejected() {
    let (app, dir) = setup(16).await;

    upload(&app, 7, "a.txt", "text/plain", b"").await.assert_bad_request();
    upload(&app, 7, "a.txt", "text/plain", &[b'x'; 17])
        .await
        .assert_status(axum::http::StatusCode::PAYLOAD_TOO_LARGE);
    upload(&app, 7, "a.txt", "text/plain", &[b'x'; 16]).await.assert_created();

    app.post("/files")
        .as_user(&user(7))
        .multipart_file("attachment", "a.txt", "text/plain", b"data")
        .send()
        .await
        .assert_bad_request();

    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[tokio::test]
async fn upload_requires_identity() {
    let (app, _dir) = setup(1024).await;

    app.post("/files")
        .multipart_file("file", "a.txt", "text/plain", b"data")
        .send()
        .await
        .assert_unauthorized();
}

#[tokio::test]
async fn my_files_are_paged_per_owner() {
    let (app, _dir) = setup(1024).await;
    upload(&app, 7, "a.txt", "text/plain", b"one").await.assert_created();
    upload(&app, 7, "b.txt", "text/plain", b"two").await.assert_created();
    upload(&app, 8, "c.txt", "text/plain", b"three").await.assert_created();

    app.get("/files/me?size=1")
        .as_user(&user(7))
        .send()
        .await
        .assert_ok()
        .assert_json_path("total_elements", 2)
        .assert_json_path("total_pages", 2)
        .assert_json_path("content.len()", 1);
}

#[tokio::test]
async fn delete_removes_row_and_blob() {
    let (app, dir) = setup(1024).await;
    let id: String = upload(&app, 7, "a.txt", "text/plain", b"data")
        .await
        .assert_created()
        .json_path("id");
    let path = format!("/files/{id}");

    app.delete(&path).as_user(&user(8)).send().await.assert_forbidden();
    app.delete(&path).as_user(&admin()).send().await.assert_no_content();

    assert!(!dir.path().join(&id).exists());
    app.get(&path).send().await.assert_not_found();
    app.delete(&path).as_user(&user(7)).send().await.assert_not_found();
}
