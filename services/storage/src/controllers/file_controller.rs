use axum::extract::multipart::{Field, Multipart, MultipartError};
use axum::extract::DefaultBodyLimit;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use mercato_core::prelude::*;
use mercato_data::{Page, Pageable};
use mercato_security::CurrentUser;
use tracing::debug;

use crate::models::{FileMetadata, Upload};
use crate::services::StorageService;
use crate::state::StorageState;

const FILE_FIELD: &str = "file";

pub fn routes() -> Router<StorageState> {
    Router::new()
        // size is enforced while reading the part
        .route("/files", post(upload).layer(DefaultBodyLimit::disable()))
        .route("/files/me", get(list_mine))
        .route("/files/{id}", get(download).delete(delete))
        .route("/files/{id}/metadata", get(metadata))
}

fn multipart_error(e: MultipartError) -> HttpError {
    debug!(error = %e, "Malformed multipart body");
    HttpError::BadRequest(format!("Invalid multipart body: {}", e.body_text()))
}

async fn read_limited(mut field: Field<'_>, service: &StorageService) -> Result<Vec<u8>, HttpError> {
    let mut data = Vec::new();
    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        if (data.len() + chunk.len()) as u64 > service.max_bytes() {
            return Err(service.too_large());
        }
        data.extend_from_slice(&chunk);
    }
    Ok(data)
}

async fn upload(
    State(service): State<StorageService>,
    user: CurrentUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<FileMetadata>), HttpError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let original_name = field
            .file_name()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or("upload")
            .to_string();
        let content_type = field.content_type().map(String::from);
        let data = read_limited(field, &service).await?;

        let file = service
            .upload(
                &user,
                Upload {
                    original_name,
                    content_type,
                    data,
                },
            )
            .await?;
        return Ok((StatusCode::CREATED, Json(file)));
    }
    Err(HttpError::BadRequest(format!("Missing '{FILE_FIELD}' part")))
}

fn inline_disposition(name: &str) -> HeaderValue {
    let safe: String = name
        .chars()
        .filter(|c| c.is_ascii() && !c.is_ascii_control() && *c != '"' && *c != '\\')
        .collect();
    HeaderValue::from_str(&format!("inline; filename=\"{safe}\""))
        .unwrap_or_else(|_| HeaderValue::from_static("inline"))
}

async fn download(
    State(service): State<StorageService>,
    Path(id): Path<String>,
) -> Result<Response, HttpError> {
    let (file, data) = service.download(&id).await?;
    let content_type = HeaderValue::from_str(&file.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));
    let headers = [
        (CONTENT_TYPE, content_type),
        (CONTENT_DISPOSITION, inline_disposition(&file.original_name)),
    ];
    Ok((headers, data).into_response())
}

async fn metadata(
    State(service): State<StorageService>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<FileMetadata>, HttpError> {
    service.metadata(&id).await.map(Json)
}

async fn list_mine(
    State(service): State<StorageService>,
    user: CurrentUser,
    Query(pageable): Query<Pageable>,
) -> Result<Json<Page<FileMetadata>>, HttpError> {
    service.list_mine(&user, &pageable).await.map(Json)
}

async fn delete(
    State(service): State<StorageService>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode, HttpError> {
    service.delete(&user, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
