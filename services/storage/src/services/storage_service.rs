use bytes::Bytes;
use mercato_core::HttpError;
use mercato_data::{Page, Pageable};
use mercato_security::CurrentUser;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::blob::BlobStore;
use crate::models::{FileMetadata, Upload};
use crate::repository::FileRepository;

#[derive(Clone)]
pub struct StorageService {
    files: FileRepository,
    blobs: BlobStore,
    max_bytes: u64,
}

fn not_found() -> HttpError {
    HttpError::NotFound("File not found".into())
}

fn io_error(e: std::io::Error) -> HttpError {
    error!(error = %e, "File storage I/O failed");
    HttpError::Internal("File storage error".into())
}

impl StorageService {
    pub fn new(files: FileRepository, blobs: BlobStore, max_bytes: u64) -> Self {
        Self {
            files,
            blobs,
            max_bytes,
        }
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    pub fn too_large(&self) -> HttpError {
        HttpError::PayloadTooLarge(format!("File exceeds the {} byte limit", self.max_bytes))
    }

    /// The blob is written before the metadata row and removed again if the
    /// row cannot be stored.
    pub async fn upload(&self, user: &CurrentUser, upload: Upload) -> Result<FileMetadata, HttpError> {
        if upload.data.is_empty() {
            return Err(HttpError::BadRequest("File is empty".into()));
        }
        if upload.data.len() as u64 > self.max_bytes {
            return Err(self.too_large());
        }

        let id = Uuid::new_v4().to_string();
        let content_type = upload.resolved_content_type();
        self.blobs.write(&id, &upload.data).await.map_err(io_error)?;

        let stored = self
            .files
            .insert(
                &id,
                user.id,
                &upload.original_name,
                &content_type,
                upload.data.len() as i64,
            )
            .await;
        let file = match stored {
            Ok(file) => file,
            Err(e) => {
                if let Err(io) = self.blobs.remove(&id).await {
                    warn!(file_id = %id, error = %io, "Orphan blob left behind");
                }
                return Err(e.into());
            }
        };

        info!(file_id = %file.id, owner_id = user.id, size = file.size, content_type = %file.content_type, "File stored");
        Ok(file)
    }

    pub async fn metadata(&self, id: &str) -> Result<FileMetadata, HttpError> {
        self.files.find_by_id(id).await?.ok_or_else(not_found)
    }

    pub async fn download(&self, id: &str) -> Result<(FileMetadata, Bytes), HttpError> {
        let file = self.metadata(id).await?;
        match self.blobs.read(id).await.map_err(io_error)? {
            Some(data) => Ok((file, data)),
            None => {
                warn!(file_id = %id, "Metadata without blob");
                Err(not_found())
            }
        }
    }

    pub async fn list_mine(&self, user: &CurrentUser, pageable: &Pageable) -> Result<Page<FileMetadata>, HttpError> {
        let (files, total) = self.files.list_by_owner(user.id, pageable).await?;
        Ok(Page::new(files, pageable, total))
    }

    pub async fn delete(&self, user: &CurrentUser, id: &str) -> Result<(), HttpError> {
        let file = self.metadata(id).await?;
        user.require_owner_or_admin(file.owner_id)?;
        self.files.delete(id).await?;
        self.blobs.remove(id).await.map_err(io_error)?;
        info!(file_id = %id, by = user.id, "File deleted");
        Ok(())
    }
}
