use std::path::PathBuf;

use axum::extract::FromRef;
use mercato_core::{BoxError, MercatoConfig};
use sqlx::SqlitePool;

use crate::blob::BlobStore;
use crate::repository::FileRepository;
use crate::services::StorageService;

const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// `storage.root` and `storage.max.bytes`.
#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub root: PathBuf,
    pub max_bytes: u64,
}

impl StorageSettings {
    pub fn from_config(config: &MercatoConfig) -> Self {
        Self {
            root: PathBuf::from(config.get_or("storage.root", "./data/files".to_string())),
            max_bytes: config.get_or("storage.max.bytes", DEFAULT_MAX_BYTES),
        }
    }
}

#[derive(Clone, FromRef)]
pub struct StorageState {
    pub storage_service: StorageService,
    pub pool: SqlitePool,
}

impl StorageState {
    pub async fn new(pool: SqlitePool, settings: StorageSettings) -> std::io::Result<Self> {
        let blobs = BlobStore::open(&settings.root).await?;
        let service = StorageService::new(FileRepository::new(pool.clone()), blobs, settings.max_bytes);
        Ok(Self {
            storage_service: service,
            pool,
        })
    }

    pub async fn from_config(config: &MercatoConfig) -> Result<Self, BoxError> {
        let pool =
            mercato_data::pool::connect_from_config(config, "sqlite://storage.db", crate::SCHEMA)
                .await?;
        let settings = StorageSettings::from_config(config);
        tracing::info!(root = %settings.root.display(), max_bytes = settings.max_bytes, "File storage ready");
        Ok(Self::new(pool, settings).await?)
    }
}
