//! Storage service: uploaded files live on the local filesystem under
//! `storage.root`, named by their id; metadata lives in SQLite.

pub mod blob;
pub mod controllers;
pub mod models;
pub mod repository;
pub mod services;
pub mod state;

use axum::Router;
use mercato_core::health::HealthBuilder;
use mercato_core::layers;
use mercato_data::DatabaseHealth;

pub use blob::BlobStore;
pub use state::{StorageSettings, StorageState};

pub const SCHEMA: &str = include_str!("schema.sql");

pub fn app(state: StorageState) -> Router {
    let health = HealthBuilder::new()
        .check(DatabaseHealth::new(state.pool.clone()))
        .into_router();
    let router = controllers::routes().with_state(state).merge(health);
    layers::apply(router)
}
