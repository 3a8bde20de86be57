pub mod file_controller;

use axum::Router;

use crate::state::StorageState;

pub fn routes() -> Router<StorageState> {
    Router::new().merge(file_controller::routes())
}
