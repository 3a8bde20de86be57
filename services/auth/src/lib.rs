//! Auth service: user accounts, access tokens and rotating refresh tokens.

pub mod controllers;
pub mod models;
pub mod repository;
pub mod services;
pub mod state;

use axum::Router;
use mercato_core::health::HealthBuilder;
use mercato_core::layers;
use mercato_data::DatabaseHealth;

pub use state::AuthState;

pub const SCHEMA: &str = include_str!("schema.sql");

pub fn app(state: AuthState) -> Router {
    let health = HealthBuilder::new()
        .check(DatabaseHealth::new(state.pool.clone()))
        .into_router();
    let router = controllers::routes().with_state(state).merge(health);
    layers::apply(router)
}
