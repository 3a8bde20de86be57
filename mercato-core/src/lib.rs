//! Shared runtime for the Mercato services.
//!
//! Every service is built the same way: load a [`MercatoConfig`], initialise
//! tracing, assemble an axum router from its controllers, merge the
//! [`health`] routes, wrap everything with [`layers::apply`] and hand it to
//! [`server::serve`].

pub mod client;
pub mod config;
pub mod error;
pub mod health;
pub mod layers;
pub mod server;
pub mod validation;

pub use client::ServiceClient;
pub use config::{ConfigError, MercatoConfig};
pub use error::{error_response, BoxError, HttpError};
pub use validation::Valid;

pub mod prelude {
    //! Re-exports of the types most handlers need.
    pub use crate::error::HttpError;
    pub use crate::validation::Valid;
    pub use axum::extract::{Path, Query, State};
    pub use axum::http::StatusCode;
    pub use axum::Json;
}
