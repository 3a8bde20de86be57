//! API gateway: the single public entry point.
//!
//! Every `/api/<segment>/...` request is matched against the [`RouteTable`],
//! authenticated by [`auth::authenticate`] unless [`PublicPaths`] allows it
//! anonymously, and forwarded by [`proxy::forward`] with the `/api` prefix
//! removed.

pub mod auth;
pub mod proxy;
pub mod public;
pub mod routes;
pub mod state;

use axum::{middleware, Router};
use mercato_core::health::HealthBuilder;
use mercato_core::layers;

pub use public::{PublicPaths, PublicRule};
pub use routes::RouteTable;
pub use state::GatewayState;

pub fn app(state: GatewayState) -> Router {
    let proxy = Router::new()
        .fallback(proxy::forward)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::authenticate,
        ))
        .with_state(state);
    layers::apply(HealthBuilder::new().into_router().merge(proxy))
}
