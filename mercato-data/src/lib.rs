//! Data access helpers shared by the Mercato services.
//!
//! | Item | Description |
//! |------|-------------|
//! | [`DataError`] | Repository error, converted from `sqlx::Error` and into `HttpError` |
//! | [`Pageable`] / [`Page`] | Query-string pagination and the paged response envelope |
//! | [`pool`] | SQLite pool creation and schema bootstrap |
//! | [`DatabaseHealth`] | `HealthIndicator` running `SELECT 1` |

pub mod error;
pub mod health;
pub mod page;
pub mod pool;

pub use error::DataError;
pub use health::DatabaseHealth;
pub use page::{Page, Pageable};
