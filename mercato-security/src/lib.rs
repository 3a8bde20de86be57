//! Authentication and authorization for Mercato.
//!
//! The auth service issues HS256 access tokens with [`JwtIssuer`]. The gateway
//! validates them with [`JwtValidator`] and forwards the caller's identity to
//! upstream services as `x-user-*` headers ([`headers`]). Services read that
//! identity back with the [`CurrentUser`] extractor.

pub mod config;
pub mod error;
pub mod extractor;
pub mod headers;
pub mod jwt;
pub mod password;
pub mod roles;

pub use config::JwtConfig;
pub use error::SecurityError;
pub use extractor::{bearer_token, CurrentUser};
pub use jwt::{Claims, IssuedToken, JwtIssuer, JwtValidator};
pub use password::{hash_password, verify_password};
pub use roles::Role;
