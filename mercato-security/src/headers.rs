//! Identity headers set by the gateway for upstream services.
//!
//! The gateway removes any client-supplied copy of these headers before
//! forwarding, so upstreams can trust them.

pub const USER_ID: &str = "x-user-id";
pub const USER_EMAIL: &str = "x-user-email";
/// Comma-separated role names, e.g. `CUSTOMER,SELLER`.
pub const USER_ROLES: &str = "x-user-roles";

pub const ALL: [&str; 3] = [USER_ID, USER_EMAIL, USER_ROLES];
