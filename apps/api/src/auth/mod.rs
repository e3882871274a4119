//! Authentication: identity-token exchange, session cookies, user resolution.

pub mod handlers;
pub mod session;
