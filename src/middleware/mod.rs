//! Middleware module
//!
//! Request-level authentication and authorization layers

pub mod auth;

pub use auth::{require_admin, require_auth, CurrentUser};
