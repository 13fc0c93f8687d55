//! Utilities module
//!
//! Common utilities, error types, and helper functions

pub mod errors;
pub mod helpers;
pub mod logging;

pub use errors::{Result, StoreError};
