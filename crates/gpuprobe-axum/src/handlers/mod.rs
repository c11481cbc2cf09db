//! HTTP request handlers.
//!
//! Handlers are thin wrappers that delegate to `ProbeService`.

pub mod health;
pub mod probe;
