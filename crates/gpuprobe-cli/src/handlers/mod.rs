//! Command handlers.
//!
//! Each handler resolves its input, calls `ProbeService`, and renders the
//! result in the requested format.

pub mod benchmark;
pub mod environment;
pub mod inference;
pub mod probe;
pub mod serve;

#[cfg(test)]
pub(crate) mod fakes;
