//! Axum HTTP handler adapter for gpuprobe.
//!
//! Exposes the probe as a small HTTP service for serverless-style
//! invocation: one request, one full report.
//!
//! # Routes
//!
//! - `GET /health` - liveness
//! - `POST /run` - provision the model, probe the host and benchmark both
//!   delegates
//! - `GET /environment` - capability report only
//!
//! Runs are serialized so two requests never benchmark the GPU at once.

#![deny(unused_crate_dependencies)]

// Dev dependencies used only by integration tests
#[cfg(test)]
use async_trait as _;
#[cfg(test)]
use http_body_util as _;
#[cfg(test)]
use tower as _;

pub mod bootstrap;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use bootstrap::{AxumContext, CorsConfig, ServerConfig, bootstrap, start_server};
pub use error::HttpError;
pub use routes::create_router;
pub use state::AppState;
