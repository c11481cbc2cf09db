//! `gpuprobe` command-line adapter.
//!
//! Resolves configuration from flags, environment variables and a `.env`
//! file, composes the real adapters in [`bootstrap`], and renders reports as
//! JSON or terminal text.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Dev dependency used by handler fakes
#[cfg(test)]
use async_trait as _;

// Used only by main.rs
use dotenvy as _;
use tokio as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap, missing_env_defaults};
pub use commands::Commands;
pub use error::CliError;
pub use parser::{Cli, ModelArgs};
pub use presentation::OutputFormat;
