//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define what the core expects from infrastructure: model retrieval,
//! host inspection, inference pipelines and frame sources. Implementations
//! live in `gpuprobe-runtime` and `gpuprobe-download`.
//!
//! # Design Rules
//!
//! - Only domain types in signatures; no `ort`, `reqwest` or process types
//! - Blocking seams (`InferencePipeline`, `FrameSource`) are plain traits;
//!   I/O seams (`ModelProvisionerPort`, `CapabilityProbePort`) are async

pub mod capability_probe;
pub mod frame_source;
pub mod pipeline;
pub mod provisioner;
pub mod runner;

use thiserror::Error;

pub use capability_probe::CapabilityProbePort;
pub use frame_source::{FrameSource, StreamError, StreamOpener};
pub use pipeline::{InferencePipeline, PipelineError, PipelineFactory};
pub use provisioner::{ModelProvisionerPort, ProvisionError};
pub use runner::ProbeRunnerPort;

/// Core error type for run-level failures.
///
/// Delegate and probe failures never appear here; they are data inside the
/// report. Adapters map this to exit codes or HTTP status codes.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The model artifact could not be made available.
    #[error(transparent)]
    Provision(#[from] ProvisionError),

    /// Invalid configuration supplied by a wrapper.
    #[error("Configuration error: {0}")]
    Configuration(String),
}
