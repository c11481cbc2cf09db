//! Inference pipeline port.
//!
//! Pipelines are blocking and stateful. The runtime drives them on a
//! blocking thread, so implementations only need to be `Send`.

use std::path::Path;

use thiserror::Error;

use crate::domain::{Backend, Frame};

/// Errors raised while building or running a pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The pipeline could not be built for this backend.
    #[error("failed to create {backend} pipeline: {reason}")]
    Construction { backend: Backend, reason: String },

    /// Running inference failed.
    #[error("inference failed: {0}")]
    Inference(String),

    /// The frame could not be converted into model input.
    #[error("invalid input: {0}")]
    Input(String),
}

/// A vision pipeline bound to one model and one backend.
pub trait InferencePipeline: Send {
    /// Run one inference and describe what came back.
    ///
    /// The returned text is diagnostic only (e.g. output shapes).
    fn infer(&mut self, frame: &Frame) -> Result<String, PipelineError>;
}

/// Builds pipelines per backend.
///
/// Implementations must not silently substitute one backend for another:
/// asking for [`Backend::Gpu`] on a host without a usable GPU is a
/// [`PipelineError::Construction`].
pub trait PipelineFactory: Send + Sync {
    fn create(
        &self,
        backend: Backend,
        model_path: &Path,
    ) -> Result<Box<dyn InferencePipeline>, PipelineError>;
}
